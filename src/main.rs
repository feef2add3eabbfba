fn main() {
    if let Err(e) = sales_etl::cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
