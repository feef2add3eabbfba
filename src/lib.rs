//! Sales ETL Pipeline
//!

pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod load;
pub mod pipeline;
pub mod transform;
pub mod types;
