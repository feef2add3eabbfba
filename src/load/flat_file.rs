//! Flat-file loader: serialise a dataset as delimited text.

use crate::errors::AppResult;
use crate::types::{Dataset, Value};
use csv::Writer;
use std::path::Path;
use tracing::info;

/// Write the dataset to `path` as comma-delimited text with a header row
/// and no index column, overwriting any existing file.
pub fn write(data: &Dataset, path: &Path) -> AppResult<()> {
    info!("Saving to CSV: {}", path.display());

    let mut writer = Writer::from_path(path)?;
    writer.write_record(data.columns())?;
    for row in data.rows() {
        writer.write_record(row.iter().map(Value::to_field))?;
    }
    writer.flush()?;

    info!("CSV export complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_write_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");

        let mut data = Dataset::new(vec![
            "Order_Date".to_string(),
            "Sales".to_string(),
            "Profit".to_string(),
        ]);
        let dt = NaiveDate::from_ymd_opt(2023, 1, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        data.push_row(vec![
            Value::DateTime(dt),
            Value::Number(120.0),
            Value::Missing,
        ])
        .unwrap();

        write(&data, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("Order_Date,Sales,Profit"));
        assert_eq!(lines.next(), Some("2023-01-05 00:00:00,120,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_empty_dataset_is_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");

        let data = Dataset::new(vec!["Order_Date".to_string(), "Sales".to_string()]);
        write(&data, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Order_Date,Sales\n");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale contents\nmore stale\n").unwrap();

        let data = Dataset::new(vec!["Sales".to_string()]);
        write(&data, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "Sales\n");
    }
}
