//! Extraction stage: read a source file's first sheet into a `Dataset`,
//! using the header row as column names.
//!
//! Spreadsheets (`.xlsx`, `.xls`, `.xlsb`, `.ods`) go through calamine;
//! `.csv` goes through the csv reader. The dispatch is by file extension.

use crate::errors::{AppError, AppResult};
use crate::types::{Dataset, Value};
use calamine::{open_workbook_auto, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

/// Read the source file into a `Dataset`.
///
/// Fails with `AppError::SourceNotFound` when `path` does not resolve to a
/// readable file, before anything is opened.
pub fn extract(path: &Path) -> AppResult<Dataset> {
    info!("Extracting data from {}...", path.display());

    if !path.is_file() {
        return Err(AppError::SourceNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let data = match extension.as_str() {
        "xlsx" | "xls" | "xlsb" | "ods" => extract_spreadsheet(path)?,
        "csv" => extract_csv(path)?,
        other => {
            return Err(AppError::Config(format!(
                "Unsupported source format '{}' for {}",
                other,
                path.display()
            )));
        }
    };

    info!("Extracted {} rows", data.len());
    Ok(data)
}

/// First sheet of a workbook; first row is the header.
fn extract_spreadsheet(path: &Path) -> AppResult<Dataset> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::InvalidData(format!("No sheets in {}", path.display())))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header = match rows.next() {
        Some(cells) => cells
            .iter()
            .map(|c| c.to_string().trim().to_string())
            .collect::<Vec<_>>(),
        None => {
            warn!("Sheet '{}' is empty", sheet_name);
            Vec::new()
        }
    };

    let mut data = Dataset::new(header);
    for cells in rows {
        data.push_row(cells.iter().map(cell_to_value).collect())?;
    }
    Ok(data)
}

fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Missing,
        Data::String(s) if s.trim().is_empty() => Value::Missing,
        Data::String(s) => Value::Text(s.clone()),
        Data::Float(f) => Value::Number(*f),
        Data::Int(i) => Value::Number(*i as f64),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) => Value::DateTime(dt),
            None => Value::Missing,
        },
        Data::DurationIso(s) => Value::Text(s.clone()),
        // Spreadsheet error cells (#DIV/0! and friends) carry no usable value
        Data::Error(_) => Value::Missing,
    }
}

/// Delimited text with a header row. Numeric-looking fields become numbers,
/// empty fields become the missing marker.
fn extract_csv(path: &Path) -> AppResult<Dataset> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let header: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut data = Dataset::new(header);
    for result in reader.records() {
        let record = result?;
        data.push_row(record.iter().map(field_to_value).collect())?;
    }
    Ok(data)
}

fn field_to_value(field: &str) -> Value {
    if field.is_empty() {
        return Value::Missing;
    }
    match field.parse::<f64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Text(field.to_string()),
    }
}
