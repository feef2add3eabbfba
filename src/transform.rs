//! Transform stage: deduplication, date coercion, null-date filtering and
//! derived-column computation.
//!
//! Malformed values are data-quality events, not pipeline failures: an
//! unparseable `Order_Date` coerces to `Value::Missing` and the row is
//! dropped; a non-numeric `Sales`/`Cost` operand yields a missing `Profit`.
//! The stage only fails when a required column is absent from the schema.

use crate::errors::AppResult;
use crate::types::{Dataset, TransformStats, Value};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use tracing::info;

/// Columns the transform operates on; everything else passes through.
pub const ORDER_DATE: &str = "Order_Date";
pub const SALES: &str = "Sales";
pub const COST: &str = "Cost";

/// Derived columns appended to every surviving row.
pub const DERIVED_COLUMNS: [&str; 3] = ["Profit", "Year", "Month"];

/// Textual datetime formats accepted for `Order_Date`, tried in order.
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];

/// Textual date-only formats accepted for `Order_Date`, tried in order.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];

/// Clean and enrich a raw dataset.
///
/// Steps, in order, each total over the dataset:
/// 1. Remove exact-duplicate rows (first occurrence kept, order preserved)
/// 2. Coerce `Order_Date` cells to datetimes, unparseable becomes missing
/// 3. Drop rows whose `Order_Date` is missing (order preserved)
/// 4. Append `Profit = Sales - Cost`, `Year` and `Month`
///
/// The output has exactly the original columns plus the three derived ones,
/// no duplicate rows over the original columns, and no missing `Order_Date`.
pub fn transform(raw: &Dataset) -> AppResult<(Dataset, TransformStats)> {
    let date_idx = raw.require_column(ORDER_DATE)?;
    let sales_idx = raw.require_column(SALES)?;
    let cost_idx = raw.require_column(COST)?;

    info!("Starting data transformation...");
    let mut stats = TransformStats::new();
    stats.rows_in = raw.len();

    // Step 1: remove exact duplicates across all extracted columns
    let mut seen = HashSet::with_capacity(raw.len());
    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(raw.len());
    for row in raw.rows() {
        if seen.insert(Dataset::row_key(row)) {
            rows.push(row.clone());
        }
    }
    stats.duplicates_removed = stats.rows_in - rows.len();
    info!("Removed {} duplicate rows", stats.duplicates_removed);

    // Steps 2 + 3: coerce Order_Date, then drop rows left without one
    let after_dedup = rows.len();
    let mut kept: Vec<Vec<Value>> = Vec::with_capacity(after_dedup);
    for mut row in rows {
        row[date_idx] = coerce_date(&row[date_idx]);
        if !row[date_idx].is_missing() {
            kept.push(row);
        }
    }
    stats.invalid_dates_removed = after_dedup - kept.len();
    info!(
        "Removed {} rows with invalid dates",
        stats.invalid_dates_removed
    );

    // Step 4: derived columns
    let mut columns = raw.columns().to_vec();
    for name in DERIVED_COLUMNS {
        columns.push(name.to_string());
    }
    let mut out = Dataset::new(columns);
    for mut row in kept {
        let profit = match (row[sales_idx].as_number(), row[cost_idx].as_number()) {
            (Some(sales), Some(cost)) => Value::Number(sales - cost),
            _ => Value::Missing,
        };
        // Order_Date is guaranteed present after step 3
        let (year, month) = match row[date_idx].as_datetime() {
            Some(dt) => (
                Value::Number(dt.year() as f64),
                Value::Number(dt.month() as f64),
            ),
            None => (Value::Missing, Value::Missing),
        };
        row.push(profit);
        row.push(year);
        row.push(month);
        out.push_row(row)?;
    }

    stats.rows_out = out.len();
    info!("Transformation complete. Final row count: {}", out.len());

    Ok((out, stats))
}

/// Interpret a raw cell as a calendar datetime. Anything that cannot be
/// parsed becomes the missing marker.
fn coerce_date(value: &Value) -> Value {
    match value {
        Value::DateTime(dt) => Value::DateTime(*dt),
        Value::Number(serial) => match excel_serial_to_datetime(*serial) {
            Some(dt) => Value::DateTime(dt),
            None => Value::Missing,
        },
        Value::Text(text) => match parse_date_text(text.trim()) {
            Some(dt) => Value::DateTime(dt),
            None => Value::Missing,
        },
        _ => Value::Missing,
    }
}

/// Convert an Excel date serial (days since 1899-12-30, fraction = time of
/// day) into a datetime. Serials outside the representable range are
/// rejected.
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    // Upper bound is the serial for 9999-12-31
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::days(days) + Duration::seconds(seconds))
}

fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    if text.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}
