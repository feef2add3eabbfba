//! Run summary and transform statistics.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Row-count bookkeeping for one pass through the transform stage.
#[derive(Debug, Clone, Default)]
pub struct TransformStats {
    pub rows_in: usize,
    pub duplicates_removed: usize,
    pub invalid_dates_removed: usize,
    pub rows_out: usize,
}

impl TransformStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows dropped by the stage.
    pub fn rows_removed(&self) -> usize {
        self.duplicates_removed + self.invalid_dates_removed
    }

    pub fn duplicate_rate(&self) -> f64 {
        if self.rows_in > 0 {
            (self.duplicates_removed as f64 / self.rows_in as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn invalid_date_rate(&self) -> f64 {
        if self.rows_in > 0 {
            (self.invalid_dates_removed as f64 / self.rows_in as f64) * 100.0
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} rows in, {} duplicates removed ({:.1}%), {} invalid dates removed ({:.1}%), {} rows out",
            self.rows_in,
            self.duplicates_removed,
            self.duplicate_rate(),
            self.invalid_dates_removed,
            self.invalid_date_rate(),
            self.rows_out
        )
    }
}

/// Summary record returned by a successful pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct EtlSummary {
    pub status: String,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub duration_seconds: f64,
    pub rows_extracted: usize,
    pub rows_loaded: usize,
    pub rows_removed: usize,
    pub output_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_stats_rates() {
        let stats = TransformStats {
            rows_in: 500,
            duplicates_removed: 10,
            invalid_dates_removed: 5,
            rows_out: 485,
        };

        assert_eq!(stats.rows_removed(), 15);
        assert!((stats.duplicate_rate() - 2.0).abs() < f64::EPSILON);
        assert!((stats.invalid_date_rate() - 1.0).abs() < f64::EPSILON);

        let summary = stats.summary();
        assert!(summary.contains("500 rows in"));
        assert!(summary.contains("485 rows out"));
    }

    #[test]
    fn test_transform_stats_empty_input() {
        let stats = TransformStats::new();
        assert_eq!(stats.rows_removed(), 0);
        assert_eq!(stats.duplicate_rate(), 0.0);
        assert_eq!(stats.invalid_date_rate(), 0.0);
    }

    #[test]
    fn test_summary_serialises_to_json() {
        let now = Local::now();
        let summary = EtlSummary {
            status: "SUCCESS".to_string(),
            start_time: now,
            end_time: now,
            duration_seconds: 0.5,
            rows_extracted: 500,
            rows_loaded: 485,
            rows_removed: 15,
            output_file: "sales_cleaned.csv".to_string(),
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "SUCCESS");
        assert_eq!(json["rows_extracted"], 500);
        assert_eq!(json["rows_loaded"], 485);
        assert_eq!(json["rows_removed"], 15);
    }
}
