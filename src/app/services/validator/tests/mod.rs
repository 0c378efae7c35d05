//! Tests for the record validation module
//!
//! Covers rule parsing, check precedence, deduplication, metrics, and the
//! partition invariants from the pipeline contract.

pub mod rules_tests;

// Test helper functions and fixtures
use crate::app::models::RawRecord;
use crate::app::services::csv_codec::ColumnLayout;
use crate::config::{RuleCatalog, SchemaConfig};
use chrono::NaiveDate;

/// Canonical column layout for validator tests
pub fn test_layout() -> ColumnLayout {
    ColumnLayout::new(
        [
            "transaction_id",
            "date",
            "region",
            "product",
            "quantity",
            "price",
            "customer_id",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    )
}

/// Layout with an extra passthrough column appended
pub fn test_layout_with_channel() -> ColumnLayout {
    let mut columns: Vec<String> = test_layout().columns;
    columns.push("channel".to_string());
    ColumnLayout::new(columns)
}

/// Build a raw row in canonical column order
pub fn raw_row(line: usize, fields: &[&str]) -> RawRecord {
    RawRecord {
        line,
        fields: fields.iter().map(|f| f.to_string()).collect(),
    }
}

/// A fully valid row with the given id
pub fn valid_row(line: usize, id: &str) -> RawRecord {
    raw_row(
        line,
        &[id, "2025-01-01", "North", "Laptop", "2", "10.00", "CUST-1"],
    )
}

/// Default schema under test
pub fn test_schema() -> SchemaConfig {
    SchemaConfig::default()
}

/// Default rule catalog under test
pub fn test_rules() -> RuleCatalog {
    RuleCatalog::default()
}

/// Run date used across validator tests
pub fn test_run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}
