//! Tests for the enrichment module
//!
//! Covers per-record derivations, run aggregates, the attach pass, and the
//! run report invariants.

pub mod aggregates_tests;
pub mod engine_tests;

// Test helper functions and fixtures
use crate::app::models::TransactionRecord;
use crate::config::EnrichmentConfig;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Build a transaction with the interesting fields set
pub fn transaction(
    id: &str,
    customer: &str,
    region: &str,
    product: &str,
    quantity: i64,
    price: f64,
) -> TransactionRecord {
    TransactionRecord {
        transaction_id: id.to_string(),
        transaction_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        region: region.to_string(),
        product: product.to_string(),
        quantity,
        price,
        customer_id: customer.to_string(),
        passthrough: BTreeMap::new(),
    }
}

/// Transaction with a specific date
pub fn transaction_on(id: &str, date: NaiveDate) -> TransactionRecord {
    let mut record = transaction(id, "CUST-1", "North", "Laptop", 1, 10.0);
    record.transaction_date = date;
    record
}

/// Default enrichment config under test
pub fn test_config() -> EnrichmentConfig {
    EnrichmentConfig::default()
}
