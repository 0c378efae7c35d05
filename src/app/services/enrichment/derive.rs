//! Pure per-record derivations
//!
//! Everything here is a function of one record and the injected
//! configuration: no aggregate state, no ordering dependence. These
//! derivations could run in any order over the accepted set.

use crate::app::models::{DateParts, RevenueTier, TransactionRecord};
use crate::config::{EnrichmentConfig, TierThresholds};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Round to 2 decimal places (monetary convention used across the pipeline)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// revenue = quantity x price, rounded to 2 decimal places
pub fn revenue_for(quantity: i64, price: f64) -> f64 {
    round2(quantity as f64 * price)
}

/// Break a date into its calendar components
pub fn date_parts(date: NaiveDate) -> DateParts {
    let day_of_week = date.weekday().num_days_from_monday();
    let is_weekend = day_of_week >= 5;

    DateParts {
        year: date.year(),
        month: date.month(),
        month_name: date.format("%B").to_string(),
        day: date.day(),
        day_name: date.format("%A").to_string(),
        day_of_week,
        quarter: (date.month() - 1) / 3 + 1,
        week_of_year: date.iso_week().week(),
        is_weekend,
        is_business_day: !is_weekend,
    }
}

/// Classify revenue into its tier
///
/// Bands are half-open `[lower, upper)`: a revenue exactly on a threshold
/// maps to the higher tier. Raising revenue never lowers the tier.
pub fn classify_revenue_tier(revenue: f64, tiers: &TierThresholds) -> RevenueTier {
    if revenue >= tiers.premium_min {
        RevenueTier::Premium
    } else if revenue >= tiers.high_min {
        RevenueTier::High
    } else if revenue >= tiers.medium_min {
        RevenueTier::Medium
    } else {
        RevenueTier::Low
    }
}

/// Look up a product's category; unmapped products become "Other"
pub fn product_category(product: &str, lookup: &HashMap<String, String>) -> String {
    lookup
        .get(product)
        .cloned()
        .unwrap_or_else(|| crate::constants::UNMAPPED_PRODUCT_CATEGORY.to_string())
}

/// Quantity strictly above the threshold counts as a bulk purchase
pub fn is_bulk_purchase(quantity: i64, threshold: i64) -> bool {
    quantity > threshold
}

/// The per-record derivations for one transaction
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDerivations {
    pub revenue: f64,
    pub date_parts: DateParts,
    pub revenue_tier: RevenueTier,
    pub product_category: String,
    pub is_bulk_purchase: bool,
}

/// Compute every per-record derivation for one transaction
pub fn derive_record(record: &TransactionRecord, config: &EnrichmentConfig) -> RecordDerivations {
    let revenue = revenue_for(record.quantity, record.price);

    RecordDerivations {
        revenue,
        date_parts: date_parts(record.transaction_date),
        revenue_tier: classify_revenue_tier(revenue, &config.tiers),
        product_category: product_category(&record.product, &config.product_categories),
        is_bulk_purchase: is_bulk_purchase(record.quantity, config.bulk_quantity_threshold),
    }
}
