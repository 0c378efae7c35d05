//! Application constants for the sales pipeline
//!
//! This module contains zone names, column names, default rule bounds,
//! and default enrichment thresholds used throughout the pipeline.
//! Runtime behavior reads these through [`crate::config::PipelineConfig`],
//! never directly from here.

// =============================================================================
// Object Store Zones
// =============================================================================

/// Zone holding raw daily drops, one file per run date
pub const RAW_ZONE: &str = "raw-zone";

/// Zone holding validated (cleaned) daily files
pub const PROCESSED_ZONE: &str = "processed-zone";

/// Zone holding enriched, aggregation-ready daily files
pub const AGGREGATES_ZONE: &str = "aggregates-zone";

// =============================================================================
// Date Handling
// =============================================================================

/// Canonical date format for run dates, object keys, and the date column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Column Name Constants
// =============================================================================

/// Required column names in raw transaction files
pub mod columns {
    pub const TRANSACTION_ID: &str = "transaction_id";
    pub const DATE: &str = "date";
    pub const REGION: &str = "region";
    pub const PRODUCT: &str = "product";
    pub const QUANTITY: &str = "quantity";
    pub const PRICE: &str = "price";
    pub const CUSTOMER_ID: &str = "customer_id";
}

/// The required schema, in canonical column order
pub const REQUIRED_COLUMNS: &[&str] = &[
    columns::TRANSACTION_ID,
    columns::DATE,
    columns::REGION,
    columns::PRODUCT,
    columns::QUANTITY,
    columns::PRICE,
    columns::CUSTOMER_ID,
];

// =============================================================================
// Default Validation Rule Bounds
// =============================================================================

/// Minimum accepted quantity (closed range)
pub const DEFAULT_MIN_QUANTITY: i64 = 1;

/// Maximum accepted quantity (closed range)
pub const DEFAULT_MAX_QUANTITY: i64 = 1000;

/// Minimum accepted unit price (closed range)
pub const DEFAULT_MIN_PRICE: f64 = 0.01;

/// Maximum accepted unit price (closed range)
pub const DEFAULT_MAX_PRICE: f64 = 100_000.00;

/// Sales regions accepted by the region whitelist rule
pub const DEFAULT_VALID_REGIONS: &[&str] = &["North", "South", "East", "West", "Central"];

// =============================================================================
// Default Enrichment Thresholds
// =============================================================================

/// Revenue at or above this is at least Medium tier
pub const DEFAULT_TIER_MEDIUM_MIN: f64 = 100.0;

/// Revenue at or above this is at least High tier
pub const DEFAULT_TIER_HIGH_MIN: f64 = 500.0;

/// Revenue at or above this is Premium tier
pub const DEFAULT_TIER_PREMIUM_MIN: f64 = 2000.0;

/// Lifetime revenue at or above this is at least Silver segment
pub const DEFAULT_SEGMENT_SILVER_MIN: f64 = 500.0;

/// Lifetime revenue at or above this is at least Gold segment
pub const DEFAULT_SEGMENT_GOLD_MIN: f64 = 2000.0;

/// Lifetime revenue at or above this is Platinum segment
pub const DEFAULT_SEGMENT_PLATINUM_MIN: f64 = 5000.0;

/// Run-revenue quantile at or above which a transaction is high-value
pub const DEFAULT_HIGH_VALUE_QUANTILE: f64 = 0.90;

/// Quantity strictly above this is flagged as a bulk purchase
pub const DEFAULT_BULK_QUANTITY_THRESHOLD: i64 = 25;

/// Category assigned to products absent from the category lookup
pub const UNMAPPED_PRODUCT_CATEGORY: &str = "Other";

/// Default product to category lookup table
pub const DEFAULT_PRODUCT_CATEGORIES: &[(&str, &str)] = &[
    ("Laptop", "Computing"),
    ("Desktop", "Computing"),
    ("Monitor", "Peripherals"),
    ("Keyboard", "Peripherals"),
    ("Mouse", "Peripherals"),
    ("Headset", "Audio"),
    ("Webcam", "Video"),
    ("Router", "Networking"),
    ("Switch", "Networking"),
    ("Cable", "Accessories"),
];

// =============================================================================
// Helper Functions
// =============================================================================

/// Object key for a zone's daily transaction file
pub fn daily_key(zone: &str, date: chrono::NaiveDate) -> String {
    format!("{}/{}.csv", zone, date.format(DATE_FORMAT))
}

/// Object key for a run's rejection log
pub fn rejects_key(zone: &str, date: chrono::NaiveDate) -> String {
    format!("{}/{}.rejects.csv", zone, date.format(DATE_FORMAT))
}

/// Object key for a run's machine-readable summary
pub fn summary_key(zone: &str, date: chrono::NaiveDate) -> String {
    format!("{}/{}.summary.json", zone, date.format(DATE_FORMAT))
}
