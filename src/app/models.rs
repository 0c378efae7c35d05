//! Data models for the sales pipeline
//!
//! This module contains the core data structures for representing raw rows,
//! validated transactions, rejections, and enriched records, together with
//! the closed vocabularies (rejection reasons, tiers, segments) the engines
//! classify into.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Raw Input
// =============================================================================

/// A raw row as decoded from a delimited file, prior to validation
///
/// Fields are positional strings; column names live in the file's
/// [`ColumnLayout`](crate::app::services::csv_codec::ColumnLayout). The line
/// number is 1-based over data rows (the header is line 0) and is carried
/// through to the rejection log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based data row number in the source file
    pub line: usize,

    /// Field values in header order
    pub fields: Vec<String>,
}

impl RawRecord {
    /// Get a field by positional index, if the row is long enough
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|s| s.as_str())
    }
}

// =============================================================================
// Rejection Vocabulary
// =============================================================================

/// Closed set of row-level rejection reasons
///
/// Exactly one reason is recorded per rejected row: the first failing check
/// in the validator's fixed precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Required field missing from the row or not parseable to its type
    SchemaError,
    /// Required field empty after trimming
    NullValue,
    /// transaction_id already seen earlier in this input
    Duplicate,
    /// Quantity outside the configured closed range
    InvalidQuantity,
    /// Price outside the configured closed range
    InvalidPrice,
    /// Region not in the configured whitelist
    InvalidRegion,
    /// Date unparseable or after the run date
    InvalidDate,
}

impl RejectReason {
    /// All reasons, in validator precedence order
    pub const ALL: &'static [RejectReason] = &[
        RejectReason::SchemaError,
        RejectReason::NullValue,
        RejectReason::Duplicate,
        RejectReason::InvalidQuantity,
        RejectReason::InvalidPrice,
        RejectReason::InvalidRegion,
        RejectReason::InvalidDate,
    ];

    /// Stable wire code used in rejection logs and summaries
    pub fn as_code(&self) -> &'static str {
        match self {
            RejectReason::SchemaError => "schema_error",
            RejectReason::NullValue => "null_value",
            RejectReason::Duplicate => "duplicate",
            RejectReason::InvalidQuantity => "invalid_quantity",
            RejectReason::InvalidPrice => "invalid_price",
            RejectReason::InvalidRegion => "invalid_region",
            RejectReason::InvalidDate => "invalid_date",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_code())
    }
}

/// A rejected row: source reference plus its single rejection reason
///
/// Produced only by the validator; never persisted as a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    /// 1-based data row number in the source file
    pub line: usize,

    /// Raw transaction_id field (may be empty for schema failures)
    pub transaction_id: String,

    /// First failing check
    pub reason: RejectReason,
}

// =============================================================================
// Validated Transaction
// =============================================================================

/// A transaction that passed every validation check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier; the dedup key
    pub transaction_id: String,

    /// Transaction date, never after the run date
    pub transaction_date: NaiveDate,

    /// Whitelisted sales region
    pub region: String,

    /// Product name
    pub product: String,

    /// Units sold, within the configured closed range
    pub quantity: i64,

    /// Unit price, within the configured closed range
    pub price: f64,

    /// Purchasing customer identifier
    pub customer_id: String,

    /// Columns outside the required schema, passed through unmodified
    pub passthrough: BTreeMap<String, String>,
}

// =============================================================================
// Enrichment Vocabulary
// =============================================================================

/// Revenue tier buckets, ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RevenueTier {
    Low,
    Medium,
    High,
    Premium,
}

impl RevenueTier {
    /// Display label written to enriched output
    pub fn as_str(&self) -> &'static str {
        match self {
            RevenueTier::Low => "Low",
            RevenueTier::Medium => "Medium",
            RevenueTier::High => "High",
            RevenueTier::Premium => "Premium",
        }
    }

    /// Ordinal rank, monotonic with revenue
    pub fn rank(&self) -> u8 {
        match self {
            RevenueTier::Low => 0,
            RevenueTier::Medium => 1,
            RevenueTier::High => 2,
            RevenueTier::Premium => 3,
        }
    }
}

impl fmt::Display for RevenueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer segment buckets over run-lifetime revenue, ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CustomerSegment {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl CustomerSegment {
    /// Display label written to enriched output
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerSegment::Bronze => "Bronze",
            CustomerSegment::Silver => "Silver",
            CustomerSegment::Gold => "Gold",
            CustomerSegment::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for CustomerSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar components derived from a transaction date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    /// Full month name ("January")
    pub month_name: String,
    pub day: u32,
    /// Full weekday name ("Monday")
    pub day_name: String,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u32,
    /// 1..=4
    pub quarter: u32,
    /// ISO week number
    pub week_of_year: u32,
    pub is_weekend: bool,
    /// Monday through Friday; holiday handling is out of scope
    pub is_business_day: bool,
}

// =============================================================================
// Enriched Record
// =============================================================================

/// An accepted transaction plus all derived analytical columns
///
/// Every derived field is a pure function of the transaction and, for the
/// aggregate-based fields, the full accepted set of the current run. No state
/// crosses runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    /// The underlying accepted transaction
    pub transaction: TransactionRecord,

    /// quantity x price, rounded to 2 decimal places
    pub revenue: f64,

    /// Calendar breakdown of the transaction date
    pub date_parts: DateParts,

    /// Revenue tier from the configured thresholds
    pub revenue_tier: RevenueTier,

    /// Category from the configured product lookup; "Other" if unmapped
    pub product_category: String,

    /// Segment from the customer's lifetime revenue within this run
    pub customer_segment: CustomerSegment,

    /// Rank of price within the run's sorted price list (ties share a rank)
    pub price_percentile: f64,

    /// Revenue at or above the configured run-revenue quantile
    pub is_high_value: bool,

    /// Quantity strictly above the configured bulk threshold
    pub is_bulk_purchase: bool,

    /// Total revenue of the record's region within this run
    pub regional_total_revenue: f64,

    /// Mean revenue of the record's region within this run
    pub regional_avg_revenue: f64,

    /// 1 = highest-revenue region; ties broken by region name
    pub regional_rank: usize,

    /// Revenue strictly above the regional mean
    pub above_regional_avg: bool,
}
