//! Record validation for raw sales transactions
//!
//! This module partitions a day's raw rows into accepted transactions and
//! rejected rows, applying a fixed sequence of checks where the first failing
//! check supplies the single rejection reason.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`engine`] - Main RecordValidator struct and partition orchestration
//! - [`rules`] - Typed row parsing and the ordered business-rule table
//! - [`metrics`] - Per-run counters and the immutable ValidationSummary
//!
//! # Check Precedence
//!
//! Checks run in a fixed order so that re-running the same input always
//! yields the same partition and the same reasons:
//!
//! 1. **Schema** - required fields present and numeric fields parseable
//! 2. **Null** - required fields non-empty after trimming
//! 3. **Duplicate** - transaction_id not seen earlier in this input
//! 4. **Business rules** - quantity range, price range, region whitelist,
//!    date validity (parseable, not after the run date)
//!
//! Rows that pass every check keep their input order in the accepted output;
//! rejected rows carry their source line number into the rejection log.
//!
//! # Example Usage
//!
//! ```rust
//! use sales_pipeline::app::services::csv_codec;
//! use sales_pipeline::app::services::validator::RecordValidator;
//! use sales_pipeline::config::PipelineConfig;
//! use chrono::NaiveDate;
//!
//! # fn example() -> sales_pipeline::Result<()> {
//! let config = PipelineConfig::default();
//! let decoded = csv_codec::decode(
//!     b"transaction_id,date,region,product,quantity,price,customer_id\n\
//!       TXN-1,2025-01-01,North,Laptop,2,999.99,CUST-1\n",
//!     "raw-zone/2025-01-01.csv",
//! )?;
//!
//! let validator = RecordValidator::new(config.schema, config.rules);
//! validator.ensure_header(&decoded.layout, "raw-zone/2025-01-01.csv")?;
//!
//! let run_date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let outcome = validator.validate(&decoded.layout, &decoded.records, run_date, None);
//!
//! assert_eq!(outcome.accepted.len(), 1);
//! assert_eq!(outcome.rejected.len(), 0);
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod metrics;
pub mod rules;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use engine::{RecordValidator, ValidationOutcome};
pub use metrics::{MetricsCollector, ValidationSummary};
pub use rules::{BUSINESS_RULES, BusinessRule, RowCandidate};
