//! Enrichment of validated sales transactions
//!
//! This module derives the analytical columns over a run's accepted set.
//! Per-record derivations (revenue, date parts, tier, category, bulk flag)
//! depend on nothing but the record itself. Aggregate-dependent derivations
//! (customer segment, price percentile, high-value flag, regional
//! performance) are computed in two passes: aggregates over the full set
//! first, then a second pass that attaches them to each record. The
//! aggregate pass is a hard barrier; no record is enriched from a partial
//! aggregate.
//!
//! # Architecture
//!
//! - [`engine`] - EnrichmentEngine orchestrating derive -> aggregate -> attach
//! - [`derive`] - pure per-record derivations
//! - [`aggregates`] - run-level aggregate maps and their lookups
//! - [`report`] - the per-run RunReport
//!
//! Enrichment assumes validated input and does not re-validate: a record
//! that violates the validated-input preconditions aborts the whole run.

pub mod aggregates;
pub mod derive;
pub mod engine;
pub mod report;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use aggregates::{RegionAggregate, RunAggregates};
pub use derive::{RecordDerivations, derive_record, round2};
pub use engine::EnrichmentEngine;
pub use report::RunReport;
