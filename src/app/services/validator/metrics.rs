//! Per-run validation metrics
//!
//! The collector is mutated while the validator walks the input; `finish`
//! freezes it into a [`ValidationSummary`], which is immutable for the rest
//! of the run and is what gets persisted and logged.

use crate::app::models::RejectReason;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

/// Mutable counters for a validation run in progress
#[derive(Debug)]
pub struct MetricsCollector {
    total_records: usize,
    valid_records: usize,
    reasons: BTreeMap<RejectReason, usize>,
    started: Instant,
}

impl MetricsCollector {
    /// Start collecting for an input of the given size
    pub fn start(total_records: usize) -> Self {
        Self {
            total_records,
            valid_records: 0,
            reasons: BTreeMap::new(),
            started: Instant::now(),
        }
    }

    /// Count an accepted record
    pub fn record_accepted(&mut self) {
        self.valid_records += 1;
    }

    /// Count a rejection under its reason
    pub fn record_rejection(&mut self, reason: RejectReason) {
        *self.reasons.entry(reason).or_insert(0) += 1;
    }

    /// Freeze into an immutable summary
    pub fn finish(self) -> ValidationSummary {
        let rejected_records: usize = self.reasons.values().sum();
        let rejection_rate_percent = if self.total_records == 0 {
            0.0
        } else {
            let rate = (rejected_records as f64 / self.total_records as f64) * 100.0;
            (rate * 100.0).round() / 100.0
        };

        ValidationSummary {
            total_records: self.total_records,
            valid_records: self.valid_records,
            rejected_records,
            rejected_by_reason: self.reasons,
            rejection_rate_percent,
            elapsed_seconds: self.started.elapsed().as_secs_f64(),
        }
    }
}

/// Immutable summary of one validation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// Rows in the input
    pub total_records: usize,

    /// Rows that passed every check
    pub valid_records: usize,

    /// Rows rejected, across all reasons
    pub rejected_records: usize,

    /// Rejections per reason
    pub rejected_by_reason: BTreeMap<RejectReason, usize>,

    /// rejected / total as a percentage, rounded to 2 decimal places
    pub rejection_rate_percent: f64,

    /// Wall-clock validation time
    pub elapsed_seconds: f64,
}

impl ValidationSummary {
    /// Rejections recorded under one reason
    pub fn count_for(&self, reason: RejectReason) -> usize {
        self.rejected_by_reason.get(&reason).copied().unwrap_or(0)
    }

    /// Percentage of rows accepted
    pub fn pass_rate_percent(&self) -> f64 {
        if self.total_records == 0 {
            100.0
        } else {
            (self.valid_records as f64 / self.total_records as f64) * 100.0
        }
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Validation Summary: {} -> {} records ({:.2}% pass) | rejected: {} ({:.2}%) | {:.2}s",
            self.total_records,
            self.valid_records,
            self.pass_rate_percent(),
            self.rejected_records,
            self.rejection_rate_percent,
            self.elapsed_seconds
        )
    }
}
