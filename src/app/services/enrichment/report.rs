//! Per-run enrichment report
//!
//! One report per enrichment run, computed once over the final enriched set.

use serde::{Deserialize, Serialize};

/// Summary of one enrichment run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Records enriched
    pub records_processed: usize,

    /// Columns in the validated input
    pub columns_before: usize,

    /// Columns in the enriched output
    pub columns_after: usize,

    /// Derived columns appended
    pub columns_added: usize,

    /// Sum of per-record revenue, rounded to 2 decimal places
    pub total_revenue: f64,

    /// Mean revenue per record, rounded to 2 decimal places
    pub avg_revenue: f64,

    /// Wall-clock enrichment time
    pub elapsed_seconds: f64,
}

impl RunReport {
    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Enrichment Summary: {} records | {} -> {} columns (+{}) | \
             total ${:.2} | avg ${:.2} | {:.2}s",
            self.records_processed,
            self.columns_before,
            self.columns_after,
            self.columns_added,
            self.total_revenue,
            self.avg_revenue,
            self.elapsed_seconds
        )
    }
}
