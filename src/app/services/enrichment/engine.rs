//! Main enrichment engine implementation
//!
//! Orchestrates the three passes over a run's accepted set: per-record
//! derivations, aggregate construction (a hard barrier), and the attach pass
//! that combines both into enriched records. Input order is preserved
//! throughout.

use crate::app::models::{EnrichedRecord, TransactionRecord};
use crate::app::services::csv_codec::ENRICHED_COLUMNS;
use crate::config::EnrichmentConfig;
use crate::{Error, Result};
use indicatif::ProgressBar;
use std::time::Instant;
use tracing::{debug, info};

use super::aggregates::RunAggregates;
use super::derive::{derive_record, round2};
use super::report::RunReport;

/// Enrichment engine for validated sales transactions
///
/// Holds the thresholds and lookup tables injected at construction.
/// Enrichment assumes validated input and does not re-validate.
#[derive(Debug, Clone)]
pub struct EnrichmentEngine {
    config: EnrichmentConfig,
}

impl EnrichmentEngine {
    /// Create an engine over an enrichment configuration
    pub fn new(config: EnrichmentConfig) -> Self {
        Self { config }
    }

    /// Enrich a run's accepted set
    ///
    /// `columns_before` is the column count of the validated input, carried
    /// into the run report. Returns the enriched records in input order plus
    /// the report.
    ///
    /// An empty input is an internal-consistency violation here: the
    /// validator stage never persists an empty accepted set, so receiving
    /// one means the preconditions of this stage were not met.
    pub fn enrich(
        &self,
        records: Vec<TransactionRecord>,
        columns_before: usize,
        progress: Option<&ProgressBar>,
    ) -> Result<(Vec<EnrichedRecord>, RunReport)> {
        if records.is_empty() {
            return Err(Error::internal_consistency(
                "Enrichment requires a non-empty validated set".to_string(),
            ));
        }

        let started = Instant::now();
        info!("Starting enrichment of {} records", records.len());

        // Pass 0: per-record derivations, order independent
        let derivations: Vec<_> = records
            .iter()
            .map(|record| {
                let derived = derive_record(record, &self.config);
                if let Some(pb) = progress {
                    pb.inc(1);
                }
                derived
            })
            .collect();

        // Pass 1: run aggregates; must complete before any attach
        let aggregates = RunAggregates::build(&records, &derivations, &self.config);

        // Pass 2: attach aggregate-derived fields
        let mut enriched = Vec::with_capacity(records.len());
        for (record, derived) in records.into_iter().zip(derivations) {
            let region = aggregates.region(&record.region).ok_or_else(|| {
                Error::internal_consistency(format!(
                    "Region '{}' missing from run aggregates",
                    record.region
                ))
            })?;

            let customer_segment =
                aggregates.customer_segment(&record.customer_id, &self.config.segments);
            let price_percentile = aggregates.price_percentile(record.price);
            let is_high_value = aggregates.is_high_value(derived.revenue);
            let regional_total_revenue = round2(region.total_revenue);
            let regional_avg_revenue = region.avg_revenue();
            let regional_rank = region.rank;
            let above_regional_avg = derived.revenue > regional_avg_revenue;

            if let Some(pb) = progress {
                pb.inc(1);
            }

            enriched.push(EnrichedRecord {
                transaction: record,
                revenue: derived.revenue,
                date_parts: derived.date_parts,
                revenue_tier: derived.revenue_tier,
                product_category: derived.product_category,
                customer_segment,
                price_percentile,
                is_high_value,
                is_bulk_purchase: derived.is_bulk_purchase,
                regional_total_revenue,
                regional_avg_revenue,
                regional_rank,
                above_regional_avg,
            });
        }

        let total_revenue = round2(enriched.iter().map(|r| r.revenue).sum());
        let avg_revenue = round2(total_revenue / enriched.len() as f64);

        let report = RunReport {
            records_processed: enriched.len(),
            columns_before,
            columns_after: columns_before + ENRICHED_COLUMNS.len(),
            columns_added: ENRICHED_COLUMNS.len(),
            total_revenue,
            avg_revenue,
            elapsed_seconds: started.elapsed().as_secs_f64(),
        };

        debug!(
            "Aggregates covered {} customers and {} regions",
            aggregates.customer_count(),
            aggregates.region_count()
        );
        info!("{}", report.summary());

        Ok((enriched, report))
    }

    /// The enrichment configuration this engine applies
    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }
}
