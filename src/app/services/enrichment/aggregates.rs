//! Run-level aggregate maps for the second enrichment pass
//!
//! Aggregates are built once over the full accepted set (entity key ->
//! aggregate value) and then looked up per record. Building them up front
//! keeps the attach pass linear; recomputing per record would be quadratic
//! over a day's volume.

use crate::app::models::{CustomerSegment, TransactionRecord};
use crate::config::{EnrichmentConfig, SegmentThresholds};
use std::collections::HashMap;
use tracing::debug;

use super::derive::{RecordDerivations, round2};

/// Revenue aggregates for one region within a run
#[derive(Debug, Clone, PartialEq)]
pub struct RegionAggregate {
    /// Sum of record revenues in the region
    pub total_revenue: f64,

    /// Number of transactions in the region
    pub transaction_count: usize,

    /// 1 = highest total revenue; ties broken by region name ascending
    pub rank: usize,
}

impl RegionAggregate {
    /// Mean revenue per transaction in the region
    pub fn avg_revenue(&self) -> f64 {
        if self.transaction_count == 0 {
            0.0
        } else {
            round2(self.total_revenue / self.transaction_count as f64)
        }
    }
}

/// Classify a customer's run-lifetime revenue into a segment
///
/// Min-inclusive bands: a lifetime revenue exactly on a threshold maps to
/// the higher segment. Customers with equal lifetime revenue always land in
/// the same segment.
pub fn classify_segment(lifetime_revenue: f64, segments: &SegmentThresholds) -> CustomerSegment {
    if lifetime_revenue >= segments.platinum_min {
        CustomerSegment::Platinum
    } else if lifetime_revenue >= segments.gold_min {
        CustomerSegment::Gold
    } else if lifetime_revenue >= segments.silver_min {
        CustomerSegment::Silver
    } else {
        CustomerSegment::Bronze
    }
}

/// Nearest-rank quantile over a sorted ascending slice
fn quantile_cutoff(sorted: &[f64], quantile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let n = sorted.len();
    let rank = (quantile * n as f64).ceil() as usize;
    sorted[rank.clamp(1, n) - 1]
}

/// All aggregates of one enrichment run, built before the attach pass
#[derive(Debug, Clone)]
pub struct RunAggregates {
    customer_revenue: HashMap<String, f64>,
    regions: HashMap<String, RegionAggregate>,
    sorted_prices: Vec<f64>,
    high_value_cutoff: f64,
}

impl RunAggregates {
    /// Build aggregates over the full accepted set
    ///
    /// `derivations` must be the per-record derivations of `records`, index
    /// aligned; revenue is taken from there so that the aggregate and the
    /// attached column are computed from the same rounded value.
    pub fn build(
        records: &[TransactionRecord],
        derivations: &[RecordDerivations],
        config: &EnrichmentConfig,
    ) -> Self {
        debug_assert_eq!(records.len(), derivations.len());

        let mut customer_revenue: HashMap<String, f64> = HashMap::new();
        let mut regions: HashMap<String, RegionAggregate> = HashMap::new();
        let mut sorted_prices = Vec::with_capacity(records.len());
        let mut sorted_revenues = Vec::with_capacity(records.len());

        for (record, derived) in records.iter().zip(derivations) {
            *customer_revenue
                .entry(record.customer_id.clone())
                .or_insert(0.0) += derived.revenue;

            let region = regions
                .entry(record.region.clone())
                .or_insert(RegionAggregate {
                    total_revenue: 0.0,
                    transaction_count: 0,
                    rank: 0,
                });
            region.total_revenue += derived.revenue;
            region.transaction_count += 1;

            sorted_prices.push(record.price);
            sorted_revenues.push(derived.revenue);
        }

        sorted_prices.sort_by(f64::total_cmp);
        sorted_revenues.sort_by(f64::total_cmp);

        // Rank regions by total revenue, highest first; name breaks ties
        let mut ranked: Vec<(String, f64)> = regions
            .iter()
            .map(|(name, agg)| (name.clone(), agg.total_revenue))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        for (rank, (name, _)) in ranked.iter().enumerate() {
            if let Some(region) = regions.get_mut(name) {
                region.rank = rank + 1;
            }
        }

        let high_value_cutoff = quantile_cutoff(&sorted_revenues, config.high_value_quantile);

        debug!(
            "Run aggregates: {} customers, {} regions, high-value cutoff {:.2}",
            customer_revenue.len(),
            regions.len(),
            high_value_cutoff
        );

        Self {
            customer_revenue,
            regions,
            sorted_prices,
            high_value_cutoff,
        }
    }

    /// A customer's summed revenue across the run
    pub fn customer_lifetime_revenue(&self, customer_id: &str) -> f64 {
        self.customer_revenue.get(customer_id).copied().unwrap_or(0.0)
    }

    /// Segment for a customer, from lifetime revenue
    pub fn customer_segment(
        &self,
        customer_id: &str,
        segments: &SegmentThresholds,
    ) -> CustomerSegment {
        classify_segment(self.customer_lifetime_revenue(customer_id), segments)
    }

    /// Rank of a price within the run: count(prices <= p) / n
    ///
    /// Ties share a rank; the ranking is stable and non-strict.
    pub fn price_percentile(&self, price: f64) -> f64 {
        if self.sorted_prices.is_empty() {
            return 0.0;
        }
        let at_or_below = self.sorted_prices.partition_point(|p| *p <= price);
        at_or_below as f64 / self.sorted_prices.len() as f64
    }

    /// Whether a revenue reaches the run's high-value cutoff
    pub fn is_high_value(&self, revenue: f64) -> bool {
        revenue >= self.high_value_cutoff
    }

    /// Aggregate for a region, if any record of the run had it
    pub fn region(&self, name: &str) -> Option<&RegionAggregate> {
        self.regions.get(name)
    }

    /// Number of distinct customers in the run
    pub fn customer_count(&self) -> usize {
        self.customer_revenue.len()
    }

    /// Number of distinct regions in the run
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }
}
