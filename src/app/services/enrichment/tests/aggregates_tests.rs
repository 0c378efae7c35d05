//! Tests for run-level aggregates: customer revenue, regions, percentiles

use super::*;
use crate::app::models::CustomerSegment;
use crate::app::services::enrichment::aggregates::{RunAggregates, classify_segment};
use crate::app::services::enrichment::derive::derive_record;

fn build_aggregates(records: &[crate::app::models::TransactionRecord]) -> RunAggregates {
    let config = test_config();
    let derivations: Vec<_> = records.iter().map(|r| derive_record(r, &config)).collect();
    RunAggregates::build(records, &derivations, &config)
}

#[test]
fn test_customer_lifetime_revenue_sums_across_records() {
    let records = vec![
        transaction("TXN-1", "CUST-1", "North", "Laptop", 1, 300.0),
        transaction("TXN-2", "CUST-1", "South", "Mouse", 1, 250.0),
        transaction("TXN-3", "CUST-2", "North", "Cable", 1, 10.0),
    ];

    let aggregates = build_aggregates(&records);

    assert_eq!(aggregates.customer_lifetime_revenue("CUST-1"), 550.0);
    assert_eq!(aggregates.customer_lifetime_revenue("CUST-2"), 10.0);
    assert_eq!(aggregates.customer_lifetime_revenue("CUST-9"), 0.0);
    assert_eq!(aggregates.customer_count(), 2);
}

#[test]
fn test_segment_thresholds_min_inclusive() {
    let segments = test_config().segments;

    assert_eq!(classify_segment(0.0, &segments), CustomerSegment::Bronze);
    assert_eq!(classify_segment(499.99, &segments), CustomerSegment::Bronze);
    assert_eq!(classify_segment(500.0, &segments), CustomerSegment::Silver);
    assert_eq!(classify_segment(1999.99, &segments), CustomerSegment::Silver);
    assert_eq!(classify_segment(2000.0, &segments), CustomerSegment::Gold);
    assert_eq!(classify_segment(4999.99, &segments), CustomerSegment::Gold);
    assert_eq!(classify_segment(5000.0, &segments), CustomerSegment::Platinum);
}

#[test]
fn test_equal_lifetime_revenue_gets_equal_segment() {
    let records = vec![
        transaction("TXN-1", "CUST-A", "North", "Laptop", 1, 500.0),
        transaction("TXN-2", "CUST-B", "South", "Laptop", 1, 500.0),
    ];

    let aggregates = build_aggregates(&records);
    let segments = test_config().segments;

    assert_eq!(
        aggregates.customer_segment("CUST-A", &segments),
        aggregates.customer_segment("CUST-B", &segments)
    );
    assert_eq!(
        aggregates.customer_segment("CUST-A", &segments),
        CustomerSegment::Silver
    );
}

#[test]
fn test_price_percentile_with_ties() {
    // Prices: 10, 10, 20, 40 -> percentile(10) = 2/4, percentile(20) = 3/4
    let records = vec![
        transaction("TXN-1", "C1", "North", "Laptop", 1, 10.0),
        transaction("TXN-2", "C2", "North", "Laptop", 1, 10.0),
        transaction("TXN-3", "C3", "North", "Laptop", 1, 20.0),
        transaction("TXN-4", "C4", "North", "Laptop", 1, 40.0),
    ];

    let aggregates = build_aggregates(&records);

    assert_eq!(aggregates.price_percentile(10.0), 0.5);
    assert_eq!(aggregates.price_percentile(20.0), 0.75);
    assert_eq!(aggregates.price_percentile(40.0), 1.0);
    assert_eq!(aggregates.price_percentile(5.0), 0.0);
}

#[test]
fn test_region_totals_and_ranks() {
    let records = vec![
        transaction("TXN-1", "C1", "North", "Laptop", 1, 100.0),
        transaction("TXN-2", "C2", "North", "Laptop", 1, 200.0),
        transaction("TXN-3", "C3", "South", "Laptop", 1, 500.0),
        transaction("TXN-4", "C4", "East", "Laptop", 1, 50.0),
    ];

    let aggregates = build_aggregates(&records);

    let north = aggregates.region("North").unwrap();
    assert_eq!(north.total_revenue, 300.0);
    assert_eq!(north.transaction_count, 2);
    assert_eq!(north.avg_revenue(), 150.0);
    assert_eq!(north.rank, 2);

    assert_eq!(aggregates.region("South").unwrap().rank, 1);
    assert_eq!(aggregates.region("East").unwrap().rank, 3);
    assert!(aggregates.region("West").is_none());
}

#[test]
fn test_region_rank_ties_broken_by_name() {
    let records = vec![
        transaction("TXN-1", "C1", "West", "Laptop", 1, 100.0),
        transaction("TXN-2", "C2", "East", "Laptop", 1, 100.0),
    ];

    let aggregates = build_aggregates(&records);

    assert_eq!(aggregates.region("East").unwrap().rank, 1);
    assert_eq!(aggregates.region("West").unwrap().rank, 2);
}

#[test]
fn test_high_value_cutoff_top_decile() {
    // Ten records with revenues 10, 20, .. 100; nearest-rank q=0.9 -> 90
    let records: Vec<_> = (1..=10)
        .map(|i| {
            transaction(
                &format!("TXN-{}", i),
                &format!("C{}", i),
                "North",
                "Laptop",
                1,
                (i * 10) as f64,
            )
        })
        .collect();

    let aggregates = build_aggregates(&records);

    assert!(aggregates.is_high_value(90.0));
    assert!(aggregates.is_high_value(100.0));
    assert!(!aggregates.is_high_value(80.0));
}

#[test]
fn test_single_record_aggregates() {
    let records = vec![transaction("TXN-1", "C1", "North", "Laptop", 2, 25.0)];

    let aggregates = build_aggregates(&records);

    assert_eq!(aggregates.price_percentile(25.0), 1.0);
    assert!(aggregates.is_high_value(50.0));
    assert_eq!(aggregates.region("North").unwrap().rank, 1);
    assert_eq!(aggregates.region_count(), 1);
}
