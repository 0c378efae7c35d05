//! Tests for the enrichment engine: attach pass, ordering, and the report

use super::*;
use crate::app::models::{CustomerSegment, RevenueTier};
use crate::app::services::csv_codec::ENRICHED_COLUMNS;
use crate::app::services::enrichment::EnrichmentEngine;

fn engine() -> EnrichmentEngine {
    EnrichmentEngine::new(test_config())
}

#[test]
fn test_contract_scenario_revenue_and_tier() {
    // qty 5 x price 20.00 -> revenue 100.00, Medium under default thresholds
    let records = vec![transaction("3", "CUST-1", "North", "Laptop", 5, 20.0)];

    let (enriched, report) = engine().enrich(records, 7, None).unwrap();

    assert_eq!(enriched[0].revenue, 100.0);
    assert_eq!(enriched[0].revenue_tier, RevenueTier::Medium);
    assert_eq!(report.records_processed, 1);
}

#[test]
fn test_output_preserves_input_order() {
    let records = vec![
        transaction("TXN-3", "C1", "North", "Laptop", 1, 10.0),
        transaction("TXN-1", "C2", "South", "Mouse", 1, 20.0),
        transaction("TXN-2", "C3", "East", "Cable", 1, 30.0),
    ];

    let (enriched, _) = engine().enrich(records, 7, None).unwrap();

    let ids: Vec<&str> = enriched
        .iter()
        .map(|r| r.transaction.transaction_id.as_str())
        .collect();
    assert_eq!(ids, vec!["TXN-3", "TXN-1", "TXN-2"]);
}

#[test]
fn test_segment_attached_from_run_lifetime_revenue() {
    // CUST-1 buys twice for a 2100 lifetime -> Gold on both records
    let records = vec![
        transaction("TXN-1", "CUST-1", "North", "Laptop", 1, 2000.0),
        transaction("TXN-2", "CUST-1", "South", "Mouse", 1, 100.0),
        transaction("TXN-3", "CUST-2", "North", "Cable", 1, 10.0),
    ];

    let (enriched, _) = engine().enrich(records, 7, None).unwrap();

    assert_eq!(enriched[0].customer_segment, CustomerSegment::Gold);
    assert_eq!(enriched[1].customer_segment, CustomerSegment::Gold);
    assert_eq!(enriched[2].customer_segment, CustomerSegment::Bronze);
}

#[test]
fn test_regional_fields_attached() {
    let records = vec![
        transaction("TXN-1", "C1", "North", "Laptop", 1, 100.0),
        transaction("TXN-2", "C2", "North", "Laptop", 1, 300.0),
        transaction("TXN-3", "C3", "South", "Laptop", 1, 50.0),
    ];

    let (enriched, _) = engine().enrich(records, 7, None).unwrap();

    assert_eq!(enriched[0].regional_total_revenue, 400.0);
    assert_eq!(enriched[0].regional_avg_revenue, 200.0);
    assert_eq!(enriched[0].regional_rank, 1);
    assert!(!enriched[0].above_regional_avg);
    assert!(enriched[1].above_regional_avg);
    assert_eq!(enriched[2].regional_rank, 2);
}

#[test]
fn test_report_totals_match_record_sum() {
    let records = vec![
        transaction("TXN-1", "C1", "North", "Laptop", 2, 10.5),
        transaction("TXN-2", "C2", "South", "Mouse", 3, 7.25),
        transaction("TXN-3", "C3", "East", "Cable", 1, 99.99),
    ];

    let (enriched, report) = engine().enrich(records, 7, None).unwrap();

    let sum: f64 = enriched.iter().map(|r| r.revenue).sum();
    assert!((report.total_revenue - sum).abs() < 1e-6);
    assert!((report.avg_revenue - sum / 3.0).abs() < 0.01);
    assert_eq!(report.records_processed, 3);
}

#[test]
fn test_report_column_counts() {
    let records = vec![transaction("TXN-1", "C1", "North", "Laptop", 1, 10.0)];

    let (_, report) = engine().enrich(records, 9, None).unwrap();

    assert_eq!(report.columns_before, 9);
    assert_eq!(report.columns_added, ENRICHED_COLUMNS.len());
    assert_eq!(report.columns_after, 9 + ENRICHED_COLUMNS.len());
}

#[test]
fn test_empty_input_aborts() {
    let result = engine().enrich(Vec::new(), 7, None);
    assert!(result.is_err());
}

#[test]
fn test_enrichment_is_deterministic() {
    let records = vec![
        transaction("TXN-1", "C1", "North", "Laptop", 2, 10.5),
        transaction("TXN-2", "C2", "South", "Mouse", 3, 7.25),
    ];

    let (first, _) = engine().enrich(records.clone(), 7, None).unwrap();
    let (second, _) = engine().enrich(records, 7, None).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_high_value_flag_on_top_revenue() {
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

    let (enriched, _) = engine().enrich(records, 7, None).unwrap();

    let high_value: Vec<bool> = enriched.iter().map(|r| r.is_high_value).collect();
    assert!(!high_value[..8].iter().any(|flag| *flag));
    assert!(high_value[8]);
    assert!(high_value[9]);
}
