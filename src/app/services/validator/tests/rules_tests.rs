//! Tests for typed row parsing and the ordered business-rule table

use super::*;
use crate::app::models::RejectReason;
use crate::app::services::validator::rules::{
    BUSINESS_RULES, apply_business_rules, parse_candidate, parse_transaction_date,
};

#[test]
fn test_parse_candidate_valid_row() {
    let layout = test_layout();
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "North", "Laptop", "2", "10.00", "CUST-1"],
    );

    let candidate = parse_candidate(&row, &layout, &test_schema()).unwrap();
    assert_eq!(candidate.transaction_id, "TXN-1");
    assert_eq!(candidate.quantity, 2);
    assert_eq!(candidate.price, 10.00);
    assert_eq!(candidate.date_raw, "2025-01-01");
    assert!(candidate.passthrough.is_empty());
}

#[test]
fn test_parse_candidate_captures_passthrough() {
    let layout = test_layout_with_channel();
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "North", "Laptop", "2", "10.00", "CUST-1", "web"],
    );

    let candidate = parse_candidate(&row, &layout, &test_schema()).unwrap();
    assert_eq!(candidate.passthrough.get("channel").unwrap(), "web");
}

#[test]
fn test_short_row_is_schema_error() {
    let layout = test_layout();
    let row = raw_row(1, &["TXN-1", "2025-01-01", "North"]);

    assert_eq!(
        parse_candidate(&row, &layout, &test_schema()),
        Err(RejectReason::SchemaError)
    );
}

#[test]
fn test_unparseable_quantity_is_schema_error() {
    let layout = test_layout();
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "North", "Laptop", "two", "10.00", "CUST-1"],
    );

    assert_eq!(
        parse_candidate(&row, &layout, &test_schema()),
        Err(RejectReason::SchemaError)
    );
}

#[test]
fn test_unparseable_price_is_schema_error() {
    let layout = test_layout();
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "North", "Laptop", "2", "ten", "CUST-1"],
    );

    assert_eq!(
        parse_candidate(&row, &layout, &test_schema()),
        Err(RejectReason::SchemaError)
    );
}

#[test]
fn test_non_finite_price_is_schema_error() {
    let layout = test_layout();
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "North", "Laptop", "2", "1e999", "CUST-1"],
    );

    assert_eq!(
        parse_candidate(&row, &layout, &test_schema()),
        Err(RejectReason::SchemaError)
    );
}

#[test]
fn test_empty_field_is_null_value() {
    let layout = test_layout();
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "", "Laptop", "2", "10.00", "CUST-1"],
    );

    assert_eq!(
        parse_candidate(&row, &layout, &test_schema()),
        Err(RejectReason::NullValue)
    );
}

#[test]
fn test_empty_numeric_field_is_null_value() {
    // An empty quantity is a missing value, not a type failure
    let layout = test_layout();
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "North", "Laptop", "", "10.00", "CUST-1"],
    );

    assert_eq!(
        parse_candidate(&row, &layout, &test_schema()),
        Err(RejectReason::NullValue)
    );
}

#[test]
fn test_schema_error_wins_over_null_value() {
    // Bad quantity and an empty region on the same row: schema first
    let layout = test_layout();
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "", "Laptop", "two", "10.00", "CUST-1"],
    );

    assert_eq!(
        parse_candidate(&row, &layout, &test_schema()),
        Err(RejectReason::SchemaError)
    );
}

#[test]
fn test_business_rule_table_order() {
    let reasons: Vec<RejectReason> = BUSINESS_RULES.iter().map(|r| r.reason).collect();
    assert_eq!(
        reasons,
        vec![
            RejectReason::InvalidQuantity,
            RejectReason::InvalidPrice,
            RejectReason::InvalidRegion,
            RejectReason::InvalidDate,
        ]
    );
}

#[test]
fn test_quantity_bounds_inclusive() {
    let layout = test_layout();
    let rules = test_rules();
    let run_date = test_run_date();

    for (quantity, expected) in [
        ("0", Err(RejectReason::InvalidQuantity)),
        ("1", Ok(())),
        ("1000", Ok(())),
        ("1001", Err(RejectReason::InvalidQuantity)),
        ("-5", Err(RejectReason::InvalidQuantity)),
    ] {
        let row = raw_row(
            1,
            &["TXN-1", "2025-01-01", "North", "Laptop", quantity, "10.00", "CUST-1"],
        );
        let candidate = parse_candidate(&row, &layout, &test_schema()).unwrap();
        assert_eq!(
            apply_business_rules(&candidate, &rules, run_date),
            expected,
            "quantity {}",
            quantity
        );
    }
}

#[test]
fn test_price_bounds_inclusive() {
    let layout = test_layout();
    let rules = test_rules();
    let run_date = test_run_date();

    for (price, expected) in [
        ("0.00", Err(RejectReason::InvalidPrice)),
        ("0.01", Ok(())),
        ("100000.00", Ok(())),
        ("100000.01", Err(RejectReason::InvalidPrice)),
    ] {
        let row = raw_row(
            1,
            &["TXN-1", "2025-01-01", "North", "Laptop", "2", price, "CUST-1"],
        );
        let candidate = parse_candidate(&row, &layout, &test_schema()).unwrap();
        assert_eq!(
            apply_business_rules(&candidate, &rules, run_date),
            expected,
            "price {}",
            price
        );
    }
}

#[test]
fn test_region_whitelist() {
    let layout = test_layout();
    let rules = test_rules();
    let run_date = test_run_date();

    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "Atlantis", "Laptop", "2", "10.00", "CUST-1"],
    );
    let candidate = parse_candidate(&row, &layout, &test_schema()).unwrap();
    assert_eq!(
        apply_business_rules(&candidate, &rules, run_date),
        Err(RejectReason::InvalidRegion)
    );
}

#[test]
fn test_unparseable_date_is_invalid_date() {
    let layout = test_layout();
    let rules = test_rules();
    let run_date = test_run_date();

    for bad_date in ["01/01/2025", "2025-13-01", "2025-02-30", "not-a-date"] {
        let row = raw_row(
            1,
            &["TXN-1", bad_date, "North", "Laptop", "2", "10.00", "CUST-1"],
        );
        let candidate = parse_candidate(&row, &layout, &test_schema()).unwrap();
        assert_eq!(
            apply_business_rules(&candidate, &rules, run_date),
            Err(RejectReason::InvalidDate),
            "date {}",
            bad_date
        );
    }
}

#[test]
fn test_future_date_uses_run_date_not_clock() {
    let layout = test_layout();
    let rules = test_rules();
    let run_date = test_run_date(); // 2025-01-15

    // One day after the run date: rejected
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-16", "North", "Laptop", "2", "10.00", "CUST-1"],
    );
    let candidate = parse_candidate(&row, &layout, &test_schema()).unwrap();
    assert_eq!(
        apply_business_rules(&candidate, &rules, run_date),
        Err(RejectReason::InvalidDate)
    );

    // Exactly the run date: accepted
    let row = raw_row(
        1,
        &["TXN-1", "2025-01-15", "North", "Laptop", "2", "10.00", "CUST-1"],
    );
    let candidate = parse_candidate(&row, &layout, &test_schema()).unwrap();
    assert_eq!(apply_business_rules(&candidate, &rules, run_date), Ok(()));
}

#[test]
fn test_rule_precedence_first_failure_wins() {
    // Bad quantity and bad region together: quantity reason reported
    let layout = test_layout();
    let rules = test_rules();

    let row = raw_row(
        1,
        &["TXN-1", "2025-01-01", "Atlantis", "Laptop", "0", "10.00", "CUST-1"],
    );
    let candidate = parse_candidate(&row, &layout, &test_schema()).unwrap();
    assert_eq!(
        apply_business_rules(&candidate, &rules, test_run_date()),
        Err(RejectReason::InvalidQuantity)
    );
}

#[test]
fn test_parse_transaction_date_formats() {
    assert!(parse_transaction_date("2025-01-01").is_some());
    assert!(parse_transaction_date("01-01-2025").is_none());
    assert!(parse_transaction_date("").is_none());
}
