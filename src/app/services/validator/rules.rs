//! Typed row parsing and the ordered business-rule table
//!
//! Parsing covers the schema and null checks; the business rules are an
//! ordered list of independent predicate+reason pairs evaluated in a fixed
//! sequence, stopping at the first failure. Adding or removing a rule means
//! editing the table, not the evaluation loop.

use crate::app::models::{RawRecord, RejectReason, TransactionRecord};
use crate::app::services::csv_codec::ColumnLayout;
use crate::config::{RuleCatalog, SchemaConfig};
use crate::constants::{self, columns};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// A row that passed the schema and null checks but not yet the duplicate
/// and business-rule checks
///
/// The date stays raw here: its parseability is judged by the `invalid_date`
/// business rule, after quantity, price, and region, so that the fixed check
/// precedence holds for rows with several defects.
#[derive(Debug, Clone, PartialEq)]
pub struct RowCandidate {
    pub line: usize,
    pub transaction_id: String,
    pub date_raw: String,
    pub region: String,
    pub product: String,
    pub quantity: i64,
    pub price: f64,
    pub customer_id: String,
    pub passthrough: BTreeMap<String, String>,
}

impl RowCandidate {
    /// Finalize into a transaction once every check has passed
    pub fn into_record(self, transaction_date: NaiveDate) -> TransactionRecord {
        TransactionRecord {
            transaction_id: self.transaction_id,
            transaction_date,
            region: self.region,
            product: self.product,
            quantity: self.quantity,
            price: self.price,
            customer_id: self.customer_id,
            passthrough: self.passthrough,
        }
    }
}

/// Parse the canonical date format
pub fn parse_transaction_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, constants::DATE_FORMAT).ok()
}

/// Parse a raw row into a [`RowCandidate`], applying the schema check and
/// then the null check
///
/// Scan order encodes the precedence: first every required field must be
/// present and (for numeric columns) parseable when non-empty
/// (`schema_error`), then every required field must be non-empty
/// (`null_value`).
pub fn parse_candidate(
    record: &RawRecord,
    layout: &ColumnLayout,
    schema: &SchemaConfig,
) -> Result<RowCandidate, RejectReason> {
    // Schema scan: field presence
    let mut required_fields: Vec<(&str, &str)> = Vec::with_capacity(schema.required_columns.len());
    for name in &schema.required_columns {
        let index = layout
            .index_of(name)
            .ok_or(RejectReason::SchemaError)?;
        let value = record.get(index).ok_or(RejectReason::SchemaError)?;
        required_fields.push((name.as_str(), value));
    }

    // Schema scan: numeric fields must coerce when non-empty
    let mut quantity: Option<i64> = None;
    let mut price: Option<f64> = None;
    for (name, value) in &required_fields {
        match *name {
            columns::QUANTITY if !value.is_empty() => {
                quantity = Some(value.parse::<i64>().map_err(|_| RejectReason::SchemaError)?);
            }
            columns::PRICE if !value.is_empty() => {
                let parsed = value.parse::<f64>().map_err(|_| RejectReason::SchemaError)?;
                if !parsed.is_finite() {
                    return Err(RejectReason::SchemaError);
                }
                price = Some(parsed);
            }
            _ => {}
        }
    }

    // Null scan: every required field must carry a value
    if required_fields.iter().any(|(_, value)| value.is_empty()) {
        return Err(RejectReason::NullValue);
    }

    let field = |name: &str| -> String {
        required_fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.to_string())
            .unwrap_or_default()
    };

    let passthrough = layout
        .passthrough_columns(&schema.required_columns)
        .into_iter()
        .filter_map(|name| {
            let index = layout.index_of(&name)?;
            let value = record.get(index)?;
            Some((name, value.to_string()))
        })
        .collect();

    Ok(RowCandidate {
        line: record.line,
        transaction_id: field(columns::TRANSACTION_ID),
        date_raw: field(columns::DATE),
        region: field(columns::REGION),
        product: field(columns::PRODUCT),
        // Non-empty at this point: the null scan has passed
        quantity: quantity.ok_or(RejectReason::NullValue)?,
        price: price.ok_or(RejectReason::NullValue)?,
        customer_id: field(columns::CUSTOMER_ID),
        passthrough,
    })
}

/// One business rule: a predicate over the candidate plus the reason
/// recorded when the predicate fails
pub struct BusinessRule {
    pub reason: RejectReason,
    pub check: fn(&RowCandidate, &RuleCatalog, NaiveDate) -> bool,
}

/// The business rules, in evaluation order
pub const BUSINESS_RULES: &[BusinessRule] = &[
    BusinessRule {
        reason: RejectReason::InvalidQuantity,
        check: quantity_in_range,
    },
    BusinessRule {
        reason: RejectReason::InvalidPrice,
        check: price_in_range,
    },
    BusinessRule {
        reason: RejectReason::InvalidRegion,
        check: region_whitelisted,
    },
    BusinessRule {
        reason: RejectReason::InvalidDate,
        check: date_valid_and_not_future,
    },
];

/// Apply the business rules in order, returning the first failure
pub fn apply_business_rules(
    candidate: &RowCandidate,
    catalog: &RuleCatalog,
    run_date: NaiveDate,
) -> Result<(), RejectReason> {
    for rule in BUSINESS_RULES {
        if !(rule.check)(candidate, catalog, run_date) {
            return Err(rule.reason);
        }
    }
    Ok(())
}

fn quantity_in_range(candidate: &RowCandidate, catalog: &RuleCatalog, _run_date: NaiveDate) -> bool {
    (catalog.min_quantity..=catalog.max_quantity).contains(&candidate.quantity)
}

fn price_in_range(candidate: &RowCandidate, catalog: &RuleCatalog, _run_date: NaiveDate) -> bool {
    candidate.price >= catalog.min_price && candidate.price <= catalog.max_price
}

fn region_whitelisted(candidate: &RowCandidate, catalog: &RuleCatalog, _run_date: NaiveDate) -> bool {
    catalog.region_is_valid(&candidate.region)
}

/// The date must parse to a real calendar date and must not be after the run
/// date. The run date, not the system clock, is the reference so that
/// re-running a historical date is deterministic.
fn date_valid_and_not_future(
    candidate: &RowCandidate,
    _catalog: &RuleCatalog,
    run_date: NaiveDate,
) -> bool {
    match parse_transaction_date(&candidate.date_raw) {
        Some(date) => date <= run_date,
        None => false,
    }
}
