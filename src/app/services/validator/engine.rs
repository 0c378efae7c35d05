//! Main record validator implementation
//!
//! Walks the raw rows once, in input order, classifying each row by the
//! first failing check and partitioning the input into accepted transactions
//! and rejected rows. No shared external state is touched: the outcome is
//! the only output.

use crate::app::models::{RawRecord, RejectReason, RejectedRecord, TransactionRecord};
use crate::app::services::csv_codec::ColumnLayout;
use crate::config::{RuleCatalog, SchemaConfig};
use crate::constants::columns;
use crate::{Error, Result};
use chrono::NaiveDate;
use indicatif::ProgressBar;
use std::collections::HashSet;
use tracing::{debug, info};

use super::metrics::{MetricsCollector, ValidationSummary};
use super::rules::{apply_business_rules, parse_candidate, parse_transaction_date};

/// The three outputs of a validation run
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    /// Transactions that passed every check, in input order
    pub accepted: Vec<TransactionRecord>,

    /// Rejected rows with their single reason, in input order
    pub rejected: Vec<RejectedRecord>,

    /// Frozen counters for the run
    pub summary: ValidationSummary,
}

/// Record validator for raw sales transactions
///
/// Holds the schema and rule catalog injected at construction; a validator
/// is cheap to build and valid for exactly one catalog.
#[derive(Debug, Clone)]
pub struct RecordValidator {
    schema: SchemaConfig,
    rules: RuleCatalog,
}

impl RecordValidator {
    /// Create a validator over a schema and rule catalog
    pub fn new(schema: SchemaConfig, rules: RuleCatalog) -> Self {
        Self { schema, rules }
    }

    /// Verify that the input header carries every required column
    ///
    /// A missing header column makes every row unparseable, so this is a
    /// run-level failure rather than a per-row rejection.
    pub fn ensure_header(&self, layout: &ColumnLayout, key: &str) -> Result<()> {
        for column in &self.schema.required_columns {
            if !layout.contains(column) {
                return Err(Error::missing_column(column, key));
            }
        }
        Ok(())
    }

    /// Partition raw rows into accepted and rejected sets
    ///
    /// The duplicate check tracks transaction_ids incrementally in input
    /// order: the first row carrying an id (that passed the schema and null
    /// checks) marks it seen, and every later row with the same id is
    /// rejected as a duplicate regardless of its other fields.
    pub fn validate(
        &self,
        layout: &ColumnLayout,
        records: &[RawRecord],
        run_date: NaiveDate,
        progress: Option<&ProgressBar>,
    ) -> ValidationOutcome {
        let mut collector = MetricsCollector::start(records.len());
        let mut seen_ids: HashSet<String> = HashSet::with_capacity(records.len());
        let mut accepted = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        info!(
            "Starting validation of {} records against run date {}",
            records.len(),
            run_date
        );

        let id_index = layout.index_of(columns::TRANSACTION_ID);

        for record in records {
            // Raw id field for the rejection log, best effort
            let raw_id = id_index
                .and_then(|index| record.get(index))
                .unwrap_or("")
                .to_string();

            let outcome = parse_candidate(record, layout, &self.schema)
                .and_then(|candidate| {
                    if !seen_ids.insert(candidate.transaction_id.clone()) {
                        return Err(RejectReason::Duplicate);
                    }
                    apply_business_rules(&candidate, &self.rules, run_date)?;
                    Ok(candidate)
                })
                .map(|candidate| {
                    // Parse cannot fail here: the date rule has already run
                    let date = parse_transaction_date(&candidate.date_raw)
                        .unwrap_or(run_date);
                    accepted.push(candidate.into_record(date));
                });

            match outcome {
                Ok(()) => collector.record_accepted(),
                Err(reason) => {
                    debug!("Rejected row {} ({}): {}", record.line, raw_id, reason);
                    collector.record_rejection(reason);
                    rejected.push(RejectedRecord {
                        line: record.line,
                        transaction_id: raw_id,
                        reason,
                    });
                }
            }

            if let Some(pb) = progress {
                pb.inc(1);
            }
        }

        debug_assert_eq!(accepted.len() + rejected.len(), records.len());

        let summary = collector.finish();
        info!("{}", summary.summary());

        ValidationOutcome {
            accepted,
            rejected,
            summary,
        }
    }

    /// The schema this validator checks against
    pub fn schema(&self) -> &SchemaConfig {
        &self.schema
    }

    /// The rule catalog this validator applies
    pub fn rules(&self) -> &RuleCatalog {
        &self.rules
    }
}
