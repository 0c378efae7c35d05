//! Delimited file decoding and encoding
//!
//! This module is the boundary between object-store byte streams and typed
//! records. Decoding produces a [`ColumnLayout`] plus positional
//! [`RawRecord`]s; the validator owns all per-row judgement, so decoding is
//! deliberately lenient (short or long rows pass through and are classified
//! later). Encoding writes the cleaned, rejection-log, and enriched outputs
//! with deterministic column order.

use crate::app::models::{EnrichedRecord, RawRecord, RejectedRecord, TransactionRecord};
use crate::constants::{self, columns};
use crate::{Error, Result};
use std::collections::HashMap;

/// Derived columns appended by the enrichment stage, in output order
pub const ENRICHED_COLUMNS: &[&str] = &[
    "revenue",
    "year",
    "month",
    "month_name",
    "day",
    "day_name",
    "day_of_week",
    "quarter",
    "week_of_year",
    "is_weekend",
    "is_business_day",
    "revenue_tier",
    "product_category",
    "customer_segment",
    "price_percentile",
    "is_high_value",
    "is_bulk_purchase",
    "regional_total_revenue",
    "regional_avg_revenue",
    "regional_rank",
    "above_regional_avg",
];

/// Header of a decoded file: column names with O(1) name lookup
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    /// Column names in file order
    pub columns: Vec<String>,
    name_to_index: HashMap<String, usize>,
}

impl ColumnLayout {
    /// Build a layout from header fields
    pub fn new(columns: Vec<String>) -> Self {
        let name_to_index = columns
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            columns,
            name_to_index,
        }
    }

    /// Positional index of a column, if present
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Whether the header contains a column
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    /// Columns outside the given required set, in file order
    pub fn passthrough_columns(&self, required: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !required.iter().any(|r| r == *c))
            .cloned()
            .collect()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the header is empty
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// A decoded delimited file: header layout plus raw data rows
#[derive(Debug, Clone)]
pub struct DecodedFile {
    pub layout: ColumnLayout,
    pub records: Vec<RawRecord>,
}

/// Decode a delimited byte stream into a header layout and raw rows
///
/// Rows with a field count different from the header are kept; the validator
/// rejects them with a schema reason instead of the decoder dropping them
/// silently.
pub fn decode(bytes: &[u8], key: &str) -> Result<DecodedFile> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| Error::csv_decode(key, "Cannot read header row", Some(e)))?
        .iter()
        .map(|h| h.to_string())
        .collect::<Vec<_>>();

    if headers.is_empty() {
        return Err(Error::csv_decode(key, "Header row is empty", None));
    }

    let layout = ColumnLayout::new(headers);

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| {
            Error::csv_decode(key, format!("Cannot decode data row {}", index + 1), Some(e))
        })?;
        records.push(RawRecord {
            line: index + 1,
            fields: row.iter().map(|f| f.to_string()).collect(),
        });
    }

    Ok(DecodedFile { layout, records })
}

/// Render a transaction's field for a named column
fn transaction_field(record: &TransactionRecord, column: &str) -> String {
    match column {
        columns::TRANSACTION_ID => record.transaction_id.clone(),
        columns::DATE => record
            .transaction_date
            .format(constants::DATE_FORMAT)
            .to_string(),
        columns::REGION => record.region.clone(),
        columns::PRODUCT => record.product.clone(),
        columns::QUANTITY => record.quantity.to_string(),
        columns::PRICE => format!("{:.2}", record.price),
        columns::CUSTOMER_ID => record.customer_id.clone(),
        other => record.passthrough.get(other).cloned().unwrap_or_default(),
    }
}

/// Encode cleaned transactions with the original file's column order
pub fn encode_transactions(
    records: &[TransactionRecord],
    layout: &ColumnLayout,
) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(&layout.columns)?;
    for record in records {
        let row: Vec<String> = layout
            .columns
            .iter()
            .map(|column| transaction_field(record, column))
            .collect();
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::io("Cannot flush CSV buffer", std::io::Error::other(e)))
}

/// Encode the rejection log (line, transaction_id, reason)
pub fn encode_rejections(rejects: &[RejectedRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(["line", "transaction_id", "reason"])?;
    for reject in rejects {
        writer.write_record([
            reject.line.to_string().as_str(),
            reject.transaction_id.as_str(),
            reject.reason.as_code(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::io("Cannot flush CSV buffer", std::io::Error::other(e)))
}

/// Encode enriched records: base columns in input order, then
/// [`ENRICHED_COLUMNS`]
pub fn encode_enriched(records: &[EnrichedRecord], layout: &ColumnLayout) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let header: Vec<&str> = layout
        .columns
        .iter()
        .map(|c| c.as_str())
        .chain(ENRICHED_COLUMNS.iter().copied())
        .collect();
    writer.write_record(&header)?;

    for record in records {
        let mut row: Vec<String> = layout
            .columns
            .iter()
            .map(|column| transaction_field(&record.transaction, column))
            .collect();

        let parts = &record.date_parts;
        row.extend([
            format!("{:.2}", record.revenue),
            parts.year.to_string(),
            parts.month.to_string(),
            parts.month_name.clone(),
            parts.day.to_string(),
            parts.day_name.clone(),
            parts.day_of_week.to_string(),
            parts.quarter.to_string(),
            parts.week_of_year.to_string(),
            parts.is_weekend.to_string(),
            parts.is_business_day.to_string(),
            record.revenue_tier.to_string(),
            record.product_category.clone(),
            record.customer_segment.to_string(),
            format!("{:.4}", record.price_percentile),
            record.is_high_value.to_string(),
            record.is_bulk_purchase.to_string(),
            format!("{:.2}", record.regional_total_revenue),
            format!("{:.2}", record.regional_avg_revenue),
            record.regional_rank.to_string(),
            record.above_regional_avg.to_string(),
        ]);

        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| Error::io("Cannot flush CSV buffer", std::io::Error::other(e)))
}
