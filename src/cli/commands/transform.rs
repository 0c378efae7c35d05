//! Transform command implementation (stage two)
//!
//! Reads the run date's cleaned file from the processed zone, enriches every
//! record, and writes the enriched file plus the run report into the
//! aggregates zone. The stage assumes validated input: any row that fails to
//! re-parse is an internal consistency violation and aborts the run before
//! anything durable is written.

use crate::app::adapters::object_store::{FsObjectStore, ObjectStore};
use crate::app::models::TransactionRecord;
use crate::app::services::csv_codec::{self, DecodedFile};
use crate::app::services::enrichment::{EnrichmentEngine, RunReport};
use crate::app::services::validator::rules;
use crate::cli::args::{OutputFormat, StageArgs};
use crate::config::SchemaConfig;
use crate::constants;
use crate::{Error, Result};
use colored::Colorize;
use tracing::info;

use super::shared::{create_progress_bar, load_configuration, setup_logging};

/// Transform command runner
///
/// Workflow:
/// 1. Set up logging and load the enrichment configuration
/// 2. Read and strictly re-parse the processed zone file for the run date
/// 3. Enrich the full set (per-record pass, aggregate pass, attach pass)
/// 4. Write enriched file + run report to the aggregates zone
/// 5. Report the run in the requested format
pub async fn run_transform(args: StageArgs) -> Result<RunReport> {
    setup_logging(args.get_log_level())?;
    args.validate()?;

    let config = load_configuration(args.config_file.as_ref(), args.bucket_path.clone())?;
    let run_date = args.run_date();
    let store = FsObjectStore::new(config.store.bucket_path.clone());

    info!("Starting enrichment run for {}", run_date);

    let input_key = constants::daily_key(&config.store.processed_zone, run_date);
    let bytes = store.get(&input_key).map_err(|e| match e {
        Error::ObjectMissing { key } => Error::object_missing(format!(
            "{} (has the validator stage completed for {}?)",
            key, run_date
        )),
        other => other,
    })?;

    let decoded = csv_codec::decode(&bytes, &input_key)?;
    if decoded.records.is_empty() {
        return Err(Error::empty_input(&input_key));
    }

    let records = reparse_validated(&decoded, &config.schema, &input_key)?;
    let columns_before = decoded.layout.len();

    let progress = if args.show_progress() {
        // Two enrichment passes touch every record
        Some(create_progress_bar(
            (records.len() * 2) as u64,
            "Enriching records",
        ))
    } else {
        None
    };

    let engine = EnrichmentEngine::new(config.enrichment.clone());
    let (enriched, report) = engine.enrich(records, columns_before, progress.as_ref())?;

    if let Some(pb) = progress {
        pb.finish_with_message(format!("Enrichment complete: {} records", enriched.len()));
    }

    let output_key = constants::daily_key(&config.store.aggregates_zone, run_date);
    let encoded = csv_codec::encode_enriched(&enriched, &decoded.layout)?;
    store.put(&output_key, &encoded)?;

    let report_key = constants::summary_key(&config.store.aggregates_zone, run_date);
    let report_json = serde_json::to_vec_pretty(&report)
        .map_err(|e| Error::io("Cannot serialize report", std::io::Error::other(e)))?;
    store.put(&report_key, &report_json)?;

    info!("Enrichment run complete: {} -> {}", input_key, output_key);

    report_run(&args, &report)?;

    Ok(report)
}

/// Strictly re-parse validated rows into transactions
///
/// The validator wrote these rows, so every one of them must parse. A
/// failure here does not reject the row; it aborts the whole run.
fn reparse_validated(
    decoded: &DecodedFile,
    schema: &SchemaConfig,
    key: &str,
) -> Result<Vec<TransactionRecord>> {
    let mut records = Vec::with_capacity(decoded.records.len());

    for raw in &decoded.records {
        let candidate = rules::parse_candidate(raw, &decoded.layout, schema).map_err(|reason| {
            Error::internal_consistency(format!(
                "Row {} of validated input '{}' failed to parse ({})",
                raw.line, key, reason
            ))
        })?;

        let date = rules::parse_transaction_date(&candidate.date_raw).ok_or_else(|| {
            Error::internal_consistency(format!(
                "Row {} of validated input '{}' carries unparseable date '{}'",
                raw.line, key, candidate.date_raw
            ))
        })?;

        records.push(candidate.into_record(date));
    }

    Ok(records)
}

/// Report the run in the requested output format
fn report_run(args: &StageArgs, report: &RunReport) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => report_human(args, report),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| Error::io("Cannot serialize report", std::io::Error::other(e)))?;
            println!("{}", json);
            Ok(())
        }
        OutputFormat::Csv => {
            println!("metric,value");
            println!("records_processed,{}", report.records_processed);
            println!("columns_before,{}", report.columns_before);
            println!("columns_after,{}", report.columns_after);
            println!("columns_added,{}", report.columns_added);
            println!("total_revenue,{:.2}", report.total_revenue);
            println!("avg_revenue,{:.2}", report.avg_revenue);
            println!("elapsed_seconds,{:.2}", report.elapsed_seconds);
            Ok(())
        }
    }
}

/// Human-readable run banner
fn report_human(args: &StageArgs, report: &RunReport) -> Result<()> {
    if args.quiet {
        return Ok(());
    }

    println!();
    println!("{}", "Enrichment Summary".bold());
    println!("{}", "=".repeat(60));
    println!("Records processed:  {}", report.records_processed);
    println!(
        "Columns:            {} -> {} ({} added)",
        report.columns_before,
        report.columns_after,
        report.columns_added.to_string().green()
    );
    println!("Total revenue:      ${:.2}", report.total_revenue);
    println!("Average revenue:    ${:.2}", report.avg_revenue);
    println!("Processing time:    {:.2}s", report.elapsed_seconds);
    println!("{}", "=".repeat(60));
    println!();

    Ok(())
}
