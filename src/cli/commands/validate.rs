//! Validate command implementation (stage one)
//!
//! Reads the run date's raw file from the object store, partitions it with
//! the record validator, and writes the cleaned file, the rejection log, and
//! the run summary into the processed zone. A run either completes with all
//! three outputs or aborts with no durable output.

use crate::app::adapters::object_store::{FsObjectStore, ObjectStore};
use crate::app::services::csv_codec;
use crate::app::services::validator::{RecordValidator, ValidationSummary};
use crate::cli::args::{OutputFormat, StageArgs};
use crate::constants;
use crate::{Error, Result};
use colored::Colorize;
use tracing::{info, warn};

use super::shared::{create_progress_bar, load_configuration, setup_logging};

/// Validate command runner
///
/// Workflow:
/// 1. Set up logging and load the rule catalog
/// 2. Read and decode the raw zone file for the run date
/// 3. Partition rows into accepted and rejected sets
/// 4. Write cleaned file + rejection log + summary to the processed zone
/// 5. Report the summary in the requested format
pub async fn run_validate(args: StageArgs) -> Result<ValidationSummary> {
    setup_logging(args.get_log_level())?;
    args.validate()?;

    let config = load_configuration(args.config_file.as_ref(), args.bucket_path.clone())?;
    let run_date = args.run_date();
    let store = FsObjectStore::new(config.store.bucket_path.clone());

    info!("Starting validation run for {}", run_date);

    let input_key = constants::daily_key(&config.store.raw_zone, run_date);
    let bytes = store.get(&input_key)?;

    let decoded = csv_codec::decode(&bytes, &input_key)?;
    if decoded.records.is_empty() {
        return Err(Error::empty_input(&input_key));
    }

    let validator = RecordValidator::new(config.schema.clone(), config.rules.clone());
    validator.ensure_header(&decoded.layout, &input_key)?;

    let progress = if args.show_progress() {
        Some(create_progress_bar(
            decoded.records.len() as u64,
            "Validating records",
        ))
    } else {
        None
    };

    let outcome = validator.validate(
        &decoded.layout,
        &decoded.records,
        run_date,
        progress.as_ref(),
    );

    if let Some(pb) = progress {
        pb.finish_with_message(format!(
            "Validation complete: {} accepted, {} rejected",
            outcome.accepted.len(),
            outcome.rejected.len()
        ));
    }

    if outcome.accepted.is_empty() {
        warn!(
            "No records survived validation for {} ({} rejected)",
            run_date,
            outcome.rejected.len()
        );
    }

    // Persist all three outputs; nothing was written before this point
    let output_key = constants::daily_key(&config.store.processed_zone, run_date);
    let cleaned = csv_codec::encode_transactions(&outcome.accepted, &decoded.layout)?;
    store.put(&output_key, &cleaned)?;

    let rejects_key = constants::rejects_key(&config.store.processed_zone, run_date);
    let rejects = csv_codec::encode_rejections(&outcome.rejected)?;
    store.put(&rejects_key, &rejects)?;

    let summary_key = constants::summary_key(&config.store.processed_zone, run_date);
    let summary_json = serde_json::to_vec_pretty(&outcome.summary)
        .map_err(|e| Error::io("Cannot serialize summary", std::io::Error::other(e)))?;
    store.put(&summary_key, &summary_json)?;

    info!(
        "Validation run complete: {} -> {}",
        input_key, output_key
    );

    report_summary(&args, &outcome.summary)?;

    Ok(outcome.summary)
}

/// Report the run summary in the requested output format
fn report_summary(args: &StageArgs, summary: &ValidationSummary) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => report_human(args, summary),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary)
                .map_err(|e| Error::io("Cannot serialize summary", std::io::Error::other(e)))?;
            println!("{}", json);
            Ok(())
        }
        OutputFormat::Csv => {
            println!("metric,value");
            println!("total_records,{}", summary.total_records);
            println!("valid_records,{}", summary.valid_records);
            println!("rejected_records,{}", summary.rejected_records);
            for (reason, count) in &summary.rejected_by_reason {
                println!("rejected_{},{}", reason.as_code(), count);
            }
            println!("rejection_rate_percent,{}", summary.rejection_rate_percent);
            println!("elapsed_seconds,{:.2}", summary.elapsed_seconds);
            Ok(())
        }
    }
}

/// Human-readable summary banner
fn report_human(args: &StageArgs, summary: &ValidationSummary) -> Result<()> {
    if args.quiet {
        return Ok(());
    }

    println!();
    println!("{}", "Validation Summary".bold());
    println!("{}", "=".repeat(60));
    println!("Total records:      {}", summary.total_records);
    println!(
        "Valid records:      {} ({:.2}%)",
        summary.valid_records.to_string().green(),
        summary.pass_rate_percent()
    );
    println!(
        "Rejected records:   {} ({:.2}%)",
        summary.rejected_records.to_string().red(),
        summary.rejection_rate_percent
    );

    if !summary.rejected_by_reason.is_empty() {
        println!("Rejections by reason:");
        for (reason, count) in &summary.rejected_by_reason {
            println!("  {:<18}{}", format!("{}:", reason.as_code()), count);
        }
    }

    println!("Processing time:    {:.2}s", summary.elapsed_seconds);
    println!("{}", "=".repeat(60));
    println!();

    Ok(())
}
