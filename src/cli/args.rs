//! Command-line argument definitions for the sales pipeline
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Both stages take the same shape of arguments: a run date plus bucket and
//! config overrides. Stage sequencing lives outside this binary; each
//! invocation runs exactly one stage.

use crate::constants;
use crate::{Error, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the sales data pipeline
///
/// Validates and enriches daily sales transaction files stored in a
/// raw/processed/aggregates zone layout.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "sales-pipeline",
    version,
    about = "Validate and enrich daily sales transaction files",
    long_about = "A batch pipeline over daily sales transaction files. Stage one (validate) \
                  cleans a raw drop against a schema and rule catalog and records every \
                  rejection with a reason. Stage two (transform) derives analytical columns \
                  over the cleaned file. Each stage exits non-zero on run-level failure so \
                  an external scheduler can halt the chain."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the pipeline
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a raw daily file into the processed zone (stage one)
    Validate(StageArgs),
    /// Enrich a processed daily file into the aggregates zone (stage two)
    Transform(StageArgs),
    /// Generate a synthetic raw daily file for pipeline testing
    Generate(GenerateArgs),
}

/// Arguments shared by the validate and transform stages
#[derive(Debug, Clone, Parser)]
pub struct StageArgs {
    /// Run date (YYYY-MM-DD)
    ///
    /// Selects the daily file in every zone and anchors the future-date
    /// rule. Defaults to today when omitted.
    #[arg(value_name = "DATE", value_parser = parse_run_date)]
    pub date: Option<NaiveDate>,

    /// Bucket root directory
    ///
    /// Overrides the configured object-store location. The directory holds
    /// the raw-zone/, processed-zone/, and aggregates-zone/ prefixes.
    #[arg(short = 'b', long = "bucket", value_name = "PATH")]
    pub bucket_path: Option<PathBuf>,

    /// Path to configuration file (TOML format)
    ///
    /// If not specified, looks for ~/.config/sales-pipeline/config.toml and
    /// falls back to built-in defaults.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the stage summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for the stage summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the generate command
#[derive(Debug, Clone, Parser)]
pub struct GenerateArgs {
    /// Run date (YYYY-MM-DD); defaults to today
    #[arg(value_name = "DATE", value_parser = parse_run_date)]
    pub date: Option<NaiveDate>,

    /// Bucket root directory
    #[arg(short = 'b', long = "bucket", value_name = "PATH")]
    pub bucket_path: Option<PathBuf>,

    /// Path to configuration file (TOML format)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Number of records to generate
    #[arg(short = 'n', long = "records", value_name = "COUNT", default_value_t = 1000)]
    pub records: usize,

    /// Fraction of deliberately defective rows (duplicates, nulls, bad values)
    #[arg(
        long = "dirty-fraction",
        value_name = "FRACTION",
        default_value_t = 0.05
    )]
    pub dirty_fraction: f64,

    /// Seed for reproducible output
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Logging verbosity level
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Output format options for stage summaries
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
    /// CSV format for data analysis
    Csv,
}

/// Parse a run date argument in canonical format
pub fn parse_run_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, constants::DATE_FORMAT)
        .map_err(|_| format!("Invalid run date '{}': expected YYYY-MM-DD", raw))
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .expect("Command should be present when get_command() is called")
    }
}

impl StageArgs {
    /// The run date, defaulting to today
    pub fn run_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Validate the stage arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl GenerateArgs {
    /// The run date, defaulting to today
    pub fn run_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Validate the generate arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if self.records == 0 {
            return Err(Error::configuration(
                "Record count must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.dirty_fraction) {
            return Err(Error::configuration(format!(
                "Dirty fraction {} must be within [0, 1]",
                self.dirty_fraction
            )));
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                _ => "debug",
            }
        }
    }
}
