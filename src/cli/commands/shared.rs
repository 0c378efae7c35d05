//! Shared components for CLI commands
//!
//! This module contains common utilities used across the stage commands:
//! logging setup, layered configuration loading, and progress reporting.

use crate::config::PipelineConfig;
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, info};

/// Set up structured logging with the given level
pub fn setup_logging(log_level: &str) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sales_pipeline={}", log_level)));

    // try_init: a second stage invoked from the same process keeps the
    // subscriber of the first
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (file -> defaults, CLI overrides on top)
pub fn load_configuration(
    config_file: Option<&PathBuf>,
    bucket_override: Option<PathBuf>,
) -> Result<PipelineConfig> {
    info!("Loading configuration");

    // Fall back to the default config file location when none was given
    let default_config_path = if config_file.is_none() {
        PipelineConfig::default_config_path().filter(|path| path.exists())
    } else {
        None
    };

    let config_path = config_file.or(default_config_path.as_ref());

    if let Some(path) = config_path {
        info!("Using config file: {}", path.display());
    } else {
        info!("No config file found, using built-in defaults");
    }

    let config = PipelineConfig::load_layered(config_path.map(|p| p.as_path()), bucket_override)?;

    // Catalog failures are fatal before any record is processed
    config.validate()?;

    Ok(config)
}

/// Create a progress bar for record-level operations
pub fn create_progress_bar(total: u64, operation: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message(operation.to_string());
    pb
}

/// Classify whether an error should halt a multi-stage invocation
pub fn is_critical_error(error: &Error) -> bool {
    matches!(
        error,
        Error::Configuration { .. } | Error::InternalConsistency { .. }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_configuration_defaults() {
        let config = load_configuration(None, None).unwrap();
        assert_eq!(config.rules.max_quantity, 1000);
    }

    #[test]
    fn test_load_configuration_bucket_override() {
        let config = load_configuration(None, Some(PathBuf::from("/tmp/bucket"))).unwrap();
        assert_eq!(config.store.bucket_path, PathBuf::from("/tmp/bucket"));
    }

    #[test]
    fn test_critical_error_classification() {
        assert!(is_critical_error(&Error::configuration("bad catalog")));
        assert!(is_critical_error(&Error::internal_consistency("bad row")));
        assert!(!is_critical_error(&Error::object_missing("raw-zone/x.csv")));
    }
}
