//! Configuration management and validation.
//!
//! Provides the schema and rule catalog injected into the validator and the
//! threshold/lookup configuration injected into the enrichment engine.
//! Configuration is loaded once at startup (TOML file over defaults, CLI
//! overrides on top) and validated fatally before any record is processed.

use crate::constants;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top-level pipeline configuration
///
/// An immutable catalog passed into both engines at construction. Nothing in
/// the core reads ambient/global state.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Object store layout
    pub store: StoreConfig,

    /// Required input schema
    pub schema: SchemaConfig,

    /// Validation rule bounds and whitelists
    pub rules: RuleCatalog,

    /// Enrichment thresholds and lookup tables
    pub enrichment: EnrichmentConfig,
}

/// Object store layout: bucket root and zone prefixes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Root directory of the filesystem-backed bucket
    pub bucket_path: PathBuf,

    /// Zone prefix for raw daily drops
    pub raw_zone: String,

    /// Zone prefix for validated output
    pub processed_zone: String,

    /// Zone prefix for enriched output
    pub aggregates_zone: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket_path: PathBuf::from("./bucket"),
            raw_zone: constants::RAW_ZONE.to_string(),
            processed_zone: constants::PROCESSED_ZONE.to_string(),
            aggregates_zone: constants::AGGREGATES_ZONE.to_string(),
        }
    }
}

/// Required input schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Columns that must be present in the input header
    pub required_columns: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            required_columns: constants::REQUIRED_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

/// Business-rule bounds and whitelists for the validator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleCatalog {
    /// Minimum accepted quantity (inclusive)
    pub min_quantity: i64,

    /// Maximum accepted quantity (inclusive)
    pub max_quantity: i64,

    /// Minimum accepted unit price (inclusive)
    pub min_price: f64,

    /// Maximum accepted unit price (inclusive)
    pub max_price: f64,

    /// Accepted sales regions
    pub valid_regions: Vec<String>,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self {
            min_quantity: constants::DEFAULT_MIN_QUANTITY,
            max_quantity: constants::DEFAULT_MAX_QUANTITY,
            min_price: constants::DEFAULT_MIN_PRICE,
            max_price: constants::DEFAULT_MAX_PRICE,
            valid_regions: constants::DEFAULT_VALID_REGIONS
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}

impl RuleCatalog {
    /// Check whether a region is whitelisted
    pub fn region_is_valid(&self, region: &str) -> bool {
        self.valid_regions.iter().any(|r| r == region)
    }
}

/// Revenue tier boundaries (minimums, ascending)
///
/// Bands are half-open `[lower, upper)`: a revenue exactly on a boundary
/// maps to the higher tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub medium_min: f64,
    pub high_min: f64,
    pub premium_min: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            medium_min: constants::DEFAULT_TIER_MEDIUM_MIN,
            high_min: constants::DEFAULT_TIER_HIGH_MIN,
            premium_min: constants::DEFAULT_TIER_PREMIUM_MIN,
        }
    }
}

/// Customer segment boundaries over run-lifetime revenue (minimums, ascending)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentThresholds {
    pub silver_min: f64,
    pub gold_min: f64,
    pub platinum_min: f64,
}

impl Default for SegmentThresholds {
    fn default() -> Self {
        Self {
            silver_min: constants::DEFAULT_SEGMENT_SILVER_MIN,
            gold_min: constants::DEFAULT_SEGMENT_GOLD_MIN,
            platinum_min: constants::DEFAULT_SEGMENT_PLATINUM_MIN,
        }
    }
}

/// Thresholds and lookup tables for the enrichment engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Revenue tier boundaries
    pub tiers: TierThresholds,

    /// Customer segment boundaries
    pub segments: SegmentThresholds,

    /// Run-revenue quantile at or above which a transaction is high-value
    pub high_value_quantile: f64,

    /// Quantity strictly above this is flagged as a bulk purchase
    pub bulk_quantity_threshold: i64,

    /// Product name to category lookup; unmapped products become "Other"
    pub product_categories: HashMap<String, String>,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            tiers: TierThresholds::default(),
            segments: SegmentThresholds::default(),
            high_value_quantile: constants::DEFAULT_HIGH_VALUE_QUANTILE,
            bulk_quantity_threshold: constants::DEFAULT_BULK_QUANTITY_THRESHOLD,
            product_categories: constants::DEFAULT_PRODUCT_CATEGORIES
                .iter()
                .map(|(p, c)| (p.to_string(), c.to_string()))
                .collect(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!("Cannot read config file {}: {}", path.display(), e))
        })?;

        let config: PipelineConfig = toml::from_str(&contents).map_err(|e| {
            Error::configuration(format!(
                "Malformed config file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration with layered precedence: file -> defaults,
    /// then an optional bucket path override from the CLI
    pub fn load_layered(
        config_file: Option<&Path>,
        bucket_override: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(bucket) = bucket_override {
            config.store.bucket_path = bucket;
        }

        Ok(config)
    }

    /// Default config file location (~/.config/sales-pipeline/config.toml)
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sales-pipeline").join("config.toml"))
    }

    /// Override the bucket path
    pub fn with_bucket_path(mut self, bucket_path: PathBuf) -> Self {
        self.store.bucket_path = bucket_path;
        self
    }

    /// Validate the catalog before any record is processed
    ///
    /// A malformed catalog is fatal at startup: the run must not begin with
    /// rules that cannot classify records deterministically.
    pub fn validate(&self) -> Result<()> {
        if self.schema.required_columns.is_empty() {
            return Err(Error::configuration(
                "Schema must declare at least one required column".to_string(),
            ));
        }

        for core in constants::REQUIRED_COLUMNS {
            if !self.schema.required_columns.iter().any(|c| c == core) {
                return Err(Error::configuration(format!(
                    "Schema is missing core column '{}'",
                    core
                )));
            }
        }

        if self.rules.min_quantity > self.rules.max_quantity {
            return Err(Error::configuration(format!(
                "min_quantity {} exceeds max_quantity {}",
                self.rules.min_quantity, self.rules.max_quantity
            )));
        }

        if self.rules.min_price > self.rules.max_price {
            return Err(Error::configuration(format!(
                "min_price {} exceeds max_price {}",
                self.rules.min_price, self.rules.max_price
            )));
        }

        if self.rules.valid_regions.is_empty() {
            return Err(Error::configuration(
                "Region whitelist cannot be empty".to_string(),
            ));
        }

        let tiers = &self.enrichment.tiers;
        if !(tiers.medium_min < tiers.high_min && tiers.high_min < tiers.premium_min) {
            return Err(Error::configuration(
                "Revenue tier thresholds must be strictly ascending".to_string(),
            ));
        }

        let segments = &self.enrichment.segments;
        if !(segments.silver_min < segments.gold_min && segments.gold_min < segments.platinum_min)
        {
            return Err(Error::configuration(
                "Customer segment thresholds must be strictly ascending".to_string(),
            ));
        }

        if !(0.0..=1.0).contains(&self.enrichment.high_value_quantile) {
            return Err(Error::configuration(format!(
                "high_value_quantile {} must be within [0, 1]",
                self.enrichment.high_value_quantile
            )));
        }

        if self.enrichment.bulk_quantity_threshold < 0 {
            return Err(Error::configuration(
                "bulk_quantity_threshold must be non-negative".to_string(),
            ));
        }

        if self.enrichment.product_categories.is_empty() {
            return Err(Error::configuration(
                "Product category lookup cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
