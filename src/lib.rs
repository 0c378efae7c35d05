//! Sales Pipeline Library
//!
//! A Rust library for validating and enriching daily sales transaction files
//! as a two-stage batch pipeline over an object store.
//!
//! This library provides tools for:
//! - Decoding delimited transaction files into typed records
//! - Applying an ordered rule catalog that partitions rows into accepted and
//!   rejected sets with a single reason per rejection
//! - Collecting per-run validation metrics and rejection histograms
//! - Deriving analytical columns (revenue, date parts, tiers, segments,
//!   behavioral flags) over the accepted set
//! - Reading and writing the raw / processed / aggregates zones of a
//!   filesystem-backed object store

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod csv_codec;
        pub mod enrichment;
        pub mod validator;
    }
    pub mod adapters {
        pub mod object_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{EnrichedRecord, RejectReason, TransactionRecord};
pub use config::PipelineConfig;

/// Result type alias for the sales pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pipeline operations
///
/// Row-level validation failures are not errors: they are modeled as
/// [`RejectReason`] values and recorded in the rejection log. Everything here
/// is run-level (aborts the stage) or configuration-level (aborts startup).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV decoding error
    #[error("CSV decode error for object '{key}': {message}")]
    CsvDecode {
        key: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Object store operation failed
    #[error("Object store error for key '{key}': {message}")]
    ObjectStore {
        key: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Object not found in the store
    #[error("Object not found: {key}")]
    ObjectMissing { key: String },

    /// Input object contained no data rows
    #[error("Input '{key}' is empty: a run requires at least one data row")]
    EmptyInput { key: String },

    /// Required column missing from the input header
    #[error("Required column '{column}' missing from header of '{key}'")]
    MissingColumn { column: String, key: String },

    /// Date/time parsing error
    #[error("Date parsing error: {message}")]
    DateParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Validated data failed an internal consistency check during enrichment
    #[error("Internal consistency violation: {message}")]
    InternalConsistency { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV decode error with context
    pub fn csv_decode(
        key: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvDecode {
            key: key.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an object store error
    pub fn object_store(
        key: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::ObjectStore {
            key: key.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an object-missing error
    pub fn object_missing(key: impl Into<String>) -> Self {
        Self::ObjectMissing { key: key.into() }
    }

    /// Create an empty-input error
    pub fn empty_input(key: impl Into<String>) -> Self {
        Self::EmptyInput { key: key.into() }
    }

    /// Create a missing-column error
    pub fn missing_column(column: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
            key: key.into(),
        }
    }

    /// Create a date parsing error
    pub fn date_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: message.into(),
            source,
        }
    }

    /// Create an internal consistency error
    pub fn internal_consistency(message: impl Into<String>) -> Self {
        Self::InternalConsistency {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvDecode {
            key: "unknown".to_string(),
            message: "CSV decoding failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateParsing {
            message: "Date parsing failed".to_string(),
            source: error,
        }
    }
}
