//! Unified error types for the arbitrage engine.

use rust_decimal::Decimal;
use thiserror::Error;

/// Unified error type for the arbitrage engine.
#[derive(Error, Debug)]
pub enum ArbError {
    /// Configuration error (fatal at construction time).
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot-level error (event rejected).
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// JSON parsing error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration loading and validation errors.
///
/// These are fatal: a detector is never constructed from an invalid
/// configuration, so no snapshot is processed with bad parameters.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment deserialization failed.
    #[error("environment error: {0}")]
    Env(#[from] envy::Error),

    /// A configuration value is out of its valid range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Which option is invalid.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// Event-level snapshot errors.
///
/// An event failing one of these is rejected whole and reported; it is never
/// partially processed. The rest of the batch continues.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// A required top-level identity field is missing.
    #[error("event missing required field {field}")]
    MissingEventField {
        /// Name of the missing field.
        field: &'static str,
    },

    /// The commence time was present but unparseable.
    #[error("unparseable commence time {raw:?}")]
    BadCommenceTime {
        /// The raw value as received.
        raw: String,
    },
}

/// Per-quote errors.
///
/// These are recovered locally: the offending quote is skipped with a
/// warning and never poisons best-price selection for valid bookmakers.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// The price failed to parse as a decimal.
    #[error("unparseable price {raw:?}")]
    Unparseable {
        /// The raw value as received.
        raw: String,
    },

    /// The price parsed but is outside the decimal-odds domain.
    #[error("price {price} outside decimal odds domain (must be >= 1)")]
    OutOfDomain {
        /// The rejected price.
        price: Decimal,
    },
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ArbError>;
