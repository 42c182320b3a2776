//! Error types at the library boundaries
//!
//! The pricing engine itself is total and never returns an error. These types
//! cover configuration access, request validation and checkout derivation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing pricing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("configuration unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised when a caller payload falls outside the quotable domain
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("headcount {0} is outside the quotable range {min}..={max}", min = crate::quote::MIN_HEADCOUNT, max = crate::quote::MAX_HEADCOUNT)]
    HeadcountOutOfRange(u32),

    #[error("sector code {0} is not eligible for a quote")]
    ExcludedSector(String),

    #[error("unknown sector code: {0}")]
    UnknownSector(String),

    #[error("unsupported guarantee amount: {0}")]
    UnsupportedGuarantee(f64),

    #[error("invalid SIREN: {0}")]
    InvalidSiren(String),

    #[error("invalid SIRET: {0}")]
    InvalidSiret(String),
}

/// Errors raised while deriving the amount charged at checkout
#[derive(Debug, Error, PartialEq)]
pub enum BillingError {
    #[error("invalid euro amount: {0}")]
    InvalidAmount(f64),

    #[error("amount in cents must be a positive integer, got {0}")]
    NonPositiveCents(i64),

    #[error("unknown broker code: {0}")]
    UnknownBroker(String),

    #[error("broker {0} is inactive")]
    InactiveBroker(String),

    #[error("currency must be a three-letter ISO code, got {0:?}")]
    InvalidCurrency(String),
}

/// Errors surfaced by quote service operations that can fail
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
