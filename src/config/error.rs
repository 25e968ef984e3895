use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced while loading or validating configuration.
pub enum ConfigError {
    /// The port value could not be parsed.
    #[error("invalid port value '{value}': {source}")]
    PortParseError {
        /// Offending value.
        value: String,
        /// Parse error.
        source: ParseIntError,
    },

    /// Port 0 is not a usable listen port.
    #[error("port cannot be 0 (got '{value}')")]
    InvalidPort {
        /// Offending value.
        value: String,
    },

    /// The bind address could not be parsed.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        /// Offending value.
        value: String,
        /// Parse error.
        source: std::net::AddrParseError,
    },

    /// A float tunable could not be parsed.
    #[error("invalid value '{value}' for {var}: {source}")]
    FloatParseError {
        /// Environment variable name.
        var: &'static str,
        /// Offending value.
        value: String,
        /// Parse error.
        source: ParseFloatError,
    },

    /// A similarity threshold outside `[0, 1]`.
    #[error("{var} must be within [0, 1], got {value}")]
    ThresholdOutOfRange {
        /// Environment variable name.
        var: &'static str,
        /// Offending value.
        value: f32,
    },

    /// A result cap of zero would make every query a miss.
    #[error("{var} must be at least 1")]
    ZeroReturnCap {
        /// Environment variable name.
        var: &'static str,
    },

    /// Embedding dimension failed validation.
    #[error("invalid embedding dimension: {0}")]
    InvalidDimension(#[from] crate::constants::DimValidationError),
}
