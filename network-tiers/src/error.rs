//! Error types for tier configuration
//!
//! Configuration defects are the only errors this crate produces. Missing or
//! malformed enrollment dates are not errors: they classify as the lowest tier.

use thiserror::Error;

use crate::privileges::Privilege;
use crate::tier::Tier;

/// Configuration error types.
///
/// Any of these means the tier rules cannot be trusted, so a service should
/// refuse to start rather than serve requests with them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A tier has no entry in the privilege table
    #[error("Privilege table has no entry for tier {0}")]
    MissingTier(Tier),

    /// The lowest tier grants nothing
    #[error("Tier {0} must grant at least one privilege")]
    EmptyTier(Tier),

    /// A higher tier lost a privilege held by the tier below it
    #[error("Tier {higher} is missing privilege {privilege} granted to {lower}")]
    NonMonotonic {
        /// Tier that holds the privilege
        lower: Tier,
        /// Tier that should have inherited it
        higher: Tier,
        /// The dropped privilege
        privilege: Privilege,
    },

    /// The top tier adds nothing over the tier below it
    #[error("Tier {0} must grant at least one privilege of its own")]
    NoExclusivePrivilege(Tier),

    /// Thresholds are not strictly ascending from zero
    #[error("Invalid tier thresholds: {0}")]
    InvalidThresholds(String),

    /// A configuration document could not be parsed
    #[error("Failed to parse tier configuration: {0}")]
    Parse(String),

    /// An individual configuration value is malformed
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
