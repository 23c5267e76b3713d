//! Error types for card_profit
//!
//! The calculation engine itself never fails. These errors come from the
//! surrounding layer: loading configuration, looking up fee profiles and
//! parsing caller input.

use thiserror::Error;

/// Main error type for card_profit
#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid fee profile '{profile}': {reason}")]
    InvalidFeeProfile { profile: String, reason: String },

    #[error("Multiple default fee profiles: {}", .0.join(", "))]
    MultipleDefaultProfiles(Vec<String>),

    #[error("Fee profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Unknown grading company '{name}' (known: {})", .known.join(", "))]
    UnknownGradingCompany { name: String, known: Vec<String> },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Result type alias for card_profit operations
pub type Result<T> = std::result::Result<T, CalcError>;
