//! Error types for codetint

use thiserror::Error;

/// Result type alias for colorizer operations
pub type Result<T> = std::result::Result<T, ColorizerError>;

/// Colorizer error types
#[derive(Error, Debug)]
pub enum ColorizerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid language rules: {0}")]
    InvalidConfiguration(String),

    #[error("rules file error: {0}")]
    RulesFile(#[from] toml::de::Error),

    #[error("rules file error: {0}")]
    RulesSerialize(#[from] toml::ser::Error),

    #[error("no such language: {0}")]
    UnknownLanguage(String),

    #[error("{0}")]
    Message(String),
}
