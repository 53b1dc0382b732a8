//! Error types for the upgrade pipeline.
//!
//! Only configuration can fail. The content of a source unit never produces
//! an error: declarations that cannot be rewritten are reported as skipped.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid option `{option}`: {message}")]
    InvalidOption { option: String, message: String },

    #[error("Pattern compilation error: {0}")]
    Pattern(#[from] regex::Error),
}
