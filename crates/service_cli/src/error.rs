//! CLI error types.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the `bsgreeks` binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_error_wraps() {
        let err: CliError = PricingError::SingularInput("zero volatility".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Pricing error: Singular input: zero volatility"
        );
    }

    #[test]
    fn test_file_not_found_message() {
        let err = CliError::FileNotFound("trades.csv".to_string());
        assert_eq!(err.to_string(), "File not found: trades.csv");
    }
}
