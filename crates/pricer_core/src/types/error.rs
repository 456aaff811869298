//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from parameter validation and pricing operations

use thiserror::Error;

/// Categorised pricing errors.
///
/// Every pricing request either returns a fully populated result or fails
/// with exactly one of these variants before any partial output is produced.
///
/// # Variants
/// - `InvalidParameter`: Out-of-domain or non-finite input
/// - `SingularInput`: Zero maturity or zero volatility, where d₁/d₂ are undefined
/// - `UnsupportedMode`: Unrecognised pricing mode
/// - `UnsupportedSide`: Unrecognised option side
/// - `NumericalInstability`: Computation produced a non-finite or invalid value
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidParameter("spot must be positive, got -1".to_string());
/// assert_eq!(format!("{}", err), "Invalid parameter: spot must be positive, got -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Input outside its valid domain (e.g. non-positive spot).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Input at a singular point of the closed-form formulas.
    #[error("Singular input: {0}")]
    SingularInput(String),

    /// Pricing mode not recognised.
    #[error("Unsupported pricing mode: {0}")]
    UnsupportedMode(String),

    /// Option side not recognised.
    #[error("Unsupported option side: {0}")]
    UnsupportedSide(String),

    /// Computation produced a value that cannot be reported.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl PricingError {
    /// Short machine-readable category name.
    pub fn kind(&self) -> &'static str {
        match self {
            PricingError::InvalidParameter(_) => "invalid_parameter",
            PricingError::SingularInput(_) => "singular_input",
            PricingError::UnsupportedMode(_) => "unsupported_mode",
            PricingError::UnsupportedSide(_) => "unsupported_side",
            PricingError::NumericalInstability(_) => "numerical_instability",
        }
    }
}
