//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to the closed-form model

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidSpot` / `InvalidStrike`: Non-positive price inputs
/// - `InvalidVolatility`: Negative volatility
/// - `InvalidExpiry`: Negative time to expiry
/// - `ZeroVolatility` / `ZeroExpiry`: Singular points of d₁/d₂
/// - `NumericalInstability`: Non-finite intermediate result
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::ZeroExpiry;
/// assert!(format!("{}", err).contains("expiry"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Non-positive spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Non-positive strike price.
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Negative volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Negative time to expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Volatility is exactly zero.
    #[error("Zero volatility: d1/d2 are undefined")]
    ZeroVolatility,

    /// Time to expiry is exactly zero.
    #[error("Zero expiry: d1/d2 are undefined")]
    ZeroExpiry,

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidSpot { .. }
            | AnalyticalError::InvalidStrike { .. }
            | AnalyticalError::InvalidVolatility { .. }
            | AnalyticalError::InvalidExpiry { .. } => {
                PricingError::InvalidParameter(err.to_string())
            }
            AnalyticalError::ZeroVolatility | AnalyticalError::ZeroExpiry => {
                PricingError::SingularInput(err.to_string())
            }
            AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}
