//! Analytical pricing formulas for European options.
//!
//! This module provides the closed-form Black-Scholes-Merton solution:
//! - Standard normal CDF/PDF with a documented accuracy bound
//! - Price and analytical Greeks (Delta, Gamma, Theta, Vega, Rho)
//! - [`black_value`], the discounted-quantity form reused by the
//!   discrete-time pricers
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the model runs on `f64` and `f32`
//! - **Errors at the boundary**: singular inputs are rejected before any
//!   division by σ√T

pub mod black_scholes;
pub mod continuous;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::{black_value, BlackScholes, Greeks};
pub use continuous::ContinuousPricer;
pub use distributions::{norm_cdf, norm_pdf, StandardNormal};
pub use error::AnalyticalError;
