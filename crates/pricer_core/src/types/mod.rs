//! Core option and pricing types.
//!
//! This module provides:
//! - `option`: Option side, pricing mode and the validated [`OptionParameters`]
//! - `request`: String-keyed [`PricingRequest`] as received from callers
//! - `result`: The [`PricingResult`] output record
//! - `error`: Structured [`PricingError`] taxonomy

pub mod error;
pub mod option;
pub mod request;
pub mod result;

// Re-export commonly used types at module level
pub use error::PricingError;
pub use option::{OptionParameters, OptionParametersBuilder, OptionSide, PricingMode};
pub use request::PricingRequest;
pub use result::PricingResult;
