//! # pricer_core: Foundation Types for Black-Scholes Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace and provides:
//! - Option description: `OptionSide`, `PricingMode`, `OptionParameters` (`types::option`)
//! - External request shape: `PricingRequest` (`types::request`)
//! - Output record: `PricingResult` (`types::result`)
//! - Error taxonomy: `PricingError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::types::{OptionParameters, OptionSide, PricingMode, PricingRequest};
//!
//! let request = PricingRequest {
//!     side: "call".to_string(),
//!     spot: 100.0,
//!     strike: 100.0,
//!     time_to_maturity: 1.0,
//!     volatility: 0.2,
//!     risk_free_rate: 0.05,
//!     dividend_yield: 0.0,
//!     mode: "continuous".to_string(),
//! };
//!
//! let params = OptionParameters::try_from(&request).unwrap();
//! assert_eq!(params.side(), OptionSide::Call);
//! assert_eq!(params.mode(), PricingMode::Continuous);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for requests, results and enums

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod types;
