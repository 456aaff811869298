//! # Pricer Pricing (Layer 3: Engine)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing is the entry point the service layer talks to:
//! - [`engine::PricingEngine`]: validates, dispatches on pricing mode and
//!   checks results
//! - [`greeks`]: bump-and-reprice Greeks for the discrete mode
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `OptionParameters`, `PricingResult`, `PricingError`
//! - Layer 2 (pricer_models): closed-form model, discrete pricer and strategies
//!
//! ## Features
//!
//! - `parallel` (default): bump reprices and batches run on rayon
//! - `serde`: forwards to pricer_core
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::PricingRequest;
//! use pricer_pricing::engine::PricingEngine;
//!
//! let request = PricingRequest {
//!     side: "put".to_string(),
//!     spot: 100.0,
//!     strike: 100.0,
//!     time_to_maturity: 1.0,
//!     volatility: 0.2,
//!     risk_free_rate: 0.05,
//!     dividend_yield: 0.0,
//!     mode: "continuous".to_string(),
//! };
//!
//! let result = PricingEngine::default().price_request(&request).unwrap();
//! assert!((result.price - 5.5735).abs() < 1e-3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod engine;
pub mod greeks;

pub use engine::{price, EngineConfig, PricingEngine};
