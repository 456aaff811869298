//! Pricing facade.
//!
//! [`PricingEngine`] validates inputs, dispatches on
//! [`PricingMode`](pricer_core::types::PricingMode) and returns a uniform
//! [`PricingResult`](pricer_core::types::PricingResult).

pub mod config;
pub mod facade;

pub use config::{EngineConfig, EngineConfigBuilder, EngineConfigError};
pub use facade::{price, PricingEngine};
pub use pricer_models::discrete::{StepCount, StrategyKind};
