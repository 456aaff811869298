//! Discrete-time valuation.
//!
//! The option's life is split into a [`StepGrid`]; a
//! [`DiscretizationStrategy`] rolls the valuation across it. Two strategies
//! ship with the crate:
//!
//! - [`DiscountedAccumulation`]: simple per-step compounding of discount,
//!   carry and variance (default)
//! - [`BinomialBlackScholes`]: CRR lattice smoothed with the closed form on
//!   the last step

pub mod accumulation;
pub mod binomial;
pub mod grid;
pub mod pricer;
pub mod strategy;

pub use accumulation::DiscountedAccumulation;
pub use binomial::BinomialBlackScholes;
pub use grid::{StepCount, StepGrid, DAYS_PER_YEAR, DEFAULT_STEPS, MAX_STEPS};
pub use pricer::DiscretePricer;
pub use strategy::{DiscreteInputs, DiscretizationStrategy, StepValuation, StrategyKind};
