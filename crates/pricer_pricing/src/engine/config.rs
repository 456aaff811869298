//! Engine configuration.

use pricer_core::types::PricingError;
use pricer_models::discrete::{StepCount, StrategyKind, MAX_STEPS};
use thiserror::Error;

use crate::greeks::{BumpConfig, BumpConfigError};

/// Configuration for [`PricingEngine`](super::PricingEngine).
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `steps` | `Fixed(100)` | Discrete step-count policy |
/// | `strategy` | `Accumulation` | Discretisation strategy |
/// | `bumps` | 0.01 each | Finite-difference bump widths |
/// | `max_steps` | 10 000 | Cap on the resolved step count |
///
/// # Examples
///
/// ```rust
/// use pricer_models::discrete::{StepCount, StrategyKind};
/// use pricer_pricing::engine::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .steps(StepCount::Daily)
///     .strategy(StrategyKind::Binomial)
///     .build()
///     .unwrap();
/// assert_eq!(config.max_steps, 10_000);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Step-count policy for the discrete mode.
    pub steps: StepCount,
    /// Discretisation strategy for the discrete mode.
    pub strategy: StrategyKind,
    /// Bump widths for discrete-mode Greeks.
    pub bumps: BumpConfig,
    /// Upper bound on the resolved step count.
    pub max_steps: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            steps: StepCount::default(),
            strategy: StrategyKind::default(),
            bumps: BumpConfig::default(),
            max_steps: MAX_STEPS,
        }
    }
}

impl EngineConfig {
    /// Creates a new builder.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), EngineConfigError> {
        if self.max_steps == 0 || self.max_steps > MAX_STEPS {
            return Err(EngineConfigError::InvalidMaxSteps(self.max_steps));
        }
        if let StepCount::Fixed(n) = self.steps {
            if n == 0 || n > self.max_steps {
                return Err(EngineConfigError::InvalidSteps(format!(
                    "fixed step count must be in 1..={}, got {}",
                    self.max_steps, n
                )));
            }
        }
        self.bumps.validate()?;
        Ok(())
    }
}

/// Builder for [`EngineConfig`].
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    steps: Option<StepCount>,
    strategy: Option<StrategyKind>,
    bumps: Option<BumpConfig>,
    max_steps: Option<usize>,
}

impl EngineConfigBuilder {
    /// Sets the step-count policy (default: 100 steps).
    pub fn steps(mut self, steps: StepCount) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the discretisation strategy (default: accumulation).
    pub fn strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the bump widths.
    pub fn bumps(mut self, bumps: BumpConfig) -> Self {
        self.bumps = Some(bumps);
        self
    }

    /// Sets the step cap (default: 10 000).
    pub fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Builds the configuration, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns [`EngineConfigError`] if any parameter is invalid.
    pub fn build(self) -> Result<EngineConfig, EngineConfigError> {
        let defaults = EngineConfig::default();
        let config = EngineConfig {
            steps: self.steps.unwrap_or(defaults.steps),
            strategy: self.strategy.unwrap_or(defaults.strategy),
            bumps: self.bumps.unwrap_or(defaults.bumps),
            max_steps: self.max_steps.unwrap_or(defaults.max_steps),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Error type for [`EngineConfig`] validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineConfigError {
    /// Step cap out of range.
    #[error("Invalid max_steps: {0} (must be in 1..=10000)")]
    InvalidMaxSteps(usize),
    /// Fixed step count out of range.
    #[error("Invalid steps: {0}")]
    InvalidSteps(String),
    /// Bump configuration rejected.
    #[error(transparent)]
    Bumps(#[from] BumpConfigError),
}

impl From<EngineConfigError> for PricingError {
    fn from(err: EngineConfigError) -> Self {
        PricingError::InvalidParameter(err.to_string())
    }
}
