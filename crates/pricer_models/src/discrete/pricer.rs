//! Discrete-time pricer: grid resolution plus a pluggable strategy.

use std::sync::Arc;

use pricer_core::types::{OptionParameters, PricingError};
use tracing::debug;

use super::accumulation::DiscountedAccumulation;
use super::grid::{StepCount, StepGrid, MAX_STEPS};
use super::strategy::{DiscreteInputs, DiscretizationStrategy, StepValuation};

/// Prices options on a finite time grid.
///
/// The pricer owns the step-count policy and the strategy; it does not
/// compute Greeks. Sensitivities are obtained by repricing bumped
/// [`DiscreteInputs`] on a grid fixed once per request (see
/// [`DiscretePricer::value_on`]).
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionParameters, OptionSide, PricingMode};
/// use pricer_models::discrete::{DiscretePricer, StepCount};
///
/// let params = OptionParameters::builder()
///     .side(OptionSide::Call)
///     .spot(100.0)
///     .strike(100.0)
///     .time_to_maturity(1.0)
///     .volatility(0.2)
///     .risk_free_rate(0.05)
///     .dividend_yield(0.0)
///     .mode(PricingMode::Continuous)
///     .build()
///     .unwrap();
///
/// let pricer = DiscretePricer::default().with_steps(StepCount::Fixed(1000));
/// let valuation = pricer.value(&(&params).into()).unwrap();
/// assert!((valuation.price - 10.4506).abs() < 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct DiscretePricer {
    strategy: Arc<dyn DiscretizationStrategy>,
    steps: StepCount,
    max_steps: usize,
}

impl Default for DiscretePricer {
    fn default() -> Self {
        Self::new(Arc::new(DiscountedAccumulation))
    }
}

impl DiscretePricer {
    /// Pricer with the given strategy, default step count and step limit.
    pub fn new(strategy: Arc<dyn DiscretizationStrategy>) -> Self {
        Self {
            strategy,
            steps: StepCount::default(),
            max_steps: MAX_STEPS,
        }
    }

    /// Sets the step-count policy.
    pub fn with_steps(mut self, steps: StepCount) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the step limit.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Step-count policy.
    pub fn steps(&self) -> StepCount {
        self.steps
    }

    /// Step limit.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Name of the active strategy.
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Resolves the grid for a maturity.
    pub fn grid(&self, maturity: f64) -> Result<StepGrid, PricingError> {
        self.steps.resolve(maturity, self.max_steps)
    }

    /// Validates `inputs`, resolves the grid and values the option.
    pub fn value(&self, inputs: &DiscreteInputs) -> Result<StepValuation, PricingError> {
        inputs.validate()?;
        let grid = self.grid(inputs.maturity)?;
        debug!(
            strategy = self.strategy.name(),
            steps = grid.steps(),
            dt = grid.dt(),
            "resolved step grid"
        );
        self.value_on(inputs, &grid)
    }

    /// Values `inputs` on an already resolved grid.
    ///
    /// Used for bumped repricing so that every reprice shares `dt`.
    pub fn value_on(
        &self,
        inputs: &DiscreteInputs,
        grid: &StepGrid,
    ) -> Result<StepValuation, PricingError> {
        inputs.validate()?;
        self.strategy.roll(inputs, grid)
    }

    /// Price only, from validated parameters.
    pub fn price(&self, params: &OptionParameters) -> Result<f64, PricingError> {
        self.value(&DiscreteInputs::from(params)).map(|v| v.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discrete::strategy::StrategyKind;
    use pricer_core::types::{OptionSide, PricingMode};

    fn params() -> OptionParameters {
        OptionParameters::builder()
            .side(OptionSide::Put)
            .spot(100.0)
            .strike(105.0)
            .time_to_maturity(0.5)
            .volatility(0.25)
            .risk_free_rate(0.03)
            .dividend_yield(0.0)
            .mode(PricingMode::Continuous)
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let pricer = DiscretePricer::default();
        assert_eq!(pricer.steps(), StepCount::Fixed(100));
        assert_eq!(pricer.max_steps(), MAX_STEPS);
        assert_eq!(pricer.strategy_name(), "accumulation");
    }

    #[test]
    fn test_deterministic() {
        let pricer = DiscretePricer::default();
        assert_eq!(pricer.price(&params()).unwrap(), pricer.price(&params()).unwrap());
    }

    #[test]
    fn test_strategies_agree_roughly() {
        let accumulation = DiscretePricer::new(StrategyKind::Accumulation.build())
            .price(&params())
            .unwrap();
        let binomial = DiscretePricer::new(StrategyKind::Binomial.build())
            .price(&params())
            .unwrap();
        assert!((accumulation - binomial).abs() < 0.02);
    }

    #[test]
    fn test_step_limit_is_enforced() {
        let pricer = DiscretePricer::default()
            .with_steps(StepCount::Fixed(500))
            .with_max_steps(100);
        assert!(matches!(
            pricer.price(&params()),
            Err(PricingError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_singular_inputs() {
        let pricer = DiscretePricer::default();
        let inputs = DiscreteInputs::from(&params());
        assert!(matches!(
            pricer.value(&inputs.with_volatility(0.0)),
            Err(PricingError::SingularInput(_))
        ));
        let expired = DiscreteInputs {
            maturity: 0.0,
            ..inputs
        };
        assert!(matches!(
            pricer.value(&expired),
            Err(PricingError::SingularInput(_))
        ));
    }
}
