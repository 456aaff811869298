//! Pricing entry point: mode dispatch and result checks.

use pricer_core::types::{
    OptionParameters, PricingError, PricingMode, PricingRequest, PricingResult,
};
use pricer_models::analytical::ContinuousPricer;
use pricer_models::discrete::{DiscretePricer, StepCount};
use tracing::debug;

use super::config::{EngineConfig, EngineConfigError};
use crate::greeks::bump_greeks;

/// Stateless pricing engine.
///
/// Holds only immutable configuration; every call is a pure function of
/// its arguments. The engine is `Send + Sync` and may be shared across
/// threads.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{OptionParameters, OptionSide, PricingMode};
/// use pricer_pricing::engine::PricingEngine;
///
/// let engine = PricingEngine::default();
/// let call = OptionParameters::builder()
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
/// let continuous = engine.price(&call).unwrap();
/// let discrete = engine.price(&call.with_mode(PricingMode::Discrete)).unwrap();
/// assert!((continuous.price - discrete.price).abs() < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: EngineConfig,
    continuous: ContinuousPricer,
    discrete: DiscretePricer,
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::from_validated(EngineConfig::default())
    }
}

impl PricingEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, EngineConfigError> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: EngineConfig) -> Self {
        let discrete = DiscretePricer::new(config.strategy.build())
            .with_steps(config.steps)
            .with_max_steps(config.max_steps);
        Self {
            config,
            continuous: ContinuousPricer,
            discrete,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Prices `params` in its own mode.
    ///
    /// # Errors
    /// - `SingularInput` for zero maturity or zero volatility
    /// - `InvalidParameter` for an invalid step grid
    /// - `NumericalInstability` if any result field is not finite
    pub fn price(&self, params: &OptionParameters) -> Result<PricingResult, PricingError> {
        debug!(
            side = %params.side(),
            mode = %params.mode(),
            spot = params.spot(),
            strike = params.strike(),
            maturity = params.time_to_maturity(),
            "pricing"
        );

        let result = match params.mode() {
            PricingMode::Continuous => self.continuous.price(params)?,
            PricingMode::Discrete => bump_greeks(&self.discrete, &self.config.bumps, params)?,
        };
        result.ensure_finite()
    }

    /// Parses and prices a string-keyed request.
    ///
    /// # Errors
    /// `UnsupportedSide` / `UnsupportedMode` for unknown labels, otherwise
    /// as [`PricingEngine::price`].
    pub fn price_request(&self, request: &PricingRequest) -> Result<PricingResult, PricingError> {
        let params = OptionParameters::try_from(request)?;
        self.price(&params)
    }

    /// Prices every entry, keeping input order.
    ///
    /// Each entry succeeds or fails on its own.
    pub fn price_batch(
        &self,
        batch: &[OptionParameters],
    ) -> Vec<Result<PricingResult, PricingError>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            batch.par_iter().map(|params| self.price(params)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            batch.iter().map(|params| self.price(params)).collect()
        }
    }

    /// Discrete price only, for an explicit step count.
    ///
    /// Used by convergence studies; Greeks are not computed.
    pub fn discrete_price_with_steps(
        &self,
        params: &OptionParameters,
        steps: StepCount,
    ) -> Result<f64, PricingError> {
        self.discrete.clone().with_steps(steps).price(params)
    }
}

/// Prices `params` with the default engine.
pub fn price(params: &OptionParameters) -> Result<PricingResult, PricingError> {
    PricingEngine::default().price(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::OptionSide;
    use pricer_models::discrete::StrategyKind;

    fn call() -> OptionParameters {
        OptionParameters::builder()
            .side(OptionSide::Call)
            .spot(100.0)
            .strike(100.0)
            .time_to_maturity(1.0)
            .volatility(0.2)
            .risk_free_rate(0.05)
            .dividend_yield(0.0)
            .mode(PricingMode::Continuous)
            .build()
            .unwrap()
    }

    fn request(side: &str, mode: &str) -> PricingRequest {
        PricingRequest {
            side: side.to_string(),
            spot: 100.0,
            strike: 100.0,
            time_to_maturity: 1.0,
            volatility: 0.2,
            risk_free_rate: 0.05,
            dividend_yield: 0.0,
            mode: mode.to_string(),
        }
    }

    #[test]
    fn test_continuous_dispatch() {
        let result = price(&call()).unwrap();
        assert_relative_eq!(result.price, 10.450583572185565, epsilon = 1e-6);
        assert_relative_eq!(result.theta, -6.414027546438196, epsilon = 1e-5);
    }

    #[test]
    fn test_discrete_dispatch() {
        let result = price(&call().with_mode(PricingMode::Discrete)).unwrap();
        assert_relative_eq!(result.price, 10.45, epsilon = 0.01);
        assert!(result.gamma > 0.0);
    }

    #[test]
    fn test_unknown_labels() {
        let engine = PricingEngine::default();
        assert!(matches!(
            engine.price_request(&request("straddle", "continuous")),
            Err(PricingError::UnsupportedSide(_))
        ));
        assert!(matches!(
            engine.price_request(&request("call", "monte-carlo")),
            Err(PricingError::UnsupportedMode(_))
        ));
    }

    #[test]
    fn test_ui_labels_accepted() {
        let engine = PricingEngine::default();
        let result = engine
            .price_request(&request("put", "Black-Scholes Discrete"))
            .unwrap();
        assert!(result.delta < 0.0);
    }

    #[test]
    fn test_singular_inputs_both_modes() {
        let expired = OptionParameters::builder()
            .side(OptionSide::Call)
            .spot(100.0)
            .strike(100.0)
            .time_to_maturity(0.0)
            .volatility(0.2)
            .risk_free_rate(0.0)
            .dividend_yield(0.0)
            .mode(PricingMode::Continuous)
            .build()
            .unwrap();
        for mode in [PricingMode::Continuous, PricingMode::Discrete] {
            assert!(matches!(
                price(&expired.with_mode(mode)),
                Err(PricingError::SingularInput(_))
            ));
        }
    }

    #[test]
    fn test_engine_with_custom_config() {
        let config = EngineConfig::builder()
            .steps(StepCount::Daily)
            .strategy(StrategyKind::Binomial)
            .build()
            .unwrap();
        let engine = PricingEngine::new(config).unwrap();
        assert_eq!(engine.config().strategy, StrategyKind::Binomial);
        let result = engine.price(&call().with_mode(PricingMode::Discrete)).unwrap();
        assert_relative_eq!(result.price, 10.45, epsilon = 0.01);
    }

    #[test]
    fn test_batch_keeps_order_and_isolates_failures() {
        let engine = PricingEngine::default();
        let bad = OptionParameters::builder()
            .side(OptionSide::Put)
            .spot(100.0)
            .strike(100.0)
            .time_to_maturity(1.0)
            .volatility(0.0)
            .risk_free_rate(0.0)
            .dividend_yield(0.0)
            .mode(PricingMode::Continuous)
            .build()
            .unwrap();
        let results = engine.price_batch(&[call(), bad, call().with_side(OptionSide::Put)]);
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().delta > 0.0);
        assert!(results[1].is_err());
        assert!(results[2].as_ref().unwrap().delta < 0.0);
    }

    #[test]
    fn test_discrete_price_with_steps() {
        let engine = PricingEngine::default();
        let coarse = engine
            .discrete_price_with_steps(&call(), StepCount::Fixed(10))
            .unwrap();
        let fine = engine
            .discrete_price_with_steps(&call(), StepCount::Fixed(1000))
            .unwrap();
        assert!((fine - 10.450583572185565).abs() < (coarse - 10.450583572185565).abs());
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PricingEngine>();
    }
}
