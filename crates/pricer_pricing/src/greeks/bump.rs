//! Bump-and-reprice Greeks for the discrete pricer.
//!
//! One base valuation plus two per bumped parameter (spot, volatility,
//! rate), all on the same [`StepGrid`]:
//!
//! - Central differences `(f(p+h) - f(p-h)) / 2h` for delta, vega, rho and
//!   `(f(p+h) - 2f(p) + f(p-h)) / h²` for gamma.
//! - When `p - h` is not a valid spot or volatility, second-order forward
//!   differences `(-f(p+2h) + 4f(p+h) - 3f(p)) / 2h` and
//!   `(f(p+2h) - 2f(p+h) + f(p)) / h²` are used instead.
//! - Theta is `(V(T) - V(T - dt)) / dt`, read off the base valuation.
//!
//! Reprices are independent and run on rayon with the `parallel` feature.
//! Result order is fixed, so the output does not depend on scheduling.

use pricer_core::types::{OptionParameters, PricingError, PricingResult};
use pricer_models::discrete::{DiscreteInputs, DiscretePricer, StepGrid, StepValuation};
use tracing::{debug, trace};

use super::config::BumpConfig;

/// How a parameter's two neighbours were placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stencil {
    /// Neighbours at `p + h` and `p - h`.
    Central,
    /// Neighbours at `p + h` and `p + 2h`.
    Forward,
}

impl Stencil {
    fn for_value(value: f64, bump: f64) -> Self {
        if value - bump > 0.0 {
            Stencil::Central
        } else {
            Stencil::Forward
        }
    }

    /// Offsets (in units of `h`) of the two neighbours.
    fn offsets(self) -> [f64; 2] {
        match self {
            Stencil::Central => [1.0, -1.0],
            Stencil::Forward => [1.0, 2.0],
        }
    }

    /// First derivative from base value `f0` and the two neighbours.
    fn first(self, f0: f64, [a, b]: [f64; 2], h: f64) -> f64 {
        match self {
            Stencil::Central => (a - b) / (2.0 * h),
            Stencil::Forward => (-b + 4.0 * a - 3.0 * f0) / (2.0 * h),
        }
    }

    /// Second derivative from base value `f0` and the two neighbours.
    fn second(self, f0: f64, [a, b]: [f64; 2], h: f64) -> f64 {
        match self {
            Stencil::Central => (a - 2.0 * f0 + b) / (h * h),
            Stencil::Forward => (b - 2.0 * a + f0) / (h * h),
        }
    }
}

/// Computes discrete-mode price and Greeks by bumping.
///
/// # Errors
/// Any error from grid resolution or from a single reprice fails the whole
/// request.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionParameters, OptionSide, PricingMode};
/// use pricer_models::discrete::DiscretePricer;
/// use pricer_pricing::greeks::{bump_greeks, BumpConfig};
///
/// let params = OptionParameters::builder()
///     .side(OptionSide::Call)
///     .spot(100.0)
///     .strike(100.0)
///     .time_to_maturity(1.0)
///     .volatility(0.2)
///     .risk_free_rate(0.05)
///     .mode(PricingMode::Discrete)
///     .dividend_yield(0.0)
///     .build()
///     .unwrap();
///
/// let result = bump_greeks(&DiscretePricer::default(), &BumpConfig::default(), &params).unwrap();
/// assert!((result.delta - 0.6368).abs() < 1e-2);
/// assert!(result.theta > 0.0);
/// ```
pub fn bump_greeks(
    pricer: &DiscretePricer,
    config: &BumpConfig,
    params: &OptionParameters,
) -> Result<PricingResult, PricingError> {
    let base = DiscreteInputs::from(params);
    base.validate()?;
    let grid = pricer.grid(base.maturity)?;

    let spot_stencil = Stencil::for_value(base.spot, config.spot_bump);
    let vol_stencil = Stencil::for_value(base.volatility, config.vol_bump);
    if spot_stencil == Stencil::Forward {
        debug!(spot = base.spot, bump = config.spot_bump, "spot bump leaves domain; forward differences");
    }
    if vol_stencil == Stencil::Forward {
        debug!(volatility = base.volatility, bump = config.vol_bump, "vol bump leaves domain; forward differences");
    }

    let [s1, s2] = spot_stencil.offsets();
    let [v1, v2] = vol_stencil.offsets();
    let scenarios = [
        base,
        base.with_spot(base.spot + s1 * config.spot_bump),
        base.with_spot(base.spot + s2 * config.spot_bump),
        base.with_volatility(base.volatility + v1 * config.vol_bump),
        base.with_volatility(base.volatility + v2 * config.vol_bump),
        base.with_rate(base.rate + config.rate_bump),
        base.with_rate(base.rate - config.rate_bump),
    ];

    let valuations = revalue_all(pricer, &grid, &scenarios)?;
    let base_value = valuations[0];
    let f0 = base_value.price;
    let prices = |i: usize, j: usize| [valuations[i].price, valuations[j].price];

    Ok(PricingResult {
        price: f0,
        delta: spot_stencil.first(f0, prices(1, 2), config.spot_bump),
        gamma: spot_stencil.second(f0, prices(1, 2), config.spot_bump),
        theta: (base_value.price - base_value.previous_price) / grid.dt(),
        vega: vol_stencil.first(f0, prices(3, 4), config.vol_bump),
        rho: Stencil::Central.first(f0, prices(5, 6), config.rate_bump),
    })
}

fn revalue(
    pricer: &DiscretePricer,
    grid: &StepGrid,
    inputs: &DiscreteInputs,
) -> Result<StepValuation, PricingError> {
    let valuation = pricer.value_on(inputs, grid)?;
    trace!(
        spot = inputs.spot,
        volatility = inputs.volatility,
        rate = inputs.rate,
        price = valuation.price,
        "reprice"
    );
    Ok(valuation)
}

#[cfg(feature = "parallel")]
fn revalue_all(
    pricer: &DiscretePricer,
    grid: &StepGrid,
    scenarios: &[DiscreteInputs],
) -> Result<Vec<StepValuation>, PricingError> {
    use rayon::prelude::*;

    scenarios
        .par_iter()
        .map(|inputs| revalue(pricer, grid, inputs))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn revalue_all(
    pricer: &DiscretePricer,
    grid: &StepGrid,
    scenarios: &[DiscreteInputs],
) -> Result<Vec<StepValuation>, PricingError> {
    scenarios
        .iter()
        .map(|inputs| revalue(pricer, grid, inputs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::{OptionSide, PricingMode};
    use pricer_models::analytical::BlackScholes;
    use pricer_models::discrete::{StepCount, StrategyKind};

    fn params(side: OptionSide, spot: f64, vol: f64) -> OptionParameters {
        OptionParameters::builder()
            .side(side)
            .spot(spot)
            .strike(100.0)
            .time_to_maturity(1.0)
            .volatility(vol)
            .risk_free_rate(0.05)
            .dividend_yield(0.02)
            .mode(PricingMode::Discrete)
            .build()
            .unwrap()
    }

    #[test]
    fn test_stencil_exact_on_quadratic() {
        // f(p) = p² has f' = 2p and f'' = 2 under both stencils
        let f = |p: f64| p * p;
        let (p, h) = (3.0, 0.1);
        for stencil in [Stencil::Central, Stencil::Forward] {
            let [o1, o2] = stencil.offsets();
            let neighbours = [f(p + o1 * h), f(p + o2 * h)];
            assert_relative_eq!(stencil.first(f(p), neighbours, h), 6.0, epsilon = 1e-10);
            assert_relative_eq!(stencil.second(f(p), neighbours, h), 2.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_stencil_selection() {
        assert_eq!(Stencil::for_value(100.0, 0.01), Stencil::Central);
        assert_eq!(Stencil::for_value(0.01, 0.01), Stencil::Forward);
        assert_eq!(Stencil::for_value(0.005, 0.01), Stencil::Forward);
    }

    #[test]
    fn test_greeks_close_to_analytical() {
        let pricer = DiscretePricer::default().with_steps(StepCount::Fixed(1000));
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.2).unwrap();
        for side in [OptionSide::Call, OptionSide::Put] {
            let result = bump_greeks(&pricer, &BumpConfig::default(), &params(side, 100.0, 0.2)).unwrap();
            let exact = bs.greeks(side, 100.0, 1.0).unwrap();
            assert_relative_eq!(result.price, exact.price, epsilon = 1e-3);
            assert_relative_eq!(result.delta, exact.delta, epsilon = 1e-3);
            assert_relative_eq!(result.gamma, exact.gamma, epsilon = 1e-3);
            assert_relative_eq!(result.vega, exact.vega, epsilon = 0.05);
            assert_relative_eq!(result.rho, exact.rho, epsilon = 0.1);
            // One-sided step difference runs with maturity, against calendar theta
            assert_relative_eq!(result.theta, -exact.theta, epsilon = 0.05);
        }
    }

    #[test]
    fn test_binomial_strategy_greeks() {
        let pricer = DiscretePricer::new(StrategyKind::Binomial.build()).with_steps(StepCount::Fixed(200));
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.2).unwrap();
        let result = bump_greeks(&pricer, &BumpConfig::default(), &params(OptionSide::Put, 100.0, 0.2)).unwrap();
        assert_relative_eq!(result.delta, bs.delta(OptionSide::Put, 100.0, 1.0), epsilon = 5e-3);
        assert!(result.gamma > 0.0);
        assert!(result.vega > 0.0);
        assert!(result.rho < 0.0);
    }

    #[test]
    fn test_forward_fallback_for_tiny_volatility() {
        let pricer = DiscretePricer::default();
        let config = BumpConfig::default();
        let p = params(OptionSide::Call, 100.0, 0.005);
        let result = bump_greeks(&pricer, &config, &p).unwrap();

        let inputs = DiscreteInputs::from(&p);
        let at = |vol: f64| pricer.value(&inputs.with_volatility(vol)).unwrap().price;
        let h = config.vol_bump;
        let expected = (-at(0.005 + 2.0 * h) + 4.0 * at(0.005 + h) - 3.0 * at(0.005)) / (2.0 * h);
        assert!(result.vega.is_finite());
        assert_relative_eq!(result.vega, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_forward_fallback_for_tiny_spot() {
        let pricer = DiscretePricer::default();
        let config = BumpConfig::builder().spot_bump(1.0).build().unwrap();
        let result = bump_greeks(&pricer, &config, &params(OptionSide::Put, 0.5, 0.2)).unwrap();
        assert!(result.delta < 0.0 && result.delta >= -1.0);
    }

    #[test]
    fn test_zero_volatility_is_singular() {
        let singular = OptionParameters::builder()
            .side(OptionSide::Call)
            .spot(100.0)
            .strike(100.0)
            .time_to_maturity(1.0)
            .volatility(0.0)
            .mode(PricingMode::Discrete)
            .risk_free_rate(0.0)
            .dividend_yield(0.0)
            .build()
            .unwrap();
        assert!(matches!(
            bump_greeks(&DiscretePricer::default(), &BumpConfig::default(), &singular),
            Err(PricingError::SingularInput(_))
        ));
    }
}
