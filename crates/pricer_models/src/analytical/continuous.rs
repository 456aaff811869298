//! Closed-form valuation of validated option parameters.

use pricer_core::types::{OptionParameters, PricingError, PricingResult};
use tracing::trace;

use super::black_scholes::BlackScholes;

/// Continuous-time pricer.
///
/// Thin adapter from [`OptionParameters`] onto [`BlackScholes::greeks`],
/// returning price and analytical Greeks in one pass.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionParameters, OptionSide, PricingMode};
/// use pricer_models::analytical::ContinuousPricer;
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
/// let result = ContinuousPricer.price(&params).unwrap();
/// assert!((result.price - 10.4506).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ContinuousPricer;

impl ContinuousPricer {
    /// Price and Greeks for `params`, ignoring its mode field.
    ///
    /// # Errors
    /// `SingularInput` when volatility or maturity is zero.
    pub fn price(&self, params: &OptionParameters) -> Result<PricingResult, PricingError> {
        let model = BlackScholes::new(
            params.spot(),
            params.risk_free_rate(),
            params.dividend_yield(),
            params.volatility(),
        )?;
        let greeks = model.greeks(
            params.side(),
            params.strike(),
            params.time_to_maturity(),
        )?;

        trace!(side = %params.side(), price = greeks.price, "closed-form valuation");
        Ok(greeks.into())
    }
}
