//! Pricing output record.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Price and first/second-order sensitivities for one option.
///
/// # Sign conventions
/// - `delta`: ∂V/∂S, in [0, 1] for calls and [-1, 0] for puts
/// - `gamma`: ∂²V/∂S², identical for both sides
/// - `theta`: continuous mode, ∂V/∂t per year of calendar time (negative
///   means time decay); discrete mode, `(V(T) - V(T - dt)) / dt` on the step grid
/// - `vega`: ∂V/∂σ per unit of volatility
/// - `rho`: ∂V/∂r per unit of rate
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricingResult {
    /// Theoretical option value, in units of spot/strike.
    pub price: f64,
    /// Sensitivity to spot.
    pub delta: f64,
    /// Sensitivity of delta to spot.
    pub gamma: f64,
    /// Time decay.
    pub theta: f64,
    /// Sensitivity to volatility.
    pub vega: f64,
    /// Sensitivity to the risk-free rate.
    pub rho: f64,
}

impl PricingResult {
    /// Greeks in display order, paired with their names.
    pub fn greeks(&self) -> [(&'static str, f64); 5] {
        [
            ("delta", self.delta),
            ("gamma", self.gamma),
            ("theta", self.theta),
            ("vega", self.vega),
            ("rho", self.rho),
        ]
    }

    /// Fails unless every field is finite.
    ///
    /// # Errors
    /// [`PricingError::NumericalInstability`] naming the first bad field.
    pub fn ensure_finite(self) -> Result<Self, PricingError> {
        if !self.price.is_finite() {
            return Err(PricingError::NumericalInstability(format!(
                "price is not finite: {}",
                self.price
            )));
        }
        for (name, value) in self.greeks() {
            if !value.is_finite() {
                return Err(PricingError::NumericalInstability(format!(
                    "{} is not finite: {}",
                    name, value
                )));
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeks_order() {
        let result = PricingResult {
            price: 10.0,
            delta: 0.5,
            gamma: 0.02,
            theta: -6.0,
            vega: 37.0,
            rho: 53.0,
        };
        let names: Vec<_> = result.greeks().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["delta", "gamma", "theta", "vega", "rho"]);
        assert_eq!(result.greeks()[2].1, -6.0);
    }

    #[test]
    fn test_ensure_finite() {
        assert!(PricingResult::default().ensure_finite().is_ok());

        let nan_gamma = PricingResult {
            gamma: f64::NAN,
            ..Default::default()
        };
        match nan_gamma.ensure_finite() {
            Err(PricingError::NumericalInstability(msg)) => assert!(msg.contains("gamma")),
            other => panic!("Expected NumericalInstability, got {:?}", other),
        }

        let inf_price = PricingResult {
            price: f64::INFINITY,
            ..Default::default()
        };
        assert!(inf_price.ensure_finite().is_err());
    }
}
