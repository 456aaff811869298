//! Binomial Black-Scholes (BBS) lattice.
//!
//! Cox-Ross-Rubinstein tree with `u = e^(σ√dt)`, `d = 1/u` and risk-neutral
//! probability `p = (e^((r-q)dt) - d) / (u - d)`. The layer one step before
//! expiry is valued with the closed form over the last interval instead of
//! the payoff, which removes the odd/even oscillation of the plain tree.
//! Values are then rolled back to the root with discount `e^(-r·dt)`.

use pricer_core::types::PricingError;

use super::grid::StepGrid;
use super::strategy::{DiscreteInputs, DiscretizationStrategy, StepValuation};
use crate::analytical::black_value;

/// Smoothed binomial lattice strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinomialBlackScholes;

impl BinomialBlackScholes {
    /// Lattice value with `steps` intervals of length `dt`.
    fn lattice_value(inputs: &DiscreteInputs, steps: usize, dt: f64) -> Result<f64, PricingError> {
        if steps == 0 {
            return Ok(inputs.intrinsic());
        }

        let u = (inputs.volatility * dt.sqrt()).exp();
        let d = 1.0 / u;
        let p = (((inputs.rate - inputs.dividend) * dt).exp() - d) / (u - d);
        if !(p > 0.0 && p < 1.0) {
            return Err(PricingError::NumericalInstability(format!(
                "lattice probability {} outside (0, 1); reduce dt or check r - q against σ",
                p
            )));
        }
        let discount = (-inputs.rate * dt).exp();
        let carry = (-inputs.dividend * dt).exp();
        let last_variance = inputs.volatility * inputs.volatility * dt;

        // Layer steps-1: node j sits at spot·u^(2j - (steps-1))
        let last_layer = steps - 1;
        let mut values: Vec<f64> = (0..=last_layer)
            .map(|j| {
                let exponent = 2 * j as i32 - last_layer as i32;
                let node_spot = inputs.spot * u.powi(exponent);
                black_value(
                    inputs.side,
                    node_spot * carry,
                    inputs.strike * discount,
                    last_variance,
                )
            })
            .collect();

        for layer in (0..last_layer).rev() {
            for j in 0..=layer {
                values[j] = discount * (p * values[j + 1] + (1.0 - p) * values[j]);
            }
        }

        Ok(values[0])
    }
}

impl DiscretizationStrategy for BinomialBlackScholes {
    fn name(&self) -> &'static str {
        "binomial"
    }

    fn roll(&self, inputs: &DiscreteInputs, grid: &StepGrid) -> Result<StepValuation, PricingError> {
        let steps = grid.steps();
        let dt = grid.dt();
        Ok(StepValuation {
            price: Self::lattice_value(inputs, steps, dt)?,
            previous_price: Self::lattice_value(inputs, steps - 1, dt)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use crate::discrete::grid::{StepCount, MAX_STEPS};
    use pricer_core::types::OptionSide;

    fn inputs(side: OptionSide) -> DiscreteInputs {
        DiscreteInputs {
            side,
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            volatility: 0.2,
            rate: 0.05,
            dividend: 0.02,
        }
    }

    fn roll(inputs: &DiscreteInputs, steps: usize) -> StepValuation {
        let grid = StepCount::Fixed(steps).resolve(inputs.maturity, MAX_STEPS).unwrap();
        BinomialBlackScholes.roll(inputs, &grid).unwrap()
    }

    #[test]
    fn test_one_step_is_closed_form() {
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.2).unwrap();
        for side in [OptionSide::Call, OptionSide::Put] {
            let valuation = roll(&inputs(side), 1);
            assert!((valuation.price - bs.price(side, 100.0, 1.0)).abs() < 1e-12);
            assert_eq!(valuation.previous_price, 0.0);
        }
    }

    #[test]
    fn test_converges_to_closed_form() {
        let bs = BlackScholes::new(100.0, 0.05, 0.02, 0.2).unwrap();
        for side in [OptionSide::Call, OptionSide::Put] {
            let valuation = roll(&inputs(side), 200);
            assert!((valuation.price - bs.price(side, 100.0, 1.0)).abs() < 5e-3);
        }
    }

    #[test]
    fn test_put_call_parity_holds_on_lattice() {
        // The lattice is risk-neutral so parity holds up to rounding
        let call = roll(&inputs(OptionSide::Call), 50).price;
        let put = roll(&inputs(OptionSide::Put), 50).price;
        let forward = 100.0 * (-0.02_f64).exp() - 100.0 * (-0.05_f64).exp();
        assert!((call - put - forward).abs() < 1e-9);
    }

    #[test]
    fn test_previous_price_matches_shorter_lattice() {
        let valuation = roll(&inputs(OptionSide::Call), 40);
        let shorter = DiscreteInputs {
            maturity: 39.0 / 40.0,
            ..inputs(OptionSide::Call)
        };
        let direct = roll(&shorter, 39).price;
        assert!((valuation.previous_price - direct).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_probability_rejected() {
        // Drift far outside the up/down spread
        let extreme = DiscreteInputs {
            rate: 5.0,
            volatility: 0.01,
            ..inputs(OptionSide::Call)
        };
        let grid = StepCount::Fixed(10).resolve(1.0, MAX_STEPS).unwrap();
        assert!(matches!(
            BinomialBlackScholes.roll(&extreme, &grid),
            Err(PricingError::NumericalInstability(_))
        ));
    }
}
