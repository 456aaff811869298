//! Step-by-step discounting with simple per-step rates.
//!
//! Each step of length `dt` compounds the discount factor by
//! `1 / (1 + r·dt)`, the dividend carry by `1 / (1 + q·dt)` and adds
//! `σ²·dt` of variance. After `i` steps the option is valued with
//! [`black_value`] on the accumulated quantities:
//!
//! ```text
//! D_i = (1 + r·dt)^-i      C_i = (1 + q·dt)^-i      V_i = i·σ²·dt
//! price_i = black_value(side, S·C_i, K·D_i, V_i)
//! ```
//!
//! As `dt → 0` the factors tend to `e^(-rT)` and `e^(-qT)`, so the price
//! converges to the closed form. For `q = 0` and `r > 0` the convergence is
//! monotone in the step count.

use pricer_core::types::PricingError;

use super::grid::StepGrid;
use super::strategy::{DiscreteInputs, DiscretizationStrategy, StepValuation};
use crate::analytical::black_value;

/// Discrete-compounding strategy (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountedAccumulation;

#[derive(Debug, Clone, Copy)]
struct Accumulated {
    discount: f64,
    carry: f64,
    variance: f64,
}

impl Accumulated {
    const ORIGIN: Self = Self {
        discount: 1.0,
        carry: 1.0,
        variance: 0.0,
    };

    fn value(&self, inputs: &DiscreteInputs) -> f64 {
        if self.variance == 0.0 {
            return inputs.intrinsic();
        }
        black_value(
            inputs.side,
            inputs.spot * self.carry,
            inputs.strike * self.discount,
            self.variance,
        )
    }
}

impl DiscretizationStrategy for DiscountedAccumulation {
    fn name(&self) -> &'static str {
        "accumulation"
    }

    fn roll(&self, inputs: &DiscreteInputs, grid: &StepGrid) -> Result<StepValuation, PricingError> {
        let dt = grid.dt();
        let rate_growth = 1.0 + inputs.rate * dt;
        let carry_growth = 1.0 + inputs.dividend * dt;
        if !(rate_growth > 0.0) || !(carry_growth > 0.0) {
            return Err(PricingError::NumericalInstability(format!(
                "per-step growth factor is not positive (1 + r·dt = {}, 1 + q·dt = {})",
                rate_growth, carry_growth
            )));
        }
        let step_variance = inputs.volatility * inputs.volatility * dt;

        let mut current = Accumulated::ORIGIN;
        let mut previous = current;
        for _ in 0..grid.steps() {
            previous = current;
            current = Accumulated {
                discount: current.discount / rate_growth,
                carry: current.carry / carry_growth,
                variance: current.variance + step_variance,
            };
        }

        Ok(StepValuation {
            price: current.value(inputs),
            previous_price: previous.value(inputs),
        })
    }
}
