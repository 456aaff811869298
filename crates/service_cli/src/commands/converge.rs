//! Converge command implementation
//!
//! Prints discrete prices over a ladder of step counts next to the
//! closed-form price.

use pricer_core::types::{OptionParameters, PricingMode};
use pricer_models::discrete::StepCount;
use pricer_pricing::PricingEngine;
use tracing::info;

use super::OptionArgs;
use crate::output::{render_ladder, LadderRow, OutputFormat};
use crate::{CliError, Result};

/// Run the converge command
pub fn run(
    engine: &PricingEngine,
    option: &OptionArgs,
    ladder: &[usize],
    format: OutputFormat,
) -> Result<()> {
    if ladder.is_empty() {
        return Err(CliError::InvalidArgument(
            "step ladder must not be empty".to_string(),
        ));
    }

    let params = OptionParameters::try_from(&option.to_request())?;
    info!(
        strategy = engine.config().strategy.as_str(),
        rungs = ladder.len(),
        "Running convergence study"
    );

    let rows = ladder_rows(engine, &params, ladder)?;
    print!("{}", render_ladder(format, &rows)?);
    Ok(())
}

/// Discrete price per rung, with the error against the closed form.
pub fn ladder_rows(
    engine: &PricingEngine,
    params: &OptionParameters,
    ladder: &[usize],
) -> Result<Vec<LadderRow>> {
    let continuous = engine
        .price(&params.with_mode(PricingMode::Continuous))?
        .price;

    ladder
        .iter()
        .map(|&steps| {
            let discrete = engine.discrete_price_with_steps(params, StepCount::Fixed(steps))?;
            Ok(LadderRow {
                steps,
                discrete,
                continuous,
                error: discrete - continuous,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::OptionSide;

    fn params() -> OptionParameters {
        OptionParameters::builder()
            .side(OptionSide::Call)
            .spot(100.0)
            .strike(100.0)
            .time_to_maturity(1.0)
            .volatility(0.2)
            .risk_free_rate(0.05)
            .dividend_yield(0.0)
            .mode(PricingMode::Discrete)
            .build()
            .unwrap()
    }

    #[test]
    fn test_error_shrinks_along_ladder() {
        let engine = PricingEngine::default();
        let rows = ladder_rows(&engine, &params(), &[10, 100, 1000]).unwrap();

        assert_eq!(rows.len(), 3);
        assert!(rows[0].error.abs() > rows[2].error.abs());
        assert!(rows[2].error.abs() < 1e-3);
        assert_eq!(rows[0].continuous, rows[2].continuous);
    }

    #[test]
    fn test_step_cap_propagates() {
        let engine = PricingEngine::default();
        assert!(ladder_rows(&engine, &params(), &[100_000]).is_err());
    }
}
