//! Price command implementation
//!
//! Prices a single option and prints the premium and Greeks.

use pricer_pricing::PricingEngine;
use tracing::info;

use super::OptionArgs;
use crate::output::{render_rows, OutputFormat, PricedRow};
use crate::Result;

/// Run the price command
pub fn run(engine: &PricingEngine, option: &OptionArgs, format: OutputFormat) -> Result<()> {
    let request = option.to_request();
    info!(
        side = %request.side,
        mode = %request.mode,
        spot = request.spot,
        strike = request.strike,
        "Pricing option"
    );

    let result = engine.price_request(&request)?;
    let row = PricedRow {
        request,
        result: Some(result),
        error: None,
    };

    print!("{}", render_rows(format, std::slice::from_ref(&row))?);
    info!("Pricing complete");
    Ok(())
}
