//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod batch;
pub mod converge;
pub mod price;

use clap::Args;
use pricer_core::types::PricingRequest;

/// Option inputs shared by single-option commands.
#[derive(Debug, Clone, Args)]
pub struct OptionArgs {
    /// Option side (call, put)
    #[arg(long)]
    pub side: String,

    /// Underlying spot price
    #[arg(long)]
    pub spot: f64,

    /// Strike price
    #[arg(long)]
    pub strike: f64,

    /// Time to maturity in years
    #[arg(short = 't', long)]
    pub maturity: f64,

    /// Annualised volatility (0.2 = 20%)
    #[arg(short = 'v', long)]
    pub volatility: f64,

    /// Annualised risk-free rate
    #[arg(short = 'r', long, allow_negative_numbers = true)]
    pub rate: f64,

    /// Annualised continuous dividend yield
    #[arg(short = 'q', long)]
    pub dividend: f64,

    /// Pricing mode (continuous, discrete)
    #[arg(short, long)]
    pub mode: String,
}

impl OptionArgs {
    /// Raw request; side and mode labels are checked when priced.
    pub fn to_request(&self) -> PricingRequest {
        PricingRequest {
            side: self.side.clone(),
            spot: self.spot,
            strike: self.strike,
            time_to_maturity: self.maturity,
            volatility: self.volatility,
            risk_free_rate: self.rate,
            dividend_yield: self.dividend,
            mode: self.mode.clone(),
        }
    }
}
