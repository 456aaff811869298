//! String-keyed pricing request as received from an external caller.
//!
//! Side and mode arrive as free text; conversion into [`OptionParameters`]
//! is where unrecognised values become `UnsupportedSide` / `UnsupportedMode`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::PricingError;
use super::option::{OptionParameters, OptionSide, PricingMode};

/// Raw pricing request.
///
/// With the `serde` feature, fields accept both snake_case and the camelCase
/// spellings (`timeToMaturity`, `riskFreeRate`, `dividendYield`).
/// Every field is required; there are no implicit zero rates or default mode.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionParameters, PricingError, PricingRequest};
///
/// let request = PricingRequest {
///     side: "call".to_string(),
///     spot: 100.0,
///     strike: 95.0,
///     time_to_maturity: 0.5,
///     volatility: 0.25,
///     risk_free_rate: 0.03,
///     dividend_yield: 0.0,
///     mode: "discrete".to_string(),
/// };
/// let params = OptionParameters::try_from(&request).unwrap();
/// assert_eq!(params.strike(), 95.0);
///
/// let bad = PricingRequest { side: "straddle".to_string(), ..request };
/// assert!(matches!(
///     OptionParameters::try_from(&bad),
///     Err(PricingError::UnsupportedSide(_))
/// ));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricingRequest {
    /// "call" or "put".
    pub side: String,
    /// Underlying spot price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to maturity in years.
    #[cfg_attr(feature = "serde", serde(alias = "timeToMaturity"))]
    pub time_to_maturity: f64,
    /// Annualised volatility.
    pub volatility: f64,
    /// Annualised risk-free rate.
    #[cfg_attr(feature = "serde", serde(alias = "riskFreeRate"))]
    pub risk_free_rate: f64,
    /// Annualised continuous dividend yield.
    #[cfg_attr(feature = "serde", serde(alias = "dividendYield"))]
    pub dividend_yield: f64,
    /// "continuous" or "discrete".
    pub mode: String,
}

impl TryFrom<&PricingRequest> for OptionParameters {
    type Error = PricingError;

    fn try_from(request: &PricingRequest) -> Result<Self, Self::Error> {
        let side: OptionSide = request.side.parse()?;
        let mode: PricingMode = request.mode.parse()?;

        OptionParameters::builder()
            .side(side)
            .spot(request.spot)
            .strike(request.strike)
            .time_to_maturity(request.time_to_maturity)
            .volatility(request.volatility)
            .risk_free_rate(request.risk_free_rate)
            .dividend_yield(request.dividend_yield)
            .mode(mode)
            .build()
    }
}

impl From<&OptionParameters> for PricingRequest {
    fn from(params: &OptionParameters) -> Self {
        Self {
            side: params.side().to_string(),
            spot: params.spot(),
            strike: params.strike(),
            time_to_maturity: params.time_to_maturity(),
            volatility: params.volatility(),
            risk_free_rate: params.risk_free_rate(),
            dividend_yield: params.dividend_yield(),
            mode: params.mode().to_string(),
        }
    }
}
