//! Option contract description: side, pricing mode and the validated
//! parameter set consumed by the pricers.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::PricingError;

/// Side of a European vanilla option.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
///
/// let side: OptionSide = "Put".parse().unwrap();
/// assert_eq!(side, OptionSide::Put);
/// assert_eq!(side.intrinsic(90.0, 100.0), 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionSide {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionSide {
    /// Returns true for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionSide::Call)
    }

    /// +1 for a call, -1 for a put.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionSide::Call => 1.0,
            OptionSide::Put => -1.0,
        }
    }

    /// Payoff at expiry: max(S - K, 0) for a call, max(K - S, 0) for a put.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }

    /// Lowercase name as used on the request interface.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSide::Call => "call",
            OptionSide::Put => "put",
        }
    }
}

impl FromStr for OptionSide {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionSide::Call),
            "put" | "p" => Ok(OptionSide::Put),
            _ => Err(PricingError::UnsupportedSide(s.to_string())),
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pricing mode selecting the closed-form or the time-stepped pricer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PricingMode {
    /// Closed-form Black-Scholes-Merton.
    #[default]
    Continuous,
    /// Multi-step discrete-time approximation.
    Discrete,
}

impl PricingMode {
    /// Lowercase name as used on the request interface.
    pub fn as_str(&self) -> &'static str {
        match self {
            PricingMode::Continuous => "continuous",
            PricingMode::Discrete => "discrete",
        }
    }
}

impl FromStr for PricingMode {
    type Err = PricingError;

    /// Accepts `continuous` / `discrete` (any case) and the long labels
    /// `Black-Scholes Continuous` / `Black-Scholes Discrete`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        let name = normalised
            .strip_prefix("black-scholes")
            .map(str::trim)
            .unwrap_or(&normalised);
        match name {
            "continuous" => Ok(PricingMode::Continuous),
            "discrete" => Ok(PricingMode::Discrete),
            _ => Err(PricingError::UnsupportedMode(s.to_string())),
        }
    }
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, immutable parameter set for one pricing request.
///
/// Construct through [`OptionParameters::builder()`]. Domain checks run in
/// [`OptionParametersBuilder::build`]; zero maturity and zero volatility are
/// accepted here and rejected by the pricers as singular inputs.
///
/// # Examples
/// ```
/// use pricer_core::types::{OptionParameters, OptionSide, PricingMode};
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
/// assert_eq!(params.spot(), 100.0);
/// assert!(OptionParameters::builder().spot(-1.0).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct OptionParameters {
    side: OptionSide,
    spot: f64,
    strike: f64,
    time_to_maturity: f64,
    volatility: f64,
    risk_free_rate: f64,
    dividend_yield: f64,
    mode: PricingMode,
}

impl OptionParameters {
    /// Creates a new builder.
    pub fn builder() -> OptionParametersBuilder {
        OptionParametersBuilder::default()
    }

    /// Option side.
    #[inline]
    pub fn side(&self) -> OptionSide {
        self.side
    }

    /// Underlying spot price (S).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price (K).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to maturity in years (T).
    #[inline]
    pub fn time_to_maturity(&self) -> f64 {
        self.time_to_maturity
    }

    /// Annualised volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Annualised risk-free rate (r), may be negative.
    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Annualised continuous dividend yield (q).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Pricing mode.
    #[inline]
    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    /// Returns a copy priced with a different mode.
    pub fn with_mode(mut self, mode: PricingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns a copy for the given side.
    pub fn with_side(mut self, side: OptionSide) -> Self {
        self.side = side;
        self
    }

    /// True when the closed-form terms d₁/d₂ are undefined.
    #[inline]
    pub fn is_singular(&self) -> bool {
        self.time_to_maturity == 0.0 || self.volatility == 0.0
    }
}

/// Builder for [`OptionParameters`].
#[derive(Debug, Default, Clone)]
pub struct OptionParametersBuilder {
    side: Option<OptionSide>,
    spot: Option<f64>,
    strike: Option<f64>,
    time_to_maturity: Option<f64>,
    volatility: Option<f64>,
    risk_free_rate: Option<f64>,
    dividend_yield: Option<f64>,
    mode: Option<PricingMode>,
}

impl OptionParametersBuilder {
    /// Sets the option side.
    pub fn side(mut self, side: OptionSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Sets the spot price.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike price.
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the time to maturity in years.
    pub fn time_to_maturity(mut self, years: f64) -> Self {
        self.time_to_maturity = Some(years);
        self
    }

    /// Sets the annualised volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the risk-free rate.
    pub fn risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    /// Sets the continuous dividend yield.
    pub fn dividend_yield(mut self, yield_: f64) -> Self {
        self.dividend_yield = Some(yield_);
        self
    }

    /// Sets the pricing mode.
    pub fn mode(mut self, mode: PricingMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Builds the parameter set, validating every field.
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] when a required field is missing,
    /// any value is non-finite, spot or strike is not positive, or maturity,
    /// volatility or dividend yield is negative.
    pub fn build(self) -> Result<OptionParameters, PricingError> {
        let side = self
            .side
            .ok_or_else(|| PricingError::InvalidParameter("side is required".to_string()))?;
        let spot = required(self.spot, "spot")?;
        let strike = required(self.strike, "strike")?;
        let time_to_maturity = required(self.time_to_maturity, "time_to_maturity")?;
        let volatility = required(self.volatility, "volatility")?;
        let risk_free_rate = required(self.risk_free_rate, "risk_free_rate")?;
        let dividend_yield = required(self.dividend_yield, "dividend_yield")?;
        let mode = self
            .mode
            .ok_or_else(|| PricingError::InvalidParameter("mode is required".to_string()))?;

        if spot <= 0.0 {
            return Err(invalid("spot", "positive", spot));
        }
        if strike <= 0.0 {
            return Err(invalid("strike", "positive", strike));
        }
        if time_to_maturity < 0.0 {
            return Err(invalid("time_to_maturity", "non-negative", time_to_maturity));
        }
        if volatility < 0.0 {
            return Err(invalid("volatility", "non-negative", volatility));
        }
        if dividend_yield < 0.0 {
            return Err(invalid("dividend_yield", "non-negative", dividend_yield));
        }

        Ok(OptionParameters {
            side,
            spot,
            strike,
            time_to_maturity,
            volatility,
            risk_free_rate,
            dividend_yield,
            mode,
        })
    }
}

fn required(value: Option<f64>, name: &str) -> Result<f64, PricingError> {
    let value =
        value.ok_or_else(|| PricingError::InvalidParameter(format!("{} is required", name)))?;
    finite(value, name)
}

fn finite(value: f64, name: &str) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::InvalidParameter(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

fn invalid(name: &str, requirement: &str, value: f64) -> PricingError {
    PricingError::InvalidParameter(format!("{} must be {}, got {}", name, requirement, value))
}
