//! Discretisation strategy seam.
//!
//! A strategy turns option inputs and a [`StepGrid`] into a
//! [`StepValuation`]: the value at the full maturity and the value one step
//! earlier on the same grid spacing. The second figure is what the
//! discrete theta is built from.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use pricer_core::types::{OptionParameters, OptionSide, PricingError};

use super::accumulation::DiscountedAccumulation;
use super::binomial::BinomialBlackScholes;
use super::grid::StepGrid;

/// Plain copy of the inputs a strategy reads.
///
/// Unlike [`OptionParameters`] this is not validated on construction, so
/// the bump engine can shift a single field without rebuilding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteInputs {
    /// Call or put.
    pub side: OptionSide,
    /// Spot price.
    pub spot: f64,
    /// Strike price.
    pub strike: f64,
    /// Time to maturity in years.
    pub maturity: f64,
    /// Annualised volatility.
    pub volatility: f64,
    /// Annualised risk-free rate.
    pub rate: f64,
    /// Annualised continuous dividend yield.
    pub dividend: f64,
}

impl DiscreteInputs {
    /// Copy with a shifted spot.
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Copy with a shifted volatility.
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self { volatility, ..self }
    }

    /// Copy with a shifted rate.
    pub fn with_rate(self, rate: f64) -> Self {
        Self { rate, ..self }
    }

    /// Intrinsic value at the current spot.
    #[inline]
    pub fn intrinsic(&self) -> f64 {
        self.side.intrinsic(self.spot, self.strike)
    }

    /// Checks the domain every strategy relies on.
    ///
    /// # Errors
    /// - `InvalidParameter` for non-finite values, non-positive spot or
    ///   strike, negative volatility, maturity or dividend yield
    /// - `SingularInput` for zero volatility or zero maturity
    pub fn validate(&self) -> Result<(), PricingError> {
        let fields = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("maturity", self.maturity),
            ("volatility", self.volatility),
            ("rate", self.rate),
            ("dividend", self.dividend),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(PricingError::InvalidParameter(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if self.spot <= 0.0 || self.strike <= 0.0 {
            return Err(PricingError::InvalidParameter(format!(
                "spot and strike must be positive, got S = {}, K = {}",
                self.spot, self.strike
            )));
        }
        if self.volatility < 0.0 || self.maturity < 0.0 || self.dividend < 0.0 {
            return Err(PricingError::InvalidParameter(format!(
                "volatility, maturity and dividend yield must be non-negative, got σ = {}, T = {}, q = {}",
                self.volatility, self.maturity, self.dividend
            )));
        }
        if self.volatility == 0.0 {
            return Err(PricingError::SingularInput(
                "zero volatility".to_string(),
            ));
        }
        if self.maturity == 0.0 {
            return Err(PricingError::SingularInput("zero maturity".to_string()));
        }
        Ok(())
    }
}

impl From<&OptionParameters> for DiscreteInputs {
    fn from(params: &OptionParameters) -> Self {
        Self {
            side: params.side(),
            spot: params.spot(),
            strike: params.strike(),
            maturity: params.time_to_maturity(),
            volatility: params.volatility(),
            rate: params.risk_free_rate(),
            dividend: params.dividend_yield(),
        }
    }
}

/// Value at maturity `T` and at `T - dt` on one grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepValuation {
    /// Value with the full `steps` intervals remaining.
    pub price: f64,
    /// Value with `steps - 1` intervals remaining.
    pub previous_price: f64,
}

/// Rule for rolling a valuation across a [`StepGrid`].
pub trait DiscretizationStrategy: fmt::Debug + Send + Sync {
    /// Short identifier used in logs and configuration.
    fn name(&self) -> &'static str;

    /// Values the option on `grid`.
    ///
    /// Implementations may assume `inputs` passed [`DiscreteInputs::validate`].
    fn roll(&self, inputs: &DiscreteInputs, grid: &StepGrid) -> Result<StepValuation, PricingError>;
}

/// Selector for the built-in strategies.
///
/// # Examples
/// ```
/// use pricer_models::discrete::StrategyKind;
///
/// let kind: StrategyKind = "binomial".parse().unwrap();
/// assert_eq!(kind.build().name(), "binomial");
/// assert_eq!(StrategyKind::default(), StrategyKind::Accumulation);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrategyKind {
    /// [`DiscountedAccumulation`].
    #[default]
    Accumulation,
    /// [`BinomialBlackScholes`].
    Binomial,
}

impl StrategyKind {
    /// Identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Accumulation => "accumulation",
            StrategyKind::Binomial => "binomial",
        }
    }

    /// Instantiates the strategy.
    pub fn build(&self) -> Arc<dyn DiscretizationStrategy> {
        match self {
            StrategyKind::Accumulation => Arc::new(DiscountedAccumulation),
            StrategyKind::Binomial => Arc::new(BinomialBlackScholes),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "accumulation" | "accumulate" => Ok(StrategyKind::Accumulation),
            "binomial" | "bbs" => Ok(StrategyKind::Binomial),
            _ => Err(PricingError::InvalidParameter(format!(
                "unknown discretisation strategy '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::PricingMode;

    fn inputs() -> DiscreteInputs {
        DiscreteInputs {
            side: OptionSide::Call,
            spot: 100.0,
            strike: 100.0,
            maturity: 1.0,
            volatility: 0.2,
            rate: 0.05,
            dividend: 0.0,
        }
    }

    #[test]
    fn test_from_parameters() {
        let params = OptionParameters::builder()
            .side(OptionSide::Put)
            .spot(90.0)
            .strike(95.0)
            .time_to_maturity(0.25)
            .volatility(0.3)
            .risk_free_rate(0.01)
            .dividend_yield(0.02)
            .mode(PricingMode::Continuous)
            .build()
            .unwrap();
        let inputs = DiscreteInputs::from(&params);
        assert_eq!(inputs.side, OptionSide::Put);
        assert_eq!(inputs.spot, 90.0);
        assert_eq!(inputs.maturity, 0.25);
        assert_eq!(inputs.dividend, 0.02);
    }

    #[test]
    fn test_shift_helpers() {
        let shifted = inputs().with_spot(101.0).with_volatility(0.21).with_rate(0.06);
        assert_eq!(shifted.spot, 101.0);
        assert_eq!(shifted.volatility, 0.21);
        assert_eq!(shifted.rate, 0.06);
        assert_eq!(shifted.strike, 100.0);
    }

    #[test]
    fn test_validate() {
        assert!(inputs().validate().is_ok());
        assert!(matches!(
            inputs().with_volatility(0.0).validate(),
            Err(PricingError::SingularInput(_))
        ));
        assert!(matches!(
            inputs().with_volatility(-0.1).validate(),
            Err(PricingError::InvalidParameter(_))
        ));
        assert!(matches!(
            inputs().with_spot(0.0).validate(),
            Err(PricingError::InvalidParameter(_))
        ));
        assert!(matches!(
            inputs().with_rate(f64::NAN).validate(),
            Err(PricingError::InvalidParameter(_))
        ));
        let expired = DiscreteInputs {
            maturity: 0.0,
            ..inputs()
        };
        assert!(matches!(expired.validate(), Err(PricingError::SingularInput(_))));
    }

    #[test]
    fn test_strategy_kind_parse() {
        assert_eq!("Accumulation".parse::<StrategyKind>().unwrap(), StrategyKind::Accumulation);
        assert_eq!("bbs".parse::<StrategyKind>().unwrap(), StrategyKind::Binomial);
        assert!("trinomial".parse::<StrategyKind>().is_err());
        assert_eq!(StrategyKind::Binomial.to_string(), "binomial");
    }
}
