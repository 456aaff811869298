//! Black-Scholes-Merton model for European options with a continuous
//! dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! The same formula written on prepaid forward S·e^(-qT), discounted strike
//! K·e^(-rT) and total variance σ²T is exposed as [`black_value`], which the
//! discrete-time pricers evaluate once per step.

use num_traits::Float;
use pricer_core::types::{OptionSide, PricingResult};

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

#[inline]
fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// European option value from discounted quantities.
///
/// # Arguments
/// * `side` - Call or put
/// * `prepaid_forward` - Spot carried to today net of yield, S·e^(-qT)
/// * `discounted_strike` - Strike discounted to today, K·e^(-rT)
/// * `total_variance` - Integrated variance σ²T, must be positive
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::analytical::black_scholes::black_value;
///
/// let discount = (-0.05_f64).exp();
/// let call = black_value(OptionSide::Call, 100.0, 100.0 * discount, 0.04);
/// assert!((call - 10.4506).abs() < 1e-3);
/// ```
#[inline]
pub fn black_value<T: Float>(
    side: OptionSide,
    prepaid_forward: T,
    discounted_strike: T,
    total_variance: T,
) -> T {
    let std_dev = total_variance.sqrt();
    let d1 = ((prepaid_forward / discounted_strike).ln() + constant::<T>(0.5) * total_variance)
        / std_dev;
    let d2 = d1 - std_dev;

    match side {
        OptionSide::Call => prepaid_forward * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionSide::Put => discounted_strike * norm_cdf(-d2) - prepaid_forward * norm_cdf(-d1),
    }
}

/// Price and analytical sensitivities from one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Greeks<T: Float> {
    /// Option value.
    pub price: T,
    /// ∂V/∂S.
    pub delta: T,
    /// ∂²V/∂S².
    pub gamma: T,
    /// ∂V/∂t per year (calendar time).
    pub theta: T,
    /// ∂V/∂σ.
    pub vega: T,
    /// ∂V/∂r.
    pub rho: T,
}

impl From<Greeks<f64>> for PricingResult {
    fn from(g: Greeks<f64>) -> Self {
        PricingResult {
            price: g.price,
            delta: g.delta,
            gamma: g.gamma,
            theta: g.theta,
            vega: g.vega,
            rho: g.rho,
        }
    }
}

/// Shared intermediate terms for one (strike, expiry) pair.
#[derive(Debug, Clone, Copy)]
struct Terms<T: Float> {
    sqrt_t: T,
    d1: T,
    d2: T,
    /// e^(-qT)
    carry: T,
    /// e^(-rT)
    discount: T,
}

/// Black-Scholes-Merton model for European option pricing.
///
/// Holds the market state (spot, rate, dividend yield, volatility); strike
/// and expiry are supplied per evaluation.
///
/// The per-quantity methods (`price`, `delta`, ...) require `strike > 0`
/// and `expiry > 0`; [`BlackScholes::greeks`] is the checked entry point.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.02, 0.2).unwrap();
/// let call = bs.price(OptionSide::Call, 100.0, 1.0);
/// let put = bs.price(OptionSide::Put, 100.0, 1.0);
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let forward = 100.0 * (-0.02_f64).exp() - 100.0 * (-0.05_f64).exp();
/// assert!((call - put - forward).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, may be negative)
    /// * `dividend` - Continuous dividend yield (annualised)
    /// * `volatility` - Volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0
    /// - `AnalyticalError::ZeroVolatility` if volatility == 0
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.0, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, dividend: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !(spot > zero) {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        if volatility == zero {
            return Err(AnalyticalError::ZeroVolatility);
        }
        if !(volatility > zero) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend(&self) -> T {
        self.dividend
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    #[inline]
    fn terms(&self, strike: T, expiry: T) -> Terms<T> {
        let half = constant::<T>(0.5);
        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = self.volatility * sqrt_t;

        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate - self.dividend + half * self.volatility * self.volatility) * expiry;
        let d1 = (log_moneyness + drift) / vol_sqrt_t;

        Terms {
            sqrt_t,
            d1,
            d2: d1 - vol_sqrt_t,
            carry: (-self.dividend * expiry).exp(),
            discount: (-self.rate * expiry).exp(),
        }
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        self.terms(strike, expiry).d1
    }

    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.terms(strike, expiry).d2
    }

    /// Option price for the given side.
    #[inline]
    pub fn price(&self, side: OptionSide, strike: T, expiry: T) -> T {
        let t = self.terms(strike, expiry);
        self.price_from(side, strike, &t)
    }

    /// European call price.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
    /// assert!((bs.price_call(100.0, 1.0) - 10.4506).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        self.price(OptionSide::Call, strike, expiry)
    }

    /// European put price.
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        self.price(OptionSide::Put, strike, expiry)
    }

    #[inline]
    fn price_from(&self, side: OptionSide, strike: T, t: &Terms<T>) -> T {
        let forward = self.spot * t.carry;
        let df_strike = strike * t.discount;
        match side {
            OptionSide::Call => forward * norm_cdf(t.d1) - df_strike * norm_cdf(t.d2),
            OptionSide::Put => df_strike * norm_cdf(-t.d2) - forward * norm_cdf(-t.d1),
        }
    }

    /// Delta (∂V/∂S).
    ///
    /// - Call Delta = e^(-qT)·N(d₁)
    /// - Put Delta = -e^(-qT)·N(-d₁)
    #[inline]
    pub fn delta(&self, side: OptionSide, strike: T, expiry: T) -> T {
        let t = self.terms(strike, expiry);
        self.delta_from(side, &t)
    }

    #[inline]
    fn delta_from(&self, side: OptionSide, t: &Terms<T>) -> T {
        match side {
            OptionSide::Call => t.carry * norm_cdf(t.d1),
            OptionSide::Put => -t.carry * norm_cdf(-t.d1),
        }
    }

    /// Gamma (∂²V/∂S²) = e^(-qT)·φ(d₁) / (S·σ·√T), same for both sides.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        let t = self.terms(strike, expiry);
        self.gamma_from(&t)
    }

    #[inline]
    fn gamma_from(&self, t: &Terms<T>) -> T {
        t.carry * norm_pdf(t.d1) / (self.spot * self.volatility * t.sqrt_t)
    }

    /// Vega (∂V/∂σ) = S·e^(-qT)·√T·φ(d₁), same for both sides.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        let t = self.terms(strike, expiry);
        self.vega_from(&t)
    }

    #[inline]
    fn vega_from(&self, t: &Terms<T>) -> T {
        self.spot * t.carry * t.sqrt_t * norm_pdf(t.d1)
    }

    /// Theta (∂V/∂t per year).
    ///
    /// - Call: -(S·σ·e^(-qT)·φ(d₁))/(2√T) - r·K·e^(-rT)·N(d₂) + q·S·e^(-qT)·N(d₁)
    /// - Put: -(S·σ·e^(-qT)·φ(d₁))/(2√T) + r·K·e^(-rT)·N(-d₂) - q·S·e^(-qT)·N(-d₁)
    #[inline]
    pub fn theta(&self, side: OptionSide, strike: T, expiry: T) -> T {
        let t = self.terms(strike, expiry);
        self.theta_from(side, strike, &t)
    }

    #[inline]
    fn theta_from(&self, side: OptionSide, strike: T, t: &Terms<T>) -> T {
        let two = constant::<T>(2.0);
        let forward = self.spot * t.carry;
        let decay = -(forward * self.volatility * norm_pdf(t.d1)) / (two * t.sqrt_t);
        let rate_term = self.rate * strike * t.discount;
        let yield_term = self.dividend * forward;

        match side {
            OptionSide::Call => decay - rate_term * norm_cdf(t.d2) + yield_term * norm_cdf(t.d1),
            OptionSide::Put => decay + rate_term * norm_cdf(-t.d2) - yield_term * norm_cdf(-t.d1),
        }
    }

    /// Rho (∂V/∂r).
    ///
    /// - Call Rho = K·T·e^(-rT)·N(d₂)
    /// - Put Rho = -K·T·e^(-rT)·N(-d₂)
    #[inline]
    pub fn rho(&self, side: OptionSide, strike: T, expiry: T) -> T {
        let t = self.terms(strike, expiry);
        self.rho_from(side, strike, expiry, &t)
    }

    #[inline]
    fn rho_from(&self, side: OptionSide, strike: T, expiry: T, t: &Terms<T>) -> T {
        let scale = strike * expiry * t.discount;
        match side {
            OptionSide::Call => scale * norm_cdf(t.d2),
            OptionSide::Put => -scale * norm_cdf(-t.d2),
        }
    }

    /// Price and all five Greeks, with input checks.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidStrike` if strike <= 0
    /// - `AnalyticalError::InvalidExpiry` if expiry < 0
    /// - `AnalyticalError::ZeroExpiry` if expiry == 0
    /// - `AnalyticalError::NumericalInstability` if any output is not finite
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionSide;
    /// use pricer_models::analytical::{AnalyticalError, BlackScholes};
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
    /// let g = bs.greeks(OptionSide::Call, 100.0, 1.0).unwrap();
    /// assert!((g.delta - 0.6368).abs() < 1e-4);
    ///
    /// assert_eq!(
    ///     bs.greeks(OptionSide::Call, 100.0, 0.0).unwrap_err(),
    ///     AnalyticalError::ZeroExpiry
    /// );
    /// ```
    pub fn greeks(&self, side: OptionSide, strike: T, expiry: T) -> Result<Greeks<T>, AnalyticalError> {
        let zero = T::zero();
        if !(strike > zero) {
            return Err(AnalyticalError::InvalidStrike {
                strike: strike.to_f64().unwrap_or(f64::NAN),
            });
        }
        if expiry == zero {
            return Err(AnalyticalError::ZeroExpiry);
        }
        if !(expiry > zero) {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: expiry.to_f64().unwrap_or(f64::NAN),
            });
        }

        let t = self.terms(strike, expiry);
        let greeks = Greeks {
            price: self.price_from(side, strike, &t),
            delta: self.delta_from(side, &t),
            gamma: self.gamma_from(&t),
            theta: self.theta_from(side, strike, &t),
            vega: self.vega_from(&t),
            rho: self.rho_from(side, strike, expiry, &t),
        };

        let values = [
            greeks.price,
            greeks.delta,
            greeks.gamma,
            greeks.theta,
            greeks.vega,
            greeks.rho,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AnalyticalError::NumericalInstability {
                message: format!(
                    "non-finite Black-Scholes output for K = {}, T = {}",
                    strike.to_f64().unwrap_or(f64::NAN),
                    expiry.to_f64().unwrap_or(f64::NAN)
                ),
            });
        }

        Ok(greeks)
    }
}
