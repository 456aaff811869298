//! Time-step grid over the option's life.

use std::fmt;
use std::str::FromStr;

use pricer_core::types::PricingError;

/// Step count used when none is configured.
pub const DEFAULT_STEPS: usize = 100;

/// Upper bound on the number of steps a single valuation may use.
pub const MAX_STEPS: usize = 10_000;

/// Calendar days per year for [`StepCount::Daily`].
pub const DAYS_PER_YEAR: f64 = 365.0;

/// How many steps to split the maturity into.
///
/// # Examples
/// ```
/// use pricer_models::discrete::StepCount;
///
/// assert_eq!("250".parse::<StepCount>().unwrap(), StepCount::Fixed(250));
/// assert_eq!("daily".parse::<StepCount>().unwrap(), StepCount::Daily);
/// assert_eq!(StepCount::default(), StepCount::Fixed(100));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepCount {
    /// A fixed number of equal steps.
    Fixed(usize),
    /// `max(floor(T·365), 1)` steps. `dt` is then rescaled to `T / steps`
    /// so the grid covers `T` exactly; it equals `1/365` only when `T` is a
    /// whole number of days.
    Daily,
}

impl Default for StepCount {
    fn default() -> Self {
        StepCount::Fixed(DEFAULT_STEPS)
    }
}

impl StepCount {
    /// Resolves the step count for a maturity into a [`StepGrid`].
    ///
    /// # Errors
    /// - `SingularInput` if `maturity == 0`
    /// - `InvalidParameter` if `maturity` is negative or not finite, the
    ///   step count is zero, or it exceeds `max_steps`
    pub fn resolve(&self, maturity: f64, max_steps: usize) -> Result<StepGrid, PricingError> {
        if maturity == 0.0 {
            return Err(PricingError::SingularInput(
                "discrete valuation needs a positive maturity".to_string(),
            ));
        }
        if !(maturity > 0.0) || !maturity.is_finite() {
            return Err(PricingError::InvalidParameter(format!(
                "maturity must be positive and finite, got {}",
                maturity
            )));
        }

        let steps = match *self {
            StepCount::Fixed(n) => n,
            StepCount::Daily => ((maturity * DAYS_PER_YEAR).floor() as usize).max(1),
        };

        if steps == 0 {
            return Err(PricingError::InvalidParameter(
                "step count must be at least 1".to_string(),
            ));
        }
        if steps > max_steps {
            return Err(PricingError::InvalidParameter(format!(
                "step count {} exceeds the limit of {}",
                steps, max_steps
            )));
        }

        Ok(StepGrid {
            steps,
            dt: maturity / steps as f64,
        })
    }
}

impl FromStr for StepCount {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("daily") {
            return Ok(StepCount::Daily);
        }
        trimmed
            .parse::<usize>()
            .map(StepCount::Fixed)
            .map_err(|_| {
                PricingError::InvalidParameter(format!(
                    "step count must be a positive integer or 'daily', got '{}'",
                    s
                ))
            })
    }
}

impl fmt::Display for StepCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepCount::Fixed(n) => write!(f, "{}", n),
            StepCount::Daily => write!(f, "daily"),
        }
    }
}

/// Uniform grid of `steps` intervals of length `dt`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepGrid {
    steps: usize,
    dt: f64,
}

impl StepGrid {
    /// Number of intervals.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Interval length in years.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Total time covered, `steps · dt`.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.steps as f64 * self.dt
    }
}
