//! Bump configuration for finite-difference Greeks.
//!
//! Provides [`BumpConfig`] for configuring bump widths and
//! [`BumpConfigError`] for rejected configurations.

use thiserror::Error;

/// Default absolute bump applied to spot, volatility and rate.
pub const DEFAULT_BUMP: f64 = 0.01;

/// Configuration for bump-and-reprice Greeks.
///
/// All bumps are absolute. Use the builder via [`BumpConfig::builder()`]
/// for construction.
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `spot_bump` | 0.01 | Absolute bump for spot price |
/// | `vol_bump` | 0.01 | Absolute bump for volatility |
/// | `rate_bump` | 0.01 | Absolute bump for interest rate |
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::BumpConfig;
///
/// // Use defaults
/// let config = BumpConfig::default();
/// assert_eq!(config.spot_bump, 0.01);
///
/// // Use builder for custom values
/// let config = BumpConfig::builder()
///     .spot_bump(0.05)
///     .vol_bump(0.001)
///     .build()
///     .unwrap();
/// assert_eq!(config.rate_bump, 0.01);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BumpConfig {
    /// Absolute bump for spot price (default: 0.01).
    pub spot_bump: f64,

    /// Absolute bump for volatility (default: 0.01 = 1 vol point).
    pub vol_bump: f64,

    /// Absolute bump for interest rate (default: 0.01 = 100bp).
    pub rate_bump: f64,
}

impl Default for BumpConfig {
    fn default() -> Self {
        Self {
            spot_bump: DEFAULT_BUMP,
            vol_bump: DEFAULT_BUMP,
            rate_bump: DEFAULT_BUMP,
        }
    }
}

impl BumpConfig {
    /// Creates a new builder for constructing a `BumpConfig`.
    pub fn builder() -> BumpConfigBuilder {
        BumpConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// Returns an error if any bump is non-finite, non-positive or larger
    /// than its sanity ceiling.
    pub fn validate(&self) -> Result<(), BumpConfigError> {
        // Spot bump: absolute, so only positivity is required
        if !(self.spot_bump > 0.0) || !self.spot_bump.is_finite() {
            return Err(BumpConfigError::InvalidSpotBump(format!(
                "spot_bump must be positive and finite, got {}",
                self.spot_bump
            )));
        }

        if !(self.vol_bump > 0.0) || !self.vol_bump.is_finite() {
            return Err(BumpConfigError::InvalidVolBump(format!(
                "vol_bump must be positive and finite, got {}",
                self.vol_bump
            )));
        }
        if self.vol_bump > 0.5 {
            return Err(BumpConfigError::InvalidVolBump(
                "vol_bump must be <= 0.5 (50 vol points)".to_string(),
            ));
        }

        if !(self.rate_bump > 0.0) || !self.rate_bump.is_finite() {
            return Err(BumpConfigError::InvalidRateBump(format!(
                "rate_bump must be positive and finite, got {}",
                self.rate_bump
            )));
        }
        if self.rate_bump > 0.1 {
            return Err(BumpConfigError::InvalidRateBump(
                "rate_bump must be <= 0.1 (10%)".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for [`BumpConfig`].
#[derive(Debug, Default)]
pub struct BumpConfigBuilder {
    spot_bump: Option<f64>,
    vol_bump: Option<f64>,
    rate_bump: Option<f64>,
}

impl BumpConfigBuilder {
    /// Sets the absolute spot bump (default: 0.01).
    pub fn spot_bump(mut self, bump: f64) -> Self {
        self.spot_bump = Some(bump);
        self
    }

    /// Sets the absolute volatility bump (default: 0.01).
    pub fn vol_bump(mut self, bump: f64) -> Self {
        self.vol_bump = Some(bump);
        self
    }

    /// Sets the absolute rate bump (default: 0.01).
    pub fn rate_bump(mut self, bump: f64) -> Self {
        self.rate_bump = Some(bump);
        self
    }

    /// Builds the configuration, validating all parameters.
    ///
    /// # Errors
    ///
    /// Returns [`BumpConfigError`] if any parameter is invalid.
    pub fn build(self) -> Result<BumpConfig, BumpConfigError> {
        let config = BumpConfig {
            spot_bump: self.spot_bump.unwrap_or(DEFAULT_BUMP),
            vol_bump: self.vol_bump.unwrap_or(DEFAULT_BUMP),
            rate_bump: self.rate_bump.unwrap_or(DEFAULT_BUMP),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Error type for [`BumpConfig`] validation.
#[derive(Debug, Clone, PartialEq, Error)]
#[allow(clippy::enum_variant_names)]
pub enum BumpConfigError {
    /// Invalid spot bump value.
    #[error("Invalid spot bump: {0}")]
    InvalidSpotBump(String),
    /// Invalid volatility bump value.
    #[error("Invalid vol bump: {0}")]
    InvalidVolBump(String),
    /// Invalid rate bump value.
    #[error("Invalid rate bump: {0}")]
    InvalidRateBump(String),
}
