//! CLI configuration management
//!
//! Handles loading configuration from TOML files, environment variables and
//! command line flags.
//!
//! Priority (highest to lowest):
//! 1. CLI arguments (clap also reads `PRICER_LOG_LEVEL`, `PRICER_STEPS`,
//!    `PRICER_STRATEGY`, `PRICER_MAX_STEPS`, `PRICER_FORMAT`)
//! 2. Environment variables without a flag (`PRICER_SPOT_BUMP`,
//!    `PRICER_VOL_BUMP`, `PRICER_RATE_BUMP`)
//! 3. Config file
//! 4. Default values

use std::path::PathBuf;
use std::str::FromStr;

use pricer_models::discrete::{StepCount, StrategyKind, MAX_STEPS};
use pricer_pricing::engine::{EngineConfig, EngineConfigError};
use pricer_pricing::greeks::{BumpConfig, DEFAULT_BUMP};
use serde::Deserialize;
use thiserror::Error;

use crate::output::OutputFormat;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error(transparent)]
    Engine(#[from] EngineConfigError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Resolved CLI configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Discrete step-count policy
    #[serde(deserialize_with = "deserialize_steps")]
    pub steps: StepCount,
    /// Discretisation strategy
    #[serde(deserialize_with = "deserialize_strategy")]
    pub strategy: StrategyKind,
    /// Step cap
    pub max_steps: usize,
    /// Absolute spot bump
    pub spot_bump: f64,
    /// Absolute volatility bump
    pub vol_bump: f64,
    /// Absolute rate bump
    pub rate_bump: f64,
    /// Output format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// `steps = 250` or `steps = "daily"`
fn deserialize_steps<'de, D>(deserializer: D) -> Result<StepCount, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Count(usize),
        Label(String),
    }

    match Repr::deserialize(deserializer)? {
        Repr::Count(n) => Ok(StepCount::Fixed(n)),
        Repr::Label(s) => StepCount::from_str(&s).map_err(serde::de::Error::custom),
    }
}

fn deserialize_strategy<'de, D>(deserializer: D) -> Result<StrategyKind, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    StrategyKind::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            steps: StepCount::default(),
            strategy: StrategyKind::default(),
            max_steps: MAX_STEPS,
            spot_bump: DEFAULT_BUMP,
            vol_bump: DEFAULT_BUMP,
            rate_bump: DEFAULT_BUMP,
            format: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply the bump variables through `lookup`.
    ///
    /// `lookup` is `std::env::var(..).ok()` in the binary.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&'static str, &mut f64); 3] = [
            ("PRICER_SPOT_BUMP", &mut self.spot_bump),
            ("PRICER_VOL_BUMP", &mut self.vol_bump),
            ("PRICER_RATE_BUMP", &mut self.rate_bump),
        ];
        for (name, slot) in targets {
            if let Some(raw) = lookup(name) {
                *slot = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    name,
                    value: raw.clone(),
                })?;
            }
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if let Some(steps) = &cli.steps {
            self.steps = StepCount::from_str(steps).map_err(|_| ConfigError::InvalidValue {
                name: "steps",
                value: steps.clone(),
            })?;
        }
        if let Some(strategy) = &cli.strategy {
            self.strategy =
                StrategyKind::from_str(strategy).map_err(|_| ConfigError::InvalidValue {
                    name: "strategy",
                    value: strategy.clone(),
                })?;
        }
        if let Some(max_steps) = cli.max_steps {
            self.max_steps = max_steps;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        Ok(())
    }

    /// Engine configuration, validated.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let bumps = BumpConfig::builder()
            .spot_bump(self.spot_bump)
            .vol_bump(self.vol_bump)
            .rate_bump(self.rate_bump)
            .build()
            .map_err(EngineConfigError::from)?;

        Ok(EngineConfig::builder()
            .steps(self.steps)
            .strategy(self.strategy)
            .bumps(bumps)
            .max_steps(self.max_steps)
            .build()?)
    }
}

/// Global CLI overrides
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Step count override (integer or "daily")
    pub steps: Option<String>,
    /// Strategy override
    pub strategy: Option<String>,
    /// Step cap override
    pub max_steps: Option<usize>,
    /// Output format override
    pub format: Option<OutputFormat>,
}

/// Build configuration from all sources
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env(|name| std::env::var(name).ok())?;
    config.merge_with_cli(cli)?;

    // Fail early on an unusable engine setup
    config.engine_config()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.steps, StepCount::Fixed(100));
        assert_eq!(config.strategy, StrategyKind::Accumulation);
        assert_eq!(config.format, OutputFormat::Table);
        assert!(config.engine_config().is_ok());
    }

    #[test]
    fn test_from_toml() {
        let config = CliConfig::from_toml(
            r#"
            log_level = "debug"
            steps = "daily"
            strategy = "binomial"
            vol_bump = 0.005
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.steps, StepCount::Daily);
        assert_eq!(config.strategy, StrategyKind::Binomial);
        assert_eq!(config.vol_bump, 0.005);
        assert_eq!(config.spot_bump, DEFAULT_BUMP);
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_from_toml_integer_steps() {
        let config = CliConfig::from_toml("steps = 250").unwrap();
        assert_eq!(config.steps, StepCount::Fixed(250));
    }

    #[test]
    fn test_from_toml_rejects_bad_values() {
        assert!(matches!(
            CliConfig::from_toml(r#"strategy = "trinomial""#),
            Err(ConfigError::FileError(_))
        ));
        assert!(matches!(
            CliConfig::from_toml(r#"log_level = "loud""#),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = PathBuf::from("/nonexistent/bsgreeks.toml");
        assert!(matches!(
            CliConfig::from_file(&path),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_apply_env() {
        let vars: HashMap<&str, &str> = [("PRICER_VOL_BUMP", "0.002"), ("PRICER_RATE_BUMP", " 0.0001 ")]
            .into_iter()
            .collect();
        let mut config = CliConfig::default();
        config
            .apply_env(|name| vars.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.spot_bump, DEFAULT_BUMP);
        assert_eq!(config.vol_bump, 0.002);
        assert_eq!(config.rate_bump, 0.0001);
    }

    #[test]
    fn test_apply_env_rejects_garbage() {
        let mut config = CliConfig::default();
        let err = config
            .apply_env(|name| (name == "PRICER_SPOT_BUMP").then(|| "wide".to_string()))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "PRICER_SPOT_BUMP",
                ..
            }
        ));
    }

    #[test]
    fn test_merge_with_cli_precedence() {
        let mut config = CliConfig::from_toml(r#"steps = 50"#).unwrap();
        let cli = CliArgs {
            steps: Some("1000".to_string()),
            strategy: Some("bbs".to_string()),
            format: Some(OutputFormat::Csv),
            ..CliArgs::default()
        };
        config.merge_with_cli(&cli).unwrap();
        assert_eq!(config.steps, StepCount::Fixed(1000));
        assert_eq!(config.strategy, StrategyKind::Binomial);
        assert_eq!(config.format, OutputFormat::Csv);
    }

    #[test]
    fn test_engine_config_validation() {
        let config = CliConfig {
            vol_bump: 0.0,
            ..CliConfig::default()
        };
        assert!(matches!(config.engine_config(), Err(ConfigError::Engine(_))));

        let config = CliConfig {
            steps: StepCount::Fixed(20_000),
            ..CliConfig::default()
        };
        assert!(config.engine_config().is_err());
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert!("verbose".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Trace.to_string(), "trace");
    }
}
