//! CLI configuration.
//!
//! Values are layered, highest priority first:
//! 1. Command line flags (`--greeks`, `--verbose`)
//! 2. `BLACKSCHOLES_*` environment variables, nested keys joined by `__`
//!    (e.g. `BLACKSCHOLES_SOLVER__INITIAL_GUESS=0.3`)
//! 3. The TOML configuration file, if present
//! 4. Defaults

use std::path::Path;
use std::str::FromStr;

use blackscholes_models::{GreekSet, ImpliedVolConfig};
use serde::{Deserialize, Serialize};

use crate::{CliError, Result};

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "BLACKSCHOLES";

/// Log levels accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::Config(format!(
                "Invalid log level: {s}. Must be one of: trace, debug, info, warn, error"
            ))),
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

fn deserialize_log_level<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Resolved CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default tracing level when `RUST_LOG` is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Greeks evaluated when `--greeks` is not given
    pub default_greeks: String,
    /// Implied volatility solver tuning
    pub solver: ImpliedVolConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            default_greeks: "all".to_string(),
            solver: ImpliedVolConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads the configuration file (optional) and environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let config = ::config::Config::builder()
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<CliConfig>()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML document on top of the defaults.
    #[cfg(test)]
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = ::config::Config::builder()
            .add_source(::config::File::from_str(content, ::config::FileFormat::Toml))
            .build()?
            .try_deserialize::<CliConfig>()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let solver = &self.solver;
        if !solver.solver.is_valid() {
            return Err(CliError::Config(format!(
                "solver tolerance and max_iterations must be positive, got {} and {}",
                solver.solver.tolerance, solver.solver.max_iterations
            )));
        }
        if !(solver.lower_bound < solver.upper_bound) {
            return Err(CliError::Config(format!(
                "solver bracket must satisfy lower_bound < upper_bound, got [{}, {}]",
                solver.lower_bound, solver.upper_bound
            )));
        }
        self.greeks(None)?;
        Ok(())
    }

    /// Greek set to evaluate, the command line override taking precedence.
    pub fn greeks(&self, cli_override: Option<&str>) -> Result<GreekSet> {
        let spec = cli_override.unwrap_or(&self.default_greeks);
        Ok(spec.parse::<GreekSet>()?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
