//! CLI error types.

use blackscholes_models::ValuationError;
use thiserror::Error;

/// Errors raised while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Valuation(#[from] ValuationError),

    #[error("JSON serialisation failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<::config::ConfigError> for CliError {
    fn from(err: ::config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for CliError {
    fn from(err: toml::ser::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

/// Result alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use blackscholes_models::Greek;

    #[test]
    fn test_messages() {
        let err = CliError::InvalidArgument("spot: 'abc'".to_string());
        assert_eq!(err.to_string(), "Invalid argument: spot: 'abc'");

        let err = CliError::from(ValuationError::GreekNotTracked(Greek::Vega));
        assert_eq!(err.to_string(), "Greek not tracked by this contract: vega");
    }
}
