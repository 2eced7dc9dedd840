//! Black-Scholes CLI - Command Line Option Valuation
//!
//! # Commands
//!
//! - `blackscholes price --strike K --tte T --spot S --vol v` - Price from volatility
//! - `blackscholes iv --strike K --tte T --spot S --price p` - Implied volatility from price
//! - `blackscholes recalc` - Re-valuation walkthrough with price or volatility held fixed
//! - `blackscholes check` - Print the resolved configuration
//!
//! Numeric arguments take a single value or a comma-separated list; lists
//! are valued element by element.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod settings;

pub use error::{CliError, Result};

use commands::{ContractArgs, OutputFormat};
use settings::{CliConfig, LogLevel};

/// Black-Scholes European option valuation
#[derive(Parser)]
#[command(name = "blackscholes")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "blackscholes.toml")]
    config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Greeks to evaluate: `all`, `none` or a comma-separated list
    #[arg(short, long, global = true)]
    greeks: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price options from volatility
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        /// Volatility
        #[arg(long, allow_hyphen_values = true)]
        vol: String,
    },

    /// Solve implied volatility from option prices
    Iv {
        #[command(flatten)]
        contract: ContractArgs,

        /// Observed option price
        #[arg(short, long, allow_hyphen_values = true)]
        price: String,
    },

    /// Walk a contract through spot and expiry edits with price or volatility held fixed
    Recalc,

    /// Print the resolved configuration
    Check,
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    init_tracing(if cli.verbose { LogLevel::Debug } else { config.log_level });
    debug!(?config, "configuration loaded");

    let greeks = config.greeks(cli.greeks.as_deref()).context("invalid --greeks")?;

    let output = match &cli.command {
        Commands::Price { contract, vol } => commands::price::run(contract, vol, greeks, cli.format),
        Commands::Iv { contract, price } => {
            commands::iv::run(contract, price, greeks, config.solver, cli.format)
        }
        Commands::Recalc => commands::recalc::run(greeks, config.solver, cli.format),
        Commands::Check => commands::check::run(&config, &cli.config),
    }?;

    println!("{output}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_price_command() {
        let cli = Cli::parse_from([
            "blackscholes", "--format", "json", "price", "-k", "1220", "-t", "0.06", "-s", "1240,1243",
            "--vol", "0.2", "--greeks", "delta",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.greeks.as_deref(), Some("delta"));
        match cli.command {
            Commands::Price { contract, vol } => {
                assert_eq!(contract.spot, "1240,1243");
                assert_eq!(contract.rate, "0");
                assert_eq!(contract.option_type, "C");
                assert_eq!(vol, "0.2");
            }
            _ => panic!("expected price command"),
        }
    }

    #[test]
    fn test_negative_rate_is_a_value() {
        let cli = Cli::parse_from([
            "blackscholes", "iv", "-k", "100", "-t", "1", "-s", "100", "-r", "-0.01", "-p", "8",
        ]);
        match cli.command {
            Commands::Iv { contract, price } => {
                assert_eq!(contract.rate, "-0.01");
                assert_eq!(price, "8");
            }
            _ => panic!("expected iv command"),
        }
    }
}
