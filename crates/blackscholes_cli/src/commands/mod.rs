//! CLI command implementations
//!
//! Each submodule implements a specific CLI command; this module holds the
//! argument parsing and output rendering they share.

pub mod check;
pub mod iv;
pub mod price;
pub mod recalc;

use blackscholes_core::types::Numeric;
use blackscholes_models::{Contract, ContractSnapshot};
use clap::{Args, ValueEnum};

use crate::{CliError, Result};

/// Output formats for valuation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Contract terms shared by `price` and `iv`.
///
/// Every numeric argument accepts a single value or a comma-separated list.
#[derive(Debug, Clone, Args)]
pub struct ContractArgs {
    /// Strike price
    #[arg(short = 'k', long, allow_hyphen_values = true)]
    pub strike: String,

    /// Time to expiry in years
    #[arg(short = 't', long, allow_hyphen_values = true)]
    pub tte: String,

    /// Continuously compounded risk-free rate
    #[arg(short = 'r', long, default_value = "0", allow_hyphen_values = true)]
    pub rate: String,

    /// Continuous dividend yield
    #[arg(short = 'q', long, default_value = "0", allow_hyphen_values = true)]
    pub div: String,

    /// Option type: C/CALL for a call, anything else prices a put
    #[arg(short = 'o', long = "option-type", default_value = "C")]
    pub option_type: String,

    /// Spot price
    #[arg(short = 's', long, allow_hyphen_values = true)]
    pub spot: String,
}

impl ContractArgs {
    /// Builds a contract from the parsed terms, without price or volatility.
    pub fn contract(&self) -> Result<Contract> {
        Ok(Contract::new(
            parse_numeric("strike", &self.strike)?,
            parse_numeric("tte", &self.tte)?,
            parse_numeric("rate", &self.rate)?,
            parse_numeric("div", &self.div)?,
            &self.option_type,
            parse_numeric("spot", &self.spot)?,
        ))
    }
}

/// Parses `"1.5"` into a scalar and `"1.5,2.5"` into a vector.
pub fn parse_numeric(name: &str, input: &str) -> Result<Numeric<f64>> {
    let invalid = |detail: String| CliError::InvalidArgument(format!("{name}: {detail}"));

    let values = input
        .split(',')
        .map(|token| {
            let token = token.trim();
            token
                .parse::<f64>()
                .map_err(|_| invalid(format!("'{token}' is not a number")))
        })
        .collect::<Result<Vec<f64>>>()?;

    match values.as_slice() {
        [single] if !input.contains(',') => Ok(Numeric::Scalar(*single)),
        _ => Ok(Numeric::Vector(values)),
    }
}

/// Renders a snapshot in the requested format.
pub fn render(snapshot: &ContractSnapshot, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
        OutputFormat::Table => Ok(render_table(snapshot)),
    }
}

fn render_table(snapshot: &ContractSnapshot) -> String {
    let mut rows: Vec<(String, String)> = vec![
        ("type".into(), snapshot.option_type.to_string()),
        ("price".into(), snapshot.price.to_string()),
        ("vol".into(), snapshot.vol.to_string()),
        ("spot".into(), snapshot.spot.to_string()),
        ("strike".into(), snapshot.strike.to_string()),
        ("tte".into(), snapshot.time_to_expiry.to_string()),
        ("ir".into(), snapshot.rate.to_string()),
        ("div".into(), snapshot.dividend_yield.to_string()),
        ("d1".into(), snapshot.d1.to_string()),
        ("d2".into(), snapshot.d2.to_string()),
    ];
    rows.extend(
        snapshot
            .greeks
            .iter()
            .map(|(greek, value)| (greek.to_string(), value.to_string())),
    );

    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{left}{}{mid}{}{right}",
            "─".repeat(key_width + 2),
            "─".repeat(value_width + 2)
        )
    };

    let mut out = vec![rule("┌", "┬", "┐")];
    for (key, value) in &rows {
        out.push(format!("│ {key:<key_width$} │ {value:<value_width$} │"));
    }
    out.push(rule("└", "┴", "┘"));
    out.join("\n")
}
