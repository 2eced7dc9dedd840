//! Implied volatility command implementation

use blackscholes_core::types::Quantity;
use blackscholes_models::{GreekSet, ImpliedVolConfig};
use tracing::info;

use super::{parse_numeric, render, ContractArgs, OutputFormat};
use crate::Result;

/// Run the iv command
pub fn run(
    args: &ContractArgs,
    price: &str,
    greeks: GreekSet,
    solver: ImpliedVolConfig,
    format: OutputFormat,
) -> Result<String> {
    let price = Quantity::from(parse_numeric("price", price)?);
    info!(%price, initial_guess = solver.initial_guess, "solving implied volatility");

    let mut contract = args
        .contract()?
        .tracking(greeks)
        .with_solver(solver)
        .with_price(price);
    render(&contract.snapshot()?, format)
}
