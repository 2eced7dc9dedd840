//! Recalc command implementation
//!
//! Walks one contract through a sequence of edits, holding volatility or price
//! fixed at each step, and prints the resolved state after every step.

use blackscholes_models::{Contract, GreekSet, ImpliedVolConfig};
use tracing::info;

use super::{render, OutputFormat};
use crate::Result;

/// Run the recalc command
pub fn run(greeks: GreekSet, solver: ImpliedVolConfig, format: OutputFormat) -> Result<String> {
    let mut contract = Contract::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "C", 1240.0)
        .tracking(greeks)
        .with_solver(solver)
        .with_vol(0.2);

    let mut sections = Vec::new();
    let mut step = |label: &str, contract: &mut Contract| -> Result<()> {
        info!(step = label, "recalculating");
        sections.push(format!("== {label}\n{}", render(&contract.snapshot()?, format)?));
        Ok(())
    };

    step("vol 0.2, spot 1240", &mut contract)?;

    contract.holding_vol_fixed().set_spot(1250.0);
    step("vol fixed, spot -> 1250", &mut contract)?;

    contract.holding_price_fixed().set_time_to_expiry(0.01);
    step("price fixed, tte -> 0.01", &mut contract)?;

    contract.holding_vol_fixed().set_spot(vec![1250.0, 1260.0]);
    step("vol fixed, spot -> [1250, 1260]", &mut contract)?;

    contract.holding_price_fixed().set_spot(vec![1220.0, 1230.0]);
    step("price fixed, spot -> [1220, 1230]", &mut contract)?;

    Ok(sections.join("\n\n"))
}
