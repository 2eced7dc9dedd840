//! Price command implementation
//!
//! Prices options from volatility.

use blackscholes_core::types::Quantity;
use blackscholes_models::GreekSet;
use tracing::info;

use super::{parse_numeric, render, ContractArgs, OutputFormat};
use crate::Result;

/// Run the price command
pub fn run(args: &ContractArgs, vol: &str, greeks: GreekSet, format: OutputFormat) -> Result<String> {
    let vol = Quantity::from(parse_numeric("vol", vol)?);
    info!(%vol, %greeks, "pricing from volatility");

    let mut contract = args.contract()?.tracking(greeks).with_vol(vol);
    render(&contract.snapshot()?, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn args(spot: &str) -> ContractArgs {
        ContractArgs {
            strike: "1220".into(),
            tte: (22.0_f64 / 365.0).to_string(),
            rate: "0.022719".into(),
            div: "0".into(),
            option_type: "C".into(),
            spot: spot.into(),
        }
    }

    #[test]
    fn test_scalar_price() {
        let out = run(&args("1240"), "0.2", GreekSet::all(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_relative_eq!(value["price"].as_f64().unwrap(), 36.445, epsilon = 1e-2);
        assert_eq!(value["greeks"].as_object().unwrap().len(), 10);
    }

    #[test]
    fn test_vector_price() {
        let out = run(&args("1240,1243"), "0.2,0.5", GreekSet::none(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["price"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let result = run(&args("1240,1243"), "0.2,0.3,0.4", GreekSet::none(), OutputFormat::Table);
        assert!(result.is_err());
    }
}
