//! Resolved view of a contract for display and serialisation.

use std::collections::BTreeMap;
use std::fmt;

use blackscholes_core::types::{Numeric, Quantity};

use crate::analytical::Greek;
use crate::params::OptionType;

/// Every base field and tracked greek of a resolved contract.
///
/// `Display` renders the compact one-line form
/// `BlackScholes(price:..,vol:..,spot:..,strike:..,tte:..,ir:..,div:..,<greeks>)`
/// with greeks in display order and absent elements as `nan`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContractSnapshot {
    /// Option side.
    pub option_type: OptionType,
    /// Option price.
    pub price: Quantity,
    /// Volatility.
    pub vol: Quantity,
    /// Spot price.
    pub spot: Numeric<f64>,
    /// Strike price.
    pub strike: Numeric<f64>,
    /// Time to expiry in years.
    pub time_to_expiry: Numeric<f64>,
    /// Risk-free rate.
    pub rate: Numeric<f64>,
    /// Dividend yield.
    pub dividend_yield: Numeric<f64>,
    /// d1 term.
    pub d1: Quantity,
    /// d2 term.
    pub d2: Quantity,
    /// Tracked greeks.
    pub greeks: BTreeMap<Greek, Quantity>,
}

impl fmt::Display for ContractSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BlackScholes(price:{},vol:{},spot:{},strike:{},tte:{},ir:{},div:{}",
            self.price, self.vol, self.spot, self.strike, self.time_to_expiry, self.rate, self.dividend_yield
        )?;
        for (greek, value) in &self.greeks {
            write!(f, ",{}:{}", greek, value)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ContractSnapshot {
        let mut greeks = BTreeMap::new();
        greeks.insert(Greek::Gamma, Quantity::Vector(vec![Some(0.5), None]));
        greeks.insert(Greek::Delta, Quantity::Vector(vec![Some(0.25), Some(0.75)]));
        ContractSnapshot {
            option_type: OptionType::Call,
            price: Quantity::Vector(vec![Some(36.0), None]),
            vol: Quantity::from(0.2),
            spot: Numeric::Vector(vec![1240.0, 1243.0]),
            strike: Numeric::Scalar(1220.0),
            time_to_expiry: Numeric::Scalar(0.5),
            rate: Numeric::Scalar(0.02),
            dividend_yield: Numeric::Scalar(0.0),
            d1: Quantity::Vector(vec![Some(0.1), None]),
            d2: Quantity::Vector(vec![Some(0.05), None]),
            greeks,
        }
    }

    #[test]
    fn test_display_layout() {
        assert_eq!(
            snapshot().to_string(),
            "BlackScholes(price:[36, nan],vol:0.2,spot:[1240, 1243],strike:1220,tte:0.5,ir:0.02,div:0,\
             delta:[0.25, 0.75],gamma:[0.5, nan])"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_uses_null_for_absent() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["price"], serde_json::json!([36.0, null]));
        assert_eq!(json["greeks"]["delta"], serde_json::json!([0.25, 0.75]));
        assert_eq!(json["option_type"], serde_json::json!("Call"));
    }
}
