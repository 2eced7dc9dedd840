//! # blackscholes_models: Valuation Logic
//!
//! European option valuation under Black-Scholes, built on `blackscholes_core`.
//!
//! This crate provides:
//! - Contract parameters as scalars or vectors (`params`)
//! - Pricing, greeks and implied volatility (`analytical`)
//! - The lazy price/volatility state machine and the `Contract` façade (`valuation`)
//!
//! ## Usage
//!
//! ```rust
//! use blackscholes_models::valuation::Contract;
//!
//! // Price from volatility, elementwise over two spots.
//! let mut contract = Contract::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "C", vec![1240.0, 1243.0])
//!     .with_vol(0.2);
//! let price = contract.price().unwrap();
//! assert!(price.at(1).unwrap() > price.at(0).unwrap());
//!
//! // Implied volatility from a price.
//! contract.set_price(vec![36.0, 70.0]);
//! let vol = contract.vol().unwrap();
//! assert!(vol.is_fully_present());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialise parameters, greeks, configuration and snapshots
//! - `parallel`: Solve implied volatility vector elements on the rayon pool

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod params;
pub mod valuation;

pub use analytical::{Greek, GreekSet, ImpliedVolConfig};
pub use params::{OptionParameters, OptionType};
pub use valuation::{Contract, ContractSnapshot, ValuationError};
