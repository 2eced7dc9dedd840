//! Analytical Black-Scholes formulas.
//!
//! This module provides:
//! - [`BlackScholes`]: d1/d2 and call/put prices for one element
//! - [`Greek`] / [`GreekSet`]: the ten closed-form greeks and their selection
//! - [`evaluate`] / [`price`]: elementwise evaluation over [`OptionParameters`](crate::params::OptionParameters)
//! - [`ImpliedVolSolver`]: volatility from observed prices
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the per-element formulas
//! - **Volatility as an argument**, so trial volatilities need no new model
//! - **No special-casing** of degenerate inputs: non-finite values propagate

pub mod black_scholes;
pub mod greeks;
pub mod implied_vol;

pub use black_scholes::{evaluate, price, BlackScholes, Evaluation};
pub use greeks::{Greek, GreekSet};
pub use implied_vol::{ImpliedVolConfig, ImpliedVolSolver};
