//! Mathematical primitives.
//!
//! - `distributions`: standard normal CDF and PDF
//! - `solvers`: Newton-Raphson, Brent and the elementwise root-finding driver

pub mod distributions;
pub mod solvers;
