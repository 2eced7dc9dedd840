//! Core numeric and error types.
//!
//! This module provides:
//! - `numeric`: [`Numeric`] scalar-or-vector values, [`Shape`] broadcasting and the
//!   possibly-absent [`Quantity`]
//! - `error`: [`SolverError`] and [`ShapeError`]

pub mod error;
pub mod numeric;

pub use error::{ShapeError, SolverError};
pub use numeric::{Numeric, Quantity, Shape};
