//! Error types for contract valuation.

use blackscholes_core::types::ShapeError;
use thiserror::Error;

use crate::analytical::Greek;

/// Valuation errors.
///
/// Numerical failures never appear here: an element that cannot be resolved
/// is reported as absent instead. These variants are caller errors.
///
/// # Examples
/// ```
/// use blackscholes_models::analytical::Greek;
/// use blackscholes_models::valuation::ValuationError;
///
/// let err = ValuationError::GreekNotTracked(Greek::Vomma);
/// assert_eq!(err.to_string(), "Greek not tracked by this contract: vomma");
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValuationError {
    /// Parameters, price or volatility have incompatible vector lengths.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The requested greek is outside the contract's tracked set.
    #[error("Greek not tracked by this contract: {0}")]
    GreekNotTracked(Greek),

    /// A greek name did not match any supported greek.
    #[error("Unknown greek: {0}")]
    UnknownGreek(String),
}
