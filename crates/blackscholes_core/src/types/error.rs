//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from root-finding solvers
//! - `ShapeError`: Errors from broadcasting scalar-or-vector values

use thiserror::Error;

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative too small for Newton-Raphson
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use blackscholes_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Broadcasting errors between scalar-or-vector values.
///
/// # Examples
/// ```
/// use blackscholes_core::types::ShapeError;
///
/// let err = ShapeError::Mismatch { left: 2, right: 3 };
/// assert_eq!(format!("{}", err), "Shape mismatch: vector[2] vs vector[3]");
/// ```
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// Two vectors of different lengths were combined.
    #[error("Shape mismatch: vector[{left}] vs vector[{right}]")]
    Mismatch {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_error_display() {
        assert_eq!(
            SolverError::MaxIterationsExceeded { iterations: 7 }.to_string(),
            "Failed to converge after 7 iterations"
        );
        assert_eq!(
            SolverError::DerivativeNearZero { x: 0.5 }.to_string(),
            "Derivative near zero at x = 0.5"
        );
        assert_eq!(
            SolverError::NoBracket { a: 1.0, b: 2.0 }.to_string(),
            "No bracket: f(1) and f(2) have same sign"
        );
        assert_eq!(
            SolverError::NumericalInstability("overflow".into()).to_string(),
            "Numerical instability: overflow"
        );
    }

    #[test]
    fn test_errors_are_std_errors() {
        let _: &dyn std::error::Error = &SolverError::NoBracket { a: 0.0, b: 1.0 };
        let _: &dyn std::error::Error = &ShapeError::Mismatch { left: 1, right: 2 };
    }
}
