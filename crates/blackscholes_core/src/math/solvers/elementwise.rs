//! Elementwise root finding over scalar-or-vector values.
//!
//! Each element of a [`Numeric`] is an independent one-dimensional problem.
//! Elements are first attempted with a finite-difference Newton iteration and,
//! when a bracket is configured, retried with Brent's method. A failure on one
//! element never affects the others.

use super::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
use crate::types::{Numeric, SolverError};
use num_traits::Float;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Per-element outcome of [`ElementwiseSolver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementwiseRoots<T> {
    /// Roots in the shape of the initial guess; NaN where solving failed.
    pub roots: Numeric<T>,
    /// `true` where the element did not converge.
    pub failed: Numeric<bool>,
}

impl<T: Float> ElementwiseRoots<T> {
    /// Number of elements that failed to converge.
    pub fn failures(&self) -> usize {
        self.failed.iter().filter(|f| **f).count()
    }

    /// Converts to explicit presence: failed elements become `None`.
    pub fn into_options(self) -> Numeric<Option<T>> {
        let failed = self.failed;
        match self.roots {
            Numeric::Scalar(x) => Numeric::Scalar((!*failed.at(0)).then_some(x)),
            Numeric::Vector(xs) => Numeric::Vector(
                xs.into_iter()
                    .enumerate()
                    .map(|(i, x)| (!*failed.at(i)).then_some(x))
                    .collect(),
            ),
        }
    }
}

/// Solves `f(i, x) = 0` independently for every element index `i`.
///
/// # Example
///
/// ```
/// use blackscholes_core::math::solvers::{ElementwiseSolver, SolverConfig};
/// use blackscholes_core::types::Numeric;
///
/// let solver = ElementwiseSolver::new(SolverConfig::default()).with_bracket(0.0, 10.0);
/// let guess = Numeric::Vector(vec![1.0_f64, 1.0, 1.0]);
///
/// // The middle target (x² = -1) has no real root.
/// let targets = [4.0, -1.0, 16.0];
/// let result = solver.solve(|i, x: f64| x * x - targets[i], &guess).unwrap();
///
/// assert_eq!(result.failures(), 1);
/// let roots = result.into_options();
/// assert!((roots.at(0).unwrap() - 2.0).abs() < 1e-8);
/// assert!(roots.at(1).is_none());
/// assert!((roots.at(2).unwrap() - 4.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct ElementwiseSolver<T: Float> {
    newton: NewtonRaphsonSolver<T>,
    brent: BrentSolver<T>,
    bracket: Option<(T, T)>,
}

impl<T: Float> ElementwiseSolver<T> {
    /// Newton-only solver; call [`with_bracket`](Self::with_bracket) to
    /// enable the Brent fallback.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self {
            newton: NewtonRaphsonSolver::new(config),
            brent: BrentSolver::new(config),
            bracket: None,
        }
    }

    /// Enables the Brent fallback on `[lower, upper]`.
    pub fn with_bracket(mut self, lower: T, upper: T) -> Self {
        self.bracket = Some((lower, upper));
        self
    }

    /// The configured fallback bracket, if any.
    pub fn bracket(&self) -> Option<(T, T)> {
        self.bracket
    }

    /// Solves one element: Newton from `x0`, then Brent on the bracket.
    ///
    /// A Newton root rejected by `accept` counts as a Newton failure.
    pub fn solve_one<F, A>(&self, f: F, x0: T, accept: A) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        A: Fn(T) -> bool,
    {
        let newton_err = match self.newton.find_root_fd(&f, x0) {
            Ok(x) if accept(x) => return Ok(x),
            Ok(x) => SolverError::NumericalInstability(format!(
                "Newton root {} outside admissible range",
                x.to_f64().unwrap_or(f64::NAN)
            )),
            Err(e) => e,
        };

        match self.bracket {
            Some((lower, upper)) => self.brent.find_root(&f, lower, upper),
            None => Err(newton_err),
        }
    }

    /// Solves every element of `initial_guess`'s shape.
    ///
    /// Per-element failures are reported in [`ElementwiseRoots::failed`].
    ///
    /// # Errors
    ///
    /// `SolverError::NumericalInstability` if the configured bracket is empty
    /// or not finite; no element is attempted in that case.
    pub fn solve<F>(&self, f: F, initial_guess: &Numeric<T>) -> Result<ElementwiseRoots<T>, SolverError>
    where
        T: Send + Sync,
        F: Fn(usize, T) -> T + Sync,
    {
        self.solve_accepting(f, initial_guess, |_| true)
    }

    /// Like [`solve`](Self::solve), with a predicate that Newton roots must satisfy.
    pub fn solve_accepting<F, A>(
        &self,
        f: F,
        initial_guess: &Numeric<T>,
        accept: A,
    ) -> Result<ElementwiseRoots<T>, SolverError>
    where
        T: Send + Sync,
        F: Fn(usize, T) -> T + Sync,
        A: Fn(T) -> bool + Sync,
    {
        if let Some((lower, upper)) = self.bracket {
            if !(lower < upper) || !lower.is_finite() || !upper.is_finite() {
                return Err(SolverError::NumericalInstability(format!(
                    "invalid bracket [{}, {}]",
                    lower.to_f64().unwrap_or(f64::NAN),
                    upper.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        let shape = initial_guess.shape();
        let solve_at = |i: usize| self.solve_one(|x| f(i, x), *initial_guess.at(i), &accept).ok();

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Option<T>> = (0..shape.len()).into_par_iter().map(solve_at).collect();
        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Option<T>> = (0..shape.len()).map(solve_at).collect();

        Ok(ElementwiseRoots {
            roots: Numeric::from_fn(shape, |i| outcomes[i].unwrap_or_else(T::nan)),
            failed: Numeric::from_fn(shape, |i| outcomes[i].is_none()),
        })
    }
}
