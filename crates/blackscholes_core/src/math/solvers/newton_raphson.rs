//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses Newton's method `x_{n+1} = x_n - f(x_n) / f'(x_n)`. The derivative is
/// either supplied ([`find_root`](Self::find_root)) or estimated by central
/// differences ([`find_root_fd`](Self::find_root_fd)).
///
/// Fails when the derivative vanishes, the iterate leaves the finite range,
/// or the iteration cap is reached.
///
/// # Example
///
/// ```
/// use blackscholes_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let root = solver.find_root(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new Newton-Raphson solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` using the explicit derivative `f_prime`.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    /// * `Err(SolverError::NumericalInstability)` - Iterate became non-finite
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.iterate(&f, |x, _| f_prime(x), x0)
    }

    /// Find a root of `f` with a central-difference derivative.
    ///
    /// The bump is `ε^(1/3)·max(|x|, 1)`, the usual balance between
    /// truncation and rounding error for a central difference.
    ///
    /// # Example
    ///
    /// ```
    /// use blackscholes_core::math::solvers::NewtonRaphsonSolver;
    ///
    /// let solver = NewtonRaphsonSolver::<f64>::with_defaults();
    /// let root = solver.find_root_fd(|x| x.exp() - 2.0, 0.5).unwrap();
    /// assert!((root - 2.0_f64.ln()).abs() < 1e-9);
    /// ```
    pub fn find_root_fd<F>(&self, f: F, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let step_scale = T::epsilon().cbrt();
        let two = T::from(2.0).unwrap();
        self.iterate(
            &f,
            |x, f| {
                let h = step_scale * x.abs().max(T::one());
                (f(x + h) - f(x - h)) / (two * h)
            },
            x0,
        )
    }

    fn iterate<F, D>(&self, f: &F, derivative: D, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        D: Fn(T, &F) -> T,
    {
        let mut x = x0;
        let epsilon = T::from(1e-30).unwrap();

        for _ in 0..self.config.max_iterations {
            let f_val = f(x);
            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let slope = derivative(x, f);
            if !(slope.abs() >= epsilon) {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            x = x - f_val / slope;

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
