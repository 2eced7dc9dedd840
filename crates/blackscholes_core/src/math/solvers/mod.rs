//! Root-finding solvers.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: quadratic convergence, with an explicit or a
//!   finite-difference derivative
//! - [`BrentSolver`]: robust bracketing method without derivative requirement
//! - [`ElementwiseSolver`]: drives the two above over every element of a
//!   [`Numeric`](crate::types::Numeric), Newton first and Brent as fallback
//!
//! ## Configuration
//!
//! All solvers use [`SolverConfig`]:
//! - `tolerance`: Convergence tolerance (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use blackscholes_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
//!
//! let f = |x: f64| x * x - 2.0;
//!
//! let newton = NewtonRaphsonSolver::new(SolverConfig::default());
//! let r1 = newton.find_root_fd(f, 1.0).unwrap();
//!
//! let brent = BrentSolver::new(SolverConfig::default());
//! let r2 = brent.find_root(f, 0.0, 2.0).unwrap();
//!
//! assert!((r1 - r2).abs() < 1e-9);
//! ```

mod brent;
mod config;
mod elementwise;
mod newton_raphson;

pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use elementwise::{ElementwiseRoots, ElementwiseSolver};
pub use newton_raphson::NewtonRaphsonSolver;
