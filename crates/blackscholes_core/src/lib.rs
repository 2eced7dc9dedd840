//! # blackscholes_core: Numeric Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! blackscholes_core is the bottom layer of the valuation workspace, providing:
//! - Scalar-or-vector values with broadcasting (`types::numeric`)
//! - Standard normal distribution functions (`math::distributions`)
//! - Root-finding solvers, including the elementwise driver used for
//!   implied volatility (`math::solvers`)
//! - Error types: `SolverError`, `ShapeError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//! - rayon: Parallel elementwise solving (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use blackscholes_core::math::distributions::norm_cdf;
//! use blackscholes_core::math::solvers::{ElementwiseSolver, SolverConfig};
//! use blackscholes_core::types::Numeric;
//!
//! // Vector of targets solved independently: x² = 2, x² = 9
//! let targets = [2.0_f64, 9.0];
//! let solver = ElementwiseSolver::new(SolverConfig::default());
//! let guess = Numeric::Vector(vec![1.0, 1.0]);
//! let result = solver.solve(|i, x: f64| x * x - targets[i], &guess).unwrap();
//! assert!((*result.roots.at(1) - 3.0).abs() < 1e-8);
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `Numeric`, `Shape` and solver configuration
//! - `parallel`: Solve vector elements on the rayon thread pool

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
