//! Implied volatility from observed prices.
//!
//! Each element solves `price(σ) − target = 0` independently: a Newton
//! iteration from the initial guess first, then Brent's method on a fixed
//! volatility bracket. Elements that fail both stay absent; the rest resolve
//! normally.

use blackscholes_core::math::solvers::{ElementwiseSolver, SolverConfig};
use blackscholes_core::types::{Numeric, Quantity};

use super::BlackScholes;
use crate::params::{OptionParameters, OptionPoint};
use crate::valuation::ValuationError;

/// Tuning of the implied volatility solve.
///
/// # Examples
/// ```
/// use blackscholes_models::analytical::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert_eq!(config.initial_guess, 0.2);
/// assert_eq!((config.lower_bound, config.upper_bound), (1e-6, 10.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpliedVolConfig {
    /// Starting volatility of the Newton iteration.
    pub initial_guess: f64,
    /// Tolerance on the price residual and iteration cap, shared by Newton and Brent.
    pub solver: SolverConfig<f64>,
    /// Lower end of the Brent fallback bracket.
    pub lower_bound: f64,
    /// Upper end of the Brent fallback bracket.
    pub upper_bound: f64,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.2,
            solver: SolverConfig::default(),
            lower_bound: 1e-6,
            upper_bound: 10.0,
        }
    }
}

/// Elementwise implied volatility solver.
///
/// # Examples
/// ```
/// use blackscholes_models::analytical::ImpliedVolSolver;
/// use blackscholes_models::params::OptionParameters;
/// use blackscholes_core::types::Quantity;
///
/// let params = OptionParameters::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "C", 1240.0);
/// let vol = ImpliedVolSolver::default()
///     .solve_vol(&Quantity::from(36.0), &params)
///     .unwrap();
/// let vol = vol.value().unwrap();
/// assert!(vol > 0.15 && vol < 0.25);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
    solver: ElementwiseSolver<f64>,
}

impl Default for ImpliedVolSolver {
    fn default() -> Self {
        Self::new(ImpliedVolConfig::default())
    }
}

impl ImpliedVolSolver {
    /// Creates a solver with the given tuning.
    pub fn new(config: ImpliedVolConfig) -> Self {
        let solver = ElementwiseSolver::new(config.solver).with_bracket(config.lower_bound, config.upper_bound);
        Self { config, solver }
    }

    /// Returns the solver tuning.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Solves for the volatility reproducing `target` under `params`.
    ///
    /// The result has the broadcast shape of `target` and `params`. Elements
    /// whose target is absent, or whose solve fails, are absent; if the solver
    /// cannot run at all every element is absent.
    ///
    /// # Errors
    /// `ValuationError::Shape` if `target` and `params` do not broadcast.
    pub fn solve_vol(&self, target: &Quantity, params: &OptionParameters) -> Result<Quantity, ValuationError> {
        let shape = params.shape()?.broadcast(target.shape())?;
        let points: Vec<OptionPoint<f64>> = (0..shape.len()).map(|i| params.point(i)).collect();
        let targets: Vec<Option<f64>> = (0..shape.len()).map(|i| *target.at(i)).collect();

        let residual = |i: usize, vol: f64| match targets[i] {
            Some(price) => BlackScholes::new(points[i]).price(vol) - price,
            None => f64::NAN,
        };
        let guess = Numeric::filled(shape, self.config.initial_guess);

        let roots = match self.solver.solve_accepting(residual, &guess, |vol| vol > 0.0) {
            Ok(roots) => roots.into_options(),
            Err(err) => {
                tracing::warn!(error = %err, "implied volatility solver could not run; volatility left absent");
                return Ok(Quantity::absent(shape));
            }
        };

        for (i, (vol, price)) in roots.iter().zip(&targets).enumerate() {
            if let (None, Some(price)) = (vol, price) {
                tracing::warn!(index = i, target = *price, "implied volatility did not converge; element left absent");
            }
        }

        Ok(roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blackscholes_core::types::{Shape, ShapeError};

    fn scenario(spot: impl Into<Numeric<f64>>) -> OptionParameters {
        OptionParameters::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "C", spot)
    }

    #[test]
    fn test_scalar_scenario() {
        let params = scenario(1240.0);
        let vol = ImpliedVolSolver::default()
            .solve_vol(&Quantity::from(36.0), &params)
            .unwrap()
            .value()
            .unwrap();
        assert_relative_eq!(vol, 0.19605, epsilon = 1e-3);

        let repriced = BlackScholes::new(params.point(0)).price(vol);
        assert_relative_eq!(repriced, 36.0, epsilon = 1e-8);
    }

    #[test]
    fn test_vector_scenario() {
        let params = scenario(vec![1240.0, 1243.0]);
        let vol = ImpliedVolSolver::default()
            .solve_vol(&Quantity::from(vec![36.0, 70.0]), &params)
            .unwrap();
        assert_eq!(vol.shape(), Shape::Vector(2));
        assert!(vol.is_fully_present());
        assert!(vol.at(1).unwrap() > vol.at(0).unwrap());
    }

    #[test]
    fn test_unreachable_element_is_absent() {
        // A call can never be worth more than the spot.
        let params = scenario(1240.0);
        let vol = ImpliedVolSolver::default()
            .solve_vol(&Quantity::from(vec![36.0, 5000.0, 40.0]), &params)
            .unwrap();
        assert!(vol.at(0).is_some());
        assert!(vol.at(1).is_none());
        assert!(vol.at(2).is_some());
    }

    #[test]
    fn test_below_intrinsic_is_absent() {
        // Forward intrinsic is about 21.67.
        let vol = ImpliedVolSolver::default()
            .solve_vol(&Quantity::from(10.0), &scenario(1240.0))
            .unwrap();
        assert_eq!(vol, Quantity::Scalar(None));
    }

    #[test]
    fn test_absent_target_is_absent() {
        let vol = ImpliedVolSolver::default()
            .solve_vol(&Quantity::Vector(vec![None, Some(36.0)]), &scenario(1240.0))
            .unwrap();
        assert!(vol.at(0).is_none());
        assert!(vol.at(1).is_some());
    }

    #[test]
    fn test_invalid_bracket_gives_all_absent() {
        let solver = ImpliedVolSolver::new(ImpliedVolConfig {
            lower_bound: 1.0,
            upper_bound: 0.5,
            ..ImpliedVolConfig::default()
        });
        let vol = solver
            .solve_vol(&Quantity::from(vec![36.0, 40.0]), &scenario(1240.0))
            .unwrap();
        assert_eq!(vol, Quantity::Vector(vec![None, None]));
    }

    #[test]
    fn test_shape_mismatch() {
        let result = ImpliedVolSolver::default().solve_vol(
            &Quantity::from(vec![36.0, 40.0, 44.0]),
            &scenario(vec![1240.0, 1243.0]),
        );
        assert_eq!(
            result,
            Err(ValuationError::Shape(ShapeError::Mismatch { left: 2, right: 3 }))
        );
    }

    #[test]
    fn test_put_round_trip() {
        let params = OptionParameters::new(100.0, 0.75, 0.03, 0.01, "P", 92.0);
        let model = BlackScholes::new(params.point(0));
        let target = model.price(0.35);
        let vol = ImpliedVolSolver::default()
            .solve_vol(&Quantity::from(target), &params)
            .unwrap();
        assert_relative_eq!(vol.value().unwrap(), 0.35, epsilon = 1e-8);
    }
}
