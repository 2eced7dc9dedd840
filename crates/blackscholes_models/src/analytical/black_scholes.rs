//! Black-Scholes pricing for European options.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Volatility is an argument of every formula rather than a model field, so
//! the same model instance can be priced at trial volatilities while solving
//! for implied volatility.
//!
//! Degenerate inputs (zero or negative expiry, zero volatility) are not
//! special-cased: they produce non-finite values that propagate to the caller.

use std::collections::BTreeMap;

use blackscholes_core::math::distributions::norm_cdf;
use blackscholes_core::types::{Numeric, Quantity, Shape, ShapeError};
use num_traits::Float;

use super::greeks::{Greek, GreekSet};
use crate::params::{OptionParameters, OptionPoint};

/// Black-Scholes model for one evaluation element.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use blackscholes_models::analytical::BlackScholes;
/// use blackscholes_models::params::{OptionPoint, OptionType};
///
/// let point = OptionPoint {
///     strike: 100.0_f64,
///     time_to_expiry: 1.0,
///     rate: 0.05,
///     dividend_yield: 0.0,
///     spot: 100.0,
///     option_type: OptionType::Call,
/// };
/// let bs = BlackScholes::new(point);
/// let call_price = bs.price_call(0.2);
/// let put_price = bs.price_put(0.2);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    pub(crate) point: OptionPoint<T>,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model for the given inputs.
    pub fn new(point: OptionPoint<T>) -> Self {
        Self { point }
    }

    /// Returns the model inputs.
    #[inline]
    pub fn point(&self) -> &OptionPoint<T> {
        &self.point
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self, vol: T) -> T {
        let p = &self.point;
        let half = T::from(0.5).unwrap();
        let log_moneyness = (p.spot / p.strike).ln();
        let drift = (p.rate + half * vol * vol) * p.time_to_expiry;
        (log_moneyness + drift) / (vol * p.time_to_expiry.sqrt())
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, vol: T) -> T {
        self.d1(vol) - vol * self.point.time_to_expiry.sqrt()
    }

    /// Computes `(d1, d2)` together.
    #[inline]
    pub fn d1_d2(&self, vol: T) -> (T, T) {
        let d1 = self.d1(vol);
        (d1, d1 - vol * self.point.time_to_expiry.sqrt())
    }

    /// e^(-rT)
    #[inline]
    pub(crate) fn discount(&self) -> T {
        (-self.point.rate * self.point.time_to_expiry).exp()
    }

    /// e^(-qT)
    #[inline]
    pub(crate) fn dividend_discount(&self) -> T {
        (-self.point.dividend_yield * self.point.time_to_expiry).exp()
    }

    /// Computes the European call price.
    ///
    /// C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
    #[inline]
    pub fn price_call(&self, vol: T) -> T {
        let (d1, d2) = self.d1_d2(vol);
        let p = &self.point;
        norm_cdf(d1) * p.spot * self.dividend_discount() - norm_cdf(d2) * p.strike * self.discount()
    }

    /// Computes the European put price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
    #[inline]
    pub fn price_put(&self, vol: T) -> T {
        let (d1, d2) = self.d1_d2(vol);
        let p = &self.point;
        norm_cdf(-d2) * p.strike * self.discount() - norm_cdf(-d1) * p.spot * self.dividend_discount()
    }

    /// Prices the option on its own side: call or put per the option type.
    #[inline]
    pub fn price(&self, vol: T) -> T {
        if self.point.option_type.is_call() {
            self.price_call(vol)
        } else {
            self.price_put(vol)
        }
    }
}

/// Elementwise results of pricing a parameter set at a volatility.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Option price per element.
    pub price: Quantity,
    /// d1 per element.
    pub d1: Quantity,
    /// d2 per element.
    pub d2: Quantity,
    /// Every requested greek, per element.
    pub greeks: BTreeMap<Greek, Quantity>,
}

/// Prices every element of `params` at `vol` and evaluates the requested greeks.
///
/// Elements where `vol` is absent are absent in every output.
///
/// # Errors
/// `ShapeError::Mismatch` if the parameters and the volatility do not broadcast.
///
/// # Examples
/// ```
/// use blackscholes_models::analytical::{evaluate, Greek, GreekSet};
/// use blackscholes_models::params::OptionParameters;
/// use blackscholes_core::types::Quantity;
///
/// let params = OptionParameters::new(100.0, 1.0, 0.05, 0.0, "C", vec![90.0, 110.0]);
/// let vol = Quantity::Vector(vec![Some(0.2), None]);
/// let eval = evaluate(&params, &vol, GreekSet::from_iter([Greek::Delta])).unwrap();
///
/// assert!(eval.price.at(0).unwrap() > 0.0);
/// assert!(eval.price.at(1).is_none());
/// assert!(eval.greeks[&Greek::Delta].at(1).is_none());
/// assert!(!eval.greeks.contains_key(&Greek::Gamma));
/// ```
pub fn evaluate(params: &OptionParameters, vol: &Quantity, greeks: GreekSet) -> Result<Evaluation, ShapeError> {
    let shape = params.shape()?.broadcast(vol.shape())?;
    let n = shape.len();

    let mut price = Vec::with_capacity(n);
    let mut d1s = Vec::with_capacity(n);
    let mut d2s = Vec::with_capacity(n);
    let mut greek_values: Vec<(Greek, Vec<Option<f64>>)> =
        greeks.iter().map(|g| (g, Vec::with_capacity(n))).collect();

    for i in 0..n {
        match *vol.at(i) {
            Some(v) => {
                let model = BlackScholes::new(params.point(i));
                let (d1, d2) = model.d1_d2(v);
                price.push(Some(model.price(v)));
                d1s.push(Some(d1));
                d2s.push(Some(d2));
                for (greek, values) in greek_values.iter_mut() {
                    values.push(Some(model.greek(*greek, v, d1, d2)));
                }
            }
            None => {
                price.push(None);
                d1s.push(None);
                d2s.push(None);
                for (_, values) in greek_values.iter_mut() {
                    values.push(None);
                }
            }
        }
    }

    Ok(Evaluation {
        price: into_shape(shape, price),
        d1: into_shape(shape, d1s),
        d2: into_shape(shape, d2s),
        greeks: greek_values
            .into_iter()
            .map(|(greek, values)| (greek, into_shape(shape, values)))
            .collect(),
    })
}

/// Price only, elementwise.
///
/// # Errors
/// `ShapeError::Mismatch` if the parameters and the volatility do not broadcast.
pub fn price(params: &OptionParameters, vol: &Quantity) -> Result<Quantity, ShapeError> {
    let shape = params.shape()?.broadcast(vol.shape())?;
    Ok(Numeric::from_fn(shape, |i| {
        vol.at(i).map(|v| BlackScholes::new(params.point(i)).price(v))
    }))
}

fn into_shape(shape: Shape, values: Vec<Option<f64>>) -> Quantity {
    match shape {
        Shape::Scalar => Numeric::Scalar(values.into_iter().next().flatten()),
        Shape::Vector(_) => Numeric::Vector(values),
    }
}
