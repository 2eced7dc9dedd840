//! Contract parameters.
//!
//! [`OptionParameters`] holds the market and contract inputs of a European
//! option as scalar-or-vector values. [`OptionPoint`] is the per-element
//! scalar view the pricing formulas work on.

use std::fmt;

use blackscholes_core::types::{Numeric, Shape, ShapeError};
use num_traits::Float;

/// Option side.
///
/// # Examples
/// ```
/// use blackscholes_models::params::OptionType;
///
/// assert_eq!(OptionType::from_token("c"), OptionType::Call);
/// assert_eq!(OptionType::from_token("Call"), OptionType::Call);
/// assert_eq!(OptionType::from_token("P"), OptionType::Put);
/// // Unrecognised tokens mean put.
/// assert_eq!(OptionType::from_token("straddle"), OptionType::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Parses a side token: `"C"` or `"CALL"` (any case) is a call, anything
    /// else is a put.
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if token.eq_ignore_ascii_case("C") || token.eq_ignore_ascii_case("CALL") {
            OptionType::Call
        } else {
            if !token.eq_ignore_ascii_case("P") && !token.eq_ignore_ascii_case("PUT") {
                tracing::debug!(token, "unrecognised option type token, treating as put");
            }
            OptionType::Put
        }
    }

    /// Returns true for a call.
    #[inline]
    pub fn is_call(self) -> bool {
        matches!(self, OptionType::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "C"),
            OptionType::Put => write!(f, "P"),
        }
    }
}

/// Scalar inputs of a single evaluation element.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionPoint<T: Float> {
    /// Strike price (K)
    pub strike: T,
    /// Time to expiry in years (T)
    pub time_to_expiry: T,
    /// Continuously compounded risk-free rate (r)
    pub rate: T,
    /// Continuous dividend yield (q)
    pub dividend_yield: T,
    /// Spot price (S)
    pub spot: T,
    /// Option side
    pub option_type: OptionType,
}

/// Contract and market inputs, each a scalar or a vector.
///
/// No range validation is applied: negative expiries or zero strikes are
/// accepted and surface as non-finite results downstream.
///
/// # Examples
/// ```
/// use blackscholes_models::params::{OptionParameters, OptionType};
/// use blackscholes_core::types::Shape;
///
/// let params = OptionParameters::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "C", vec![1240.0, 1243.0]);
/// assert_eq!(params.option_type(), OptionType::Call);
/// assert_eq!(params.shape().unwrap(), Shape::Vector(2));
/// assert_eq!(params.point(1).spot, 1243.0);
/// assert_eq!(params.point(1).strike, 1220.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionParameters {
    strike: Numeric<f64>,
    time_to_expiry: Numeric<f64>,
    rate: Numeric<f64>,
    dividend_yield: Numeric<f64>,
    spot: Numeric<f64>,
    option_type: OptionType,
}

impl OptionParameters {
    /// Creates a parameter set. `option_type` is parsed with
    /// [`OptionType::from_token`].
    pub fn new(
        strike: impl Into<Numeric<f64>>,
        time_to_expiry: impl Into<Numeric<f64>>,
        rate: impl Into<Numeric<f64>>,
        dividend_yield: impl Into<Numeric<f64>>,
        option_type: &str,
        spot: impl Into<Numeric<f64>>,
    ) -> Self {
        Self {
            strike: strike.into(),
            time_to_expiry: time_to_expiry.into(),
            rate: rate.into(),
            dividend_yield: dividend_yield.into(),
            spot: spot.into(),
            option_type: OptionType::from_token(option_type),
        }
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> &Numeric<f64> {
        &self.strike
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn time_to_expiry(&self) -> &Numeric<f64> {
        &self.time_to_expiry
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> &Numeric<f64> {
        &self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> &Numeric<f64> {
        &self.dividend_yield
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> &Numeric<f64> {
        &self.spot
    }

    /// Returns the option side.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns true for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        self.option_type.is_call()
    }

    /// Replaces the strike.
    pub fn set_strike(&mut self, value: impl Into<Numeric<f64>>) {
        self.strike = value.into();
    }

    /// Replaces the time to expiry.
    pub fn set_time_to_expiry(&mut self, value: impl Into<Numeric<f64>>) {
        self.time_to_expiry = value.into();
    }

    /// Replaces the risk-free rate.
    pub fn set_rate(&mut self, value: impl Into<Numeric<f64>>) {
        self.rate = value.into();
    }

    /// Replaces the dividend yield.
    pub fn set_dividend_yield(&mut self, value: impl Into<Numeric<f64>>) {
        self.dividend_yield = value.into();
    }

    /// Replaces the spot price.
    pub fn set_spot(&mut self, value: impl Into<Numeric<f64>>) {
        self.spot = value.into();
    }

    /// Replaces the option side.
    pub fn set_option_type(&mut self, option_type: OptionType) {
        self.option_type = option_type;
    }

    /// Broadcast shape of all numeric fields.
    ///
    /// # Errors
    /// `ShapeError::Mismatch` if two vector fields differ in length.
    pub fn shape(&self) -> Result<Shape, ShapeError> {
        Shape::broadcast_all([
            self.strike.shape(),
            self.time_to_expiry.shape(),
            self.rate.shape(),
            self.dividend_yield.shape(),
            self.spot.shape(),
        ])
    }

    /// Scalar view of element `index` under broadcasting.
    ///
    /// # Panics
    /// Panics if `index` is out of range for a vector field; index only
    /// within [`shape`](Self::shape).
    pub fn point(&self, index: usize) -> OptionPoint<f64> {
        OptionPoint {
            strike: *self.strike.at(index),
            time_to_expiry: *self.time_to_expiry.at(index),
            rate: *self.rate.at(index),
            dividend_yield: *self.dividend_yield.at(index),
            spot: *self.spot.at(index),
            option_type: self.option_type,
        }
    }
}
