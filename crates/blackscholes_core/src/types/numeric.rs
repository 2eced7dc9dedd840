//! Scalar-or-vector numeric values with elementwise broadcasting.
//!
//! Every quantity in the valuation engine (strike, spot, price, vol, greeks)
//! is either a single number or a vector of numbers evaluated elementwise.
//! [`Numeric<T>`] carries that distinction explicitly and [`Shape`] applies
//! the broadcasting rule: a scalar pairs with anything, two vectors pair only
//! when their lengths agree.
//!
//! [`Quantity`] is the "possibly absent" form used for price and volatility:
//! absence is `None` per element, so it never collides with a NaN produced
//! by degenerate inputs.

use std::fmt;

use super::error::ShapeError;

/// Evaluation shape of a [`Numeric`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// A single value.
    Scalar,
    /// A vector of the given length.
    Vector(usize),
}

impl Shape {
    /// Number of elements evaluated for this shape.
    #[inline]
    pub fn len(self) -> usize {
        match self {
            Shape::Scalar => 1,
            Shape::Vector(n) => n,
        }
    }

    /// Returns true for a zero-length vector.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Broadcasts two shapes together.
    ///
    /// # Errors
    /// `ShapeError::Mismatch` when both are vectors of different lengths.
    ///
    /// # Examples
    /// ```
    /// use blackscholes_core::types::Shape;
    ///
    /// assert_eq!(Shape::Scalar.broadcast(Shape::Vector(3)).unwrap(), Shape::Vector(3));
    /// assert!(Shape::Vector(2).broadcast(Shape::Vector(3)).is_err());
    /// ```
    pub fn broadcast(self, other: Shape) -> Result<Shape, ShapeError> {
        match (self, other) {
            (Shape::Scalar, s) | (s, Shape::Scalar) => Ok(s),
            (Shape::Vector(a), Shape::Vector(b)) if a == b => Ok(self),
            (Shape::Vector(a), Shape::Vector(b)) => Err(ShapeError::Mismatch { left: a, right: b }),
        }
    }

    /// Broadcasts an arbitrary collection of shapes. An empty collection is scalar.
    pub fn broadcast_all<I>(shapes: I) -> Result<Shape, ShapeError>
    where
        I: IntoIterator<Item = Shape>,
    {
        shapes
            .into_iter()
            .try_fold(Shape::Scalar, |acc, shape| acc.broadcast(shape))
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Vector(n) => write!(f, "vector[{}]", n),
        }
    }
}

/// A scalar or a vector of values, evaluated elementwise.
///
/// # Examples
/// ```
/// use blackscholes_core::types::{Numeric, Shape};
///
/// let spot = Numeric::<f64>::from(vec![1240.0, 1243.0]);
/// assert_eq!(spot.shape(), Shape::Vector(2));
///
/// let strike = Numeric::<f64>::from(1220.0);
/// let moneyness = spot.zip_with(&strike, |s, k| s / k).unwrap();
/// assert_eq!(moneyness.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Numeric<T> {
    /// Single value, broadcast against any shape.
    Scalar(T),
    /// Vector of values.
    Vector(Vec<T>),
}

/// A numeric value whose elements may be absent.
pub type Quantity = Numeric<Option<f64>>;

impl<T> Numeric<T> {
    /// Returns the evaluation shape.
    #[inline]
    pub fn shape(&self) -> Shape {
        match self {
            Numeric::Scalar(_) => Shape::Scalar,
            Numeric::Vector(v) => Shape::Vector(v.len()),
        }
    }

    /// Number of stored elements (1 for a scalar).
    #[inline]
    pub fn len(&self) -> usize {
        self.shape().len()
    }

    /// Returns true for an empty vector.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index` under broadcasting: a scalar answers every index.
    ///
    /// # Panics
    /// Panics if `index` is out of range for a vector. Callers index only
    /// within a shape obtained from [`Shape::broadcast`].
    #[inline]
    pub fn at(&self, index: usize) -> &T {
        match self {
            Numeric::Scalar(v) => v,
            Numeric::Vector(v) => &v[index],
        }
    }

    /// Returns the value if this is a scalar.
    #[inline]
    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            Numeric::Scalar(v) => Some(v),
            Numeric::Vector(_) => None,
        }
    }

    /// Stored elements as a slice (length 1 for a scalar).
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Numeric::Scalar(v) => std::slice::from_ref(v),
            Numeric::Vector(v) => v,
        }
    }

    /// Iterates over the stored elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Applies `f` to every element, preserving shape.
    pub fn map<U, F>(&self, mut f: F) -> Numeric<U>
    where
        F: FnMut(&T) -> U,
    {
        match self {
            Numeric::Scalar(v) => Numeric::Scalar(f(v)),
            Numeric::Vector(v) => Numeric::Vector(v.iter().map(f).collect()),
        }
    }

    /// Builds a value of the given shape from an index function.
    pub fn from_fn<F>(shape: Shape, mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        match shape {
            Shape::Scalar => Numeric::Scalar(f(0)),
            Shape::Vector(n) => Numeric::Vector((0..n).map(f).collect()),
        }
    }

    /// Combines two values elementwise under broadcasting.
    ///
    /// # Errors
    /// `ShapeError::Mismatch` if the shapes do not broadcast.
    pub fn zip_with<U, V, F>(&self, other: &Numeric<U>, mut f: F) -> Result<Numeric<V>, ShapeError>
    where
        T: Copy,
        U: Copy,
        F: FnMut(T, U) -> V,
    {
        let shape = self.shape().broadcast(other.shape())?;
        Ok(Numeric::from_fn(shape, |i| f(*self.at(i), *other.at(i))))
    }
}

impl<T: Clone> Numeric<T> {
    /// A value of the given shape with every element set to `value`.
    pub fn filled(shape: Shape, value: T) -> Self {
        match shape {
            Shape::Scalar => Numeric::Scalar(value),
            Shape::Vector(n) => Numeric::Vector(vec![value; n]),
        }
    }
}

impl Numeric<Option<f64>> {
    /// An entirely absent quantity of the given shape.
    #[inline]
    pub fn absent(shape: Shape) -> Self {
        Numeric::filled(shape, None)
    }

    /// Same shape, every element absent.
    #[inline]
    pub fn cleared(&self) -> Self {
        Numeric::absent(self.shape())
    }

    /// True when no element is absent.
    pub fn is_fully_present(&self) -> bool {
        self.iter().all(Option::is_some)
    }

    /// True when at least one element is absent.
    pub fn is_any_absent(&self) -> bool {
        self.iter().any(Option::is_none)
    }

    /// The scalar value, if this is a present scalar.
    ///
    /// # Examples
    /// ```
    /// use blackscholes_core::types::Quantity;
    ///
    /// assert_eq!(Quantity::from(36.0).value(), Some(36.0));
    /// assert_eq!(Quantity::from(vec![36.0, 70.0]).value(), None);
    /// ```
    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.as_scalar().copied().flatten()
    }

    /// Elements as `f64`, absent elements mapped to NaN.
    pub fn to_f64_lossy(&self) -> Numeric<f64> {
        self.map(|v| v.unwrap_or(f64::NAN))
    }
}

impl From<f64> for Numeric<f64> {
    fn from(value: f64) -> Self {
        Numeric::Scalar(value)
    }
}

impl From<Vec<f64>> for Numeric<f64> {
    fn from(values: Vec<f64>) -> Self {
        Numeric::Vector(values)
    }
}

impl From<&[f64]> for Numeric<f64> {
    fn from(values: &[f64]) -> Self {
        Numeric::Vector(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Numeric<f64> {
    fn from(values: [f64; N]) -> Self {
        Numeric::Vector(values.to_vec())
    }
}

impl From<f64> for Numeric<Option<f64>> {
    fn from(value: f64) -> Self {
        Numeric::Scalar(Some(value))
    }
}

impl From<Vec<f64>> for Numeric<Option<f64>> {
    fn from(values: Vec<f64>) -> Self {
        Numeric::Vector(values.into_iter().map(Some).collect())
    }
}

impl<const N: usize> From<[f64; N]> for Numeric<Option<f64>> {
    fn from(values: [f64; N]) -> Self {
        Numeric::Vector(values.iter().copied().map(Some).collect())
    }
}

impl From<Numeric<f64>> for Numeric<Option<f64>> {
    fn from(values: Numeric<f64>) -> Self {
        values.map(|&v| Some(v))
    }
}

fn write_elements<T, F>(f: &mut fmt::Formatter<'_>, value: &Numeric<T>, mut item: F) -> fmt::Result
where
    F: FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
{
    match value {
        Numeric::Scalar(v) => item(f, v),
        Numeric::Vector(vs) => {
            write!(f, "[")?;
            for (i, v) in vs.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                item(f, v)?;
            }
            write!(f, "]")
        }
    }
}

impl fmt::Display for Numeric<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self, |f, v| write!(f, "{}", v))
    }
}

/// Absent elements print as `nan`.
impl fmt::Display for Numeric<Option<f64>> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_elements(f, self, |f, v| match v {
            Some(x) => write!(f, "{}", x),
            None => write!(f, "nan"),
        })
    }
}
