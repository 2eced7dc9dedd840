//! Standard normal distribution functions.
//!
//! - `norm_cdf`: cumulative distribution function Φ
//! - `norm_pdf`: density φ
//! - `norm_cdf_numeric` / `norm_pdf_numeric`: elementwise versions over [`Numeric`]
//!
//! The scalar functions are generic over `T: Float` so the pricing formulas
//! can be evaluated in `f32` or `f64` alike.

use num_traits::Float;

use crate::types::Numeric;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Complementary error function, Abramowitz and Stegun formula 7.1.26.
///
/// Maximum absolute error 1.5e-7. Negative arguments use
/// erfc(-x) = 2 - erfc(x).
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let abs_x = x.abs();

    let a1 = T::from(0.254829592).unwrap();
    let a2 = T::from(-0.284496736).unwrap();
    let a3 = T::from(1.421413741).unwrap();
    let a4 = T::from(-1.453152027).unwrap();
    let a5 = T::from(1.061405429).unwrap();
    let p = T::from(0.3275911).unwrap();

    let t = one / (one + p * abs_x);
    let poly = a1 + t * (a2 + t * (a3 + t * (a4 + t * a5)));
    let tail = t * poly * (-abs_x * abs_x).exp();

    if x < T::zero() {
        T::from(2.0).unwrap() - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(x) = ½·erfc(−x/√2). NaN inputs propagate to NaN.
///
/// # Examples
/// ```
/// use blackscholes_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-4.0_f64) < 1e-4);
/// assert!(norm_cdf(f64::NAN).is_nan());
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(std::f64::consts::SQRT_2).unwrap();
    let half = T::from(0.5).unwrap();
    half * erfc_approx(-x / sqrt_2)
}

/// Standard normal probability density function.
///
/// φ(x) = exp(−x²/2)/√(2π).
///
/// # Examples
/// ```
/// use blackscholes_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

/// Elementwise [`norm_cdf`], preserving shape.
pub fn norm_cdf_numeric<T: Float>(x: &Numeric<T>) -> Numeric<T> {
    x.map(|&v| norm_cdf(v))
}

/// Elementwise [`norm_pdf`], preserving shape.
pub fn norm_pdf_numeric<T: Float>(x: &Numeric<T>) -> Numeric<T> {
    x.map(|&v| norm_pdf(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_cdf_table_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.841_344_746_068_542_9, epsilon = 2e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.158_655_253_931_457_07, epsilon = 2e-7);
        assert_relative_eq!(norm_cdf(1.96_f64), 0.975_002_104_851_780, epsilon = 2e-7);
        assert_relative_eq!(norm_cdf(-2.5_f64), 0.006_209_665_325_776_132, epsilon = 2e-7);
    }

    #[test]
    fn test_pdf_table_values() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(1.0_f64), 0.241_970_724_519_143_37, epsilon = 1e-12);
        assert_relative_eq!(norm_pdf(-2.0_f64), 0.053_990_966_513_188_06, epsilon = 1e-12);
    }

    #[test]
    fn test_cdf_tails_stay_in_unit_interval() {
        for x in [-40.0_f64, -12.0, -8.0, 8.0, 12.0, 40.0] {
            let p = norm_cdf(x);
            assert!((0.0..=1.0).contains(&p), "Φ({}) = {}", x, p);
        }
    }

    #[test]
    fn test_nan_propagates() {
        assert!(norm_cdf(f64::NAN).is_nan());
        assert!(norm_pdf(f64::NAN).is_nan());
    }

    #[test]
    fn test_numeric_variants_preserve_shape() {
        let xs = Numeric::Vector(vec![-1.0_f64, 0.0, 1.0]);
        let cdf = norm_cdf_numeric(&xs);
        let pdf = norm_pdf_numeric(&xs);
        assert_eq!(cdf.shape(), xs.shape());
        assert_eq!(pdf.shape(), xs.shape());
        assert_relative_eq!(*cdf.at(1), 0.5, epsilon = 1e-7);
        assert_relative_eq!(*pdf.at(0), *pdf.at(2), epsilon = 1e-15);

        let scalar = norm_cdf_numeric(&Numeric::Scalar(0.0_f64));
        assert!(scalar.as_scalar().is_some());
    }

    #[test]
    fn test_f32_evaluation() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-5);
        assert!((norm_pdf(0.0_f32) - 0.398_942_3).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn prop_cdf_symmetry(x in -8.0_f64..8.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-6);
        }

        #[test]
        fn prop_cdf_derivative_matches_pdf(x in -3.0_f64..3.0) {
            let h = 1e-4;
            let fd = (norm_cdf(x + h) - norm_cdf(x - h)) / (2.0 * h);
            prop_assert!((fd - norm_pdf(x)).abs() < 1e-4);
        }
    }
}
