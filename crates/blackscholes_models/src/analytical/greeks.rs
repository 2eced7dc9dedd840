//! Closed-form Black-Scholes greeks.
//!
//! [`Greek`] names the ten supported sensitivities and [`GreekSet`] selects
//! which of them a contract tracks. The formula for each greek is chosen by a
//! static `match` in [`BlackScholes::greek`]; only delta, theta, rho and charm
//! depend on the option side.

use std::fmt;
use std::str::FromStr;

use blackscholes_core::math::distributions::{norm_cdf, norm_pdf};
use num_traits::Float;

use super::BlackScholes;
use crate::valuation::ValuationError;

/// A risk sensitivity of the option price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Greek {
    /// ∂V/∂S
    Delta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂V/∂σ
    Vega,
    /// −∂V/∂T
    Theta,
    /// ∂V/∂r
    Rho,
    /// ∂²V/∂S∂σ
    Vanna,
    /// −∂Δ/∂T
    Charm,
    /// ∂²V/∂σ²
    Vomma,
    /// ∂³V/∂S³
    Speed,
    /// ∂Γ/∂σ
    Zomma,
}

impl Greek {
    /// Every greek, in display order.
    pub const ALL: [Greek; 10] = [
        Greek::Delta,
        Greek::Gamma,
        Greek::Vega,
        Greek::Theta,
        Greek::Rho,
        Greek::Vanna,
        Greek::Charm,
        Greek::Vomma,
        Greek::Speed,
        Greek::Zomma,
    ];

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Greek::Delta => "delta",
            Greek::Gamma => "gamma",
            Greek::Vega => "vega",
            Greek::Theta => "theta",
            Greek::Rho => "rho",
            Greek::Vanna => "vanna",
            Greek::Charm => "charm",
            Greek::Vomma => "vomma",
            Greek::Speed => "speed",
            Greek::Zomma => "zomma",
        }
    }

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Greek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Greek {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Greek::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValuationError::UnknownGreek(s.to_string()))
    }
}

/// A set of greeks.
///
/// # Examples
/// ```
/// use blackscholes_models::analytical::{Greek, GreekSet};
///
/// let set: GreekSet = "delta, vega".parse().unwrap();
/// assert!(set.contains(Greek::Delta));
/// assert!(!set.contains(Greek::Gamma));
/// assert_eq!(set.to_string(), "delta,vega");
///
/// assert_eq!("all".parse::<GreekSet>().unwrap(), GreekSet::all());
/// assert!("none".parse::<GreekSet>().unwrap().is_empty());
/// assert!("delta,beta".parse::<GreekSet>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GreekSet(u16);

impl GreekSet {
    /// The empty set.
    pub const fn none() -> Self {
        GreekSet(0)
    }

    /// All ten greeks.
    pub const fn all() -> Self {
        GreekSet((1 << Greek::ALL.len()) - 1)
    }

    /// Returns true if `greek` is in the set.
    #[inline]
    pub fn contains(self, greek: Greek) -> bool {
        self.0 & greek.bit() != 0
    }

    /// Adds `greek`.
    pub fn insert(&mut self, greek: Greek) {
        self.0 |= greek.bit();
    }

    /// Removes `greek`.
    pub fn remove(&mut self, greek: Greek) {
        self.0 &= !greek.bit();
    }

    /// Returns true if no greek is selected.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of selected greeks.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates over the selected greeks in display order.
    pub fn iter(self) -> impl Iterator<Item = Greek> {
        Greek::ALL.into_iter().filter(move |g| self.contains(*g))
    }
}

impl FromIterator<Greek> for GreekSet {
    fn from_iter<I: IntoIterator<Item = Greek>>(iter: I) -> Self {
        let mut set = GreekSet::none();
        for greek in iter {
            set.insert(greek);
        }
        set
    }
}

impl FromStr for GreekSet {
    type Err = ValuationError;

    /// Parses `all`, `none` (or an empty string) or a comma-separated list of names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(GreekSet::all());
        }
        if s.is_empty() || s.eq_ignore_ascii_case("none") {
            return Ok(GreekSet::none());
        }
        s.split(',').map(str::parse::<Greek>).collect()
    }
}

impl fmt::Debug for GreekSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for GreekSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, greek) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(greek.name())?;
        }
        Ok(())
    }
}

impl<T: Float> BlackScholes<T> {
    /// Evaluates `greek` at volatility `vol`, given the matching `d1` and `d2`.
    ///
    /// # Examples
    /// ```
    /// use blackscholes_models::analytical::{BlackScholes, Greek};
    /// use blackscholes_models::params::{OptionPoint, OptionType};
    ///
    /// let bs = BlackScholes::new(OptionPoint {
    ///     strike: 100.0_f64,
    ///     time_to_expiry: 1.0,
    ///     rate: 0.05,
    ///     dividend_yield: 0.0,
    ///     spot: 100.0,
    ///     option_type: OptionType::Call,
    /// });
    /// let (d1, d2) = bs.d1_d2(0.2);
    /// let delta = bs.greek(Greek::Delta, 0.2, d1, d2);
    /// assert!(delta > 0.5 && delta < 1.0);
    /// ```
    pub fn greek(&self, greek: Greek, vol: T, d1: T, d2: T) -> T {
        let p = &self.point;
        let is_call = p.option_type.is_call();
        let two = T::from(2.0).unwrap();
        let sqrt_t = p.time_to_expiry.sqrt();
        let vol_sqrt_t = vol * sqrt_t;
        let eq = self.dividend_discount();
        let er = self.discount();
        let pdf = norm_pdf(d1);

        match greek {
            Greek::Delta => {
                if is_call {
                    eq * norm_cdf(d1)
                } else {
                    -eq * norm_cdf(-d1)
                }
            }
            Greek::Gamma => eq * pdf / (p.spot * vol_sqrt_t),
            Greek::Vega => eq * p.spot * pdf * sqrt_t,
            Greek::Theta => {
                let decay = -eq * p.spot * pdf * vol / (two * sqrt_t);
                if is_call {
                    decay - p.rate * p.strike * er * norm_cdf(d2)
                        + p.dividend_yield * p.spot * eq * norm_cdf(d1)
                } else {
                    decay + p.rate * p.strike * er * norm_cdf(-d2)
                        - p.dividend_yield * p.spot * eq * norm_cdf(-d1)
                }
            }
            Greek::Rho => {
                if is_call {
                    p.strike * p.time_to_expiry * er * norm_cdf(d2)
                } else {
                    -p.strike * p.time_to_expiry * er * norm_cdf(-d2)
                }
            }
            Greek::Vanna => -eq * pdf * d2 / vol,
            Greek::Charm => {
                let t = p.time_to_expiry;
                let drift = eq * pdf * (two * (p.rate - p.dividend_yield) * t - d2 * vol_sqrt_t)
                    / (two * t * vol_sqrt_t);
                if is_call {
                    p.dividend_yield * eq * norm_cdf(d1) - drift
                } else {
                    -p.dividend_yield * eq * norm_cdf(-d1) - drift
                }
            }
            Greek::Vomma => eq * p.spot * pdf * sqrt_t * d1 * d2 / vol,
            Greek::Speed => {
                -eq * pdf / (p.spot * p.spot * vol_sqrt_t) * (d1 / vol_sqrt_t + T::one())
            }
            // ∂Γ/∂σ = Γ·(d1·d2 − 1)/σ
            Greek::Zomma => eq * pdf * (d1 * d2 - T::one()) / (p.spot * vol * vol_sqrt_t),
        }
    }

    /// Evaluates `greek` at `vol`, computing d1 and d2 internally.
    pub fn sensitivity(&self, greek: Greek, vol: T) -> T {
        let (d1, d2) = self.d1_d2(vol);
        self.greek(greek, vol, d1, d2)
    }
}
