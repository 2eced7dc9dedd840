//! Lazy price/volatility state.
//!
//! A [`ValuationState`] stores the price, the volatility and everything
//! derived from them (d1, d2, greeks). Mutations only record what changed;
//! [`ValuationState::resolve`] derives the missing side on the next read:
//!
//! 1. any volatility element absent: solve volatility from price
//! 2. otherwise any price element absent: price from volatility
//! 3. otherwise: both given, derive d1/d2/greeks from volatility
//!
//! Setting a fully present price clears the volatility and vice versa, and
//! every mutation drops d1, d2 and all greeks together.

use std::collections::BTreeMap;

use blackscholes_core::types::{Quantity, Shape};

use crate::analytical::{evaluate, Greek, GreekSet, ImpliedVolSolver};
use crate::params::OptionParameters;

use super::ValuationError;

/// The side of price/volatility that is held fixed across parameter edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Anchor {
    /// Price is fixed; volatility is re-derived.
    Price,
    /// Volatility is fixed; price is re-derived.
    Vol,
}

/// Cached price, volatility, d1/d2 and greeks with their invalidation rules.
#[derive(Debug, Clone)]
pub struct ValuationState {
    price: Quantity,
    vol: Quantity,
    d1: Quantity,
    d2: Quantity,
    greeks: BTreeMap<Greek, Quantity>,
    tracked: GreekSet,
    anchor: Anchor,
    stale: bool,
    solver: ImpliedVolSolver,
}

impl ValuationState {
    /// Empty state: price and volatility absent.
    pub fn new(tracked: GreekSet, solver: ImpliedVolSolver) -> Self {
        Self {
            price: Quantity::absent(Shape::Scalar),
            vol: Quantity::absent(Shape::Scalar),
            d1: Quantity::absent(Shape::Scalar),
            d2: Quantity::absent(Shape::Scalar),
            greeks: BTreeMap::new(),
            tracked,
            anchor: Anchor::Vol,
            stale: true,
            solver,
        }
    }

    /// Current price, as of the last resolution or mutation.
    pub fn price(&self) -> &Quantity {
        &self.price
    }

    /// Current volatility, as of the last resolution or mutation.
    pub fn vol(&self) -> &Quantity {
        &self.vol
    }

    /// Cached d1.
    pub fn d1(&self) -> &Quantity {
        &self.d1
    }

    /// Cached d2.
    pub fn d2(&self) -> &Quantity {
        &self.d2
    }

    /// Cached value of a tracked greek.
    ///
    /// # Errors
    /// `ValuationError::GreekNotTracked` if `greek` is outside the tracked set.
    pub fn greek(&self, greek: Greek) -> Result<Quantity, ValuationError> {
        if !self.tracked.contains(greek) {
            return Err(ValuationError::GreekNotTracked(greek));
        }
        Ok(self
            .greeks
            .get(&greek)
            .cloned()
            .unwrap_or_else(|| self.d1.cleared()))
    }

    /// Cached values of every tracked greek.
    pub fn greeks(&self) -> &BTreeMap<Greek, Quantity> {
        &self.greeks
    }

    /// Greeks evaluated on resolution.
    pub fn tracked(&self) -> GreekSet {
        self.tracked
    }

    /// The side held fixed across parameter edits.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Returns true if the next read will resolve.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The implied volatility solver used in step 1.
    pub fn solver(&self) -> &ImpliedVolSolver {
        &self.solver
    }

    /// Replaces the tracked greek set.
    pub fn set_tracked(&mut self, tracked: GreekSet) {
        self.tracked = tracked;
        self.invalidate();
    }

    /// Replaces the implied volatility solver.
    pub fn set_solver(&mut self, solver: ImpliedVolSolver) {
        self.solver = solver;
        self.invalidate();
    }

    /// Stores an initial price without clearing the volatility.
    ///
    /// Used while building a contract so that a price and a volatility can
    /// both be supplied; the price is the anchor only if no volatility is.
    pub fn seed_price(&mut self, price: Quantity) {
        if !self.vol.is_fully_present() {
            self.anchor = Anchor::Price;
        }
        self.price = price;
        self.invalidate();
    }

    /// Stores an initial volatility without clearing the price. The
    /// volatility becomes the anchor.
    pub fn seed_vol(&mut self, vol: Quantity) {
        self.anchor = Anchor::Vol;
        self.vol = vol;
        self.invalidate();
    }

    /// Sets the price. A fully present price clears the volatility and
    /// becomes the anchor. A (partially) absent one leaves volatility alone
    /// and anchors it, like [`clear_price`](Self::clear_price).
    pub fn set_price(&mut self, price: Quantity) {
        if price.is_fully_present() {
            self.vol = self.vol.cleared();
            self.anchor = Anchor::Price;
        } else {
            self.anchor = Anchor::Vol;
        }
        self.price = price;
        self.invalidate();
    }

    /// Sets the volatility. A fully present volatility clears the price and
    /// becomes the anchor. A (partially) absent one leaves price alone and
    /// anchors it, like [`clear_vol`](Self::clear_vol).
    pub fn set_vol(&mut self, vol: Quantity) {
        if vol.is_fully_present() {
            self.price = self.price.cleared();
            self.anchor = Anchor::Vol;
        } else {
            self.anchor = Anchor::Price;
        }
        self.vol = vol;
        self.invalidate();
    }

    /// Clears the price, keeping its shape. Volatility becomes the anchor.
    pub fn clear_price(&mut self) {
        self.price = self.price.cleared();
        self.anchor = Anchor::Vol;
        self.invalidate();
    }

    /// Clears the volatility, keeping its shape. Price becomes the anchor.
    pub fn clear_vol(&mut self) {
        self.vol = self.vol.cleared();
        self.anchor = Anchor::Price;
        self.invalidate();
    }

    /// Records a change to the contract parameters: the side that is not
    /// anchored is cleared so the next read re-derives it.
    pub fn parameters_changed(&mut self) {
        match self.anchor {
            Anchor::Price => self.vol = self.vol.cleared(),
            Anchor::Vol => self.price = self.price.cleared(),
        }
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.d1 = self.d1.cleared();
        self.d2 = self.d2.cleared();
        self.greeks.clear();
        self.stale = true;
    }

    /// Derives whatever is missing. A no-op unless something changed since
    /// the last successful resolution.
    ///
    /// Elements that cannot be resolved are left absent and are not retried
    /// until the next mutation.
    ///
    /// # Errors
    /// `ValuationError::Shape` if parameters, price and volatility do not
    /// broadcast; the state stays stale.
    pub fn resolve(&mut self, params: &OptionParameters) -> Result<(), ValuationError> {
        if !self.stale {
            return Ok(());
        }

        let eval = if self.vol.is_any_absent() {
            tracing::debug!(price = %self.price, "resolving volatility from price");
            let vol = self.solver.solve_vol(&self.price, params)?;
            let eval = evaluate(params, &vol, self.tracked)?;
            self.vol = vol;
            eval
        } else if self.price.is_any_absent() {
            tracing::debug!(vol = %self.vol, "resolving price from volatility");
            let eval = evaluate(params, &self.vol, self.tracked)?;
            self.price = eval.price.clone();
            eval
        } else {
            tracing::debug!("price and volatility both given; deriving d1/d2 and greeks");
            evaluate(params, &self.vol, self.tracked)?
        };

        self.d1 = eval.d1;
        self.d2 = eval.d2;
        self.greeks = eval.greeks;
        self.stale = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blackscholes_core::types::{Numeric, ShapeError};

    fn params(spot: impl Into<Numeric<f64>>) -> OptionParameters {
        OptionParameters::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "C", spot)
    }

    fn state() -> ValuationState {
        ValuationState::new(GreekSet::all(), ImpliedVolSolver::default())
    }

    #[test]
    fn test_new_state_is_empty() {
        let s = state();
        assert_eq!(s.price(), &Quantity::Scalar(None));
        assert_eq!(s.vol(), &Quantity::Scalar(None));
        assert!(s.is_stale());
        assert!(s.greeks().is_empty());
    }

    #[test]
    fn test_empty_state_resolves_to_absent() {
        let mut s = state();
        s.resolve(&params(1240.0)).unwrap();
        assert_eq!(s.vol(), &Quantity::Scalar(None));
        assert_eq!(s.price(), &Quantity::Scalar(None));
        assert_eq!(s.greek(Greek::Delta).unwrap(), Quantity::Scalar(None));
    }

    #[test]
    fn test_set_price_clears_vol() {
        let mut s = state();
        s.set_vol(Quantity::from(0.2));
        s.set_price(Quantity::from(36.0));
        assert_eq!(s.vol(), &Quantity::Scalar(None));
        assert_eq!(s.anchor(), Anchor::Price);
    }

    #[test]
    fn test_set_vol_clears_price_keeping_shape() {
        let mut s = state();
        s.set_price(Quantity::from(vec![36.0, 40.0]));
        s.set_vol(Quantity::from(0.2));
        assert_eq!(s.price(), &Quantity::Vector(vec![None, None]));
        assert_eq!(s.anchor(), Anchor::Vol);
    }

    #[test]
    fn test_absent_set_leaves_other_side() {
        let mut s = state();
        s.set_vol(Quantity::from(0.2));
        s.set_price(Quantity::Scalar(None));
        assert_eq!(s.vol(), &Quantity::from(0.2));
        assert_eq!(s.anchor(), Anchor::Vol);

        s.set_price(Quantity::Vector(vec![Some(36.0), None]));
        assert_eq!(s.vol(), &Quantity::from(0.2));
    }

    #[test]
    fn test_absent_set_anchors_other_side() {
        let p = params(1240.0);
        let mut s = state();
        s.set_price(Quantity::from(36.0));
        s.resolve(&p).unwrap();
        let vol = s.vol().clone();
        assert_eq!(s.anchor(), Anchor::Price);

        s.set_price(Quantity::Scalar(None));
        assert_eq!(s.anchor(), Anchor::Vol);
        s.parameters_changed();
        s.resolve(&params(1250.0)).unwrap();
        assert_eq!(s.vol(), &vol);
        assert!(s.price().is_fully_present());

        let price = s.price().clone();
        s.set_vol(Quantity::Scalar(None));
        assert_eq!(s.anchor(), Anchor::Price);
        s.parameters_changed();
        s.resolve(&params(1250.0)).unwrap();
        assert_eq!(s.price(), &price);
        assert!(s.vol().is_fully_present());
    }

    #[test]
    fn test_resolve_price_from_vol() {
        let mut s = state();
        s.set_vol(Quantity::from(0.2));
        s.resolve(&params(1240.0)).unwrap();
        let price = s.price().value().unwrap();
        assert!(price > 0.0 && price < 1240.0);
        assert!(s.d1().value().is_some());
        assert_eq!(s.greeks().len(), 10);
        assert!(!s.is_stale());
    }

    #[test]
    fn test_resolve_vol_keeps_price_exact() {
        let mut s = state();
        s.set_price(Quantity::from(36.0));
        s.resolve(&params(1240.0)).unwrap();
        assert_eq!(s.price(), &Quantity::from(36.0));
        assert_relative_eq!(s.vol().value().unwrap(), 0.19605, epsilon = 1e-3);
    }

    #[test]
    fn test_parameter_change_clears_non_anchored_side() {
        let mut s = state();
        s.set_price(Quantity::from(36.0));
        s.resolve(&params(1240.0)).unwrap();

        s.parameters_changed();
        assert_eq!(s.price(), &Quantity::from(36.0));
        assert_eq!(s.vol(), &Quantity::Scalar(None));
        assert!(s.greeks().is_empty());
        assert_eq!(s.d1(), &Quantity::Scalar(None));
    }

    #[test]
    fn test_seeding_both_anchors_vol() {
        let mut s = state();
        s.seed_price(Quantity::from(36.0));
        assert_eq!(s.anchor(), Anchor::Price);
        s.seed_vol(Quantity::from(0.2));
        assert_eq!(s.anchor(), Anchor::Vol);
        assert_eq!(s.price(), &Quantity::from(36.0));

        // Both present: derived values only, nothing overwritten.
        s.resolve(&params(1240.0)).unwrap();
        assert_eq!(s.price(), &Quantity::from(36.0));
        assert_eq!(s.vol(), &Quantity::from(0.2));
        assert!(s.greek(Greek::Gamma).unwrap().value().is_some());

        s.parameters_changed();
        assert_eq!(s.price(), &Quantity::Scalar(None));
    }

    #[test]
    fn test_seed_vol_then_price_keeps_vol_anchor() {
        let mut s = state();
        s.seed_vol(Quantity::from(0.2));
        s.seed_price(Quantity::from(36.0));
        assert_eq!(s.anchor(), Anchor::Vol);
    }

    #[test]
    fn test_clear_selects_anchor() {
        let mut s = state();
        s.seed_price(Quantity::from(36.0));
        s.seed_vol(Quantity::from(0.2));
        s.clear_vol();
        assert_eq!(s.anchor(), Anchor::Price);
        assert_eq!(s.price(), &Quantity::from(36.0));
        s.clear_price();
        assert_eq!(s.anchor(), Anchor::Vol);
        assert_eq!(s.vol(), &Quantity::Scalar(None));
    }

    #[test]
    fn test_resolve_is_noop_when_fresh() {
        let mut s = state();
        s.set_price(Quantity::from(36.0));
        s.resolve(&params(1240.0)).unwrap();
        let vol = s.vol().clone();

        // Different parameters, but nothing was marked as changed.
        s.resolve(&params(1300.0)).unwrap();
        assert_eq!(s.vol(), &vol);
    }

    #[test]
    fn test_failed_elements_stay_absent_until_mutation() {
        let mut s = state();
        s.set_price(Quantity::from(vec![36.0, 5000.0]));
        s.resolve(&params(1240.0)).unwrap();
        assert!(s.vol().at(0).is_some());
        assert!(s.vol().at(1).is_none());
        assert!(s.d1().at(1).is_none());
        assert!(!s.is_stale());

        s.resolve(&params(1240.0)).unwrap();
        assert!(s.vol().at(1).is_none());
    }

    #[test]
    fn test_shape_error_keeps_state_stale() {
        let mut s = state();
        s.set_vol(Quantity::from(vec![0.2, 0.3, 0.4]));
        let err = s.resolve(&params(vec![1240.0, 1250.0])).unwrap_err();
        assert_eq!(err, ValuationError::Shape(ShapeError::Mismatch { left: 2, right: 3 }));
        assert!(s.is_stale());
        assert_eq!(s.price(), &Quantity::Scalar(None));
    }

    #[test]
    fn test_untracked_greek() {
        let mut s = ValuationState::new(GreekSet::from_iter([Greek::Delta]), ImpliedVolSolver::default());
        s.set_vol(Quantity::from(0.2));
        s.resolve(&params(1240.0)).unwrap();
        assert!(s.greek(Greek::Delta).is_ok());
        assert_eq!(s.greek(Greek::Gamma), Err(ValuationError::GreekNotTracked(Greek::Gamma)));
        assert_eq!(s.greeks().len(), 1);
    }

    #[test]
    fn test_empty_tracked_set_does_no_greek_work() {
        let mut s = ValuationState::new(GreekSet::none(), ImpliedVolSolver::default());
        s.set_vol(Quantity::from(0.2));
        s.resolve(&params(1240.0)).unwrap();
        assert!(s.greeks().is_empty());
        assert!(s.price().value().is_some());
    }
}
