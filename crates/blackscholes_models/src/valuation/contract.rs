//! The contract façade: parameters plus lazy valuation state.

use blackscholes_core::types::{Numeric, Quantity};

use super::{ContractSnapshot, ValuationError, ValuationState};
use crate::analytical::{Greek, GreekSet, ImpliedVolConfig, ImpliedVolSolver};
use crate::params::{OptionParameters, OptionType};

/// A European option under Black-Scholes, parameterised by price or by
/// volatility.
///
/// Whichever of price and volatility was not given is derived on the next
/// read, together with d1, d2 and the tracked greeks. Parameter edits keep
/// the fixed side (the last one set, or the one chosen with
/// [`holding_vol_fixed`](Self::holding_vol_fixed) /
/// [`holding_price_fixed`](Self::holding_price_fixed)) and re-derive the other.
///
/// Reads take `&mut self` because they fill the cache.
///
/// # Examples
/// ```
/// use blackscholes_models::valuation::Contract;
///
/// let mut contract = Contract::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "C", 1240.0).with_price(36.0);
///
/// let vol = contract.vol().unwrap().value().unwrap();
/// assert!(vol > 0.15 && vol < 0.25);
/// assert_eq!(contract.price().unwrap().value(), Some(36.0));
///
/// // Keep the volatility, move the spot: the price is re-derived.
/// contract.holding_vol_fixed().set_spot(1250.0);
/// assert!(contract.price().unwrap().value().unwrap() > 36.0);
/// ```
#[derive(Debug, Clone)]
pub struct Contract {
    params: OptionParameters,
    state: ValuationState,
}

impl Contract {
    /// Creates a contract tracking all greeks, with price and volatility absent.
    ///
    /// `option_type` is `"C"`/`"CALL"` (any case) for a call; anything else is a put.
    pub fn new(
        strike: impl Into<Numeric<f64>>,
        time_to_expiry: impl Into<Numeric<f64>>,
        rate: impl Into<Numeric<f64>>,
        dividend_yield: impl Into<Numeric<f64>>,
        option_type: &str,
        spot: impl Into<Numeric<f64>>,
    ) -> Self {
        Self::from_parameters(OptionParameters::new(
            strike,
            time_to_expiry,
            rate,
            dividend_yield,
            option_type,
            spot,
        ))
    }

    /// Creates a contract from an existing parameter set.
    pub fn from_parameters(params: OptionParameters) -> Self {
        Self {
            params,
            state: ValuationState::new(GreekSet::all(), ImpliedVolSolver::default()),
        }
    }

    /// Seeds the price. Unlike [`set_price`](Self::set_price) this does not
    /// clear a volatility seeded earlier.
    pub fn with_price(mut self, price: impl Into<Quantity>) -> Self {
        self.state.seed_price(price.into());
        self
    }

    /// Seeds the volatility. Unlike [`set_vol`](Self::set_vol) this does not
    /// clear a price seeded earlier; when both are seeded volatility is the
    /// fixed side.
    pub fn with_vol(mut self, vol: impl Into<Quantity>) -> Self {
        self.state.seed_vol(vol.into());
        self
    }

    /// Restricts the greeks evaluated on resolution.
    pub fn tracking(mut self, greeks: GreekSet) -> Self {
        self.state.set_tracked(greeks);
        self
    }

    /// Uses a custom implied volatility tuning.
    pub fn with_solver(mut self, config: ImpliedVolConfig) -> Self {
        self.state.set_solver(ImpliedVolSolver::new(config));
        self
    }

    // ----------------------------------------------------------
    // Parameters
    // ----------------------------------------------------------

    /// Returns the parameter set.
    pub fn parameters(&self) -> &OptionParameters {
        &self.params
    }

    /// Returns the strike.
    pub fn strike(&self) -> &Numeric<f64> {
        self.params.strike()
    }

    /// Returns the time to expiry in years.
    pub fn time_to_expiry(&self) -> &Numeric<f64> {
        self.params.time_to_expiry()
    }

    /// Returns the risk-free rate.
    pub fn rate(&self) -> &Numeric<f64> {
        self.params.rate()
    }

    /// Returns the dividend yield.
    pub fn dividend_yield(&self) -> &Numeric<f64> {
        self.params.dividend_yield()
    }

    /// Returns the spot price.
    pub fn spot(&self) -> &Numeric<f64> {
        self.params.spot()
    }

    /// Returns the option side.
    pub fn option_type(&self) -> OptionType {
        self.params.option_type()
    }

    /// Returns true for a call.
    pub fn is_call(&self) -> bool {
        self.params.is_call()
    }

    /// Greeks evaluated on resolution.
    pub fn tracked_greeks(&self) -> GreekSet {
        self.state.tracked()
    }

    /// Sets the strike.
    pub fn set_strike(&mut self, value: impl Into<Numeric<f64>>) -> &mut Self {
        self.params.set_strike(value);
        self.state.parameters_changed();
        self
    }

    /// Sets the time to expiry.
    pub fn set_time_to_expiry(&mut self, value: impl Into<Numeric<f64>>) -> &mut Self {
        self.params.set_time_to_expiry(value);
        self.state.parameters_changed();
        self
    }

    /// Sets the risk-free rate.
    pub fn set_rate(&mut self, value: impl Into<Numeric<f64>>) -> &mut Self {
        self.params.set_rate(value);
        self.state.parameters_changed();
        self
    }

    /// Sets the dividend yield.
    pub fn set_dividend_yield(&mut self, value: impl Into<Numeric<f64>>) -> &mut Self {
        self.params.set_dividend_yield(value);
        self.state.parameters_changed();
        self
    }

    /// Sets the spot price.
    pub fn set_spot(&mut self, value: impl Into<Numeric<f64>>) -> &mut Self {
        self.params.set_spot(value);
        self.state.parameters_changed();
        self
    }

    /// Sets the option side.
    pub fn set_option_type(&mut self, option_type: OptionType) -> &mut Self {
        self.params.set_option_type(option_type);
        self.state.parameters_changed();
        self
    }

    // ----------------------------------------------------------
    // Price / volatility
    // ----------------------------------------------------------

    /// Sets the price; a fully present price clears the volatility.
    pub fn set_price(&mut self, price: impl Into<Quantity>) -> &mut Self {
        self.state.set_price(price.into());
        self
    }

    /// Sets the volatility; a fully present volatility clears the price.
    pub fn set_vol(&mut self, vol: impl Into<Quantity>) -> &mut Self {
        self.state.set_vol(vol.into());
        self
    }

    /// Clears the price so it is re-derived from the volatility.
    pub fn clear_price(&mut self) -> &mut Self {
        self.state.clear_price();
        self
    }

    /// Clears the volatility so it is re-derived from the price.
    pub fn clear_vol(&mut self) -> &mut Self {
        self.state.clear_vol();
        self
    }

    /// Holds the volatility fixed: the price is cleared and re-derived,
    /// now and after later parameter edits.
    pub fn holding_vol_fixed(&mut self) -> &mut Self {
        self.clear_price()
    }

    /// Holds the price fixed: the volatility is cleared and re-derived,
    /// now and after later parameter edits.
    pub fn holding_price_fixed(&mut self) -> &mut Self {
        self.clear_vol()
    }

    // ----------------------------------------------------------
    // Reads
    // ----------------------------------------------------------

    fn resolved(&mut self) -> Result<&ValuationState, ValuationError> {
        self.state.resolve(&self.params)?;
        Ok(&self.state)
    }

    /// Option price.
    pub fn price(&mut self) -> Result<Quantity, ValuationError> {
        Ok(self.resolved()?.price().clone())
    }

    /// Volatility.
    pub fn vol(&mut self) -> Result<Quantity, ValuationError> {
        Ok(self.resolved()?.vol().clone())
    }

    /// d1 term.
    pub fn d1(&mut self) -> Result<Quantity, ValuationError> {
        Ok(self.resolved()?.d1().clone())
    }

    /// d2 term.
    pub fn d2(&mut self) -> Result<Quantity, ValuationError> {
        Ok(self.resolved()?.d2().clone())
    }

    /// Any tracked greek.
    ///
    /// A greek outside the tracked set is rejected before any resolution
    /// work, so the request fails the same way whatever the inputs are.
    ///
    /// # Errors
    /// `ValuationError::GreekNotTracked` for a greek outside the tracked set,
    /// `ValuationError::Shape` if the inputs do not broadcast.
    pub fn greek(&mut self, greek: Greek) -> Result<Quantity, ValuationError> {
        if !self.state.tracked().contains(greek) {
            return Err(ValuationError::GreekNotTracked(greek));
        }
        self.resolved()?.greek(greek)
    }

    /// Delta.
    pub fn delta(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Delta)
    }

    /// Gamma.
    pub fn gamma(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Gamma)
    }

    /// Vega.
    pub fn vega(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Vega)
    }

    /// Theta.
    pub fn theta(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Theta)
    }

    /// Rho.
    pub fn rho(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Rho)
    }

    /// Vanna.
    pub fn vanna(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Vanna)
    }

    /// Charm.
    pub fn charm(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Charm)
    }

    /// Vomma.
    pub fn vomma(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Vomma)
    }

    /// Speed.
    pub fn speed(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Speed)
    }

    /// Zomma.
    pub fn zomma(&mut self) -> Result<Quantity, ValuationError> {
        self.greek(Greek::Zomma)
    }

    /// Resolves and captures every base field and tracked greek.
    ///
    /// # Examples
    /// ```
    /// use blackscholes_models::analytical::{Greek, GreekSet};
    /// use blackscholes_models::valuation::Contract;
    ///
    /// let mut contract = Contract::new(100.0, 1.0, 0.05, 0.0, "C", 100.0)
    ///     .with_vol(0.2)
    ///     .tracking(GreekSet::from_iter([Greek::Delta]));
    /// let text = contract.snapshot().unwrap().to_string();
    /// assert!(text.starts_with("BlackScholes(price:10.45"));
    /// assert!(text.contains(",vol:0.2,spot:100,strike:100,tte:1,ir:0.05,div:0,delta:0.63"));
    /// ```
    pub fn snapshot(&mut self) -> Result<ContractSnapshot, ValuationError> {
        self.state.resolve(&self.params)?;
        Ok(ContractSnapshot {
            option_type: self.params.option_type(),
            price: self.state.price().clone(),
            vol: self.state.vol().clone(),
            spot: self.params.spot().clone(),
            strike: self.params.strike().clone(),
            time_to_expiry: self.params.time_to_expiry().clone(),
            rate: self.params.rate().clone(),
            dividend_yield: self.params.dividend_yield().clone(),
            d1: self.state.d1().clone(),
            d2: self.state.d2().clone(),
            greeks: self.state.greeks().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use blackscholes_core::types::Shape;

    fn scenario() -> Contract {
        Contract::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "C", 1240.0)
    }

    #[test]
    fn test_price_from_vol() {
        let mut c = scenario().with_vol(0.2);
        let price = c.price().unwrap().value().unwrap();
        assert!(price > 0.0 && price < 1240.0);
        let delta = c.delta().unwrap().value().unwrap();
        assert!(delta > 0.0 && delta < 1.0);
    }

    #[test]
    fn test_chained_mutators() {
        let mut c = scenario().with_vol(0.2);
        c.set_spot(1250.0).set_strike(1230.0).set_rate(0.03);
        assert_eq!(c.spot(), &Numeric::Scalar(1250.0));
        assert_eq!(c.strike(), &Numeric::Scalar(1230.0));
        assert_eq!(c.vol().unwrap(), Quantity::from(0.2));
    }

    #[test]
    fn test_spot_change_refreshes_greeks() {
        let mut c = scenario().with_vol(0.2);
        let before = c.delta().unwrap().value().unwrap();
        c.set_spot(1300.0);
        let after = c.delta().unwrap().value().unwrap();
        assert!(after > before);
    }

    #[test]
    fn test_price_anchor_survives_expiry_change() {
        let mut c = scenario().with_price(36.0);
        let vol_before = c.vol().unwrap().value().unwrap();
        c.set_time_to_expiry(0.1);
        assert_eq!(c.price().unwrap(), Quantity::from(36.0));
        let vol_after = c.vol().unwrap().value().unwrap();
        assert!(vol_after < vol_before);
    }

    #[test]
    fn test_selectors() {
        let mut c = scenario().with_vol(0.2);
        let price = c.price().unwrap();

        c.holding_price_fixed().set_spot(1250.0);
        assert_eq!(c.price().unwrap(), price);
        let vol = c.vol().unwrap().value().unwrap();
        assert!(vol < 0.2);

        c.holding_vol_fixed().set_spot(1240.0);
        assert_relative_eq!(c.vol().unwrap().value().unwrap(), vol, epsilon = 1e-15);
    }

    #[test]
    fn test_vector_spot_broadcasts() {
        let mut c = scenario().with_vol(0.2);
        c.set_spot(vec![1250.0, 1260.0]);
        let price = c.price().unwrap();
        assert_eq!(price.shape(), Shape::Vector(2));
        assert!(price.at(1).unwrap() > price.at(0).unwrap());
    }

    #[test]
    fn test_untracked_greek() {
        let mut c = scenario().with_vol(0.2).tracking(GreekSet::from_iter([Greek::Vega]));
        assert!(c.vega().is_ok());
        assert_eq!(c.theta(), Err(ValuationError::GreekNotTracked(Greek::Theta)));
        assert_eq!(c.tracked_greeks().len(), 1);
    }

    #[test]
    fn test_untracked_greek_skips_resolution() {
        // Mismatched shapes would fail resolution.
        let mut c = Contract::new(1220.0, 0.1, 0.02, 0.0, "C", vec![1240.0, 1243.0])
            .with_vol(vec![0.2, 0.3, 0.4])
            .tracking(GreekSet::from_iter([Greek::Vega]));
        assert_eq!(c.theta(), Err(ValuationError::GreekNotTracked(Greek::Theta)));
        assert!(matches!(c.vega(), Err(ValuationError::Shape(_))));
    }

    #[test]
    fn test_named_accessors_match_greek() {
        let mut c = scenario().with_vol(0.25);
        let named = [
            c.delta().unwrap(),
            c.gamma().unwrap(),
            c.vega().unwrap(),
            c.theta().unwrap(),
            c.rho().unwrap(),
            c.vanna().unwrap(),
            c.charm().unwrap(),
            c.vomma().unwrap(),
            c.speed().unwrap(),
            c.zomma().unwrap(),
        ];
        for (greek, value) in Greek::ALL.into_iter().zip(named) {
            assert_eq!(c.greek(greek).unwrap(), value, "{greek}");
        }
    }

    #[test]
    fn test_put_token() {
        let mut c = Contract::new(1220.0, 22.0 / 365.0, 0.022719, 0.0, "put", 1240.0).with_vol(0.2);
        assert_eq!(c.option_type(), OptionType::Put);
        assert!(c.delta().unwrap().value().unwrap() < 0.0);
    }

    #[test]
    fn test_set_option_type_reprices() {
        let mut c = scenario().with_vol(0.2);
        let call = c.price().unwrap().value().unwrap();
        c.set_option_type(OptionType::Put);
        let put = c.price().unwrap().value().unwrap();
        assert!(put < call);
        assert!(!c.is_call());
    }

    #[test]
    fn test_custom_solver_bracket() {
        // Newton cannot start from NaN and the bracket excludes the true vol (~0.196).
        let mut c = scenario().with_price(36.0).with_solver(ImpliedVolConfig {
            initial_guess: f64::NAN,
            lower_bound: 0.5,
            upper_bound: 1.0,
            ..ImpliedVolConfig::default()
        });
        assert_eq!(c.vol().unwrap(), Quantity::Scalar(None));
        assert_eq!(c.price().unwrap(), Quantity::from(36.0));
    }
}
