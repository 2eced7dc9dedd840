//! Contract valuation with lazily derived price or volatility.
//!
//! - [`Contract`]: parameters plus valuation state behind fluent mutators
//! - [`ValuationState`]: the invalidate/resolve protocol
//! - [`ContractSnapshot`]: resolved view for display and JSON
//! - [`ValuationError`]: caller errors

mod contract;
mod error;
mod snapshot;
mod state;

pub use contract::Contract;
pub use error::ValuationError;
pub use snapshot::ContractSnapshot;
pub use state::{Anchor, ValuationState};
