//! # Meridian Strategy Library
//!
//! This crate contains the signal logic for the Meridian system. It defines a
//! universal `Strategy` trait and the SMA momentum implementation.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   datasets, HTTP, or persistence. It depends only on `core-types`.
//! - **Strategy Agnostic Engine:** By using the `Strategy` trait, the
//!   `backtester` can drive any signal rule without knowing its internals.
//!   In particular it applies the execution lag itself, so a strategy only
//!   ever answers "what would I hold at this close?".

// Declare all the modules that constitute this crate.
pub mod error;
pub mod sma_momentum;

// Re-export the key components to create a clean, public-facing API.
pub use error::StrategyError;
pub use sma_momentum::SmaMomentum;

use core_types::Stance;
use rust_decimal::Decimal;

/// The core trait all signal rules implement.
///
/// The `&mut self` in `evaluate` is crucial, as strategies maintain their own
/// indicator state (e.g., the running moving-average window).
pub trait Strategy: Send + Sync {
    /// Evaluates the rule against one closing price.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Stance))` - the exposure the rule dictates as of this close.
    /// * `Ok(None)` - the rule is still warming up and its value is undefined.
    /// * `Err(StrategyError)` - if an error occurs during evaluation.
    fn evaluate(&mut self, close: Decimal) -> Result<Option<Stance>, StrategyError>;
}
