//! Errors raised while building target quantities and order plans.

use crate::Symbol;

/// Errors returned by the planning functions and [`TargetWeights`](crate::TargetWeights).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// A price needed for planning was not supplied.
    #[error("missing price for {0}")]
    MissingPrice(Symbol),

    /// A supplied price was zero, negative, or not finite.
    #[error("invalid price for {symbol}: {price}")]
    InvalidPrice { symbol: Symbol, price: f64 },

    /// Equity was not a finite number.
    #[error("equity must be finite, got {0}")]
    InvalidEquity(f64),

    /// A target weight was outside [0, 1] or not finite.
    #[error("weight for {symbol} must be in [0, 1], got {weight}")]
    InvalidWeight { symbol: Symbol, weight: f64 },

    /// The universe was empty.
    #[error("universe is empty")]
    EmptyUniverse,

    /// A symbol appeared twice in the universe or in the weights.
    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(Symbol),

    /// A weight was given for a symbol outside the universe.
    #[error("weight given for {0}, which is not in the universe")]
    NotInUniverse(Symbol),
}
