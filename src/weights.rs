//! Target weights over an ordered universe.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{PlanError, Symbol};

/// Target allocation: an ordered universe plus a weight per symbol.
///
/// Symbols in the universe without an explicit weight have weight `0.0`
/// (i.e. the position is closed). The weights need not sum to 1.0; the
/// remainder stays in cash.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetWeights {
    universe: Vec<Symbol>,
    weights: FxHashMap<Symbol, f64>,
}

impl TargetWeights {
    /// Build and validate a target allocation.
    ///
    /// Fails on an empty universe, duplicate symbols, weights for symbols
    /// outside the universe, or weights outside `[0, 1]`.
    pub fn new(
        universe: Vec<Symbol>,
        weights: impl IntoIterator<Item = (Symbol, f64)>,
    ) -> Result<Self, PlanError> {
        if universe.is_empty() {
            return Err(PlanError::EmptyUniverse);
        }

        let mut seen = FxHashSet::default();
        for &sym in &universe {
            if !seen.insert(sym) {
                return Err(PlanError::DuplicateSymbol(sym));
            }
        }

        let mut map = FxHashMap::default();
        for (symbol, weight) in weights {
            if !seen.contains(&symbol) {
                return Err(PlanError::NotInUniverse(symbol));
            }
            if !weight.is_finite() || !(0.0..=1.0).contains(&weight) {
                return Err(PlanError::InvalidWeight { symbol, weight });
            }
            if map.insert(symbol, weight).is_some() {
                return Err(PlanError::DuplicateSymbol(symbol));
            }
        }

        Ok(Self {
            universe,
            weights: map,
        })
    }

    /// Universe symbols in configured order.
    pub fn universe(&self) -> &[Symbol] {
        &self.universe
    }

    /// Weight for `symbol`, `0.0` if unweighted.
    pub fn weight(&self, symbol: &Symbol) -> f64 {
        self.weights.get(symbol).copied().unwrap_or(0.0)
    }

    /// (symbol, weight) pairs for every universe symbol, in universe order.
    pub fn as_pairs(&self) -> Vec<(Symbol, f64)> {
        self.universe.iter().map(|&s| (s, self.weight(&s))).collect()
    }

    /// Sum of all weights (the invested fraction of equity).
    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }
}
