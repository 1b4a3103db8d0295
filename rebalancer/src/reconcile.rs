//! Post-submission reconciliation: compare held quantities vs targets.

use rustc_hash::FxHashMap;
use serde::Serialize;
use weightbook::Symbol;

/// Reconciliation report, one entry per universe symbol.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    pub entries: Vec<ReconcileEntry>,
}

/// One symbol's reconciliation entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileEntry {
    pub symbol: Symbol,
    pub target_qty: i64,
    pub actual_qty: f64,
    /// `actual_qty - target_qty`.
    pub diff: f64,
}

impl ReconcileReport {
    /// True if every symbol holds exactly its target.
    pub fn on_target(&self) -> bool {
        self.entries.iter().all(|e| e.diff == 0.0)
    }

    /// Entries that are off target.
    pub fn mismatches(&self) -> impl Iterator<Item = &ReconcileEntry> {
        self.entries.iter().filter(|e| e.diff != 0.0)
    }
}

/// Compare held positions against target quantities, in universe order.
///
/// Missing targets and missing positions both count as zero. Accepted orders
/// that have not filled yet show up as differences.
pub fn reconcile(
    universe: &[Symbol],
    target_qty: &[(Symbol, i64)],
    positions: &[(Symbol, f64)],
) -> ReconcileReport {
    let targets: FxHashMap<Symbol, i64> = target_qty.iter().copied().collect();
    let actual: FxHashMap<Symbol, f64> = positions.iter().copied().collect();

    let entries = universe
        .iter()
        .map(|&symbol| {
            let target_qty = targets.get(&symbol).copied().unwrap_or(0);
            let actual_qty = actual.get(&symbol).copied().unwrap_or(0.0);
            ReconcileEntry {
                symbol,
                target_qty,
                actual_qty,
                diff: actual_qty - target_qty as f64,
            }
        })
        .collect();

    ReconcileReport { entries }
}

impl std::fmt::Display for ReconcileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "RECONCILIATION:")?;
        writeln!(
            f,
            "  {:8} {:>10} {:>10} {:>10}",
            "Symbol", "Target", "Actual", "Diff"
        )?;
        for e in &self.entries {
            writeln!(
                f,
                "  {:8} {:>10} {:>10} {:>+10}",
                e.symbol, e.target_qty, e.actual_qty, e.diff,
            )?;
        }
        if self.on_target() {
            writeln!(f, "\n  All positions on target.")?;
        } else {
            writeln!(f, "\n  {} symbol(s) off target.", self.mismatches().count())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spy() -> Symbol {
        Symbol::new("SPY")
    }
    fn qqq() -> Symbol {
        Symbol::new("QQQ")
    }
    fn gld() -> Symbol {
        Symbol::new("GLD")
    }

    #[test]
    fn perfect_match() {
        let report = reconcile(
            &[spy(), qqq()],
            &[(spy(), 16), (qqq(), 5)],
            &[(spy(), 16.0), (qqq(), 5.0)],
        );
        assert!(report.on_target());
        assert_eq!(report.mismatches().count(), 0);
    }

    #[test]
    fn missing_position() {
        let report = reconcile(&[spy()], &[(spy(), 16)], &[]);
        assert!(!report.on_target());
        assert_eq!(report.entries[0].actual_qty, 0.0);
        assert_eq!(report.entries[0].diff, -16.0);
    }

    #[test]
    fn extra_position_in_universe() {
        let report = reconcile(&[spy(), gld()], &[(spy(), 16)], &[(spy(), 16.0), (gld(), 3.0)]);
        let gld_entry = &report.entries[1];
        assert_eq!(gld_entry.symbol, gld());
        assert_eq!(gld_entry.target_qty, 0);
        assert_eq!(gld_entry.diff, 3.0);
    }

    #[test]
    fn positions_outside_universe_ignored() {
        let report = reconcile(&[spy()], &[(spy(), 1)], &[(spy(), 1.0), (qqq(), 9.0)]);
        assert_eq!(report.entries.len(), 1);
        assert!(report.on_target());
    }

    #[test]
    fn display_format() {
        let report = reconcile(&[spy()], &[(spy(), 16)], &[(spy(), 10.0)]);
        let s = format!("{report}");
        assert!(s.contains("SPY"));
        assert!(s.contains("-6"));
        assert!(s.contains("1 symbol(s) off target"));
    }
}
