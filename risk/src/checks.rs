//! Individual risk check implementations.

use weightbook::{OrderPlan, turnover};

use crate::config::RiskLimits;
use crate::report::{RiskCheck, RiskReport, RiskStatus};

/// Returns `"<="` if the check passed, `">"` if it failed.
fn cmp_symbol(status: RiskStatus) -> &'static str {
    if status == RiskStatus::Pass {
        "<="
    } else {
        ">"
    }
}

/// Run all risk checks for a batch of planned orders.
///
/// Checks run in a fixed order (order count, per-order notional, total
/// turnover) and every violation is reported, not just the first. An empty
/// batch yields an empty report.
pub fn risk_checks(plans: &[OrderPlan], equity: f64, limits: &RiskLimits) -> RiskReport {
    let mut checks = Vec::new();
    if plans.is_empty() {
        return RiskReport { checks };
    }

    // 1. Order count
    let n = plans.len();
    if n > limits.max_orders {
        checks.push(RiskCheck {
            name: "Order count",
            status: RiskStatus::Fail,
            detail: format!("Too many orders: {n} > max_orders={}", limits.max_orders),
        });
    } else {
        checks.push(RiskCheck {
            name: "Order count",
            status: RiskStatus::Pass,
            detail: format!("{n} <= max_orders={}", limits.max_orders),
        });
    }

    // 2. Per-order notional, one failure per offending order
    let max_notional = limits.max_notional_per_order;
    let mut any_large = false;
    for p in plans.iter().filter(|p| p.notional > max_notional) {
        any_large = true;
        checks.push(RiskCheck {
            name: "Order notional",
            status: RiskStatus::Fail,
            detail: format!(
                "Order notional too large: {} {} qty={} notional={:.2} > max_notional={:?}",
                p.symbol,
                p.side.as_str(),
                p.quantity,
                p.notional,
                max_notional,
            ),
        });
    }
    if !any_large {
        let largest = plans.iter().map(|p| p.notional).fold(0.0_f64, f64::max);
        checks.push(RiskCheck {
            name: "Order notional",
            status: RiskStatus::Pass,
            detail: format!("largest {largest:.2} <= max_notional={max_notional:?}"),
        });
    }

    // 3. Turnover, meaningless without positive equity
    let total = turnover(plans);
    if equity > 0.0 {
        let ratio = total / equity;
        let status = if ratio > limits.max_turnover_frac {
            RiskStatus::Fail
        } else {
            RiskStatus::Pass
        };
        let prefix = if status == RiskStatus::Fail {
            "Total turnover too large: "
        } else {
            ""
        };
        checks.push(RiskCheck {
            name: "Turnover",
            status,
            detail: format!(
                "{prefix}{total:.2} / {equity:.2} = {:.2}% {} max_turnover={:.2}%",
                ratio * 100.0,
                cmp_symbol(status),
                limits.max_turnover_frac * 100.0,
            ),
        });
    } else {
        checks.push(RiskCheck {
            name: "Turnover",
            status: RiskStatus::Warn,
            detail: format!("skipped: equity {equity:.2} is not positive"),
        });
    }

    RiskReport { checks }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weightbook::{Side, Symbol};

    fn plan(sym: &str, side: Side, qty: u64, price: f64) -> OrderPlan {
        OrderPlan {
            symbol: Symbol::new(sym),
            side,
            quantity: qty,
            price,
            notional: qty as f64 * price,
        }
    }

    #[test]
    fn empty_batch_passes_with_no_checks() {
        let report = risk_checks(&[], 10_000.0, &RiskLimits::default());
        assert!(report.is_ok());
        assert!(report.checks.is_empty());
    }

    #[test]
    fn small_batch_passes() {
        let plans = [plan("SPY", Side::Buy, 1, 500.0)];
        let report = risk_checks(&plans, 100_000.0, &RiskLimits::default());
        assert!(report.is_ok(), "{report}");
        assert_eq!(report.checks.len(), 3);
        assert!(report.reasons().is_empty());
    }

    #[test]
    fn turnover_exactly_at_limit_passes() {
        // 1000 / 10_000 = 10%, not strictly greater
        let plans = [plan("SPY", Side::Buy, 2, 500.0)];
        let report = risk_checks(&plans, 10_000.0, &RiskLimits::default());
        assert!(report.is_ok(), "{report}");
    }

    #[test]
    fn notional_exactly_at_cap_passes() {
        let plans = [plan("SPY", Side::Buy, 4, 500.0)];
        let limits = RiskLimits {
            max_turnover_frac: 1.0,
            ..RiskLimits::default()
        };
        let report = risk_checks(&plans, 100_000.0, &limits);
        assert!(report.is_ok(), "{report}");
    }

    #[test]
    fn non_positive_equity_skips_turnover() {
        let plans = [plan("SPY", Side::Sell, 1, 100.0)];
        let report = risk_checks(&plans, 0.0, &RiskLimits::default());
        assert!(report.is_ok());
        assert!(report.has_warnings());
    }
}
