use weightbook::{OrderPlan, Side, Symbol};
use weightbook_risk::{RiskEngine, RiskLimits, RiskStatus};

fn plan(sym: &str, side: Side, qty: u64, price: f64) -> OrderPlan {
    OrderPlan {
        symbol: Symbol::new(sym),
        side,
        quantity: qty,
        price,
        notional: qty as f64 * price,
    }
}

fn engine() -> RiskEngine {
    RiskEngine::new(RiskLimits::default()).unwrap()
}

#[test]
fn invalid_limits_rejected() {
    let limits = RiskLimits {
        max_notional_per_order: -1.0,
        ..RiskLimits::default()
    };
    assert!(RiskEngine::new(limits).is_err());
}

#[test]
fn empty_plan_is_ok() {
    let report = engine().check(&[], 50_000.0);
    assert!(report.is_ok());
    assert!(report.reasons().is_empty());
}

#[test]
fn too_many_large_orders_reports_every_violation() {
    let plans: Vec<OrderPlan> = ["A", "B", "C", "D", "E", "F"]
        .iter()
        .map(|s| plan(s, Side::Buy, 10, 250.0))
        .collect();
    let report = engine().check(&plans, 1_000_000.0);
    assert!(!report.is_ok());

    let reasons = report.reasons();
    assert_eq!(reasons.len(), 7, "{reasons:?}");
    assert_eq!(reasons[0], "Too many orders: 6 > max_orders=5");
    assert_eq!(
        reasons[1],
        "Order notional too large: A buy qty=10 notional=2500.00 > max_notional=2000.0"
    );
    assert!(reasons[6].starts_with("Order notional too large: F buy"));
}

#[test]
fn turnover_over_limit_blocks() {
    let plans = [
        plan("SPY", Side::Buy, 1, 60.0),
        plan("QQQ", Side::Sell, 1, 50.0),
    ];
    let report = engine().check(&plans, 1_000.0);
    assert!(!report.is_ok());
    let reasons = report.reasons();
    assert_eq!(reasons.len(), 1);
    assert_eq!(
        reasons[0],
        "Total turnover too large: 110.00 / 1000.00 = 11.00% > max_turnover=10.00%"
    );
}

#[test]
fn turnover_uses_absolute_notional_of_sells() {
    let plans = [plan("SPY", Side::Sell, 3, 50.0)];
    let report = engine().check(&plans, 1_000.0);
    assert!(report.reasons()[0].contains("150.00 / 1000.00 = 15.00%"));
}

#[test]
fn checks_are_listed_in_fixed_order() {
    let plans = [plan("SPY", Side::Buy, 1, 100.0)];
    let report = engine().check(&plans, 100_000.0);
    let names: Vec<&str> = report.checks.iter().map(|c| c.name).collect();
    assert_eq!(names, ["Order count", "Order notional", "Turnover"]);
    assert!(report.checks.iter().all(|c| c.status == RiskStatus::Pass));
}

#[test]
fn report_display_lists_statuses() {
    let plans = [plan("SPY", Side::Buy, 5, 500.0)];
    let text = engine().check(&plans, 100_000.0).to_string();
    assert!(text.starts_with("RISK CHECKS:"));
    assert!(text.contains("[FAIL] Order notional: Order notional too large: SPY buy qty=5"));
    assert!(text.contains("[PASS] Order count"));
}

#[test]
fn notional_limit_prints_as_a_float() {
    let limits = RiskLimits {
        max_notional_per_order: 1_500.5,
        ..RiskLimits::default()
    };
    let custom_engine = RiskEngine::new(limits).unwrap();

    let blocked = custom_engine.check(&[plan("SPY", Side::Sell, 4, 400.0)], 1_000_000.0);
    assert_eq!(
        blocked.reasons()[0],
        "Order notional too large: SPY sell qty=4 notional=1600.00 > max_notional=1500.5"
    );

    let passed = engine().check(&[plan("SPY", Side::Buy, 1, 100.0)], 1_000_000.0);
    assert_eq!(passed.checks[1].detail, "largest 100.00 <= max_notional=2000.0");
}
