//! CURRENT→TARGET order planning.
//!
//! Converts target weights into whole-share target quantities, then diffs
//! those against current holdings to produce market-order plans. Planning is
//! pure: the same inputs always give the same plans, in universe order.

use rustc_hash::FxHashMap;

use crate::{PlanError, Side, Symbol};

/// One planned order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderPlan {
    pub symbol: Symbol,
    pub side: Side,
    /// Whole shares, always > 0.
    pub quantity: u64,
    /// Latest trade price used for sizing.
    pub price: f64,
    /// `quantity * price`.
    pub notional: f64,
}

/// Look up a usable (finite, positive) price.
fn price_of(prices: &FxHashMap<Symbol, f64>, symbol: Symbol) -> Result<f64, PlanError> {
    let price = *prices.get(&symbol).ok_or(PlanError::MissingPrice(symbol))?;
    if !price.is_finite() || price <= 0.0 {
        return Err(PlanError::InvalidPrice { symbol, price });
    }
    Ok(price)
}

/// Whole-share target quantity per symbol.
///
/// Symbols with weight `<= 0` get a target of 0 and need no price. Otherwise
/// the target is `floor(equity * weight / price)`, never below 0. A missing
/// or unusable price for a weighted symbol is an error.
///
/// Output follows the order of `weights`.
pub fn compute_target_quantity(
    equity: f64,
    weights: &[(Symbol, f64)],
    prices: &[(Symbol, f64)],
) -> Result<Vec<(Symbol, i64)>, PlanError> {
    if !equity.is_finite() {
        return Err(PlanError::InvalidEquity(equity));
    }
    let price_map: FxHashMap<Symbol, f64> = prices.iter().copied().collect();

    weights
        .iter()
        .map(|&(sym, weight)| {
            if weight <= 0.0 || weight.is_nan() {
                return Ok((sym, 0));
            }
            let price = price_of(&price_map, sym)?;
            let shares = (equity * weight / price).floor().max(0.0);
            Ok((sym, shares as i64))
        })
        .collect()
}

/// Build order plans that move current holdings to the target quantities.
///
/// For each universe symbol, in order: `delta = trunc(target - current)`.
/// Truncating toward zero means a sell never exceeds a fractional holding.
/// Symbols with no entry in `positions` or `target_qty` count as 0. Plans
/// with a zero delta or a notional below `min_notional` are skipped.
pub fn build_plan(
    universe: &[Symbol],
    positions: &[(Symbol, f64)],
    prices: &[(Symbol, f64)],
    target_qty: &[(Symbol, i64)],
    min_notional: f64,
) -> Result<Vec<OrderPlan>, PlanError> {
    let price_map: FxHashMap<Symbol, f64> = prices.iter().copied().collect();
    let current: FxHashMap<Symbol, f64> = positions.iter().copied().collect();
    let target: FxHashMap<Symbol, i64> = target_qty.iter().copied().collect();

    let mut plans = Vec::new();

    for &sym in universe {
        let now_qty = current.get(&sym).copied().unwrap_or(0.0);
        let tgt_qty = target.get(&sym).copied().unwrap_or(0);
        let delta = (tgt_qty as f64 - now_qty).trunc() as i64;

        if delta == 0 {
            continue;
        }

        let price = price_of(&price_map, sym)?;
        let quantity = delta.unsigned_abs();
        let notional = quantity as f64 * price;
        if notional < min_notional {
            continue;
        }

        plans.push(OrderPlan {
            symbol: sym,
            side: Side::from_delta(delta),
            quantity,
            price,
            notional,
        });
    }

    Ok(plans)
}

/// Total notional of a set of plans.
pub fn turnover(plans: &[OrderPlan]) -> f64 {
    plans.iter().map(|p| p.notional).sum()
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
    fn target_is_floor_of_dollars_over_price() {
        let targets =
            compute_target_quantity(10_000.0, &[(spy(), 0.8)], &[(spy(), 500.0)]).unwrap();
        assert_eq!(targets, vec![(spy(), 16)]);

        let targets =
            compute_target_quantity(10_000.0, &[(qqq(), 0.2)], &[(qqq(), 430.0)]).unwrap();
        // 2000 / 430 = 4.65
        assert_eq!(targets, vec![(qqq(), 4)]);
    }

    #[test]
    fn zero_weight_needs_no_price() {
        let targets = compute_target_quantity(10_000.0, &[(gld(), 0.0)], &[]).unwrap();
        assert_eq!(targets, vec![(gld(), 0)]);
    }

    #[test]
    fn missing_price_for_weighted_symbol_fails() {
        let err = compute_target_quantity(10_000.0, &[(spy(), 0.5)], &[]).unwrap_err();
        assert_eq!(err, PlanError::MissingPrice(spy()));
    }

    #[test]
    fn zero_price_fails() {
        let err =
            compute_target_quantity(10_000.0, &[(spy(), 0.5)], &[(spy(), 0.0)]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidPrice { .. }));
    }

    #[test]
    fn non_positive_equity_targets_nothing() {
        let targets =
            compute_target_quantity(-500.0, &[(spy(), 0.5)], &[(spy(), 100.0)]).unwrap();
        assert_eq!(targets, vec![(spy(), 0)]);
    }

    #[test]
    fn buy_and_sell_in_universe_order() {
        let universe = [spy(), qqq(), gld()];
        let positions = [(qqq(), 10.0), (gld(), 3.0)];
        let prices = [(spy(), 500.0), (qqq(), 400.0), (gld(), 180.0)];
        let targets = [(spy(), 16), (qqq(), 5), (gld(), 0)];

        let plans = build_plan(&universe, &positions, &prices, &targets, 20.0).unwrap();

        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0].symbol, spy());
        assert_eq!(plans[0].side, Side::Buy);
        assert_eq!(plans[0].quantity, 16);
        assert_eq!(plans[0].notional, 8_000.0);

        assert_eq!(plans[1].symbol, qqq());
        assert_eq!(plans[1].side, Side::Sell);
        assert_eq!(plans[1].quantity, 5);

        assert_eq!(plans[2].symbol, gld());
        assert_eq!(plans[2].side, Side::Sell);
        assert_eq!(plans[2].quantity, 3);
        assert_eq!(plans[2].notional, 540.0);
    }

    #[test]
    fn skips_below_min_notional() {
        let plans = build_plan(
            &[spy()],
            &[(spy(), 15.0)],
            &[(spy(), 19.99)],
            &[(spy(), 16)],
            20.0,
        )
        .unwrap();
        assert!(plans.is_empty());
    }

    #[test]
    fn min_notional_is_inclusive() {
        let plans =
            build_plan(&[spy()], &[], &[(spy(), 20.0)], &[(spy(), 1)], 20.0).unwrap();
        assert_eq!(plans.len(), 1);
    }

    #[test]
    fn fractional_holdings_truncate_toward_zero() {
        // 16 - 15.4 = 0.6 -> 0
        let plans = build_plan(
            &[spy()],
            &[(spy(), 15.4)],
            &[(spy(), 500.0)],
            &[(spy(), 16)],
            0.0,
        )
        .unwrap();
        assert!(plans.is_empty());

        // 16 - 14.6 = 1.4 -> 1
        let plans = build_plan(
            &[spy()],
            &[(spy(), 14.6)],
            &[(spy(), 500.0)],
            &[(spy(), 16)],
            0.0,
        )
        .unwrap();
        assert_eq!(plans[0].quantity, 1);
        assert_eq!(plans[0].side, Side::Buy);
    }

    #[test]
    fn liquidating_fractional_holding_never_oversells() {
        let plans =
            build_plan(&[spy()], &[(spy(), 2.5)], &[(spy(), 100.0)], &[(spy(), 0)], 0.0).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].side, Side::Sell);
        assert_eq!(plans[0].quantity, 2);

        // less than one share held: nothing to sell
        let plans =
            build_plan(&[spy()], &[(spy(), 0.6)], &[(spy(), 100.0)], &[(spy(), 0)], 0.0).unwrap();
        assert!(plans.is_empty());
    }

    #[test]
    fn symbols_outside_universe_are_ignored() {
        let plans = build_plan(
            &[spy()],
            &[(Symbol::new("AAPL"), 100.0)],
            &[(spy(), 500.0)],
            &[(spy(), 0)],
            0.0,
        )
        .unwrap();
        assert!(plans.is_empty());
    }

    #[test]
    fn missing_price_with_nonzero_delta_fails() {
        let err = build_plan(&[spy()], &[], &[], &[(spy(), 3)], 0.0).unwrap_err();
        assert_eq!(err, PlanError::MissingPrice(spy()));
    }

    #[test]
    fn turnover_sums_notionals() {
        let plans = build_plan(
            &[spy(), qqq()],
            &[],
            &[(spy(), 60.0), (qqq(), 50.0)],
            &[(spy(), 1), (qqq(), 1)],
            0.0,
        )
        .unwrap();
        assert_eq!(turnover(&plans), 110.0);
        assert_eq!(turnover(&[]), 0.0);
    }
}
