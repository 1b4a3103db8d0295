//! Execution orchestrator: account → guard → prices → plan → risk → submit.
//!
//! This is the main workflow that ties together all components. Every run
//! that gets past the account fetch leaves exactly one journal record.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use weightbook::{OrderPlan, Side, Symbol, TargetWeights, build_plan, compute_target_quantity};
use weightbook_broker::{Broker, OrderRequest};
use weightbook_risk::{RiskEngine, RiskLimits};

use crate::error::{Error, Result};
use crate::journal::{Journal, RunMode, RunRecord};
use crate::reconcile;
use crate::stamp::RunStampStore;

/// Options for a rebalance run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Place orders; otherwise only plan and journal.
    pub submit: bool,
    /// Skip the once-per-UTC-day guard.
    pub allow_multi_run_today: bool,
    /// Orders below this notional are dropped from the plan.
    pub min_notional: f64,
    pub limits: RiskLimits,
    /// Recorded in the run stamp.
    pub paper: bool,
}

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Plan computed and passed risk checks; nothing submitted.
    DryRun { plans: Vec<OrderPlan> },
    /// A submission was already stamped for this UTC day.
    AlreadySubmitted { utc_day: NaiveDate },
    /// Risk checks failed; nothing submitted.
    RiskBlocked { reasons: Vec<String> },
    /// Every planned order was accepted.
    Submitted(SubmissionReport),
}

impl RunOutcome {
    /// Process exit code for this outcome: `2` for a risk block, `0` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::RiskBlocked { .. } => 2,
            _ => 0,
        }
    }
}

/// One accepted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: u64,
    pub order_id: String,
    pub status: String,
}

/// The order that stopped a submission pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedSubmission {
    pub plan: OrderPlan,
    pub error: String,
}

/// Result of a submission pass.
///
/// Submission stops at the first failure: `submitted` holds the orders the
/// broker accepted before it, `failed` the order that was refused, and
/// `skipped` the orders never attempted. Accepted orders stay live.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub submitted: Vec<SubmissionReceipt>,
    pub failed: Option<FailedSubmission>,
    pub skipped: Vec<OrderPlan>,
}

impl SubmissionReport {
    /// True if every planned order was accepted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_none() && self.skipped.is_empty()
    }

    /// Number of plans the pass covered.
    pub fn total(&self) -> usize {
        self.submitted.len() + usize::from(self.failed.is_some()) + self.skipped.len()
    }
}

impl std::fmt::Display for SubmissionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} orders accepted", self.submitted.len(), self.total())?;
        if let Some(failed) = &self.failed {
            write!(
                f,
                "; {} {} qty={} failed: {}",
                failed.plan.symbol,
                failed.plan.side.as_str(),
                failed.plan.quantity,
                failed.error
            )?;
        }
        if !self.skipped.is_empty() {
            write!(f, "; {} not attempted", self.skipped.len())?;
        }
        Ok(())
    }
}

/// Submit each plan as a DAY market order, in plan order.
///
/// Stops at the first failure; see [`SubmissionReport`].
pub fn submit_orders(broker: &dyn Broker, plans: &[OrderPlan]) -> SubmissionReport {
    let mut report = SubmissionReport::default();

    for (i, plan) in plans.iter().enumerate() {
        let request = OrderRequest::market(plan.symbol, plan.side, plan.quantity);
        match broker.submit_order(&request) {
            Ok(order) => {
                info!(
                    "Submitted {} {} qty={} id={} status={}",
                    plan.symbol,
                    plan.side.as_str(),
                    plan.quantity,
                    order.id,
                    order.status
                );
                report.submitted.push(SubmissionReceipt {
                    symbol: plan.symbol,
                    side: plan.side,
                    quantity: plan.quantity,
                    order_id: order.id.0,
                    status: order.status.as_str().to_string(),
                });
            }
            Err(e) => {
                error!(
                    "Order failed for {} {} qty={}: {e}",
                    plan.symbol,
                    plan.side.as_str(),
                    plan.quantity
                );
                report.failed = Some(FailedSubmission {
                    plan: plan.clone(),
                    error: e.to_string(),
                });
                report.skipped = plans[i + 1..].to_vec();
                if !report.skipped.is_empty() {
                    warn!("Stopping submission; {} order(s) not attempted", report.skipped.len());
                }
                break;
            }
        }
    }

    report
}

/// Execute one rebalance run.
///
/// Dry runs, guard and risk blocks, and fully accepted submissions return
/// `Ok`. Partially accepted submissions return [`Error::PartialSubmission`]
/// after journaling. The run stamp is written only when every order was
/// accepted, before the journal record.
pub fn run(
    broker: &dyn Broker,
    weights: &TargetWeights,
    opts: &RunOptions,
    stamps: &RunStampStore,
    journal: &mut Journal,
    now: DateTime<Utc>,
) -> Result<RunOutcome> {
    let engine = RiskEngine::new(opts.limits)?;
    if !opts.min_notional.is_finite() || opts.min_notional < 0.0 {
        return Err(Error::Config(format!(
            "min_notional must be >= 0, got {}",
            opts.min_notional
        )));
    }
    let mode = RunMode::from_submit(opts.submit);

    // 1. Account
    let account = broker.account()?;
    let equity = account.portfolio_value;
    info!("Account {} ({}): equity ${equity:.2}", account.account_number, account.status);

    // 2. Once-per-day guard, before any price is fetched
    let utc_day = now.date_naive();
    if opts.submit && !opts.allow_multi_run_today && stamps.submitted_on(utc_day) {
        let reason = format!(
            "Already submitted today (UTC day={utc_day}). Use --allow-multi-run-today to override."
        );
        println!("[BLOCKED] {reason}");
        warn!("{reason}");
        journal.append(&RunRecord::new(now, mode, equity).blocked(vec![reason]))?;
        return Ok(RunOutcome::AlreadySubmitted { utc_day });
    }

    // 3. Prices for the whole universe
    let universe = weights.universe();
    let mut prices = Vec::with_capacity(universe.len());
    for &symbol in universe {
        prices.push((symbol, broker.latest_price(&symbol)?));
    }

    // 4. Positions
    let positions: Vec<(Symbol, f64)> = broker
        .positions()?
        .into_iter()
        .map(|p| (p.symbol, p.quantity))
        .collect();

    // 5. Targets and plan
    let target_qty = compute_target_quantity(equity, &weights.as_pairs(), &prices)?;
    let plans = build_plan(universe, &positions, &prices, &target_qty, opts.min_notional)?;
    info!("Target weights invest {:.2}% of equity", weights.total() * 100.0);

    let mut record = RunRecord::new(now, mode, equity);
    record.plans = plans.clone();
    record.positions = position_map(universe, &positions);
    record.target_qty = target_qty
        .iter()
        .map(|(s, q)| (s.as_str().to_string(), *q))
        .collect();

    display_summary(now, equity, universe, &record.positions, &target_qty);
    display_plan(&plans, equity);

    // 6. Risk checks
    let report = engine.check(&plans, equity);
    print!("\n{report}");
    if !report.is_ok() {
        let reasons = report.reasons();
        println!("\n[BLOCKED BY RISK CHECKS]");
        for r in &reasons {
            println!("- {r}");
        }
        journal.append(&record.blocked(reasons.clone()))?;
        return Ok(RunOutcome::RiskBlocked { reasons });
    }

    // 7. Dry run stops here
    if !opts.submit {
        println!("\n[DRY RUN] No orders submitted. Use --submit to place orders.");
        journal.append(&record)?;
        return Ok(RunOutcome::DryRun { plans });
    }

    // 8. Submit
    let pending = stamps.begin(now, opts.paper);
    println!("\n--- SUBMIT ---");
    let submission = submit_orders(broker, &plans);
    display_submission(&submission);

    // Orders are live now; the stamp must not depend on the journal write.
    if submission.is_complete() {
        pending.commit()?;
    } else {
        warn!("Run stamp not written: submission incomplete");
    }

    record.submitted = submission.submitted.clone();
    record.failure = submission.failed.clone();
    record.skipped = submission.skipped.clone();
    journal.append(&record)?;

    // 9. Reconcile
    reconcile_after_submit(broker, universe, &target_qty);
    println!("\nDone. Journal written to: {}", journal.path().display());

    if submission.is_complete() {
        Ok(RunOutcome::Submitted(submission))
    } else {
        Err(Error::PartialSubmission(Box::new(submission)))
    }
}

/// Re-fetch positions and print how far they are from target.
fn reconcile_after_submit(broker: &dyn Broker, universe: &[Symbol], target_qty: &[(Symbol, i64)]) {
    info!("Running post-submission reconciliation...");
    match broker.positions() {
        Ok(positions) => {
            let positions: Vec<(Symbol, f64)> =
                positions.into_iter().map(|p| (p.symbol, p.quantity)).collect();
            let report = reconcile::reconcile(universe, target_qty, &positions);
            print!("\n{report}");
        }
        Err(e) => warn!("Reconciliation skipped: cannot fetch positions: {e}"),
    }
}

/// Held quantities keyed by symbol, with every universe symbol present.
fn position_map(universe: &[Symbol], positions: &[(Symbol, f64)]) -> BTreeMap<String, f64> {
    let mut map: BTreeMap<String, f64> = universe
        .iter()
        .map(|s| (s.as_str().to_string(), 0.0))
        .collect();
    for (s, q) in positions {
        map.insert(s.as_str().to_string(), *q);
    }
    map
}

// === Display ===

fn display_summary(
    now: DateTime<Utc>,
    equity: f64,
    universe: &[Symbol],
    positions: &BTreeMap<String, f64>,
    target_qty: &[(Symbol, i64)],
) {
    println!("UTC now: {}", now.to_rfc3339());
    println!("equity (portfolio_value): {equity:.2}");

    println!("\n--- CURRENT POSITIONS ---");
    for sym in universe {
        let qty = positions.get(sym.as_str()).copied().unwrap_or(0.0);
        println!("  {sym:8} qty={qty}");
    }

    println!("\n--- TARGET QTY ---");
    for (sym, qty) in target_qty {
        println!("  {sym:8} target_qty={qty}");
    }
}

fn display_plan(plans: &[OrderPlan], equity: f64) {
    println!("\n--- PLAN ---");
    if plans.is_empty() {
        println!("No orders required.");
        return;
    }

    println!(
        "  {:>3}  {:8} {:4} {:>8} {:>12} {:>12}",
        "#", "Symbol", "Side", "Qty", "Price", "Notional"
    );
    for (i, p) in plans.iter().enumerate() {
        println!(
            "  {:>3}  {:8} {:4} {:>8} ${:>11.4} ${:>11.2}",
            i + 1,
            p.symbol,
            p.side,
            p.quantity,
            p.price,
            p.notional,
        );
    }

    let total = weightbook::turnover(plans);
    println!("TOTAL_TURNOVER: {total:.2} USD");
    if equity > 0.0 {
        println!("TURNOVER / EQUITY: {:.2}%", total / equity * 100.0);
    }
}

fn display_submission(report: &SubmissionReport) {
    for r in &report.submitted {
        println!(
            "submitted: {} {} qty={} | id: {} | status: {}",
            r.symbol,
            r.side.as_str(),
            r.quantity,
            r.order_id,
            r.status
        );
    }
    if let Some(failed) = &report.failed {
        println!(
            "FAILED: {} {} qty={} | {}",
            failed.plan.symbol,
            failed.plan.side.as_str(),
            failed.plan.quantity,
            failed.error
        );
    }
    for p in &report.skipped {
        println!("skipped: {} {} qty={}", p.symbol, p.side.as_str(), p.quantity);
    }
}
