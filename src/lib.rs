//! # weightbook
//!
//! Target-weight portfolio planning: turn an allocation (symbol → fraction of
//! equity) into whole-share market-order plans.
//!
//! ## Quick Start
//!
//! ```
//! use weightbook::{build_plan, compute_target_quantity, Side, Symbol, TargetWeights};
//!
//! let spy = Symbol::new("SPY");
//! let qqq = Symbol::new("QQQ");
//! let weights = TargetWeights::new(vec![spy, qqq], [(spy, 0.8), (qqq, 0.2)]).unwrap();
//!
//! let prices = [(spy, 500.0), (qqq, 400.0)];
//! let targets = compute_target_quantity(10_000.0, &weights.as_pairs(), &prices).unwrap();
//! assert_eq!(targets, vec![(spy, 16), (qqq, 5)]);
//!
//! // Already holding 10 SPY: buy 6 more, buy 5 QQQ.
//! let plans = build_plan(weights.universe(), &[(spy, 10.0)], &prices, &targets, 20.0).unwrap();
//! assert_eq!(plans.len(), 2);
//! assert_eq!(plans[0].side, Side::Buy);
//! assert_eq!(plans[0].quantity, 6);
//! assert_eq!(plans[0].notional, 3_000.0);
//! ```
//!
//! ## Rounding
//!
//! | step | rule |
//! |------|------|
//! | target quantity | `floor(equity * weight / price)`, 0 for weight `<= 0` |
//! | order delta | `trunc(target - current)`, toward zero; sells never exceed holdings |
//! | filter | skip zero deltas and notionals below the minimum |

mod error;
pub mod plan;
mod side;
mod symbol;
mod weights;

pub use error::PlanError;
pub use plan::{build_plan, compute_target_quantity, turnover, OrderPlan};
pub use side::Side;
pub use symbol::{MAX_SYMBOL_LEN, Symbol};
pub use weights::TargetWeights;
