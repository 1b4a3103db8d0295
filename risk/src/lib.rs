//! Pre-trade risk engine for weightbook.
//!
//! Validates a planned rebalance batch against configurable limits before
//! any order reaches the broker. A blocked batch is reported with one
//! human-readable reason per violation.

pub mod checks;
pub mod config;
pub mod report;

pub use checks::risk_checks;
pub use config::{RiskConfigError, RiskLimits};
pub use report::{RiskCheck, RiskReport, RiskStatus};

use weightbook::OrderPlan;

/// Pre-trade risk engine.
#[derive(Debug, Clone)]
pub struct RiskEngine {
    limits: RiskLimits,
}

impl RiskEngine {
    /// Create a new risk engine, rejecting invalid limits up front.
    pub fn new(limits: RiskLimits) -> Result<Self, RiskConfigError> {
        limits.validate()?;
        Ok(Self { limits })
    }

    /// Check a batch of planned orders (e.g., a full rebalance).
    pub fn check(&self, plans: &[OrderPlan], equity: f64) -> RiskReport {
        risk_checks(plans, equity, &self.limits)
    }
}
