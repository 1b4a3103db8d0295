//! Risk limits.

use serde::{Deserialize, Serialize};

/// Limits a rebalance batch must satisfy before submission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Max notional of any single order, in account currency.
    pub max_notional_per_order: f64,
    /// Max total turnover as a fraction of equity (e.g., 0.10 = 10%).
    pub max_turnover_frac: f64,
    /// Max number of orders per run.
    pub max_orders: usize,
}

/// A limit that makes no sense (negative, NaN, infinite).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{field} must be >= 0 and finite, got {value}")]
pub struct RiskConfigError {
    pub field: &'static str,
    pub value: f64,
}

impl RiskLimits {
    /// Validate the limits.
    pub fn validate(&self) -> Result<(), RiskConfigError> {
        for (field, value) in [
            ("max_notional_per_order", self.max_notional_per_order),
            ("max_turnover_frac", self.max_turnover_frac),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RiskConfigError { field, value });
            }
        }
        Ok(())
    }
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_notional_per_order: 2_000.0,
            max_turnover_frac: 0.10,
            max_orders: 5,
        }
    }
}
