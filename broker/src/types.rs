//! Shared broker types: positions, accounts, orders.

use std::fmt;

use weightbook::{Side, Symbol};

/// Broker-level position.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub symbol: Symbol,
    /// Positive = long, negative = short. May be fractional.
    pub quantity: f64,
    pub avg_entry_price: f64,
    pub market_value: f64,
    pub unrealized_pl: f64,
}

/// Account summary from the broker.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_number: String,
    pub status: String,
    pub currency: String,
    pub cash: f64,
    pub buying_power: f64,
    pub equity: f64,
    /// Total portfolio value; the base for target-weight allocation.
    pub portfolio_value: f64,
}

/// How long an order stays working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeInForce {
    #[default]
    Day,
}

impl TimeInForce {
    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            TimeInForce::Day => "day",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Market order to submit to a broker.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: u64,
    pub time_in_force: TimeInForce,
}

impl OrderRequest {
    /// A DAY market order.
    pub fn market(symbol: Symbol, side: Side, quantity: u64) -> Self {
        Self {
            symbol,
            side,
            quantity,
            time_in_force: TimeInForce::Day,
        }
    }
}

/// Opaque order ID returned by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderState {
    New,
    Accepted,
    PendingNew,
    PartiallyFilled,
    Filled,
    DoneForDay,
    Canceled,
    Expired,
    Rejected,
    /// Any state this crate does not model explicitly.
    Other(String),
}

impl OrderState {
    /// Parse a lowercase wire status.
    pub fn parse(s: &str) -> Self {
        match s {
            "new" => OrderState::New,
            "accepted" => OrderState::Accepted,
            "pending_new" => OrderState::PendingNew,
            "partially_filled" => OrderState::PartiallyFilled,
            "filled" => OrderState::Filled,
            "done_for_day" => OrderState::DoneForDay,
            "canceled" => OrderState::Canceled,
            "expired" => OrderState::Expired,
            "rejected" => OrderState::Rejected,
            other => OrderState::Other(other.to_string()),
        }
    }

    /// Wire name of the state.
    pub fn as_str(&self) -> &str {
        match self {
            OrderState::New => "new",
            OrderState::Accepted => "accepted",
            OrderState::PendingNew => "pending_new",
            OrderState::PartiallyFilled => "partially_filled",
            OrderState::Filled => "filled",
            OrderState::DoneForDay => "done_for_day",
            OrderState::Canceled => "canceled",
            OrderState::Expired => "expired",
            OrderState::Rejected => "rejected",
            OrderState::Other(s) => s,
        }
    }

    /// True once the order can no longer fill.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderState::Filled | OrderState::Canceled | OrderState::Expired | OrderState::Rejected
        )
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An order as reported by the broker.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    /// Kept as a string: the broker may report instruments longer than a [`Symbol`].
    pub symbol: String,
    pub side: Side,
    pub quantity: f64,
    pub filled_quantity: f64,
    pub filled_avg_price: Option<f64>,
    pub status: OrderState,
    pub order_type: String,
    pub time_in_force: String,
    /// RFC 3339 creation time.
    pub created_at: String,
}
