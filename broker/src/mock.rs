//! Mock broker for testing: implements the `Broker` trait with configurable behavior.
//!
//! Use this in integration tests to simulate broker responses without network calls.
//!
//! ```
//! use weightbook::{Side, Symbol};
//! use weightbook_broker::mock::{FillMode, MockBroker};
//! use weightbook_broker::{Broker, OrderRequest};
//!
//! let spy = Symbol::new("SPY");
//! let broker = MockBroker::builder()
//!     .fill_mode(FillMode::Fill)
//!     .with_position(spy, 10.0, 480.0)
//!     .with_price(spy, 500.0)
//!     .with_equity(100_000.0)
//!     .build();
//!
//! broker.submit_order(&OrderRequest::market(spy, Side::Buy, 5)).unwrap();
//! assert_eq!(broker.positions().unwrap()[0].quantity, 15.0);
//! ```

use std::sync::{Mutex, MutexGuard};

use weightbook::{Side, Symbol};

use crate::error::BrokerError;
use crate::types::*;
use crate::Broker;

/// How the mock broker handles submitted orders.
#[derive(Clone, Debug, PartialEq)]
pub enum FillMode {
    /// Orders are accepted and left working; positions do not change.
    Accept,
    /// Orders are filled immediately at the configured price; positions change.
    Fill,
    /// All orders are rejected.
    Reject,
    /// Submissions are accepted until the n-th (1-based), which and every
    /// later one is rejected.
    RejectFrom(usize),
}

/// Builder for `MockBroker`.
pub struct MockBrokerBuilder {
    fill_mode: FillMode,
    positions: Vec<Position>,
    prices: Vec<(Symbol, f64)>,
    equity: f64,
}

impl MockBrokerBuilder {
    pub fn fill_mode(mut self, mode: FillMode) -> Self {
        self.fill_mode = mode;
        self
    }

    pub fn with_position(mut self, symbol: Symbol, quantity: f64, avg_entry_price: f64) -> Self {
        self.positions.push(Position {
            symbol,
            quantity,
            avg_entry_price,
            market_value: quantity * avg_entry_price,
            unrealized_pl: 0.0,
        });
        self
    }

    pub fn with_price(mut self, symbol: Symbol, price: f64) -> Self {
        self.prices.push((symbol, price));
        self
    }

    pub fn with_equity(mut self, equity: f64) -> Self {
        self.equity = equity;
        self
    }

    pub fn build(self) -> MockBroker {
        MockBroker {
            fill_mode: self.fill_mode,
            prices: self.prices,
            equity: self.equity,
            state: Mutex::new(MockState {
                positions: self.positions,
                orders: Vec::new(),
                submitted: Vec::new(),
                price_requests: 0,
            }),
        }
    }
}

struct MockState {
    positions: Vec<Position>,
    orders: Vec<Order>,
    submitted: Vec<OrderRequest>,
    price_requests: usize,
}

/// A mock broker that records submitted orders and returns configurable responses.
pub struct MockBroker {
    fill_mode: FillMode,
    prices: Vec<(Symbol, f64)>,
    equity: f64,
    state: Mutex<MockState>,
}

impl MockBroker {
    pub fn builder() -> MockBrokerBuilder {
        MockBrokerBuilder {
            fill_mode: FillMode::Accept,
            positions: Vec::new(),
            prices: Vec::new(),
            equity: 100_000.0,
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Every order submission attempt, accepted or not (for assertion in tests).
    pub fn submitted_orders(&self) -> Vec<OrderRequest> {
        self.state().submitted.clone()
    }

    /// Number of `latest_price` calls made so far.
    pub fn price_requests(&self) -> usize {
        self.state().price_requests
    }

    fn price_of(&self, symbol: &Symbol) -> Option<f64> {
        self.prices
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, p)| *p)
    }
}

impl Broker for MockBroker {
    fn account(&self) -> Result<Account, BrokerError> {
        Ok(Account {
            account_number: "MOCK0001".into(),
            status: "ACTIVE".into(),
            currency: "USD".into(),
            cash: self.equity,
            buying_power: self.equity,
            equity: self.equity,
            portfolio_value: self.equity,
        })
    }

    fn positions(&self) -> Result<Vec<Position>, BrokerError> {
        Ok(self.state().positions.clone())
    }

    fn latest_price(&self, symbol: &Symbol) -> Result<f64, BrokerError> {
        self.state().price_requests += 1;
        self.price_of(symbol)
            .ok_or_else(|| BrokerError::InvalidSymbol(symbol.as_str().to_string()))
    }

    fn submit_order(&self, order: &OrderRequest) -> Result<Order, BrokerError> {
        let mut state = self.state();
        state.submitted.push(order.clone());
        let attempt = state.submitted.len();

        let rejected = match self.fill_mode {
            FillMode::Reject => true,
            FillMode::RejectFrom(n) => attempt >= n,
            FillMode::Accept | FillMode::Fill => false,
        };
        if rejected {
            return Err(BrokerError::Rejected {
                status: 403,
                message: "mock: order rejected".into(),
            });
        }

        let price = self.price_of(&order.symbol);
        let filled = self.fill_mode == FillMode::Fill;
        if filled {
            let signed = match order.side {
                Side::Buy => order.quantity as f64,
                Side::Sell => -(order.quantity as f64),
            };
            match state.positions.iter_mut().find(|p| p.symbol == order.symbol) {
                Some(pos) => pos.quantity += signed,
                None => state.positions.push(Position {
                    symbol: order.symbol,
                    quantity: signed,
                    avg_entry_price: price.unwrap_or(0.0),
                    market_value: signed * price.unwrap_or(0.0),
                    unrealized_pl: 0.0,
                }),
            }
            state.positions.retain(|p| p.quantity != 0.0);
        }

        let result = Order {
            id: OrderId(format!("mock-{attempt}")),
            symbol: order.symbol.as_str().to_string(),
            side: order.side,
            quantity: order.quantity as f64,
            filled_quantity: if filled { order.quantity as f64 } else { 0.0 },
            filled_avg_price: if filled { price } else { None },
            status: if filled {
                OrderState::Filled
            } else {
                OrderState::Accepted
            },
            order_type: "market".into(),
            time_in_force: order.time_in_force.as_str().into(),
            created_at: "2026-01-02T15:30:00Z".into(),
        };
        state.orders.push(result.clone());
        Ok(result)
    }

    fn order(&self, id: &OrderId) -> Result<Order, BrokerError> {
        self.state()
            .orders
            .iter()
            .find(|o| &o.id == id)
            .cloned()
            .ok_or_else(|| BrokerError::NotFound(format!("order {id}")))
    }

    fn orders(&self, limit: usize) -> Result<Vec<Order>, BrokerError> {
        Ok(self.state().orders.iter().rev().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spy() -> Symbol {
        Symbol::new("SPY")
    }

    #[test]
    fn builder_basic() {
        let broker = MockBroker::builder()
            .with_position(spy(), 10.0, 480.0)
            .with_equity(50_000.0)
            .with_price(spy(), 500.0)
            .build();

        let positions = broker.positions().unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].quantity, 10.0);

        assert_eq!(broker.account().unwrap().portfolio_value, 50_000.0);
        assert_eq!(broker.latest_price(&spy()).unwrap(), 500.0);
        assert_eq!(broker.price_requests(), 1);
    }

    #[test]
    fn unknown_symbol_has_no_price() {
        let broker = MockBroker::builder().build();
        assert!(matches!(
            broker.latest_price(&spy()),
            Err(BrokerError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn accept_records_without_filling() {
        let broker = MockBroker::builder().with_price(spy(), 500.0).build();
        let order = broker
            .submit_order(&OrderRequest::market(spy(), Side::Buy, 3))
            .unwrap();

        assert_eq!(order.status, OrderState::Accepted);
        assert_eq!(broker.submitted_orders().len(), 1);
        assert!(broker.positions().unwrap().is_empty());
        assert_eq!(broker.order(&order.id).unwrap(), order);
    }

    #[test]
    fn fill_mode_moves_positions() {
        let broker = MockBroker::builder()
            .fill_mode(FillMode::Fill)
            .with_position(spy(), 4.0, 480.0)
            .with_price(spy(), 500.0)
            .build();

        broker
            .submit_order(&OrderRequest::market(spy(), Side::Sell, 4))
            .unwrap();
        assert!(broker.positions().unwrap().is_empty());
    }

    #[test]
    fn reject_from_nth() {
        let broker = MockBroker::builder()
            .fill_mode(FillMode::RejectFrom(2))
            .build();
        let req = OrderRequest::market(spy(), Side::Buy, 1);

        assert!(broker.submit_order(&req).is_ok());
        assert!(broker.submit_order(&req).is_err());
        assert!(broker.submit_order(&req).is_err());
        assert_eq!(broker.submitted_orders().len(), 3);
        assert_eq!(broker.orders(10).unwrap().len(), 1);
    }

    #[test]
    fn orders_newest_first() {
        let broker = MockBroker::builder().build();
        for qty in 1..=3 {
            broker
                .submit_order(&OrderRequest::market(spy(), Side::Buy, qty))
                .unwrap();
        }
        let orders = broker.orders(2).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].quantity, 3.0);
    }
}
