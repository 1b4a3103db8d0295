//! Broker trait and implementations for weightbook.
//!
//! Provides a generic `Broker` trait over a brokerage's trading and
//! market-data APIs. Implementations:
//!
//! - **Alpaca** (feature `alpaca`): Alpaca REST API, paper or live
//! - **Mock**: in-memory broker for tests

pub mod error;
pub mod mock;
pub mod types;

#[cfg(feature = "alpaca")]
pub mod alpaca;

pub use error::BrokerError;
pub use types::*;

use weightbook::Symbol;

/// A broker that can report account state, quote prices, and place orders.
///
/// All calls are blocking.
pub trait Broker {
    /// Get account summary (equity, cash, buying power, etc.).
    fn account(&self) -> Result<Account, BrokerError>;

    /// Get all current positions.
    fn positions(&self) -> Result<Vec<Position>, BrokerError>;

    /// Get the latest trade price for a symbol.
    fn latest_price(&self, symbol: &Symbol) -> Result<f64, BrokerError>;

    /// Submit an order. Returns the broker's view of the new order.
    fn submit_order(&self, order: &OrderRequest) -> Result<Order, BrokerError>;

    /// Look up one order by ID.
    fn order(&self, id: &OrderId) -> Result<Order, BrokerError>;

    /// List recent orders, newest first, at most `limit`.
    fn orders(&self, limit: usize) -> Result<Vec<Order>, BrokerError>;
}

impl<B: Broker + ?Sized> Broker for Box<B> {
    fn account(&self) -> Result<Account, BrokerError> {
        (**self).account()
    }

    fn positions(&self) -> Result<Vec<Position>, BrokerError> {
        (**self).positions()
    }

    fn latest_price(&self, symbol: &Symbol) -> Result<f64, BrokerError> {
        (**self).latest_price(symbol)
    }

    fn submit_order(&self, order: &OrderRequest) -> Result<Order, BrokerError> {
        (**self).submit_order(order)
    }

    fn order(&self, id: &OrderId) -> Result<Order, BrokerError> {
        (**self).order(id)
    }

    fn orders(&self, limit: usize) -> Result<Vec<Order>, BrokerError> {
        (**self).orders(limit)
    }
}
