//! Alpaca broker implementation.

pub mod client;
pub mod types;

use std::time::Duration;

use log::{debug, warn};
use weightbook::{Side, Symbol};

use crate::Broker;
use crate::error::BrokerError;
use crate::types::*;
use client::{AlpacaClient, Endpoints};
use types::{AccountResponse, OrderResponse, PositionResponse};

/// Default HTTP timeout for Alpaca requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Alpaca broker implementing the generic Broker trait.
///
/// Uses the REST API for all operations. Blocking (sync) via reqwest::blocking.
pub struct AlpacaBroker {
    client: AlpacaClient,
}

impl AlpacaBroker {
    /// Create a broker handle against the default paper or live endpoints.
    pub fn new(key_id: &str, secret_key: &str, paper: bool) -> Result<Self, BrokerError> {
        Self::with_endpoints(key_id, secret_key, Endpoints::new(paper), DEFAULT_TIMEOUT)
    }

    /// Create a broker handle against explicit endpoints.
    pub fn with_endpoints(
        key_id: &str,
        secret_key: &str,
        endpoints: Endpoints,
        timeout: Duration,
    ) -> Result<Self, BrokerError> {
        Ok(Self {
            client: AlpacaClient::new(key_id, secret_key, endpoints, timeout)?,
        })
    }

    /// The underlying REST client.
    pub fn client(&self) -> &AlpacaClient {
        &self.client
    }
}

/// Parse an Alpaca decimal string.
pub fn parse_decimal(field: &str, value: &str) -> Result<f64, BrokerError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| BrokerError::Parse(format!("{field}: not a number: {value:?}")))
}

fn parse_optional(field: &str, value: Option<&str>) -> Result<Option<f64>, BrokerError> {
    value.map(|v| parse_decimal(field, v)).transpose()
}

fn parse_side(value: &str) -> Result<Side, BrokerError> {
    match value {
        "buy" => Ok(Side::Buy),
        "sell" => Ok(Side::Sell),
        other => Err(BrokerError::Parse(format!("unknown order side: {other:?}"))),
    }
}

impl TryFrom<AccountResponse> for Account {
    type Error = BrokerError;

    fn try_from(r: AccountResponse) -> Result<Self, Self::Error> {
        Ok(Account {
            cash: parse_decimal("cash", &r.cash)?,
            buying_power: parse_decimal("buying_power", &r.buying_power)?,
            equity: parse_decimal("equity", &r.equity)?,
            portfolio_value: parse_decimal("portfolio_value", &r.portfolio_value)?,
            account_number: r.account_number,
            status: r.status,
            currency: r.currency,
        })
    }
}

impl TryFrom<OrderResponse> for Order {
    type Error = BrokerError;

    fn try_from(r: OrderResponse) -> Result<Self, Self::Error> {
        Ok(Order {
            side: parse_side(&r.side)?,
            quantity: parse_optional("qty", r.qty.as_deref())?.unwrap_or(0.0),
            filled_quantity: parse_optional("filled_qty", r.filled_qty.as_deref())?
                .unwrap_or(0.0),
            filled_avg_price: parse_optional("filled_avg_price", r.filled_avg_price.as_deref())?,
            status: OrderState::parse(&r.status),
            id: OrderId(r.id),
            symbol: r.symbol,
            order_type: r.order_type,
            time_in_force: r.time_in_force,
            created_at: r.created_at,
        })
    }
}

/// Convert a position; `Ok(None)` for symbols that do not fit a [`Symbol`].
pub fn convert_position(r: PositionResponse) -> Result<Option<Position>, BrokerError> {
    let Some(symbol) = Symbol::try_new(&r.symbol) else {
        warn!("Skipping position in '{}' (symbol does not fit)", r.symbol);
        return Ok(None);
    };
    Ok(Some(Position {
        symbol,
        quantity: parse_decimal("qty", &r.qty)?,
        avg_entry_price: parse_decimal("avg_entry_price", &r.avg_entry_price)?,
        market_value: parse_optional("market_value", r.market_value.as_deref())?.unwrap_or(0.0),
        unrealized_pl: parse_optional("unrealized_pl", r.unrealized_pl.as_deref())?
            .unwrap_or(0.0),
    }))
}

impl Broker for AlpacaBroker {
    fn account(&self) -> Result<Account, BrokerError> {
        self.client.account()?.try_into()
    }

    fn positions(&self) -> Result<Vec<Position>, BrokerError> {
        let raw = self.client.positions()?;
        let mut positions = Vec::with_capacity(raw.len());
        for p in raw {
            if let Some(pos) = convert_position(p)? {
                debug!("Position: {} qty={} avg={:.2}", pos.symbol, pos.quantity, pos.avg_entry_price);
                positions.push(pos);
            }
        }
        Ok(positions)
    }

    fn latest_price(&self, symbol: &Symbol) -> Result<f64, BrokerError> {
        let latest = self.client.latest_trade(symbol.as_str())?;
        let price = latest.trade.price;
        if !price.is_finite() || price <= 0.0 {
            return Err(BrokerError::Parse(format!(
                "latest trade for {symbol} has invalid price {price}"
            )));
        }
        debug!("{symbol}: last trade ${price:.4} at {}", latest.trade.timestamp);
        Ok(price)
    }

    fn submit_order(&self, order: &OrderRequest) -> Result<Order, BrokerError> {
        if order.quantity == 0 {
            return Err(BrokerError::Order("quantity must be greater than zero".into()));
        }
        self.client
            .submit_market_order(
                order.symbol.as_str(),
                order.quantity,
                order.side.as_str(),
                order.time_in_force.as_str(),
            )?
            .try_into()
    }

    fn order(&self, id: &OrderId) -> Result<Order, BrokerError> {
        self.client.order(&id.0)?.try_into()
    }

    fn orders(&self, limit: usize) -> Result<Vec<Order>, BrokerError> {
        self.client
            .orders(limit)?
            .into_iter()
            .map(Order::try_from)
            .collect()
    }
}
