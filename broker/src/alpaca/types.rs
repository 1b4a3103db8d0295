//! Alpaca-specific API request and response types.
//!
//! Alpaca sends most numbers as decimal strings; they are kept as strings
//! here and parsed when converting to the shared broker types.

use serde::{Deserialize, Serialize};

/// `GET /v2/account` response.
#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    #[serde(default)]
    pub account_number: String,
    pub status: String,
    #[serde(default)]
    pub currency: String,
    pub cash: String,
    pub buying_power: String,
    pub equity: String,
    pub portfolio_value: String,
}

/// One entry of `GET /v2/positions`.
#[derive(Debug, Deserialize)]
pub struct PositionResponse {
    pub symbol: String,
    pub qty: String,
    pub avg_entry_price: String,
    #[serde(default)]
    pub market_value: Option<String>,
    #[serde(default)]
    pub unrealized_pl: Option<String>,
}

/// Order object returned by the orders endpoints.
#[derive(Debug, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub symbol: String,
    pub side: String,
    /// Null for notional orders.
    #[serde(default)]
    pub qty: Option<String>,
    #[serde(default)]
    pub filled_qty: Option<String>,
    #[serde(default)]
    pub filled_avg_price: Option<String>,
    pub status: String,
    #[serde(default)]
    pub order_type: String,
    #[serde(default)]
    pub time_in_force: String,
    #[serde(default)]
    pub created_at: String,
}

/// `POST /v2/orders` body for a market order.
#[derive(Debug, Serialize)]
pub struct MarketOrderBody<'a> {
    pub symbol: &'a str,
    pub qty: String,
    pub side: &'a str,
    #[serde(rename = "type")]
    pub order_type: &'a str,
    pub time_in_force: &'a str,
}

/// `GET /v2/stocks/{symbol}/trades/latest` response.
#[derive(Debug, Deserialize)]
pub struct LatestTradeResponse {
    pub symbol: String,
    pub trade: TradeData,
}

/// A single trade print.
#[derive(Debug, Deserialize)]
pub struct TradeData {
    #[serde(rename = "p")]
    pub price: f64,
    #[serde(rename = "s", default)]
    pub size: f64,
    #[serde(rename = "t", default)]
    pub timestamp: String,
}

/// Error body Alpaca attaches to non-success responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<u64>,
    pub message: String,
}
