//! Alpaca REST API client.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

use super::types::{
    AccountResponse, ApiErrorBody, LatestTradeResponse, MarketOrderBody, OrderResponse,
    PositionResponse,
};
use crate::error::BrokerError;

/// Paper trading API base URL.
pub const PAPER_TRADING_URL: &str = "https://paper-api.alpaca.markets";
/// Live trading API base URL.
pub const LIVE_TRADING_URL: &str = "https://api.alpaca.markets";
/// Market data API base URL (shared by paper and live).
pub const DATA_URL: &str = "https://data.alpaca.markets";

/// Base URLs for the trading and market-data APIs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub trading: String,
    pub data: String,
}

impl Endpoints {
    /// Default endpoints for paper (`true`) or live trading.
    pub fn new(paper: bool) -> Self {
        let trading = if paper {
            PAPER_TRADING_URL
        } else {
            LIVE_TRADING_URL
        };
        Self {
            trading: trading.to_string(),
            data: DATA_URL.to_string(),
        }
    }
}

/// Blocking Alpaca REST client.
pub struct AlpacaClient {
    client: Client,
    key_id: String,
    secret_key: Zeroizing<String>,
    endpoints: Endpoints,
}

impl AlpacaClient {
    /// Create a new client. No request is made until the first call.
    pub fn new(
        key_id: &str,
        secret_key: &str,
        endpoints: Endpoints,
        timeout: Duration,
    ) -> Result<Self, BrokerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BrokerError::Connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            key_id: key_id.to_string(),
            secret_key: Zeroizing::new(secret_key.to_string()),
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("APCA-API-KEY-ID", &self.key_id)
            .header("APCA-API-SECRET-KEY", self.secret_key.as_str())
    }

    fn send<T: DeserializeOwned>(&self, builder: RequestBuilder, what: &str) -> Result<T, BrokerError> {
        let resp = self
            .authed(builder)
            .send()
            .map_err(|e| BrokerError::Connection(format!("{what} request failed: {e}")))?;
        read_json(resp, what)
    }

    /// Get account information (GET /v2/account).
    pub fn account(&self) -> Result<AccountResponse, BrokerError> {
        let url = format!("{}/v2/account", self.endpoints.trading);
        self.send(self.client.get(&url), "account")
    }

    /// Get all open positions (GET /v2/positions).
    pub fn positions(&self) -> Result<Vec<PositionResponse>, BrokerError> {
        let url = format!("{}/v2/positions", self.endpoints.trading);
        self.send(self.client.get(&url), "positions")
    }

    /// Submit a market order (POST /v2/orders).
    pub fn submit_market_order(
        &self,
        symbol: &str,
        qty: u64,
        side: &str,
        time_in_force: &str,
    ) -> Result<OrderResponse, BrokerError> {
        let url = format!("{}/v2/orders", self.endpoints.trading);
        let body = MarketOrderBody {
            symbol,
            qty: qty.to_string(),
            side,
            order_type: "market",
            time_in_force,
        };

        debug!("Submitting Alpaca order: {side} {qty} {symbol} ({time_in_force})");

        self.send(self.client.post(&url).json(&body), "order")
    }

    /// Get one order (GET /v2/orders/{id}).
    pub fn order(&self, id: &str) -> Result<OrderResponse, BrokerError> {
        let url = format!("{}/v2/orders/{id}", self.endpoints.trading);
        self.send(self.client.get(&url), "order status")
    }

    /// List recent orders of any status (GET /v2/orders?status=all&limit=N).
    pub fn orders(&self, limit: usize) -> Result<Vec<OrderResponse>, BrokerError> {
        let url = format!(
            "{}/v2/orders?status=all&limit={limit}&direction=desc",
            self.endpoints.trading
        );
        self.send(self.client.get(&url), "orders")
    }

    /// Latest trade for a stock (GET /v2/stocks/{symbol}/trades/latest).
    pub fn latest_trade(&self, symbol: &str) -> Result<LatestTradeResponse, BrokerError> {
        let url = format!("{}/v2/stocks/{symbol}/trades/latest", self.endpoints.data);
        self.send(self.client.get(&url), "latest trade")
    }
}

/// Turn a response into `T`, mapping non-success statuses to errors.
fn read_json<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T, BrokerError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        return Err(BrokerError::from_status(
            status.as_u16(),
            format!("{what}: {}", error_message(&body)),
        ));
    }

    resp.json::<T>()
        .map_err(|e| BrokerError::Parse(format!("{what}: {e}")))
}

/// Extract `message` from an Alpaca error body, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(err) => match err.code {
            Some(code) => format!("{} (code {code})", err.message),
            None => err.message,
        },
        Err(_) => body.trim().to_string(),
    }
}
