//! Broker connection from config and credentials.

use std::time::Duration;

use log::info;
use weightbook_broker::alpaca::AlpacaBroker;
use weightbook_broker::alpaca::client::Endpoints;

use crate::config::BrokerConfig;
use crate::credentials::Credentials;
use crate::error::Result;

/// Endpoints for the configured mode, with any URL overrides applied.
pub fn endpoints(config: &BrokerConfig) -> Endpoints {
    let mut endpoints = Endpoints::new(config.paper);
    if let Some(url) = &config.trading_url {
        endpoints.trading = url.trim_end_matches('/').to_string();
    }
    if let Some(url) = &config.data_url {
        endpoints.data = url.trim_end_matches('/').to_string();
    }
    endpoints
}

/// Build an Alpaca broker handle. No request is made until first use.
pub fn connect_alpaca(config: &BrokerConfig, credentials: &Credentials) -> Result<AlpacaBroker> {
    let endpoints = endpoints(config);
    info!(
        "Using Alpaca {} trading at {}",
        if config.paper { "paper" } else { "LIVE" },
        endpoints.trading
    );
    let broker = AlpacaBroker::with_endpoints(
        &credentials.key_id,
        &credentials.secret_key,
        endpoints,
        Duration::from_secs(config.timeout_secs),
    )?;
    Ok(broker)
}
