//! weightbook-rebalancer: once-a-day target-weight rebalancing against Alpaca.
//!
//! Reads the universe, target weights and risk limits from a TOML config,
//! fetches equity, positions and latest prices from the broker, plans whole
//! share market orders, gates them behind risk checks and a once-per-UTC-day
//! guard, and journals every run to a JSONL file.

pub mod broker;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod execution;
pub mod journal;
pub mod reconcile;
pub mod stamp;
