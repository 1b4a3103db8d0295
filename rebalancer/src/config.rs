//! TOML configuration loading and validation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use weightbook::{Symbol, TargetWeights};
use weightbook_risk::RiskLimits;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub broker: BrokerConfig,
    pub portfolio: PortfolioConfig,
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrokerConfig {
    #[serde(default = "default_true")]
    pub paper: bool,
    /// Override for the trading API base URL.
    #[serde(default)]
    pub trading_url: Option<String>,
    /// Override for the market-data API base URL.
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            paper: true,
            trading_url: None,
            data_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// Tradable universe and its target weights.
///
/// Symbols in the universe without a weight are targeted at zero shares.
#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioConfig {
    pub universe: Vec<String>,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    #[serde(default = "default_min_notional")]
    pub min_notional: f64,
    #[serde(default = "default_max_notional")]
    pub max_notional_per_order: f64,
    #[serde(default = "default_max_turnover")]
    pub max_turnover: f64,
    #[serde(default = "default_max_orders")]
    pub max_orders: usize,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            min_notional: default_min_notional(),
            max_notional_per_order: default_max_notional(),
            max_turnover: default_max_turnover(),
            max_orders: default_max_orders(),
        }
    }
}

fn default_min_notional() -> f64 {
    20.0
}
fn default_max_notional() -> f64 {
    2_000.0
}
fn default_max_turnover() -> f64 {
    0.10
}
fn default_max_orders() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_journal_file")]
    pub journal_file: String,
    #[serde(default = "default_stamp_file")]
    pub stamp_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            journal_file: default_journal_file(),
            stamp_file: default_stamp_file(),
        }
    }
}

fn default_log_dir() -> String {
    "logs".into()
}
fn default_journal_file() -> String {
    "trade_log.jsonl".into()
}
fn default_stamp_file() -> String {
    "last_run.json".into()
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate config from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        self.target_weights()?;
        if !self.risk.min_notional.is_finite() || self.risk.min_notional < 0.0 {
            return Err(Error::Config("min_notional must be >= 0".into()));
        }
        self.risk_limits().validate()?;
        if self.broker.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be > 0".into()));
        }
        Ok(())
    }

    /// Build the validated target weights from the `[portfolio]` section.
    pub fn target_weights(&self) -> Result<TargetWeights> {
        let parse = |s: &String| {
            Symbol::try_new(s).ok_or_else(|| Error::Config(format!("invalid symbol {s:?}")))
        };
        let universe = self
            .portfolio
            .universe
            .iter()
            .map(parse)
            .collect::<Result<Vec<_>>>()?;
        let weights = self
            .portfolio
            .weights
            .iter()
            .map(|(s, w)| parse(s).map(|sym| (sym, *w)))
            .collect::<Result<Vec<_>>>()?;
        TargetWeights::new(universe, weights).map_err(|e| Error::Config(e.to_string()))
    }

    /// Risk limits from the `[risk]` section.
    pub fn risk_limits(&self) -> RiskLimits {
        RiskLimits {
            max_notional_per_order: self.risk.max_notional_per_order,
            max_turnover_frac: self.risk.max_turnover,
            max_orders: self.risk.max_orders,
        }
    }

    /// Full path to the run journal.
    pub fn journal_path(&self) -> PathBuf {
        Path::new(&self.logging.dir).join(&self.logging.journal_file)
    }

    /// Full path to the run stamp.
    pub fn stamp_path(&self) -> PathBuf {
        Path::new(&self.logging.dir).join(&self.logging.stamp_file)
    }
}
