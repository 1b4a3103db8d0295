//! Compute and (optionally) submit one rebalance toward the configured weights.

use std::path::PathBuf;
use std::process;

use chrono::Utc;
use clap::Parser;
use log::info;

use weightbook_rebalancer::config::Config;
use weightbook_rebalancer::credentials::{self, Credentials};
use weightbook_rebalancer::error::{Error, Result};
use weightbook_rebalancer::execution::{self, RunOptions, RunOutcome};
use weightbook_rebalancer::journal::Journal;
use weightbook_rebalancer::stamp::RunStampStore;
use weightbook_rebalancer::broker;

#[derive(Parser)]
#[command(name = "rebalance_once")]
#[command(about = "Rebalance an Alpaca account toward target weights (dry run by default)")]
#[command(version)]
struct Cli {
    /// Path to the TOML config
    #[arg(long, default_value = "rebalance.toml")]
    config: PathBuf,

    /// Actually submit orders (default: dry run)
    #[arg(long)]
    submit: bool,

    /// Skip orders smaller than this notional (USD)
    #[arg(long)]
    min_notional: Option<f64>,

    /// Max notional per single order (USD)
    #[arg(long)]
    max_notional: Option<f64>,

    /// Max total turnover as a fraction of equity, e.g. 0.10 = 10%
    #[arg(long)]
    max_turnover: Option<f64>,

    /// Max number of orders per run
    #[arg(long)]
    max_orders: Option<usize>,

    /// Allow more than one submission in the same UTC day
    #[arg(long)]
    allow_multi_run_today: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(RunOutcome::AlreadySubmitted { .. }) | Ok(RunOutcome::DryRun { .. }) => {}
        Ok(RunOutcome::Submitted(report)) => info!("{report}"),
        Ok(outcome @ RunOutcome::RiskBlocked { .. }) => {
            eprintln!("\nAborted: blocked by risk checks");
            process::exit(outcome.exit_code());
        }
        Err(e) => {
            match &e {
                Error::PartialSubmission(_) => eprintln!("\nIncomplete: {e}"),
                _ => eprintln!("Error: {e}"),
            }
            process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli) -> Result<RunOutcome> {
    let config = Config::load(&cli.config)?;
    let weights = config.target_weights()?;

    let mut limits = config.risk_limits();
    if let Some(v) = cli.max_notional {
        limits.max_notional_per_order = v;
    }
    if let Some(v) = cli.max_turnover {
        limits.max_turnover_frac = v;
    }
    if let Some(v) = cli.max_orders {
        limits.max_orders = v;
    }
    let opts = RunOptions {
        submit: cli.submit,
        allow_multi_run_today: cli.allow_multi_run_today,
        min_notional: cli.min_notional.unwrap_or(config.risk.min_notional),
        limits,
        paper: config.broker.paper,
    };

    credentials::load_dotenv();
    let creds = Credentials::from_env()?;
    let alpaca = broker::connect_alpaca(&config.broker, &creds)?;

    let stamps = RunStampStore::new(config.stamp_path());
    let mut journal = Journal::open(&config.journal_path())?;

    execution::run(&alpaca, &weights, &opts, &stamps, &mut journal, Utc::now())
}
