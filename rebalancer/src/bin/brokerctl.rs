//! Inspect an Alpaca account and place single market orders by hand.

use std::process;

use clap::{Parser, Subcommand};

use weightbook::Side;
use weightbook_rebalancer::broker;
use weightbook_rebalancer::commands;
use weightbook_rebalancer::config::BrokerConfig;
use weightbook_rebalancer::credentials::{self, Credentials};
use weightbook_rebalancer::error::Result;

#[derive(Parser)]
#[command(name = "brokerctl")]
#[command(about = "Alpaca account, positions and orders from the command line")]
#[command(version)]
struct Cli {
    /// Use the live trading endpoint instead of paper
    #[arg(long)]
    live: bool,

    /// Override the trading API base URL
    #[arg(long)]
    trading_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show account summary
    Account,

    /// Show open positions
    Positions,

    /// List recent orders, newest first
    Orders {
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Show one order by ID
    Order {
        id: String,
    },

    /// Buy at market (DAY)
    Buy {
        symbol: String,
        #[arg(long, default_value_t = 1)]
        qty: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Sell at market (DAY)
    Sell {
        symbol: String,
        #[arg(long, default_value_t = 1)]
        qty: u64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        if e.exit_code() == 0 {
            eprintln!("{e}");
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    credentials::load_dotenv();
    let creds = Credentials::from_env()?;
    let config = BrokerConfig {
        paper: !cli.live,
        trading_url: cli.trading_url,
        ..BrokerConfig::default()
    };
    let alpaca = broker::connect_alpaca(&config, &creds)?;

    match cli.command {
        Command::Account => commands::show_account(&alpaca),
        Command::Positions => commands::show_positions(&alpaca),
        Command::Orders { limit } => commands::show_orders(&alpaca, limit),
        Command::Order { id } => commands::show_order(&alpaca, &id),
        Command::Buy { symbol, qty, yes } => place(&alpaca, &symbol, Side::Buy, qty, yes),
        Command::Sell { symbol, qty, yes } => place(&alpaca, &symbol, Side::Sell, qty, yes),
    }
}

fn place(
    broker: &dyn weightbook_broker::Broker,
    symbol: &str,
    side: Side,
    qty: u64,
    yes: bool,
) -> Result<()> {
    commands::place_market_order(broker, symbol, side, qty, |prompt| {
        if yes {
            Ok(true)
        } else {
            commands::confirm_prompt(prompt)
        }
    })
    .map(|_| ())
}
