//! Divvy node daemon
//!
//! Loads configuration, constructs the token ledger and serves the HTTP
//! API. With `--dev-clock` the node runs on a manually driven clock and
//! exposes `/clock/advance` for time travel.

use clap::Parser;
use divvy_api::{start_server, ApiState};
use divvy_core::constants::DAY_SECS;
use divvy_core::{Clock, DividendToken, ManualClock, SystemClock};
use owo_colors::OwoColorize;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Parser)]
#[command(name = "divvyd")]
#[command(about = "Divvy Coin dividend-ledger node")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Listen address override
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Owner address override
    #[arg(short, long)]
    owner: Option<String>,

    /// Run on a manually driven clock (enables /clock/advance)
    #[arg(long)]
    dev_clock: bool,

    /// Show version
    #[arg(short, long)]
    version: bool,
}

#[derive(Debug, Deserialize, Default)]
struct Config {
    #[serde(default)]
    node: NodeConfig,
    #[serde(default)]
    dividend: DividendConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct NodeConfig {
    listen: String,
    owner: String,
    network: String,
    dev_clock: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:24100".to_string(),
            owner: "DIVVY1owner0000000000000000000000000".to_string(),
            network: "mainnet".to_string(),
            dev_clock: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DividendConfig {
    claim_period_days: u64,
    reclaim_period_days: u64,
}

impl Default for DividendConfig {
    fn default() -> Self {
        Self {
            claim_period_days: 330,
            reclaim_period_days: 20,
        }
    }
}

fn load_config(path: &PathBuf) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config = toml::from_str(&contents)?;
    Ok(config)
}

fn display_banner(owner: &str, network: &str, listen: &SocketAddr, dev_clock: bool) {
    println!("\n{}", "╔═══════════════════════════════════════════════════╗".cyan());
    println!("{}", "║              DIVVY COIN NODE                      ║".cyan().bold());
    println!("{}", "╚═══════════════════════════════════════════════════╝".cyan());

    println!("\n{}: {}", "Network".yellow().bold(), network);
    println!("{}: {}", "Owner".yellow().bold(), owner);
    println!("{}: {}", "Listen".yellow().bold(), listen);
    if dev_clock {
        println!("{}", "Dev clock enabled (manual time travel)".yellow());
    }
    println!();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("divvyd {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let listen: SocketAddr = match cli.listen {
        Some(addr) => addr,
        None => match config.node.listen.parse() {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Invalid listen address {}: {}", config.node.listen, e);
                std::process::exit(1);
            }
        },
    };
    let owner = cli.owner.unwrap_or(config.node.owner);
    let dev_clock_enabled = cli.dev_clock || config.node.dev_clock;

    display_banner(&owner, &config.node.network, &listen, dev_clock_enabled);

    let (clock, dev_clock): (Arc<dyn Clock>, Option<Arc<ManualClock>>) = if dev_clock_enabled {
        let manual = Arc::new(ManualClock::new(SystemClock.now()));
        (manual.clone(), Some(manual))
    } else {
        (Arc::new(SystemClock), None)
    };

    let token = DividendToken::with_schedule(
        owner,
        clock,
        config.dividend.claim_period_days * DAY_SECS,
        config.dividend.reclaim_period_days * DAY_SECS,
    );

    let state = ApiState::new(
        Arc::new(RwLock::new(token)),
        dev_clock,
        config.node.network,
    );

    tracing::info!("starting divvyd on {}", listen);
    if let Err(e) = start_server(listen, state).await {
        eprintln!("{}: {}", "Server error".red().bold(), e);
        std::process::exit(1);
    }
}
