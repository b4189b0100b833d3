//! `wallet-link` command line.
//!
//! Operator tooling over the library: inspect the network registry, open a
//! connection the way a browser host would, and convert amounts.

use alloy::primitives::{Address, U256};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use wallet_link::blockchain::{format_ether, parse_ether, AlloyLink, ProviderHandle};
use wallet_link::config::{load_config, loader::apply_env_overrides, LinkConfig};
use wallet_link::lifecycle::{self, ConnectionManager};
use wallet_link::networks::{self, SUPPORTED_NETWORKS};
use wallet_link::observability::logging;
use wallet_link::platform::{StaticEnvironment, UserAgentClassifier};

#[derive(Parser)]
#[command(name = "wallet-link")]
#[command(about = "Connect to EVM networks through a wallet provider", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overrides the configuration
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported networks
    Networks {
        #[arg(long)]
        json: bool,
    },
    /// Show one network by chain ID
    Network { chain_id: u64 },
    /// Open a connection and print the network it reaches
    Connect(HostArgs),
    /// Read the native balance of an address
    Balance {
        address: Address,
        #[command(flatten)]
        host: HostArgs,
    },
    /// Convert an ether amount to wei
    ToWei { ether: String },
    /// Convert a wei amount to ether
    FromWei { wei: U256 },
}

/// How the host environment looks to the connection manager.
#[derive(Args)]
struct HostArgs {
    /// User agent used for mobile detection
    #[arg(long, default_value = "Mozilla/5.0 (X11; Linux x86_64)")]
    user_agent: String,

    /// RPC URL of the wallet's injected provider
    #[arg(long)]
    wallet_rpc: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => {
            let mut config = LinkConfig::default();
            apply_env_overrides(&mut config);
            config
        }
    };
    let level = cli.log_level.as_deref().unwrap_or(&config.observability.log_level);
    logging::init_logging(level);

    match cli.command {
        Commands::Networks { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(SUPPORTED_NETWORKS)?);
            } else {
                for network in SUPPORTED_NETWORKS {
                    println!(
                        "{:>12}  {:<24} {:<6} {}",
                        network.chain_id,
                        network.name,
                        network.native_currency.symbol,
                        network.rpc_url()
                    );
                }
            }
        }
        Commands::Network { chain_id } => match networks::network_by_chain_id(chain_id) {
            Some(network) => println!("{}", serde_json::to_string_pretty(network)?),
            None => return Err(format!("Unknown chain ID {chain_id}").into()),
        },
        Commands::Connect(host) => {
            let env = host_environment(&host, &config)?;
            install_manager(config);

            let connection = lifecycle::acquire(&env).await?;
            let network = connection.get_network().await?;
            let block = connection.get_block_number().await?;
            println!(
                "Connected to {} (chain {}) via {:?}, block {}",
                network.name.unwrap_or("unknown network"),
                network.chain_id,
                connection.topology(),
                block
            );
        }
        Commands::Balance { address, host } => {
            let env = host_environment(&host, &config)?;
            install_manager(config);

            let connection = lifecycle::acquire(&env).await?;
            let network = connection.get_network().await?;
            let balance = connection.get_balance(address).await?;
            let symbol = networks::network_by_chain_id(network.chain_id.0)
                .map(|n| n.native_currency.symbol)
                .unwrap_or("ETH");
            println!("{} {}", connection.utils().format_ether(balance), symbol);
        }
        Commands::ToWei { ether } => println!("{}", parse_ether(&ether)?),
        Commands::FromWei { wei } => println!("{}", format_ether(wei)),
    }

    Ok(())
}

fn host_environment(host: &HostArgs, config: &LinkConfig) -> Result<StaticEnvironment, Box<dyn std::error::Error>> {
    let classifier = UserAgentClassifier::new(&config.platform.mobile_user_agent_pattern)?;
    let handle = match &host.wallet_rpc {
        Some(url) => {
            let link = AlloyLink::http("injected", url, config.rpc.request_timeout())?;
            Some(Arc::new(link) as ProviderHandle)
        }
        None => None,
    };
    Ok(StaticEnvironment::new(&host.user_agent, &classifier, handle))
}

fn install_manager(config: LinkConfig) {
    if lifecycle::install(ConnectionManager::new(config)).is_err() {
        tracing::warn!("Connection manager already installed, keeping existing configuration");
    }
}
