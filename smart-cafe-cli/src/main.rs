use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{CartCommand, ConfigCommand, MenuCommand, OrderCommand};
use config::Config;
use smart_cafe_core::{CartStore, FileRecordStore, HttpOrderGateway, OrderLedger};

#[derive(Parser)]
#[command(name = "cafe")]
#[command(version)]
#[command(about = "Smart Cafe ordering client", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the menu
    Menu(MenuCommand),

    /// Manage the pending cart
    Cart(CartCommand),

    /// Place, track, and manage orders
    Order(OrderCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "smart_cafe_core=warn,smart_cafe_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for the config init command
    let cli_config_path = cli.config.clone();

    // Load configuration
    let config = Config::load(cli.config)?;
    tracing::debug!(
        "Using data directory {} and API {}",
        config.data_dir.value.display(),
        config.api_url.value
    );

    match &cli.command {
        Some(Commands::Menu(cmd)) => {
            let gateway = HttpOrderGateway::new(config.api_url.value.clone());
            cmd.run(&gateway)?;
        }
        Some(Commands::Cart(cmd)) => {
            let mut cart = CartStore::load(FileRecordStore::new(config.data_dir.value.clone()));
            let gateway = HttpOrderGateway::new(config.api_url.value.clone());
            cmd.run(&mut cart, &gateway)?;
        }
        Some(Commands::Order(cmd)) => {
            let data_dir = config.data_dir.value.clone();
            let mut cart = CartStore::load(FileRecordStore::new(data_dir.clone()));
            let ledger = OrderLedger::new(FileRecordStore::new(data_dir));
            let gateway = HttpOrderGateway::new(config.api_url.value.clone());
            cmd.run(&mut cart, &ledger, &gateway)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
