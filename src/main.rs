//! Canteen CLI
//!
//! Command-line front end for the ordering API:
//! - Browse the menu
//! - Place a one-shot order
//! - Order interactively from a shell session
//! - Generate a config file

use anyhow::Context;
use canteen::client::{ApiClient, MenuSource};
use canteen::config::{generate_default_config, Config};
use canteen::session::OrderSession;
use canteen::shell::{self, ItemSpec};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "canteen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Order from the canteen from your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Ordering API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the menu
    Menu,

    /// Place an order in one go
    Order {
        /// Customer name
        #[arg(short, long)]
        name: String,
        /// dine-in or takeout (default from config)
        #[arg(short, long)]
        pickup: Option<String>,
        /// Note for the kitchen
        #[arg(long, default_value = "")]
        note: String,
        /// Items as ID[:QTY[:TEMPERATURE:SWEETNESS]], e.g. m1:2 or dr1:1:less-ice:half-sugar
        #[arg(short, long = "item", required = true)]
        items: Vec<ItemSpec>,
    },

    /// Interactive ordering session
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default()?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    canteen::logging::init(&config.logging);
    tracing::debug!(api = %config.api.base_url, "Canteen v{}", env!("CARGO_PKG_VERSION"));
    match &config.source {
        Some(path) => tracing::debug!("Loaded config from {:?}", path),
        None => tracing::debug!("Using default config with environment overrides"),
    }

    match cli.command {
        Commands::Menu => {
            let api = ApiClient::from_config(&config.api)?;
            let menu = api
                .fetch_menu()
                .await
                .with_context(|| format!("Cannot load the menu from {}", api.base_url()))?;
            print!("{}", shell::render_menu(&menu));
        }

        Commands::Order {
            name,
            pickup,
            note,
            items,
        } => {
            let api = ApiClient::from_config(&config.api)?;
            let mut session = OrderSession::load(&api, api.clone())
                .await
                .with_context(|| format!("Cannot load the menu from {}", api.base_url()))?;

            for spec in items {
                let request = spec.into_request(session.menu());
                let item_id = request.item_id.clone();
                if let canteen::AddOutcome::Ignored = session.add(request)? {
                    eprintln!("Skipping unknown item: {}", item_id);
                }
            }

            println!("{}", session.summary());

            let pickup = pickup.unwrap_or_else(|| config.ordering.default_pickup.name().to_string());
            match session.submit(&name, &pickup, &note).await {
                Ok(receipt) => {
                    if !receipt.message.is_empty() {
                        println!("{}", receipt.message);
                    }
                    println!("Order number: {}", receipt.order_number);
                }
                Err(e) => {
                    tracing::debug!(error = ?e, "Submission failed");
                    eprintln!("{}", e.user_message());
                    std::process::exit(1);
                }
            }
        }

        Commands::Shell => {
            let api = ApiClient::from_config(&config.api)?;
            let mut session = OrderSession::load(&api, api.clone())
                .await
                .with_context(|| format!("Cannot load the menu from {}", api.base_url()))?;

            println!("Menu loaded ({} items). Type `help` for commands.", session.menu().len());

            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(
                &mut session,
                stdin,
                tokio::io::stdout(),
                config.ordering.default_pickup,
            )
            .await?;
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", content);
                }
            }
        }
    }

    Ok(())
}
