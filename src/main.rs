use agrilink::{LogFormat, LoggingConfig, MarketConfig, MarketCore};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Routing, storage allocation and order admission for an agricultural marketplace
#[derive(Parser, Debug)]
#[command(name = "agrilink")]
#[command(about = "Agricultural marketplace logistics core", long_about = None)]
struct Args {
    /// Path to a JSON market configuration (network, facilities, logging)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overrides the configuration file
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cheapest route between two cities
    Route { start: String, end: String },

    /// Allocate storage for each quantity in turn
    Allocate {
        #[arg(required = true)]
        quantities: Vec<u64>,
    },

    /// Queue a buyer order
    Order {
        #[arg(long)]
        requester: String,
        #[arg(long)]
        crop: u64,
        #[arg(long)]
        quantity: u64,
        /// Number of identical orders to queue
        #[arg(long, default_value_t = 1)]
        count: u32,
    },

    /// Print aggregate statistics as JSON
    Stats,

    /// List storage facilities as JSON
    Facilities,
}

fn init_logging(logging: &LoggingConfig, override_level: Option<&str>) {
    let level = override_level.unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match logging.format {
        LogFormat::Json => fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).with_writer(std::io::stderr).init(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MarketConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MarketConfig::default(),
    };
    init_logging(&config.logging, args.log_level.as_deref());

    info!("Starting AgriLink v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        info!("Config file: {:?}", path);
    }

    let core = MarketCore::from_config(&config)?;

    match args.command {
        Command::Route { start, end } => {
            let Some(route) = core.shortest_path(&start, &end) else {
                bail!("No route found from {start} to {end}");
            };
            println!("Route:    {}", route.path_string());
            println!("Distance: {} km", route.distance);
            println!("Estimate: {}", route.estimate);
        }
        Command::Allocate { quantities } => {
            for quantity in quantities {
                match core.allocate(quantity) {
                    Some(storage) => println!(
                        "{quantity} -> #{} {} ({:.1}°C), {} remaining",
                        storage.id, storage.name, storage.temperature, storage.available_capacity
                    ),
                    None => println!("{quantity} -> No suitable storage"),
                }
            }
        }
        Command::Order {
            requester,
            crop,
            quantity,
            count,
        } => {
            for _ in 0..count {
                let id = core.enqueue(requester.as_str(), crop, quantity);
                println!("Order queued: #{id}");
            }
            println!("Queue size: {}", core.queue_size());
        }
        Command::Stats => {
            println!("{}", serde_json::to_string_pretty(&core.stats())?);
        }
        Command::Facilities => {
            println!("{}", serde_json::to_string_pretty(&core.registry().list())?);
        }
    }

    Ok(())
}
