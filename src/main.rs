use std::path::PathBuf;

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use clap::Parser;
use tracing::{error, info};

use tenki::alerts::notifier::{AlertPublisher, LogPublisher, SnsPublisher};
use tenki::config::{self, TenkiConfig};
use tenki::runner::Runner;
use tenki::store::DynamoStore;
use tenki::weather::WeatherFetcher;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration; without a config file the built-in deployment
    // defaults apply
    let config = match args.config {
        Some(path) => {
            info!("Using configuration file: {:?}", path);
            load_or_bail(&path)?
        }
        None => {
            let path = config::default_config_path();
            if path.exists() {
                info!("Using configuration file: {:?}", path);
                load_or_bail(&path)?
            } else {
                info!("No configuration file found, using built-in defaults");
                TenkiConfig::default()
            }
        }
    };

    info!(
        "Ingesting location '{}' into table '{}' (retention {} days)",
        config.location.id, config.table_name, config.retention_days
    );

    let api_key = std::env::var("OPENWEATHERMAP_API_KEY")
        .context("OPENWEATHERMAP_API_KEY environment variable not set")?;

    let fetcher = match &config.provider_url {
        Some(url) => WeatherFetcher::with_base_url(url.clone(), api_key),
        None => WeatherFetcher::new(api_key),
    };

    let aws_config = aws_config::defaults(BehaviorVersion::latest()).load().await;
    let store = DynamoStore::new(
        aws_sdk_dynamodb::Client::new(&aws_config),
        config.table_name.clone(),
    );

    let publisher: Box<dyn AlertPublisher> = match &config.topic_arn {
        Some(arn) => Box::new(SnsPublisher::new(
            aws_sdk_sns::Client::new(&aws_config),
            arn.clone(),
        )),
        None => Box::new(LogPublisher),
    };

    let runner = Runner::new(config, fetcher, store, publisher);

    match runner.run().await {
        Ok(response) => {
            info!("Invocation completed with status {}", response.status_code);
            println!("{}", response.body);
            Ok(())
        }
        Err(e) => {
            error!("Invocation failed: {}", e);
            Err(e.into())
        }
    }
}

fn load_or_bail(path: &PathBuf) -> Result<TenkiConfig> {
    match config::load_config(path) {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            Ok(cfg)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(anyhow::anyhow!("Configuration error: {}", e))
        }
    }
}
