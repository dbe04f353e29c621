//! obswire - Observation Middleware Batch Publisher
//!
//! Periodically collects readings and publishes them to the observation
//! middleware, or ships a single local file as a base64 file record.
//!
//! # Usage
//!
//! ```bash
//! # Periodic readings against the default endpoint
//! cargo run --release
//!
//! # Custom endpoint and indicator
//! ./obswire --endpoint middleware.internal:50051 --indicator pressure_sensors
//!
//! # Publish one file for storage
//! ./obswire send-file ./report.pdf --action store
//! ```
//!
//! # Environment Variables
//!
//! - `OBSWIRE_CONFIG`: Path to a TOML config file
//! - `OBSWIRE_ENDPOINT`: Middleware endpoint override
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use obswire::config::ObswireConfig;
use obswire::sources;
use obswire::Publisher;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "obswire")]
#[command(about = "Resilient batch publisher for observation middleware")]
#[command(version)]
struct CliArgs {
    /// Override the middleware endpoint
    #[arg(long, value_name = "HOST:PORT")]
    endpoint: Option<String>,

    /// Override the indicator attached to every request
    #[arg(long)]
    indicator: Option<String>,

    /// Override the seconds between periodic publishes
    #[arg(long)]
    interval: Option<u64>,

    /// Override the element identifier attached to every batch
    #[arg(long)]
    element_id: Option<i64>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Publish one local file as a base64 file record
    SendFile {
        /// Path to the file
        path: PathBuf,

        /// Action the middleware should perform (process | skip | store)
        #[arg(long, default_value = "process")]
        action: String,
    },
}

// ============================================================================
// Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let mut config = ObswireConfig::load();
    if let Some(endpoint) = args.endpoint {
        config.middleware.endpoint = endpoint;
    }
    if let Some(indicator) = args.indicator {
        config.publish.indicator = indicator;
    }
    if let Some(interval) = args.interval {
        config.publish.interval_secs = interval;
    }
    if let Some(element_id) = args.element_id {
        config.publish.element_id = element_id;
    }

    let mut publisher =
        Publisher::connect(&config).context("Failed to create middleware publisher")?;
    info!(
        endpoint = %config.middleware.endpoint,
        indicator = %config.publish.indicator,
        "Publisher ready"
    );

    // One-shot file publish
    if let Some(SubCommand::SendFile { path, action }) = args.command {
        let record = sources::load_file_record(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        let status = publisher
            .batch(config.publish.element_id, &[record], &action)
            .await;
        info!(status = %status, "File batch finished");
        return Ok(());
    }

    // Periodic readings until Ctrl-C. A publish in flight always runs to
    // its terminal status; shutdown lands between cycles.
    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested");
                shutdown.cancel();
            }
        });
    }

    let mut interval = tokio::time::interval(Duration::from_secs(config.publish.interval_secs));
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = interval.tick() => {}
        }

        let record = sources::sample_reading();
        let status = publisher
            .batch(config.publish.element_id, &[record], "process")
            .await;
        if status.is_delivered() {
            info!(status = %status, "Reading published");
        } else {
            warn!(status = %status, "Reading not accepted");
        }
    }

    info!("Publisher stopped");
    Ok(())
}
