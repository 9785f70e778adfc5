//! locale-gate
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ metrics → request id → trace → timeout → body limit
//!                                                                   │
//!                                                                   ▼
//!                                                             ┌───────────┐
//!                                           307 Location ◀────│   gate    │
//!                                                             └─────┬─────┘
//!                                                      skip / localized
//!                                                                   ▼
//!     Client Response                                        ┌───────────┐
//!     ◀──────────────────────── (+ nosniff if localized) ────│ upstream  │──▶ Site origin
//!                                                            └───────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use locale_gate::config::resolve_config;
use locale_gate::http::GateServer;
use locale_gate::lifecycle::{spawn_signal_listener, Shutdown};
use locale_gate::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "locale-gate")]
#[command(version, about = "Locale negotiation and redirect gateway", long_about = None)]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref(), cli.bind.as_deref())?;

    logging::init_tracing(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = ?config.upstream.address,
        request_timeout_secs = config.timeouts.request_secs,
        skip_paths = config.skip.paths.len(),
        skip_prefixes = config.skip.prefixes.len(),
        skip_extensions = config.skip.extensions.len(),
        "Configuration loaded"
    );

    if cli.check {
        tracing::info!("Configuration is valid");
        return Ok(());
    }

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let server = GateServer::new(&config)?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
