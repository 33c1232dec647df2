//! rate-gate: per-client HTTP rate limiting gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────┐
//!                   │                  RATE-GATE                   │
//!                   │                                              │
//!  Client Request   │  ┌─────────┐   ┌────────────┐   ┌─────────┐ │
//!  ─────────────────┼─▶│  http   │──▶│  limiter   │──▶│ app     │ │
//!                   │  │ server  │   │ identity + │   │ handler │ │
//!                   │  └─────────┘   │ admission  │   └─────────┘ │
//!                   │                └─────┬──────┘                │
//!                   │                      │ 429 + Retry-After     │
//!  Client Response  │                      ▼                       │
//!  ◀────────────────┼── quota headers on admits, JSON on rejects   │
//!                   │                                              │
//!                   │  ┌────────────────────────────────────────┐  │
//!                   │  │         Cross-Cutting Concerns          │ │
//!                   │  │  config · observability · lifecycle     │ │
//!                   │  └────────────────────────────────────────┘  │
//!                   └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use rate_gate::config::{load_config, GatewayConfig};
use rate_gate::http::HttpServer;
use rate_gate::lifecycle::{signals, Shutdown};
use rate_gate::observability::{logging, metrics};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "rate-gate")]
#[command(about = "Per-client rate limiting gateway")]
struct Args {
    /// Path to the TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener port from the config.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(port) = args.port {
        config.listener.set_port(port);
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        requests_per_window = config.rate_limit.requests_per_window,
        window_minutes = config.rate_limit.window_minutes,
        trust = ?config.trust.proxy_headers,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
