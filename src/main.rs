//! API proxy
//!
//! Forwards every request under a path prefix to one fixed backend origin and
//! relays the reply with CORS headers.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                  API PROXY                   │
//!     Client Request       │  ┌────────┐   ┌──────────┐   ┌───────────┐   │
//!     ─────────────────────┼─▶│  http  │──▶│ routing  │──▶│  backend  │───┼──▶ Backend
//!                          │  │ server │   │  target  │   │   call    │   │    (fixed origin)
//!                          │  └────────┘   └──────────┘   └─────┬─────┘   │
//!     Client Response      │  ┌──────────────────────────┐      │         │
//!     ◀────────────────────┼──│ relay / error envelope   │◀─────┘         │
//!                          │  │ + CORS headers           │                │
//!                          │  └──────────────────────────┘                │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_proxy::http::HttpServer;
use api_proxy::lifecycle::{signals, startup, Shutdown};
use api_proxy::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "api-proxy")]
#[command(about = "Forward API requests to a single fixed backend", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listener bind address, overriding the config file.
    #[arg(short, long)]
    bind: Option<String>,

    /// Backend host:port, overriding the config file.
    #[arg(long, env = "API_PROXY_BACKEND_ORIGIN")]
    backend_origin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = startup::resolve_config(
        cli.config.as_deref(),
        startup::Overrides {
            bind_address: cli.bind,
            backend_origin: cli.backend_origin,
        },
    )?;

    logging::init_tracing(&config.observability);
    tracing::info!("api-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend_origin = %config.backend.origin,
        upstream_timeout_secs = config.timeouts.upstream_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
