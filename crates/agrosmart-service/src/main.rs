//! AgroSmart Service - HTTP API for the agriculture monitoring demo.
//!
//! Run with: `cargo run -p agrosmart-service`

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use agrosmart_service::{AppState, Config, app};

/// AgroSmart Service - HTTP REST API for simulated farm monitoring.
#[derive(Parser, Debug)]
#[command(name = "agrosmart-service")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long, env = "AGROSMART_BIND")]
    bind: Option<String>,

    /// Seed for reproducible simulated data (overrides config).
    #[arg(long)]
    seed: Option<u64>,

    /// OpenWeather API key (overrides config).
    #[arg(long, env = "AGROSMART_WEATHER_API_KEY", hide_env_values = true)]
    weather_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("agrosmart_service=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default().unwrap_or_default(),
    };

    // Override config with CLI args
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }
    if let Some(key) = args.weather_api_key {
        config.weather.api_key = Some(key);
    }
    config.validate()?;

    let state = AppState::new(config)?;
    let addr: SocketAddr = state.config.server.bind.parse()?;
    let app = app(state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
