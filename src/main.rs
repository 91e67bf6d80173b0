use able_service::{create_router, AppState, Config};
use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "able-service", about = "ABLE accessible-learning service")]
struct Cli {
    /// Path to the configuration file (extension optional)
    #[arg(long, default_value = "config/able")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let cfg = match Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("No config at {} ({}); using defaults", cli.config, e);
            Config::default()
        }
    };

    info!("{} starting", cfg.service.name);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let state = AppState::new(cfg);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
