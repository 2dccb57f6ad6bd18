// src/main.rs

use clap::Parser;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use moodify::config::MoodifyConfig;
use moodify::server::{AppState, create_router};

#[derive(Parser)]
#[command(name = "moodify", about = "Mood-based Spotify recommendations with a Gemini chat companion")]
struct Args {
    /// Bind host (overrides MOODIFY_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides MOODIFY_PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let mut config = MoodifyConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    info!("Starting Moodify");
    info!("Model: {}", config.gemini_model);
    info!("Redirect URI: {}", config.spotify_redirect_uri);

    let bind_address = config.bind_address();
    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
