mod ai_client;
mod config;
mod db;
mod errors;
mod interview;
mod jobs;
mod models;
mod normalize;
mod resume;
mod routes;
mod skills;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ai_client::AiClient;
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerCraft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and apply pending migrations
    let db = create_pool(&config.database_url).await?;
    sqlx::migrate!().run(&db).await?;

    // Initialize completion client
    let ai = AiClient::new(&config)?;
    info!(
        "AI client initialized (default provider: {})",
        config.default_provider.as_str()
    );

    // Build app state
    let state = AppState { db, ai };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
