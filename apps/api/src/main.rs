mod chat;
mod config;
mod db;
mod errors;
mod extract;
mod generation;
mod jobs;
mod llm_client;
mod matching;
mod models;
mod profile;
mod routes;
mod sanitizer;
mod state;
mod text;
mod users;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::jobs::scraper::HttpJobScraper;
use crate::llm_client::ProviderGateway;
use crate::matching::skills::SkillTable;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Builder API v{}", env!("CARGO_PKG_VERSION"));

    let db = create_pool(&config.database_url).await?;

    let gateway = ProviderGateway::from_config(&config)?;

    let skills = Arc::new(SkillTable::load_or_builtin(config.skill_table_path.as_deref()));
    info!("Skill table loaded ({} entries)", skills.len());

    let scraper = Arc::new(HttpJobScraper::new()?);

    let state = AppState {
        db,
        gateway,
        skills,
        scraper,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()), // TODO: restrict origins once the frontend host is fixed
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
