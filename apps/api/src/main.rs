mod assessment;
mod auth;
mod coach;
mod config;
mod db;
mod errors;
mod profile;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::assessment::benchmarks::BenchmarkTable;
use crate::auth::identity::HttpIdentityGate;
use crate::auth::session::RedisSessionStore;
use crate::coach::backend::AnthropicCoach;
use crate::coach::store::PgDialogueStore;
use crate::config::Config;
use crate::db::create_pool;
use crate::profile::store::PgProfileStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Compass API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let pool = create_pool(&config.database_url).await?;

    // Initialize Redis (session store)
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize the coach backend
    let coach = AnthropicCoach::new(config.anthropic_api_key.clone());
    info!("Coach backend initialized (model: {})", coach::backend::MODEL);

    // Build app state
    let state = AppState {
        profiles: Arc::new(PgProfileStore::new(pool.clone())),
        dialogues: Arc::new(PgDialogueStore::new(pool)),
        sessions: Arc::new(RedisSessionStore::new(redis, config.session_ttl_secs)),
        identity: Arc::new(HttpIdentityGate::new(
            config.identity_verify_url.clone(),
            config.identity_api_key.clone(),
        )),
        coach: Arc::new(coach),
        benchmarks: Arc::new(BenchmarkTable::builtin()),
        config: config.clone(),
    };

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
