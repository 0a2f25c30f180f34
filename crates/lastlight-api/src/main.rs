//! Last Light API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use lastlight_api::config::Config;
use lastlight_api::error::AppError;
use lastlight_api::gateway::GatewayChannel;
use lastlight_api::state::AppState;
use lastlight_core::chat::ChatChannel;
use lastlight_core::clock::{Clock, SystemClock};
use lastlight_core::error::GameError;
use lastlight_core::rng::OsSeededRng;
use lastlight_core::store::SnapshotStore;
use lastlight_generation::{Credential, GenerationClient, HttpTransport};
use lastlight_narrative::HeuristicInterpreter;
use lastlight_roster::Roster;
use lastlight_round::application::engine::RoundEngine;
use lastlight_store::{FileSnapshotStore, PgSnapshotStore};
use lastlight_voting::{DEFAULT_SETTLE, VoteAggregator};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

async fn snapshot_store(config: &Config) -> Result<Arc<dyn SnapshotStore>, AppError> {
    if let Some(database_url) = &config.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let store = PgSnapshotStore::new(pool);
        store.ensure_schema().await.map_err(startup_error)?;
        tracing::info!("Using PostgreSQL snapshot store");
        Ok(Arc::new(store))
    } else {
        tracing::info!(dir = %config.snapshot_dir.display(), "Using file snapshot store");
        Ok(Arc::new(FileSnapshotStore::new(&config.snapshot_dir)))
    }
}

#[allow(clippy::needless_pass_by_value)]
fn startup_error(err: GameError) -> AppError {
    AppError::Config(err.to_string())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Last Light API server");

    let config = Config::from_env()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let http = reqwest::Client::new();

    // Generation client over the credential pool.
    let cooldown = chrono::Duration::from_std(config.generation.cooldown)
        .map_err(|e| AppError::Config(format!("GENERATION_COOLDOWN_SECS out of range: {e}")))?;
    let generator = GenerationClient::new(
        Arc::new(HttpTransport::with_client(
            http.clone(),
            config.generation.endpoint.clone(),
        )),
        Credential::pool_from_keys(&config.generation.api_keys),
        config.generation.model.clone(),
        Arc::clone(&clock),
    )
    .with_cooldown(cooldown);
    tracing::info!(credentials = generator.pool_size(), "Generation client ready");

    // Chat gateway adapter; inbound reactions are published on its sender.
    let gateway = GatewayChannel::new(http, &config.gateway).map_err(startup_error)?;
    let reactions = gateway.reaction_sender();
    let channel: Arc<dyn ChatChannel> = Arc::new(gateway);

    let store = snapshot_store(&config).await?;

    let roster = Roster::standard();
    let engine = RoundEngine::new(
        Arc::new(generator),
        Arc::new(HeuristicInterpreter::new(roster.clone())),
        Arc::clone(&channel),
        store,
        clock,
        Box::new(OsSeededRng::new()),
    )
    .with_votes(VoteAggregator::new(
        DEFAULT_SETTLE,
        config.vote_inactivity,
        config.vote_ceiling,
    ))
    .with_phase_delay(config.phase_delay);

    let app_state = AppState::new(Arc::new(engine), channel, reactions, roster);

    // Build router.
    // TODO: Replace CorsLayer::permissive() with the gateway's origin once it is fixed per deployment.
    let app = lastlight_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
