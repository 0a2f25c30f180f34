//! Routes for starting, inspecting and steering games.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use lastlight_core::error::GameError;
use lastlight_round::application::{command_handlers, query_handlers};
use lastlight_round::domain::commands;
use lastlight_round::domain::speed::Speed;
use lastlight_round::domain::summary::GameSummary;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::responders::HttpResponder;
use crate::state::AppState;

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    /// Who is starting the game.
    pub initiator: String,
    /// Load the saved snapshot instead of starting fresh.
    #[serde(default)]
    pub resume: bool,
}

/// Response body after a game was started.
#[derive(Debug, Serialize)]
pub struct StartGameResponse {
    /// Identifier of the new or resumed game.
    pub game_id: Uuid,
    /// The round the game starts at.
    pub round_number: u32,
    /// Characters alive at the start.
    pub alive: Vec<String>,
    /// Replies the command produced.
    pub replies: Vec<String>,
}

/// Request body for POST /terminate.
#[derive(Debug, Deserialize)]
pub struct TerminateRequest {
    /// Who asked for the stop.
    pub requested_by: String,
}

/// Response body after termination was requested.
#[derive(Debug, Serialize)]
pub struct TerminateResponse {
    /// The game that will stop.
    pub game_id: Uuid,
}

/// Request body for PUT /speed.
#[derive(Debug, Deserialize)]
pub struct SetSpeedRequest {
    /// Requested multiplier; unsupported values fall back to 1x.
    pub multiplier: f64,
}

/// Response body with the speed actually applied.
#[derive(Debug, Serialize)]
pub struct SpeedResponse {
    /// The speed applied.
    pub speed: Speed,
    /// Display form, such as `1.5x`.
    pub label: String,
}

/// POST /
#[instrument(skip(state, request), fields(initiator = %request.initiator, resume = request.resume))]
async fn start_game(
    State(state): State<AppState>,
    Json(request): Json<StartGameRequest>,
) -> Result<(StatusCode, Json<StartGameResponse>), ApiError> {
    if request.initiator.trim().is_empty() {
        return Err(GameError::Validation("initiator must not be blank".into()).into());
    }
    let command = commands::StartGame {
        initiator: request.initiator,
        resume: request.resume,
    };

    let responder = HttpResponder::new();
    let session = command_handlers::handle_start_game(
        &command,
        &state.registry,
        state.store(),
        state.roster,
        &responder,
    )
    .await?;

    let summary = session.summary();
    info!(game_id = %summary.game_id, "starting game task");
    command_handlers::spawn_game(
        Arc::clone(&state.engine),
        Arc::clone(&state.registry),
        session,
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(StartGameResponse {
            game_id: summary.game_id,
            round_number: summary.round_number,
            alive: summary.alive,
            replies: responder.take(),
        }),
    ))
}

/// GET /current
async fn current_game(State(state): State<AppState>) -> Result<Json<GameSummary>, ApiError> {
    let summary = query_handlers::get_current_game(&state.registry)?;
    Ok(Json(summary))
}

/// POST /terminate
#[instrument(skip(state, request), fields(requested_by = %request.requested_by))]
async fn terminate_game(
    State(state): State<AppState>,
    Json(request): Json<TerminateRequest>,
) -> Result<(StatusCode, Json<TerminateResponse>), ApiError> {
    let command = commands::TerminateGame {
        requested_by: request.requested_by,
    };
    let game_id = command_handlers::handle_terminate_game(&command, &state.registry)?;
    Ok((StatusCode::ACCEPTED, Json(TerminateResponse { game_id })))
}

/// PUT /speed
#[instrument(skip(state, request), fields(multiplier = request.multiplier))]
async fn set_speed(
    State(state): State<AppState>,
    Json(request): Json<SetSpeedRequest>,
) -> Result<Json<SpeedResponse>, ApiError> {
    let command = commands::SetSpeed {
        multiplier: request.multiplier,
    };
    let speed = command_handlers::handle_set_speed(&command, &state.registry)?;
    Ok(Json(SpeedResponse {
        speed,
        label: speed.to_string(),
    }))
}

/// GET /snapshot
async fn snapshot_status(
    State(state): State<AppState>,
) -> Json<query_handlers::SnapshotStatus> {
    Json(query_handlers::get_snapshot_status(state.store()).await)
}

/// Returns the router for game commands and queries.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(start_game))
        .route("/current", get(current_game))
        .route("/terminate", post(terminate_game))
        .route("/speed", put(set_speed))
        .route("/snapshot", get(snapshot_status))
}
