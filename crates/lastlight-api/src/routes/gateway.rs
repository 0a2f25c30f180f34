//! Inbound webhooks from the chat gateway.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use lastlight_core::chat::{ReactionEvent, VoteOption};
use lastlight_core::responder::Responder;
use lastlight_round::application::command_handlers;
use lastlight_round::domain::commands::{self, ChatCommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::responders::ChatResponder;
use crate::state::AppState;

/// Reply to `!lastlight help` and unknown verbs.
pub const HELP_TEXT: &str = "🌒 **Last Light** commands:\n\
    `!lastlight start` begins a new game\n\
    `!lastlight resume` continues the saved game\n\
    `!lastlight stop` ends the game after the current phase\n\
    `!lastlight speed <1|1.5|2>` changes the pacing";

/// Response body for POST /reactions.
#[derive(Debug, Serialize)]
pub struct ReactionAck {
    /// Whether the event concerned a vote reaction.
    pub forwarded: bool,
    /// Number of vote collectors that received it.
    pub listeners: usize,
}

/// Request body for POST /messages.
#[derive(Debug, Deserialize)]
pub struct InboundMessage {
    /// Display name of the sender.
    pub author: String,
    /// Raw message text.
    pub content: String,
}

/// Response body for POST /messages.
#[derive(Debug, Serialize)]
pub struct MessageAck {
    /// Whether the message was a game command.
    pub handled: bool,
}

/// POST /reactions
async fn reaction_event(
    State(state): State<AppState>,
    Json(event): Json<ReactionEvent>,
) -> (StatusCode, Json<ReactionAck>) {
    if VoteOption::from_emoji(&event.emoji).is_none() {
        return (
            StatusCode::ACCEPTED,
            Json(ReactionAck {
                forwarded: false,
                listeners: 0,
            }),
        );
    }

    // No receivers just means no vote is open right now.
    let listeners = state.reactions.send(event).unwrap_or(0);
    debug!(listeners, "reaction event forwarded");
    (
        StatusCode::ACCEPTED,
        Json(ReactionAck {
            forwarded: true,
            listeners,
        }),
    )
}

async fn reply(responder: &ChatResponder, text: &str) {
    if let Err(err) = responder.send_message(text).await {
        warn!(error = %err, "failed to reply in chat");
    }
}

/// POST /messages
#[instrument(skip(state, message), fields(author = %message.author))]
async fn chat_message(
    State(state): State<AppState>,
    Json(message): Json<InboundMessage>,
) -> Json<MessageAck> {
    let Some(command) = ChatCommand::parse(&message.content) else {
        return Json(MessageAck { handled: false });
    };

    let responder = ChatResponder::new(Arc::clone(&state.channel));
    match command {
        ChatCommand::Start | ChatCommand::Resume => {
            let start = commands::StartGame {
                initiator: message.author,
                resume: command == ChatCommand::Resume,
            };
            // Rejections were already explained in chat by the handler.
            match command_handlers::handle_start_game(
                &start,
                &state.registry,
                state.store(),
                state.roster,
                &responder,
            )
            .await
            {
                Ok(session) => {
                    command_handlers::spawn_game(
                        Arc::clone(&state.engine),
                        Arc::clone(&state.registry),
                        session,
                    );
                }
                Err(err) => debug!(error = %err, "start command rejected"),
            }
        }
        ChatCommand::Stop => {
            let stop = commands::TerminateGame {
                requested_by: message.author,
            };
            match command_handlers::handle_terminate_game(&stop, &state.registry) {
                Ok(_) => reply(&responder, "🛑 The game will end after the current phase.").await,
                Err(err) => reply(&responder, &format!("⛔ {err}.")).await,
            }
        }
        ChatCommand::Speed(multiplier) => {
            let speed = commands::SetSpeed { multiplier };
            match command_handlers::handle_set_speed(&speed, &state.registry) {
                Ok(speed) => reply(&responder, &format!("⏩ Speed set to {speed}.")).await,
                Err(err) => reply(&responder, &format!("⛔ {err}.")).await,
            }
        }
        ChatCommand::Help => reply(&responder, HELP_TEXT).await,
    }

    Json(MessageAck { handled: true })
}

/// Returns the router for gateway webhooks.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reactions", post(reaction_event))
        .route("/messages", post(chat_message))
}
