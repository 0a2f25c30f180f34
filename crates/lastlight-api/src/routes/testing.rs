//! Helpers shared by the route unit tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use lastlight_core::clock::Clock;
use lastlight_narrative::HeuristicInterpreter;
use lastlight_roster::Roster;
use lastlight_round::application::engine::RoundEngine;
use lastlight_test_support::{FixedClock, InMemorySnapshotStore, MockRng, RecordingChannel, ScriptedGenerator};
use serde_json::Value;
use tokio::sync::broadcast;
use tower::ServiceExt;

use crate::state::AppState;

pub(crate) struct TestApp {
    pub state: AppState,
    pub channel: Arc<RecordingChannel>,
    pub store: Arc<InMemorySnapshotStore>,
}

/// State whose engine has nothing scripted, so any game it starts ends at
/// the first generation call.
pub(crate) fn test_app() -> TestApp {
    let channel = Arc::new(RecordingChannel::new());
    let store = Arc::new(InMemorySnapshotStore::new());
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
    ));
    let engine = RoundEngine::new(
        Arc::new(ScriptedGenerator::succeeding(Vec::<String>::new())),
        Arc::new(HeuristicInterpreter::standard()),
        channel.clone(),
        store.clone(),
        clock,
        Box::new(MockRng),
    )
    .with_phase_delay(Duration::ZERO);
    let (reactions, _) = broadcast::channel(16);

    TestApp {
        state: AppState::new(Arc::new(engine), channel.clone(), reactions, Roster::standard()),
        channel,
        store,
    }
}

/// Sends a request with an optional JSON body and returns status and JSON.
pub(crate) async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
