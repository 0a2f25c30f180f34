//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use lastlight_core::clock::Clock;
use lastlight_generation::TextGenerator;
use lastlight_narrative::HeuristicInterpreter;
use lastlight_roster::Roster;
use lastlight_round::application::engine::RoundEngine;
use lastlight_test_support::{
    FixedClock, InMemorySnapshotStore, MockRng, RecordingChannel, ScriptedGenerator,
};
use tokio::sync::broadcast;
use tower::ServiceExt;

use lastlight_api::state::AppState;

/// Fixed timestamp used across all integration tests.
pub fn fixed_clock() -> Arc<dyn Clock> {
    Arc::new(FixedClock(
        chrono::TimeZone::with_ymd_and_hms(&chrono::Utc, 2026, 1, 15, 10, 0, 0).unwrap(),
    ))
}

/// The pieces of a test application that assertions look at.
pub struct TestHarness {
    pub state: AppState,
    pub channel: Arc<RecordingChannel>,
    pub store: Arc<InMemorySnapshotStore>,
}

impl TestHarness {
    /// Build the full app router over this harness's state. Uses the same
    /// route structure as `main.rs`.
    pub fn app(&self) -> Router {
        lastlight_api::app(self.state.clone())
    }
}

/// Build a harness whose generator replies with `replies` in order and
/// then reports failure.
pub fn build_harness(replies: Vec<Option<&str>>) -> TestHarness {
    build_harness_with(Arc::new(ScriptedGenerator::new(replies)))
}

/// Build a harness around any text generator.
pub fn build_harness_with(generator: Arc<dyn TextGenerator>) -> TestHarness {
    let channel = Arc::new(RecordingChannel::new());
    let store = Arc::new(InMemorySnapshotStore::new());
    let engine = RoundEngine::new(
        generator,
        Arc::new(HeuristicInterpreter::standard()),
        channel.clone(),
        store.clone(),
        fixed_clock(),
        Box::new(MockRng),
    )
    .with_phase_delay(Duration::ZERO);
    let (reactions, _) = broadcast::channel(16);

    TestHarness {
        state: AppState::new(Arc::new(engine), channel.clone(), reactions, Roster::standard()),
        channel,
        store,
    }
}

/// Polls until no game is registered, or panics after about two seconds.
pub async fn wait_for_game_end(harness: &TestHarness) {
    for _ in 0..200 {
        if harness.state.registry.current().is_none() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("game did not end in time");
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

/// Send a request with a JSON body and return the response.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    send(app, request).await
}
