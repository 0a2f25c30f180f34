//! Integration tests for the game lifecycle over HTTP.

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_failed_generation_ends_game_and_frees_slot() {
    // Arrange: the scene succeeds, the health phase gets nothing back.
    let harness = common::build_harness(vec![Some("The generator hums in the dark.")]);

    // Act
    let (status, json) = common::send_json(
        harness.app(),
        "POST",
        "/api/v1/games",
        &json!({ "initiator": "alice" }),
    )
    .await;
    common::wait_for_game_end(&harness).await;

    // Assert
    assert_eq!(status, StatusCode::ACCEPTED);
    assert!(json["game_id"].is_string());
    let sent = harness.channel.sent_texts();
    assert!(sent[0].contains("Round 1"));
    assert!(sent.last().unwrap().contains("The health phase failed"));
    assert_eq!(harness.store.save_count(), 0);

    let (status, json) = common::get_json(harness.app(), "/api/v1/games/current").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "no_active_game");
}

#[tokio::test]
async fn test_chat_start_runs_game_and_bare_prefix_shows_help() {
    // Arrange: the generator never answers, so the first game fails fast.
    let harness = common::build_harness(vec![]);

    // Act
    let (_, first) = common::send_json(
        harness.app(),
        "POST",
        "/api/v1/gateway/messages",
        &json!({ "author": "dana", "content": "!lastlight start" }),
    )
    .await;
    common::wait_for_game_end(&harness).await;
    let (_, help) = common::send_json(
        harness.app(),
        "POST",
        "/api/v1/gateway/messages",
        &json!({ "author": "dana", "content": "!lastlight" }),
    )
    .await;

    // Assert
    assert_eq!(first["handled"], true);
    assert_eq!(help["handled"], true);
    let sent = harness.channel.sent_texts();
    assert!(sent[0].contains("started by dana"));
    assert!(sent.iter().any(|text| text.contains("The scene phase failed")));
    assert!(sent.last().unwrap().contains("!lastlight start"));
}

#[tokio::test]
async fn test_resume_without_snapshot_returns_404() {
    let harness = common::build_harness(vec![]);

    let (status, json) = common::send_json(
        harness.app(),
        "POST",
        "/api/v1/games",
        &json!({ "initiator": "alice", "resume": true }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "snapshot_not_found");

    let (status, json) = common::get_json(harness.app(), "/api/v1/games/snapshot").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["exists"], false);
}
