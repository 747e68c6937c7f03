use std::sync::Arc;

use httpmock::prelude::*;
use revwatch_core::{Cursor, ReviewStatus};
use revwatch_runtime::{
    CycleOutcome, ReviewApiClient, ReviewWatchRuntime, ReviewWatchRuntimeConfig, TelegramNotifier,
};
use serde_json::json;

const STATUS_PATH: &str = "/api/user_api/homework_statuses/";
const SEND_PATH: &str = "/bot123:bot/sendMessage";
const CHAT_ID: &str = "-1001234567890";

fn runtime_for(review_api: &MockServer, telegram: &MockServer) -> ReviewWatchRuntime {
    let source = ReviewApiClient::new(review_api.url(STATUS_PATH), "api-token", 2_000)
        .expect("review api client");
    let notifier = TelegramNotifier::new(telegram.base_url(), "123:bot".to_string(), 2_000)
        .expect("telegram notifier");
    ReviewWatchRuntime::new(
        ReviewWatchRuntimeConfig::new(CHAT_ID),
        Arc::new(source),
        Arc::new(notifier),
    )
}

fn status_text(name: &str, status: ReviewStatus) -> String {
    format!(
        "Status changed for submission \"{name}\". {}",
        status.verdict()
    )
}

#[tokio::test]
async fn integration_status_changes_are_announced_once_and_cursor_follows_server() {
    let review_api = MockServer::start();
    let telegram = MockServer::start();

    let first_poll = review_api.mock(|when, then| {
        when.method(GET)
            .path(STATUS_PATH)
            .query_param("from_date", "0")
            .header("authorization", "OAuth api-token");
        then.status(200).json_body(json!({
            "homeworks": [{"name": "Project 1", "status": "reviewing"}],
            "current_date": 1000
        }));
    });
    let second_poll = review_api.mock(|when, then| {
        when.method(GET)
            .path(STATUS_PATH)
            .query_param("from_date", "1000");
        then.status(200).json_body(json!({
            "homeworks": [{"name": "Project 1", "status": "reviewing"}],
            "current_date": 1700
        }));
    });
    let third_poll = review_api.mock(|when, then| {
        when.method(GET)
            .path(STATUS_PATH)
            .query_param("from_date", "1700");
        then.status(200).json_body(json!({
            "homeworks": [{"name": "Project 1", "status": "approved"}],
            "current_date": 2000
        }));
    });
    let reviewing_sent = telegram.mock(|when, then| {
        when.method(POST).path(SEND_PATH).json_body(json!({
            "chat_id": CHAT_ID,
            "text": status_text("Project 1", ReviewStatus::Reviewing),
            "disable_web_page_preview": true
        }));
        then.status(200).json_body(json!({"ok": true}));
    });
    let approved_sent = telegram.mock(|when, then| {
        when.method(POST).path(SEND_PATH).json_body(json!({
            "chat_id": CHAT_ID,
            "text": status_text("Project 1", ReviewStatus::Approved),
            "disable_web_page_preview": true
        }));
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut runtime = runtime_for(&review_api, &telegram);

    assert_eq!(runtime.run_cycle().await, CycleOutcome::StatusNotified);
    assert_eq!(runtime.state().cursor, Cursor::new(1000));
    assert_eq!(runtime.run_cycle().await, CycleOutcome::StatusUnchanged);
    assert_eq!(runtime.state().cursor, Cursor::new(1700));
    assert_eq!(runtime.run_cycle().await, CycleOutcome::StatusNotified);
    assert_eq!(runtime.state().cursor, Cursor::new(2000));

    first_poll.assert_calls(1);
    second_poll.assert_calls(1);
    third_poll.assert_calls(1);
    reviewing_sent.assert_calls(1);
    approved_sent.assert_calls(1);
}

#[tokio::test]
async fn integration_repeated_outage_is_reported_once() {
    let review_api = MockServer::start();
    let telegram = MockServer::start();

    let outage = review_api.mock(|when, then| {
        when.method(GET).path(STATUS_PATH).query_param("from_date", "0");
        then.status(503).body("upstream unavailable");
    });
    let error_sent = telegram.mock(|when, then| {
        when.method(POST)
            .path(SEND_PATH)
            .body_includes("Review watch failure: review api returned HTTP status 503");
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut runtime = runtime_for(&review_api, &telegram);

    assert_eq!(
        runtime.run_cycle().await,
        CycleOutcome::ErrorNotified {
            reason_code: "http_status"
        }
    );
    assert_eq!(
        runtime.run_cycle().await,
        CycleOutcome::ErrorSuppressed {
            reason_code: "http_status"
        }
    );
    assert_eq!(runtime.state().cursor, Cursor::START);
    outage.assert_calls(2);
    error_sent.assert_calls(1);
}

#[tokio::test]
async fn integration_empty_history_sends_nothing() {
    let review_api = MockServer::start();
    let telegram = MockServer::start();

    let empty = review_api.mock(|when, then| {
        when.method(GET).path(STATUS_PATH);
        then.status(200)
            .json_body(json!({"homeworks": [], "current_date": 1000}));
    });
    let any_send = telegram.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut runtime = runtime_for(&review_api, &telegram);

    assert_eq!(runtime.run_cycle().await, CycleOutcome::NoUpdate);
    assert_eq!(runtime.run_cycle().await, CycleOutcome::NoUpdate);
    assert_eq!(runtime.state().cursor, Cursor::START);
    empty.assert_calls(2);
    any_send.assert_calls(0);
}

#[tokio::test]
async fn integration_undeliverable_notification_does_not_stop_the_watch() {
    let review_api = MockServer::start();
    let telegram = MockServer::start();

    review_api.mock(|when, then| {
        when.method(GET).path(STATUS_PATH);
        then.status(200).json_body(json!({
            "homeworks": [{"homework_name": "Project 2", "status": "rejected"}],
            "current_date": 3000
        }));
    });
    let rejected = telegram.mock(|when, then| {
        when.method(POST).path(SEND_PATH);
        then.status(400)
            .json_body(json!({"ok": false, "description": "Bad Request: chat not found"}));
    });

    let mut runtime = runtime_for(&review_api, &telegram);

    assert_eq!(runtime.run_cycle().await, CycleOutcome::StatusNotifyFailed);
    assert_eq!(runtime.state().cursor, Cursor::new(3000));
    assert_eq!(runtime.state().notifications.last_message, None);
    assert_eq!(runtime.run_cycle().await, CycleOutcome::StatusNotifyFailed);
    rejected.assert_calls(2);
}
