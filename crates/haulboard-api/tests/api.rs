use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use haulboard_api::routes::router;
use haulboard_api::state::AppStateInner;
use haulboard_db::Database;

fn test_app(unique_driver_names: bool) -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let db = Arc::new(Database::open(&dir.path().join("haulboard.db")).unwrap());
    let state = Arc::new(AppStateInner { db, unique_driver_names });
    (dir, router(state))
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(path).body(Body::empty()).unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    // extractor rejections (e.g. a bad role) come back as plain text
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn schedule_upsert_round_trip() {
    let (_dir, app) = test_app(false);

    let (status, body) = post(
        &app,
        "/api/drivers/add",
        json!({"name": "Tanaka", "phone": "090-0000-0000", "address": "Osaka"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "registered");

    let (_, drivers) = get(&app, "/api/drivers").await;
    assert_eq!(drivers, json!(["Tanaka"]));

    let (status, body) = post(
        &app,
        "/api/schedule",
        json!({
            "driver": "Tanaka", "date": "2024-06-01", "destination": "Osaka",
            "cargo": "Steel", "truck_number": "T-12", "company_message": "early start"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Schedule created");

    let (_, entries) = get(&app, "/api/schedule?driver=Tanaka").await;
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["destination"], "Osaka");
    let created_id = entries[0]["id"].as_i64().unwrap();

    let (status, body) = post(
        &app,
        "/api/schedule",
        json!({
            "driver": "Tanaka", "date": "2024-06-01", "destination": "Tokyo",
            "cargo": "Steel", "truck_number": "T-12", "company_message": "early start"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Schedule updated");

    let (_, entries) = get(&app, "/api/schedule?driver=Tanaka").await;
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["destination"], "Tokyo");
    assert_eq!(entries[0]["id"].as_i64().unwrap(), created_id);
}

#[tokio::test]
async fn message_read_flow() {
    let (_dir, app) = test_app(false);

    let (status, body) = post(
        &app,
        "/api/messages",
        json!({
            "driver": "Tanaka", "role": "driver", "subject": "Q",
            "message": "fuel low", "date": "2024-06-01"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Message sent");

    let (_, messages) = get(&app, "/api/messages?driver=Tanaka").await;
    assert_eq!(messages.as_array().unwrap().len(), 1);
    assert_eq!(messages[0]["read_flag"], false);

    let (status, body) = post(&app, "/api/messages/read", json!({"driver": "Tanaka"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Marked as read");

    let (_, messages) = get(&app, "/api/messages?driver=Tanaka").await;
    assert_eq!(messages[0]["read_flag"], true);
}

#[tokio::test]
async fn mark_read_leaves_company_messages_unread() {
    let (_dir, app) = test_app(false);

    post(
        &app,
        "/api/messages",
        json!({
            "driver": "Tanaka", "role": "driver", "subject": "Q",
            "message": "fuel low", "date": "2024-06-01"
        }),
    )
    .await;
    post(
        &app,
        "/api/messages",
        json!({
            "driver": "Tanaka", "role": "company", "subject": "A",
            "message": "refuel at depot", "date": "2024-06-01"
        }),
    )
    .await;

    post(&app, "/api/messages/read", json!({"driver": "Tanaka"})).await;

    let (_, messages) = get(&app, "/api/messages?driver=Tanaka").await;
    assert_eq!(messages[0]["role"], "driver");
    assert_eq!(messages[0]["read_flag"], true);
    assert_eq!(messages[1]["role"], "company");
    assert_eq!(messages[1]["read_flag"], false);
}

#[tokio::test]
async fn history_is_newest_first() {
    let (_dir, app) = test_app(false);

    for (date, destination) in [("2024-06-01", "Osaka"), ("2024-06-03", "Tokyo")] {
        post(
            &app,
            "/api/schedule",
            json!({
                "driver": "Tanaka", "date": date, "destination": destination,
                "cargo": "Steel", "truck_number": "T-12", "company_message": ""
            }),
        )
        .await;
    }

    let (status, history) = get(&app, "/api/history?driver=Tanaka").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history[0]["date"], "2024-06-03");
    assert_eq!(history[1]["date"], "2024-06-01");
    // history rows carry no id or driver column
    assert!(history[0].get("id").is_none());
}

#[tokio::test]
async fn deactivate_clears_driver_data() {
    let (_dir, app) = test_app(false);

    post(
        &app,
        "/api/drivers/add",
        json!({"name": "Tanaka", "phone": "090-0000-0000", "address": "Osaka"}),
    )
    .await;
    post(
        &app,
        "/api/schedule",
        json!({
            "driver": "Tanaka", "date": "2024-06-01", "destination": "Osaka",
            "cargo": "Steel", "truck_number": "T-12", "company_message": ""
        }),
    )
    .await;
    post(
        &app,
        "/api/messages",
        json!({
            "driver": "Tanaka", "role": "company", "subject": "note",
            "message": "body", "date": "2024-06-01"
        }),
    )
    .await;

    let (status, body) = post(&app, "/api/drivers/delete", json!({"name": "Tanaka"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Tanaka deactivated");

    let (_, drivers) = get(&app, "/api/drivers").await;
    assert_eq!(drivers, json!([]));
    let (_, entries) = get(&app, "/api/schedule?driver=Tanaka").await;
    assert_eq!(entries, json!([]));
    let (_, messages) = get(&app, "/api/messages?driver=Tanaka").await;
    assert_eq!(messages, json!([]));
}

#[tokio::test]
async fn unknown_role_is_rejected_before_the_handler() {
    let (_dir, app) = test_app(false);

    let (status, _) = post(
        &app,
        "/api/messages",
        json!({
            "driver": "Tanaka", "role": "dispatcher", "subject": "Q",
            "message": "body", "date": "2024-06-01"
        }),
    )
    .await;
    assert!(status.is_client_error());

    let (_, messages) = get(&app, "/api/messages?driver=Tanaka").await;
    assert_eq!(messages, json!([]));
}

#[tokio::test]
async fn storage_failure_renders_uniform_error_body() {
    let (_dir, app) = test_app(true);

    let driver = json!({"name": "Tanaka", "phone": "090-0000-0000", "address": "Osaka"});
    let (status, _) = post(&app, "/api/drivers/add", driver.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/api/drivers/add", driver).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to register driver");
}
