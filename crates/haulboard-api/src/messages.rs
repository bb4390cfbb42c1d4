use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::warn;

use haulboard_db::models::MessageRow;
use haulboard_types::api::{MarkReadRequest, SendMessageRequest, StatusMessage};
use haulboard_types::models::{Message, Role};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub driver: String,
}

/// GET /api/messages?driver= — the driver's thread, oldest first.
pub async fn get_messages(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
) -> Result<Json<Vec<Message>>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.messages_for_driver(&query.driver))
        .await
        .map_err(|e| ApiError::new("Failed to fetch messages", e))?
        .map_err(|e| ApiError::new("Failed to fetch messages", e))?;

    let messages = rows.into_iter().map(message_from_row).collect();
    Ok(Json(messages))
}

/// POST /api/messages — append to the driver's thread. The store assigns
/// the timestamp; the unread flag starts clear.
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || {
        db.db
            .insert_message(&req.driver, req.role.as_str(), &req.subject, &req.message, &req.date)
    })
    .await
    .map_err(|e| ApiError::new("Failed to send message", e))?
    .map_err(|e| ApiError::new("Failed to send message", e))?;

    Ok(Json(StatusMessage::new("Message sent")))
}

/// POST /api/messages/read — mark the driver-authored half of the thread
/// as read.
pub async fn mark_read(
    State(state): State<AppState>,
    Json(req): Json<MarkReadRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.mark_messages_read(&req.driver))
        .await
        .map_err(|e| ApiError::new("Failed to mark as read", e))?
        .map_err(|e| ApiError::new("Failed to mark as read", e))?;

    Ok(Json(StatusMessage::new("Marked as read")))
}

fn message_from_row(row: MessageRow) -> Message {
    let role = match row.role.as_str() {
        "driver" => Role::Driver,
        "company" => Role::Company,
        other => {
            warn!("Corrupt role '{}' on message {}", other, row.id);
            Role::Company
        }
    };

    let timestamp = row
        .timestamp
        .parse::<chrono::DateTime<chrono::Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
            // Parse as naive UTC and convert.
            chrono::NaiveDateTime::parse_from_str(&row.timestamp, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on message {}: {}", row.timestamp, row.id, e);
            chrono::DateTime::default()
        });

    Message {
        id: row.id,
        driver: row.driver,
        role,
        subject: row.subject,
        message: row.message,
        date: row.date,
        timestamp,
        read_flag: row.read_flag,
    }
}
