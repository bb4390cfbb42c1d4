use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use haulboard_db::queries::UpsertOutcome;
use haulboard_types::api::{StatusMessage, UpsertScheduleRequest};
use haulboard_types::models::{HistoryEntry, ScheduleEntry};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub driver: String,
}

/// GET /api/schedule?driver= — the driver's entries, earliest date first.
pub async fn get_schedule(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<ScheduleEntry>>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.schedule_for_driver(&query.driver))
        .await
        .map_err(|e| ApiError::new("Failed to fetch schedule", e))?
        .map_err(|e| ApiError::new("Failed to fetch schedule", e))?;

    let entries = rows
        .into_iter()
        .map(|row| ScheduleEntry {
            id: row.id,
            driver: row.driver,
            date: row.date,
            destination: row.destination,
            cargo: row.cargo,
            truck_number: row.truck_number,
            company_message: row.company_message,
        })
        .collect();

    Ok(Json(entries))
}

/// POST /api/schedule — insert-or-update the entry for (driver, date).
pub async fn post_schedule(
    State(state): State<AppState>,
    Json(req): Json<UpsertScheduleRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let db = state.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        db.db.upsert_schedule(
            &req.driver,
            &req.date,
            &req.destination,
            &req.cargo,
            &req.truck_number,
            &req.company_message,
        )
    })
    .await
    .map_err(|e| ApiError::new("Failed to save schedule", e))?
    .map_err(|e| ApiError::new("Failed to save schedule", e))?;

    let message = match outcome {
        UpsertOutcome::Created => "Schedule created",
        UpsertOutcome::Updated => "Schedule updated",
    };
    Ok(Json(StatusMessage::new(message)))
}

/// GET /api/history?driver= — past assignments, newest date first.
pub async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.history_for_driver(&query.driver))
        .await
        .map_err(|e| ApiError::new("Failed to fetch history", e))?
        .map_err(|e| ApiError::new("Failed to fetch history", e))?;

    let entries = rows
        .into_iter()
        .map(|row| HistoryEntry {
            date: row.date,
            destination: row.destination,
            cargo: row.cargo,
            truck_number: row.truck_number,
            company_message: row.company_message,
        })
        .collect();

    Ok(Json(entries))
}
