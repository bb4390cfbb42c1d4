use axum::{Json, extract::State};

use haulboard_types::api::{DeleteDriverRequest, RegisterDriverRequest, StatusMessage};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/drivers — names of active drivers in registration order.
pub async fn list_drivers(
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    // Run blocking DB work off the async runtime
    let db = state.clone();
    let names = tokio::task::spawn_blocking(move || db.db.active_drivers())
        .await
        .map_err(|e| ApiError::new("Failed to fetch drivers", e))?
        .map_err(|e| ApiError::new("Failed to fetch drivers", e))?;

    Ok(Json(names))
}

/// POST /api/drivers/add — register a new driver as active.
pub async fn register_driver(
    State(state): State<AppState>,
    Json(req): Json<RegisterDriverRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || {
        db.db
            .register_driver(&req.name, &req.phone, &req.address, db.unique_driver_names)
    })
    .await
    .map_err(|e| ApiError::new("Failed to register driver", e))?
    .map_err(|e| ApiError::new("Failed to register driver", e))?;

    Ok(Json(StatusMessage::new("registered")))
}

/// POST /api/drivers/delete — deactivate a driver and drop their schedule
/// and message history.
pub async fn delete_driver(
    State(state): State<AppState>,
    Json(req): Json<DeleteDriverRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let db = state.clone();
    let name = req.name.clone();
    tokio::task::spawn_blocking(move || db.db.deactivate_driver(&name))
        .await
        .map_err(|e| ApiError::new("Failed to delete driver", e))?
        .map_err(|e| ApiError::new("Failed to delete driver", e))?;

    Ok(Json(StatusMessage::new(format!("{} deactivated", req.name))))
}
