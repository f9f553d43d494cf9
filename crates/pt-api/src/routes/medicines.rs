//! Catalog administration routes

use crate::AppState;
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use pt_core::{CoreError, Medicine, NewMedicine, ScanRecord};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

pub async fn create_medicine(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewMedicine>,
) -> Result<(StatusCode, Json<Medicine>), StatusCode> {
    let medicine = state.catalog.insert(req).await.map_err(|e| match e {
        CoreError::BarcodeExists(_) => StatusCode::CONFLICT,
        e => {
            error!("Failed to ingest medicine: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    })?;

    Ok((StatusCode::CREATED, Json(medicine)))
}

pub async fn delete_medicine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let deleted = state.catalog.delete(id).await.map_err(|e| {
        error!("Failed to delete medicine: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    if !deleted {
        return Err(StatusCode::NOT_FOUND);
    }

    // Scan records go with it, via the store's cascade.
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Path(barcode): Path<String>,
) -> Result<Json<Vec<ScanRecord>>, StatusCode> {
    let medicine = state
        .catalog
        .find_by_barcode(&barcode)
        .await
        .map_err(|e| {
            error!("Catalog lookup failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    let history = state.ledger.history_for(medicine.id).await.map_err(|e| {
        error!("History read failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(history))
}
