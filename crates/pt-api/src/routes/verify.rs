//! Barcode verification route

use crate::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pt_core::{CoreError, Medicine, ScanRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub barcode: String,
    // Coordinates are recorded as supplied; absent values default to 0.0.
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lng: f64,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub is_authentic: bool,
    pub medicine: Medicine,
    pub history: Vec<ScanRecord>,
}

#[derive(Serialize)]
pub struct NotFoundResponse {
    pub is_authentic: bool,
    pub message: String,
}

pub async fn verify_medicine(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> Response {
    match state.verifier.verify(&req.barcode, req.lat, req.lng).await {
        Ok(result) => (
            StatusCode::OK,
            Json(VerifyResponse {
                is_authentic: true,
                medicine: result.medicine,
                history: result.history,
            }),
        )
            .into_response(),
        Err(CoreError::MedicineNotFound) => (
            StatusCode::NOT_FOUND,
            Json(NotFoundResponse {
                is_authentic: false,
                message: "Medicine not found in database".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            error!("Verification failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppConfig;
    use axum::body::to_bytes;
    use chrono::NaiveDate;
    use pt_core::{CatalogStore, MemoryStore, NewMedicine, ScanLedger, VerificationService};
    use serde_json::Value;

    fn test_state(store: &MemoryStore) -> Arc<AppState> {
        let catalog = Arc::new(store.catalog());
        let ledger = Arc::new(store.ledger());
        Arc::new(AppState {
            verifier: VerificationService::new(catalog.clone(), ledger.clone()),
            catalog,
            ledger,
            config: AppConfig::default(),
        })
    }

    async fn seed(store: &MemoryStore, barcode: &str) {
        store
            .catalog()
            .insert(NewMedicine {
                barcode: barcode.to_string(),
                name: "Paracetamol".to_string(),
                manufacturer: "AcmeCo".to_string(),
                batch_number: "B1".to_string(),
                expiry_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            })
            .await
            .unwrap();
    }

    async fn call_verify(state: Arc<AppState>, barcode: &str, lat: f64, lng: f64) -> (StatusCode, Value) {
        let response = verify_medicine(
            State(state),
            Json(VerifyRequest {
                barcode: barcode.to_string(),
                lat,
                lng,
            }),
        )
        .await;

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn unknown_barcode_returns_404_body() {
        let store = MemoryStore::new();
        let state = test_state(&store);

        let (status, body) = call_verify(state, "000", 1.0, 2.0).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["is_authentic"], Value::Bool(false));
        assert_eq!(body["message"], "Medicine not found in database");
        assert_eq!(store.ledger().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn known_barcode_returns_medicine_and_history() {
        let store = MemoryStore::new();
        seed(&store, "ABC123").await;
        let state = test_state(&store);

        let (status, body) = call_verify(state, "ABC123", 12.34, 56.78).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_authentic"], Value::Bool(true));
        assert_eq!(body["medicine"]["barcode"], "ABC123");
        assert_eq!(body["medicine"]["name"], "Paracetamol");
        assert_eq!(body["medicine"]["expiry_date"], "2026-01-01");

        let history = body["history"].as_array().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0]["scan_type"], "customer");
        assert_eq!(history[0]["location_lat"], 12.34);
        assert_eq!(history[0]["location_lng"], 56.78);
        assert_eq!(history[0]["is_authentic"], Value::Bool(true));
        // The ledger reference serializes under the `medicine` key.
        assert_eq!(history[0]["medicine"], body["medicine"]["id"]);
    }

    #[tokio::test]
    async fn second_scan_extends_the_history() {
        let store = MemoryStore::new();
        seed(&store, "ABC123").await;
        let state = test_state(&store);

        call_verify(state.clone(), "ABC123", 12.34, 56.78).await;
        let (status, body) = call_verify(state, "ABC123", -3.5, 7.25).await;

        assert_eq!(status, StatusCode::OK);
        let history = body["history"].as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1]["location_lat"], -3.5);
        assert_eq!(history[1]["location_lng"], 7.25);
        let first = chrono::DateTime::parse_from_rfc3339(history[0]["timestamp"].as_str().unwrap()).unwrap();
        let second = chrono::DateTime::parse_from_rfc3339(history[1]["timestamp"].as_str().unwrap()).unwrap();
        assert!(first <= second);
    }
}
