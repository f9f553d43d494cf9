//! Admin routes

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

#[derive(Serialize)]
pub struct StatsResponse {
    pub total_medicines: i64,
    pub total_scans: i64,
}

pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, StatusCode> {
    let total_medicines = state.catalog.count().await.map_err(|e| {
        error!("Catalog count failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let total_scans = state.ledger.count().await.map_err(|e| {
        error!("Ledger count failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(StatsResponse {
        total_medicines,
        total_scans,
    }))
}

#[derive(Serialize)]
pub struct ConfigResponse {
    pub bind_addr: String,
    pub max_connections: u32,
    pub version: String,
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        bind_addr: state.config.bind_addr.clone(),
        max_connections: state.config.max_connections,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppConfig;
    use chrono::NaiveDate;
    use pt_core::{CatalogStore, MemoryStore, NewMedicine, VerificationService};

    #[tokio::test]
    async fn stats_reflect_store_contents() {
        let store = MemoryStore::new();
        let catalog = Arc::new(store.catalog());
        let ledger = Arc::new(store.ledger());
        let state = Arc::new(AppState {
            verifier: VerificationService::new(catalog.clone(), ledger.clone()),
            catalog,
            ledger,
            config: AppConfig::default(),
        });

        store
            .catalog()
            .insert(NewMedicine {
                barcode: "S1".to_string(),
                name: "Aspirin".to_string(),
                manufacturer: "AcmeCo".to_string(),
                batch_number: "B2".to_string(),
                expiry_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            })
            .await
            .unwrap();
        state.verifier.verify("S1", 1.0, 1.0).await.unwrap();
        state.verifier.verify("S1", 2.0, 2.0).await.unwrap();

        let Json(stats) = get_stats(State(state)).await.unwrap();
        assert_eq!(stats.total_medicines, 1);
        assert_eq!(stats.total_scans, 2);
    }
}
