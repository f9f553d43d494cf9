//! PharmaTrace API Server

mod db;
mod routes;

use axum::{
    routing::{delete, get, post},
    Router,
};
use pt_core::{CatalogStore, ScanLedger, VerificationService};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across handlers
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub ledger: Arc<dyn ScanLedger>,
    pub verifier: VerificationService,
    pub config: AppConfig,
}

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/pharmatrace".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            max_connections: 10,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "pt_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting PharmaTrace API Server");

    let config = AppConfig::default();

    // Connect to database
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    info!("Database migrations complete");

    // Wire the stores into the verification service
    let catalog: Arc<dyn CatalogStore> = Arc::new(db::PgCatalogStore::new(pool.clone()));
    let ledger: Arc<dyn ScanLedger> = Arc::new(db::PgScanLedger::new(pool));
    let verifier = VerificationService::new(catalog.clone(), ledger.clone());

    let state = Arc::new(AppState {
        catalog,
        ledger,
        verifier,
        config: config.clone(),
    });

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(routes::health_check))

        // Verification
        .route("/api/verify", post(routes::verify::verify_medicine))

        // Catalog administration
        .route("/api/medicines", post(routes::medicines::create_medicine))
        .route("/api/medicines/:id", delete(routes::medicines::delete_medicine))
        .route("/api/history/:barcode", get(routes::medicines::get_history))

        // Admin
        .route("/api/admin/stats", get(routes::admin::get_stats))
        .route("/api/admin/config", get(routes::admin::get_config))

        // CORS
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))

        // Tracing
        .layer(TraceLayer::new_for_http())

        // State
        .with_state(state);

    // Start server
    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
