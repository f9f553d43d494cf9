//! Postgres-backed store implementations
//!
//! Each store owns the pool handle it queries with; nothing reaches for a
//! global connection. Constraint violations surface as domain errors: a
//! foreign-key failure on append means the medicine does not exist, a
//! unique failure on insert means the barcode is already cataloged.

pub mod schema;

use async_trait::async_trait;
use pt_core::{
    CatalogStore, CoreError, CoreResult, Medicine, NewMedicine, NewScan, ScanLedger, ScanRecord,
};
use sqlx::PgPool;
use uuid::Uuid;

use self::schema::{MedicineRow, ScanRecordRow};

fn store_err(e: sqlx::Error) -> CoreError {
    CoreError::Store(e.to_string())
}

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn find_by_barcode(&self, barcode: &str) -> CoreResult<Option<Medicine>> {
        let row = sqlx::query_as::<_, MedicineRow>(
            "SELECT id, barcode, name, manufacturer, batch_number, expiry_date, created_at
             FROM medicines WHERE barcode = $1",
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(row.map(Medicine::from))
    }

    async fn insert(&self, medicine: NewMedicine) -> CoreResult<Medicine> {
        let row = sqlx::query_as::<_, MedicineRow>(
            "INSERT INTO medicines (id, barcode, name, manufacturer, batch_number, expiry_date, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, NOW())
             RETURNING id, barcode, name, manufacturer, batch_number, expiry_date, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&medicine.barcode)
        .bind(&medicine.name)
        .bind(&medicine.manufacturer)
        .bind(&medicine.batch_number)
        .bind(medicine.expiry_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => {
                CoreError::BarcodeExists(medicine.barcode.clone())
            }
            _ => store_err(e),
        })?;

        Ok(row.into())
    }

    async fn delete(&self, id: Uuid) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM medicines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> CoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM medicines")
            .fetch_one(&self.pool)
            .await
            .map_err(store_err)
    }
}

#[derive(Clone)]
pub struct PgScanLedger {
    pool: PgPool,
}

impl PgScanLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScanLedger for PgScanLedger {
    async fn append(&self, scan: NewScan) -> CoreResult<ScanRecord> {
        let row = sqlx::query_as::<_, ScanRecordRow>(
            "INSERT INTO scan_records (id, medicine_id, timestamp, location_lat, location_lng, scan_type, is_authentic)
             VALUES ($1, $2, NOW(), $3, $4, $5, TRUE)
             RETURNING id, medicine_id, timestamp, location_lat, location_lng, scan_type, is_authentic",
        )
        .bind(Uuid::new_v4())
        .bind(scan.medicine_id)
        .bind(scan.location_lat)
        .bind(scan.location_lng)
        .bind(&scan.scan_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_foreign_key_violation() => CoreError::MedicineNotFound,
            _ => store_err(e),
        })?;

        Ok(row.into())
    }

    async fn history_for(&self, medicine_id: Uuid) -> CoreResult<Vec<ScanRecord>> {
        let rows = sqlx::query_as::<_, ScanRecordRow>(
            "SELECT id, medicine_id, timestamp, location_lat, location_lng, scan_type, is_authentic
             FROM scan_records WHERE medicine_id = $1
             ORDER BY timestamp ASC",
        )
        .bind(medicine_id)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(rows.into_iter().map(ScanRecord::from).collect())
    }

    async fn count(&self) -> CoreResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM scan_records")
            .fetch_one(&self.pool)
            .await
            .map_err(store_err)
    }
}
