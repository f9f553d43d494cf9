//! Database row types

use chrono::{DateTime, NaiveDate, Utc};
use pt_core::{Medicine, ScanRecord};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, FromRow)]
pub struct MedicineRow {
    pub id: Uuid,
    pub barcode: String,
    pub name: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<MedicineRow> for Medicine {
    fn from(row: MedicineRow) -> Self {
        Medicine {
            id: row.id,
            barcode: row.barcode,
            name: row.name,
            manufacturer: row.manufacturer,
            batch_number: row.batch_number,
            expiry_date: row.expiry_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct ScanRecordRow {
    pub id: Uuid,
    pub medicine_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub location_lat: f64,
    pub location_lng: f64,
    pub scan_type: String,
    pub is_authentic: bool,
}

impl From<ScanRecordRow> for ScanRecord {
    fn from(row: ScanRecordRow) -> Self {
        ScanRecord {
            id: row.id,
            medicine_id: row.medicine_id,
            timestamp: row.timestamp,
            location_lat: row.location_lat,
            location_lng: row.location_lng,
            scan_type: row.scan_type,
            is_authentic: row.is_authentic,
        }
    }
}
