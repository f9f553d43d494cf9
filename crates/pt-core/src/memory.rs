//! In-memory store implementations
//!
//! A single `MemoryStore` backs both tables, mirroring how the production
//! database owns both: deleting a medicine cascades to its scan records,
//! and ledger appends are checked against the live catalog. Used by unit
//! tests and by the API handler tests; also handy for local demos without
//! a database.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::{Medicine, NewMedicine, NewScan, ScanRecord};
use crate::store::{CatalogStore, ScanLedger};
use crate::{CoreError, CoreResult};

#[derive(Default)]
struct Tables {
    medicines: Vec<Medicine>,
    scans: Vec<ScanRecord>,
    last_scan_at: Option<DateTime<Utc>>,
}

/// Shared backing state for [`MemoryCatalog`] and [`MemoryLedger`].
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> MemoryCatalog {
        MemoryCatalog {
            tables: Arc::clone(&self.tables),
        }
    }

    pub fn ledger(&self) -> MemoryLedger {
        MemoryLedger {
            tables: Arc::clone(&self.tables),
        }
    }
}

#[derive(Clone)]
pub struct MemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Clone)]
pub struct MemoryLedger {
    tables: Arc<RwLock<Tables>>,
}

fn poisoned() -> CoreError {
    CoreError::Store("memory store lock poisoned".to_string())
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn find_by_barcode(&self, barcode: &str) -> CoreResult<Option<Medicine>> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(tables
            .medicines
            .iter()
            .find(|m| m.barcode == barcode)
            .cloned())
    }

    async fn insert(&self, medicine: NewMedicine) -> CoreResult<Medicine> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        if tables.medicines.iter().any(|m| m.barcode == medicine.barcode) {
            return Err(CoreError::BarcodeExists(medicine.barcode));
        }

        let record = Medicine {
            id: Uuid::new_v4(),
            barcode: medicine.barcode,
            name: medicine.name,
            manufacturer: medicine.manufacturer,
            batch_number: medicine.batch_number,
            expiry_date: medicine.expiry_date,
            created_at: Utc::now(),
        };
        tables.medicines.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> CoreResult<bool> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        let before = tables.medicines.len();
        tables.medicines.retain(|m| m.id != id);
        if tables.medicines.len() == before {
            return Ok(false);
        }
        // Cascade, as ON DELETE CASCADE does in the database.
        tables.scans.retain(|s| s.medicine_id != id);
        Ok(true)
    }

    async fn count(&self) -> CoreResult<i64> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(tables.medicines.len() as i64)
    }
}

#[async_trait]
impl ScanLedger for MemoryLedger {
    async fn append(&self, scan: NewScan) -> CoreResult<ScanRecord> {
        let mut tables = self.tables.write().map_err(|_| poisoned())?;
        if !tables.medicines.iter().any(|m| m.id == scan.medicine_id) {
            return Err(CoreError::MedicineNotFound);
        }

        // Clamp so timestamps never regress across appends, even if the
        // wall clock steps backwards between calls.
        let now = Utc::now();
        let timestamp = match tables.last_scan_at {
            Some(last) if last > now => last,
            _ => now,
        };
        tables.last_scan_at = Some(timestamp);

        let record = ScanRecord {
            id: Uuid::new_v4(),
            medicine_id: scan.medicine_id,
            timestamp,
            location_lat: scan.location_lat,
            location_lng: scan.location_lng,
            scan_type: scan.scan_type,
            is_authentic: true,
        };
        tables.scans.push(record.clone());
        Ok(record)
    }

    async fn history_for(&self, medicine_id: Uuid) -> CoreResult<Vec<ScanRecord>> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        let mut history: Vec<ScanRecord> = tables
            .scans
            .iter()
            .filter(|s| s.medicine_id == medicine_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps.
        history.sort_by_key(|s| s.timestamp);
        Ok(history)
    }

    async fn count(&self) -> CoreResult<i64> {
        let tables = self.tables.read().map_err(|_| poisoned())?;
        Ok(tables.scans.len() as i64)
    }
}
