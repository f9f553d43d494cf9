//! Store traits for the medicine catalog and scan ledger
//!
//! Both stores are explicit injected interfaces: implementations own their
//! connection or state, and nothing in the crate reaches for an ambient
//! database handle.

use async_trait::async_trait;
use uuid::Uuid;

use crate::model::{Medicine, NewMedicine, NewScan, ScanRecord};
use crate::CoreResult;

/// Persistent collection of canonical medicines, keyed by barcode.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Exact-match lookup on the unique barcode key. No side effects.
    async fn find_by_barcode(&self, barcode: &str) -> CoreResult<Option<Medicine>>;

    /// Ingest a new medicine. Fails with `BarcodeExists` when the barcode
    /// is already cataloged.
    async fn insert(&self, medicine: NewMedicine) -> CoreResult<Medicine>;

    /// Remove a medicine and, by cascade, every scan record referencing it.
    /// Returns false when no such medicine exists.
    async fn delete(&self, id: Uuid) -> CoreResult<bool>;

    async fn count(&self) -> CoreResult<i64>;
}

/// Append-only collection of scan events.
#[async_trait]
pub trait ScanLedger: Send + Sync {
    /// Durably record a scan. Assigns `id` and `timestamp` at call time and
    /// sets `is_authentic = true`. Fails with `MedicineNotFound` when the
    /// referenced medicine does not exist.
    async fn append(&self, scan: NewScan) -> CoreResult<ScanRecord>;

    /// All scans ever recorded for a medicine, ascending by timestamp.
    /// A fresh query each call, not a live cursor.
    async fn history_for(&self, medicine_id: Uuid) -> CoreResult<Vec<ScanRecord>>;

    async fn count(&self) -> CoreResult<i64>;
}
