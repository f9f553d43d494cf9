//! PharmaTrace Core
//!
//! This crate provides the domain model and verification workflow for
//! tracking pharmaceutical products through a supply chain: a catalog of
//! medicines keyed by barcode, an append-only ledger of scan events, and
//! the verify-and-record operation a customer triggers by scanning a
//! barcode at a geolocation.

pub mod memory;
pub mod model;
pub mod store;
pub mod verify;

use thiserror::Error;

pub use memory::{MemoryCatalog, MemoryLedger, MemoryStore};
pub use model::{Medicine, NewMedicine, NewScan, ScanRecord};
pub use store::{CatalogStore, ScanLedger};
pub use verify::{Verification, VerificationService};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Medicine not found in database")]
    MedicineNotFound,

    #[error("Medicine with barcode {0} already exists")]
    BarcodeExists(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
