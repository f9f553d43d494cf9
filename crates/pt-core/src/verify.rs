//! Barcode verification workflow
//!
//! Authenticity here is catalog presence: a barcode that resolves to a
//! cataloged medicine is deemed authentic, and every successful lookup
//! records a customer scan event. There is no cryptographic or
//! tamper-evidence check.

use std::sync::Arc;

use tracing::debug;

use crate::model::{scan_type, Medicine, NewScan, ScanRecord};
use crate::store::{CatalogStore, ScanLedger};
use crate::{CoreError, CoreResult};

/// Successful verification: the medicine plus its full scan history,
/// ascending by timestamp and including the scan just recorded.
#[derive(Debug, Clone)]
pub struct Verification {
    pub medicine: Medicine,
    pub history: Vec<ScanRecord>,
}

/// The verify-and-record workflow over an injected catalog and ledger.
#[derive(Clone)]
pub struct VerificationService {
    catalog: Arc<dyn CatalogStore>,
    ledger: Arc<dyn ScanLedger>,
}

impl VerificationService {
    pub fn new(catalog: Arc<dyn CatalogStore>, ledger: Arc<dyn ScanLedger>) -> Self {
        Self { catalog, ledger }
    }

    /// Look up `barcode`, append a customer scan at the supplied
    /// coordinates, and return the medicine with its full history.
    ///
    /// An unknown barcode yields `MedicineNotFound` and writes nothing.
    /// Coordinates are recorded as given, with no range validation.
    pub async fn verify(&self, barcode: &str, lat: f64, lng: f64) -> CoreResult<Verification> {
        let medicine = self
            .catalog
            .find_by_barcode(barcode)
            .await?
            .ok_or(CoreError::MedicineNotFound)?;

        self.ledger
            .append(NewScan {
                medicine_id: medicine.id,
                location_lat: lat,
                location_lng: lng,
                scan_type: scan_type::CUSTOMER.to_string(),
            })
            .await?;

        // Read after append so the history always reflects this call's
        // own write.
        let history = self.ledger.history_for(medicine.id).await?;
        debug!(barcode, scans = history.len(), "verified medicine");

        Ok(Verification { medicine, history })
    }
}
