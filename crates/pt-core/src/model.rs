//! Domain records for the medicine catalog and scan ledger
//!
//! The serde derives here are the wire contract: the serialized field
//! lists of `Medicine` and `ScanRecord` are fixed by these structs, not
//! inferred from any storage schema.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Conventional `scan_type` values. The field is free text and none of
/// these are enforced; they exist so callers spell the common cases
/// consistently.
pub mod scan_type {
    pub const INVENTORY: &str = "inventory";
    pub const RETAILER: &str = "retailer";
    pub const CUSTOMER: &str = "customer";
}

/// Canonical product record, keyed by its globally unique barcode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: Uuid,
    pub barcode: String,
    pub name: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
    /// Set once at creation, never mutated.
    pub created_at: DateTime<Utc>,
}

/// Input for catalog ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedicine {
    pub barcode: String,
    pub name: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: NaiveDate,
}

/// Immutable scan event, one per verification against a known medicine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: Uuid,
    /// Serialized as `medicine` to match the published response shape.
    #[serde(rename = "medicine")]
    pub medicine_id: Uuid,
    /// Server-assigned at append time, non-decreasing per insertion order.
    pub timestamp: DateTime<Utc>,
    pub location_lat: f64,
    pub location_lng: f64,
    pub scan_type: String,
    /// Defaults to true at creation; a static default, not a computed verdict.
    pub is_authentic: bool,
}

/// Input for a ledger append. Coordinates are stored as supplied, with no
/// range validation.
#[derive(Debug, Clone)]
pub struct NewScan {
    pub medicine_id: Uuid,
    pub location_lat: f64,
    pub location_lng: f64,
    pub scan_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_record_serializes_medicine_field() {
        let record = ScanRecord {
            id: Uuid::new_v4(),
            medicine_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            location_lat: 12.34,
            location_lng: 56.78,
            scan_type: scan_type::CUSTOMER.to_string(),
            is_authentic: true,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["medicine"], serde_json::json!(record.medicine_id));
        assert!(value.get("medicine_id").is_none());
        assert_eq!(value["is_authentic"], serde_json::json!(true));
    }

    #[test]
    fn medicine_serializes_expiry_as_date() {
        let medicine = Medicine {
            id: Uuid::new_v4(),
            barcode: "ABC123".to_string(),
            name: "Paracetamol".to_string(),
            manufacturer: "AcmeCo".to_string(),
            batch_number: "B1".to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&medicine).unwrap();
        assert_eq!(value["expiry_date"], serde_json::json!("2026-01-01"));
        assert_eq!(value["barcode"], serde_json::json!("ABC123"));
    }
}
