//! Persisted document form of a [`Vehicle`].
//!
//! Documents are field-keyed JSON objects carrying the `docType`
//! discriminator, so vehicles can share a store with other document types
//! and rich queries can scope to them.

use super::vehicle::Vehicle;
use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

/// Discriminator written into every vehicle document.
pub const DOC_TYPE: &str = "vehicles";

/// Document field holding the discriminator.
pub const FIELD_DOC_TYPE: &str = "docType";
/// Document field holding the ledger key.
pub const FIELD_VEHICLE_ID: &str = "vehicleID";
/// Document field holding the current owner.
pub const FIELD_OWNERSHIP: &str = "ownership";
/// Document field holding the lifecycle stage.
pub const FIELD_STATUS: &str = "status";

#[derive(Serialize)]
struct DocumentRef<'a> {
    #[serde(rename = "docType")]
    doc_type: &'a str,
    #[serde(rename = "vehicleID")]
    vehicle_id: &'a str,
    ownership: &'a str,
    status: &'a str,
    #[serde(rename = "createdDate")]
    created_date: &'a str,
    #[serde(rename = "lastModifiedDate")]
    last_modified_date: &'a str,
}

#[derive(Deserialize)]
struct Document {
    #[serde(rename = "docType")]
    doc_type: String,
    #[serde(rename = "vehicleID")]
    vehicle_id: String,
    ownership: String,
    status: String,
    #[serde(rename = "createdDate")]
    created_date: String,
    #[serde(rename = "lastModifiedDate")]
    last_modified_date: String,
}

/// Encode a vehicle into its stored document bytes.
///
/// # Example
///
/// ```rust
/// use vehicle_ledger::core::{codec, Vehicle};
///
/// let vehicle = Vehicle::manufactured("V1", "2024-01-01");
/// let bytes = codec::encode(&vehicle).unwrap();
/// assert_eq!(codec::decode(&bytes).unwrap(), vehicle);
/// ```
pub fn encode(vehicle: &Vehicle) -> LedgerResult<Vec<u8>> {
    let document = DocumentRef {
        doc_type: vehicle.kind(),
        vehicle_id: &vehicle.id,
        ownership: &vehicle.owner,
        status: &vehicle.status,
        created_date: &vehicle.created_at,
        last_modified_date: &vehicle.last_modified_at,
    };
    serde_json::to_vec(&document).map_err(|e| LedgerError::MalformedRecord {
        reason: e.to_string(),
    })
}

/// Decode stored document bytes into a vehicle.
///
/// Fails with [`LedgerError::MalformedRecord`] when the bytes are not a JSON
/// document, miss a field, or belong to another document type.
pub fn decode(bytes: &[u8]) -> LedgerResult<Vehicle> {
    let document: Document =
        serde_json::from_slice(bytes).map_err(|e| LedgerError::MalformedRecord {
            reason: e.to_string(),
        })?;

    if document.doc_type != DOC_TYPE {
        return Err(LedgerError::MalformedRecord {
            reason: format!(
                "expected {FIELD_DOC_TYPE} '{DOC_TYPE}', found '{}'",
                document.doc_type
            ),
        });
    }

    Ok(Vehicle {
        id: document.vehicle_id,
        owner: document.ownership,
        status: document.status,
        created_at: document.created_date,
        last_modified_at: document.last_modified_date,
    })
}
