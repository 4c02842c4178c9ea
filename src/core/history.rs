//! Per-key history as exposed to ledger clients.
//!
//! The store keeps the append-only modification log of every key; this
//! module turns that log into the entries clients see, without reordering
//! or deduplicating anything.

use super::codec;
use super::vehicle::Vehicle;
use crate::error::{LedgerError, LedgerResult};
use crate::store::KeyModification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f +0000 UTC";
const EPOCH_RENDERING: &str = "1970-01-01 00:00:00 +0000 UTC";

/// Ledger transaction time as seconds and nanoseconds since the Unix epoch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedgerTimestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl LedgerTimestamp {
    pub fn new(seconds: i64, nanos: i32) -> Self {
        Self { seconds, nanos }
    }

    /// Current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            seconds: at.timestamp(),
            nanos: at.timestamp_subsec_nanos() as i32,
        }
    }

    /// `None` when the seconds/nanos pair is outside chrono's range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let nanos = u32::try_from(self.nanos).ok()?;
        DateTime::<Utc>::from_timestamp(self.seconds, nanos)
    }

    /// Render for history responses, e.g. `2024-01-01 10:30:00.500 +0000 UTC`.
    ///
    /// Fractional seconds are omitted when zero. Timestamps outside the
    /// representable range render as the Unix epoch.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vehicle_ledger::core::LedgerTimestamp;
    ///
    /// let at = LedgerTimestamp::new(1_704_067_200, 0);
    /// assert_eq!(at.render(), "2024-01-01 00:00:00 +0000 UTC");
    /// ```
    pub fn render(&self) -> String {
        match self.to_datetime() {
            Some(at) => at.format(TIMESTAMP_FORMAT).to_string(),
            None => EPOCH_RENDERING.to_string(),
        }
    }
}

impl fmt::Display for LedgerTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Embed stored document bytes verbatim in a response.
pub(crate) fn raw_document(bytes: Vec<u8>) -> LedgerResult<Box<RawValue>> {
    let text = String::from_utf8(bytes).map_err(|e| LedgerError::MalformedRecord {
        reason: e.to_string(),
    })?;
    RawValue::from_string(text).map_err(|e| LedgerError::MalformedRecord {
        reason: e.to_string(),
    })
}

/// One `{Key, Record}` element of a query response.
#[derive(Debug, Serialize)]
pub struct QueryRecord {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Record")]
    pub record: Box<RawValue>,
}

impl QueryRecord {
    pub fn new(key: String, document: Vec<u8>) -> LedgerResult<Self> {
        Ok(Self {
            key,
            record: raw_document(document)?,
        })
    }
}

/// One point in a key's history.
///
/// `value` is `None` (rendered as `null`) for deletions, whatever bytes the
/// store kept alongside the deletion.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    #[serde(rename = "TxId")]
    pub tx_id: String,
    #[serde(rename = "Value")]
    pub value: Option<Box<RawValue>>,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "IsDelete")]
    pub is_delete: String,
}

impl HistoryEntry {
    pub fn from_modification(modification: KeyModification) -> LedgerResult<Self> {
        let value = if modification.is_delete {
            None
        } else {
            Some(raw_document(modification.value)?)
        };

        Ok(Self {
            tx_id: modification.tx_id,
            value,
            timestamp: modification.timestamp.render(),
            is_delete: modification.is_delete.to_string(),
        })
    }

    pub fn is_delete(&self) -> bool {
        self.is_delete == "true"
    }

    /// Decode the recorded document; `None` for deletions.
    pub fn vehicle(&self) -> LedgerResult<Option<Vehicle>> {
        self.value
            .as_ref()
            .map(|raw| codec::decode(raw.get().as_bytes()))
            .transpose()
    }
}

/// Ordered history of a single key, oldest first as delivered by the store.
///
/// # Example
///
/// ```rust
/// use vehicle_ledger::core::{LedgerTimestamp, VehicleHistory};
/// use vehicle_ledger::store::KeyModification;
///
/// let mut history = VehicleHistory::new();
/// history
///     .record(KeyModification {
///         tx_id: "tx-1".into(),
///         value: br#"{"docType":"vehicles","vehicleID":"V1","ownership":"Manufacturer","status":"New","createdDate":"2024-01-01","lastModifiedDate":""}"#.to_vec(),
///         timestamp: LedgerTimestamp::new(0, 0),
///         is_delete: false,
///     })
///     .unwrap();
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(history.owners().unwrap(), vec!["Manufacturer".to_string()]);
/// ```
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct VehicleHistory {
    entries: Vec<HistoryEntry>,
}

impl VehicleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next modification delivered by the store.
    pub fn record(&mut self, modification: KeyModification) -> LedgerResult<()> {
        self.entries.push(HistoryEntry::from_modification(modification)?);
        Ok(())
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owners in history order, skipping deletions.
    pub fn owners(&self) -> LedgerResult<Vec<String>> {
        let mut owners = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if let Some(vehicle) = entry.vehicle()? {
                owners.push(vehicle.owner);
            }
        }
        Ok(owners)
    }

    /// Serialize as the `[{TxId, Value, Timestamp, IsDelete}]` payload.
    pub fn to_payload(&self) -> LedgerResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| LedgerError::MalformedRecord {
            reason: e.to_string(),
        })
    }
}
