//! Checkpoint and restore for in-memory state stores.
//!
//! A checkpoint captures the complete modification log of every key, so a
//! restored [`MemoryStore`](crate::store::MemoryStore) answers current-state
//! reads, rich queries and history reads exactly like the store it was
//! taken from.

use crate::store::KeyModification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod error;

pub use error::{CheckpointError, CheckpointFormat};

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable copy of a store's per-key modification logs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreCheckpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Modification log of every key, oldest entry first
    pub keys: BTreeMap<String, Vec<KeyModification>>,
}

impl StoreCheckpoint {
    pub fn new(keys: BTreeMap<String, Vec<KeyModification>>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            keys,
        }
    }

    /// Reject checkpoints written by an unknown format version.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                id: self.id.clone(),
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }

    /// Human-readable encoding.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self).map_err(|e| CheckpointError::Encode {
            format: CheckpointFormat::Json,
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json).map_err(|e| CheckpointError::Decode {
            format: CheckpointFormat::Json,
            reason: e.to_string(),
        })?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Compact encoding.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::Encode {
            format: CheckpointFormat::Binary,
            reason: e.to_string(),
        })
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes).map_err(|e| CheckpointError::Decode {
            format: CheckpointFormat::Binary,
            reason: e.to_string(),
        })?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }
}
