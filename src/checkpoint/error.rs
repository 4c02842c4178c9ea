//! Store checkpoint errors.

use std::fmt;
use thiserror::Error;

/// Encoding a [`StoreCheckpoint`](super::StoreCheckpoint) is written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointFormat {
    Json,
    Binary,
}

impl fmt::Display for CheckpointFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Binary => f.write_str("binary"),
        }
    }
}

/// Failures saving or restoring a store checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckpointError {
    #[error("failed to encode store checkpoint as {format}: {reason}")]
    Encode {
        format: CheckpointFormat,
        reason: String,
    },

    #[error("failed to decode store checkpoint from {format}: {reason}")]
    Decode {
        format: CheckpointFormat,
        reason: String,
    },

    /// Written by a store with a different key-log layout
    #[error("store checkpoint {id} uses format version {found}, expected {supported}")]
    UnsupportedVersion {
        id: String,
        found: u32,
        supported: u32,
    },
}
