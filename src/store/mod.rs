//! The state store boundary.
//!
//! The ledger runtime that physically keeps key/value pairs, runs rich
//! queries and maintains per-key history sits behind [`StateStore`]. The
//! lifecycle effects only ever talk to this trait.
//!
//! ## Cursors
//!
//! Queries and history reads hand back cursors: boxed iterators whose items
//! can fail individually. A cursor holds store resources until it is
//! dropped, so callers release it on every exit path simply by letting it
//! go out of scope.

mod memory;

pub use memory::{Fault, MemoryStore};

use crate::core::{LedgerTimestamp, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures reported by a state store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("failed to read state for key {key}: {reason}")]
    Read { key: String, reason: String },

    #[error("failed to write state for key {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("rich query failed: {reason}")]
    Query { reason: String },

    #[error("failed to read history for key {key}: {reason}")]
    History { key: String, reason: String },
}

/// A key and its current document, as returned by rich queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// One entry of a key's append-only modification log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModification {
    /// Transaction that produced the modification
    pub tx_id: String,
    /// Document written, or whatever the store keeps for a deletion
    pub value: Vec<u8>,
    pub timestamp: LedgerTimestamp,
    pub is_delete: bool,
}

/// Cursor over rich-query results.
pub type QueryCursor<'a> = Box<dyn Iterator<Item = Result<KeyValue, StoreError>> + 'a>;

/// Cursor over a key's modification log.
pub type HistoryCursor<'a> = Box<dyn Iterator<Item = Result<KeyModification, StoreError>> + 'a>;

/// Key/value store with rich queries and per-key history.
///
/// Implementations must be `Send + Sync` so one store can back a ledger
/// shared across tasks.
pub trait StateStore: Send + Sync {
    /// Current document under `key`, `None` when absent or deleted.
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Overwrite the document under `key`, appending to its history.
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Open a cursor over every current document matching `selector`, in
    /// store order.
    fn get_query_result(&self, selector: &Selector) -> Result<QueryCursor<'_>, StoreError>;

    /// Open a cursor over the modification log of `key`, oldest first.
    fn get_history_for_key(&self, key: &str) -> Result<HistoryCursor<'_>, StoreError>;
}
