//! In-process state store.
//!
//! Keeps the full modification log of every key in memory. Used for tests,
//! demos and single-process deployments; can be checkpointed and restored
//! through [`StoreCheckpoint`].

use super::{HistoryCursor, KeyModification, KeyValue, QueryCursor, StateStore, StoreError};
use crate::checkpoint::{CheckpointError, StoreCheckpoint};
use crate::core::{LedgerTimestamp, Selector};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::trace;
use uuid::Uuid;

const INJECTED: &str = "injected fault";

/// One-shot failure armed with [`MemoryStore::inject`].
///
/// Each fault fires once, on the next operation it applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// Next `get_state` fails
    Read,
    /// Next `put_state` or `del_state` fails
    Write,
    /// Next `get_query_result` fails to open
    QueryOpen,
    /// Next query cursor fails once it has yielded `after` results
    QueryAdvance { after: usize },
    /// Next `get_history_for_key` fails to open
    HistoryOpen,
    /// Next history cursor fails once it has yielded `after` entries
    HistoryAdvance { after: usize },
}

#[derive(Default)]
struct Ledger {
    keys: BTreeMap<String, Vec<KeyModification>>,
    faults: Vec<Fault>,
    writes: usize,
}

impl Ledger {
    fn current(&self, key: &str) -> Option<&[u8]> {
        self.keys
            .get(key)
            .and_then(|log| log.last())
            .filter(|latest| !latest.is_delete)
            .map(|latest| latest.value.as_slice())
    }

    fn take_fault(&mut self, applies: impl Fn(&Fault) -> bool) -> Option<Fault> {
        let position = self.faults.iter().position(applies)?;
        Some(self.faults.remove(position))
    }

    fn append(&mut self, key: &str, value: Vec<u8>, is_delete: bool) {
        let modification = KeyModification {
            tx_id: Uuid::new_v4().to_string(),
            value,
            timestamp: LedgerTimestamp::now(),
            is_delete,
        };
        trace!(key, tx_id = %modification.tx_id, is_delete, "appending modification");
        self.keys.entry(key.to_string()).or_default().push(modification);
        self.writes += 1;
    }
}

/// In-memory [`StateStore`] with append-only per-key history.
///
/// # Example
///
/// ```rust
/// use vehicle_ledger::store::{MemoryStore, StateStore};
///
/// let store = MemoryStore::new();
/// store.put_state("V1", b"{}".to_vec()).unwrap();
/// store.put_state("V1", b"[]".to_vec()).unwrap();
///
/// assert_eq!(store.get_state("V1").unwrap(), Some(b"[]".to_vec()));
/// assert_eq!(store.get_history_for_key("V1").unwrap().count(), 2);
/// ```
#[derive(Default)]
pub struct MemoryStore {
    ledger: Mutex<Ledger>,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store from a checkpoint, history included.
    pub fn from_checkpoint(checkpoint: StoreCheckpoint) -> Result<Self, CheckpointError> {
        checkpoint.validate()?;
        let ledger = Ledger {
            keys: checkpoint.keys,
            ..Ledger::default()
        };
        Ok(Self {
            ledger: Mutex::new(ledger),
            open_cursors: Arc::default(),
        })
    }

    /// Capture every key's modification log.
    pub fn checkpoint(&self) -> StoreCheckpoint {
        StoreCheckpoint::new(self.lock().keys.clone())
    }

    /// Arm a one-shot failure.
    pub fn inject(&self, fault: Fault) {
        self.lock().faults.push(fault);
    }

    /// Delete the document under `key`, recording the deletion in history.
    pub fn del_state(&self, key: &str) -> Result<(), StoreError> {
        let mut ledger = self.lock();
        if ledger.take_fault(|f| *f == Fault::Write).is_some() {
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: INJECTED.to_string(),
            });
        }
        ledger.append(key, Vec::new(), true);
        Ok(())
    }

    /// Successful writes and deletions so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    /// Cursors handed out and not yet dropped.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateStore for MemoryStore {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut ledger = self.lock();
        if ledger.take_fault(|f| *f == Fault::Read).is_some() {
            return Err(StoreError::Read {
                key: key.to_string(),
                reason: INJECTED.to_string(),
            });
        }
        Ok(ledger.current(key).map(<[u8]>::to_vec))
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let mut ledger = self.lock();
        if ledger.take_fault(|f| *f == Fault::Write).is_some() {
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: INJECTED.to_string(),
            });
        }
        ledger.append(key, value, false);
        Ok(())
    }

    fn get_query_result(&self, selector: &Selector) -> Result<QueryCursor<'_>, StoreError> {
        let mut ledger = self.lock();
        if ledger.take_fault(|f| *f == Fault::QueryOpen).is_some() {
            return Err(StoreError::Query {
                reason: INJECTED.to_string(),
            });
        }
        let fail_after = match ledger.take_fault(|f| matches!(f, Fault::QueryAdvance { .. })) {
            Some(Fault::QueryAdvance { after }) => Some((
                after,
                StoreError::Query {
                    reason: INJECTED.to_string(),
                },
            )),
            _ => None,
        };

        let matched: Vec<KeyValue> = ledger
            .keys
            .keys()
            .filter_map(|key| {
                let value = ledger.current(key)?;
                let document: Value = serde_json::from_slice(value).ok()?;
                selector.matches(&document).then(|| KeyValue {
                    key: key.clone(),
                    value: value.to_vec(),
                })
            })
            .collect();

        Ok(Box::new(MemoryCursor::open(
            matched,
            fail_after,
            Arc::clone(&self.open_cursors),
        )))
    }

    fn get_history_for_key(&self, key: &str) -> Result<HistoryCursor<'_>, StoreError> {
        let mut ledger = self.lock();
        let failure = || StoreError::History {
            key: key.to_string(),
            reason: INJECTED.to_string(),
        };
        if ledger.take_fault(|f| *f == Fault::HistoryOpen).is_some() {
            return Err(failure());
        }
        let fail_after = match ledger.take_fault(|f| matches!(f, Fault::HistoryAdvance { .. })) {
            Some(Fault::HistoryAdvance { after }) => Some((after, failure())),
            _ => None,
        };

        let log = ledger.keys.get(key).cloned().unwrap_or_default();
        Ok(Box::new(MemoryCursor::open(
            log,
            fail_after,
            Arc::clone(&self.open_cursors),
        )))
    }
}

/// Snapshot cursor that counts itself open until dropped.
struct MemoryCursor<T> {
    items: std::vec::IntoIter<T>,
    fail_after: Option<(usize, StoreError)>,
    yielded: usize,
    done: bool,
    open: Arc<AtomicUsize>,
}

impl<T> MemoryCursor<T> {
    fn open(
        items: Vec<T>,
        fail_after: Option<(usize, StoreError)>,
        open: Arc<AtomicUsize>,
    ) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            items: items.into_iter(),
            fail_after,
            yielded: 0,
            done: false,
            open,
        }
    }
}

impl<T> Iterator for MemoryCursor<T> {
    type Item = Result<T, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if let Some((after, error)) = &self.fail_after {
            if self.yielded == *after {
                self.done = true;
                return Some(Err(error.clone()));
            }
        }
        match self.items.next() {
            Some(item) => {
                self.yielded += 1;
                Some(Ok(item))
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<T> Drop for MemoryCursor<T> {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codec::FIELD_STATUS;

    fn document(id: &str, status: &str) -> Vec<u8> {
        serde_json::json!({
            "docType": "vehicles",
            "vehicleID": id,
            "ownership": "Manufacturer",
            "status": status,
            "createdDate": "2024-01-01",
            "lastModifiedDate": "",
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn absent_key_reads_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_state("missing").unwrap(), None);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn put_overwrites_and_appends_history() {
        let store = MemoryStore::new();
        store.put_state("V1", document("V1", "New")).unwrap();
        store.put_state("V1", document("V1", "Sold")).unwrap();

        assert_eq!(store.get_state("V1").unwrap(), Some(document("V1", "Sold")));

        let log: Vec<_> = store
            .get_history_for_key("V1")
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].value, document("V1", "New"));
        assert_eq!(log[1].value, document("V1", "Sold"));
        assert_ne!(log[0].tx_id, log[1].tx_id);
        assert!(log[0].timestamp <= log[1].timestamp);
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn deletion_hides_current_value_but_stays_in_history() {
        let store = MemoryStore::new();
        store.put_state("V1", document("V1", "New")).unwrap();
        store.del_state("V1").unwrap();

        assert_eq!(store.get_state("V1").unwrap(), None);
        let log: Vec<_> = store
            .get_history_for_key("V1")
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(log.len(), 2);
        assert!(log[1].is_delete);
    }

    #[test]
    fn query_skips_deleted_foreign_and_non_json_documents() {
        let store = MemoryStore::new();
        store.put_state("V1", document("V1", "New")).unwrap();
        store.put_state("V2", document("V2", "Sold")).unwrap();
        store.put_state("V3", document("V3", "New")).unwrap();
        store.del_state("V3").unwrap();
        store.put_state("M1", br#"{"docType":"marbles","status":"New"}"#.to_vec()).unwrap();
        store.put_state("junk", b"not json".to_vec()).unwrap();

        let selector = Selector::vehicles().field_eq(FIELD_STATUS, "New");
        let keys: Vec<_> = store
            .get_query_result(&selector)
            .unwrap()
            .map(|kv| kv.unwrap().key)
            .collect();
        assert_eq!(keys, vec!["V1"]);
    }

    #[test]
    fn faults_fire_once() {
        let store = MemoryStore::new();
        store.inject(Fault::Read);

        assert!(matches!(store.get_state("V1"), Err(StoreError::Read { .. })));
        assert!(store.get_state("V1").is_ok());
    }

    #[test]
    fn write_fault_leaves_store_untouched() {
        let store = MemoryStore::new();
        store.inject(Fault::Write);

        assert!(store.put_state("V1", document("V1", "New")).is_err());
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get_state("V1").unwrap(), None);
    }

    #[test]
    fn advance_fault_fails_mid_stream() {
        let store = MemoryStore::new();
        for id in ["V1", "V2", "V3"] {
            store.put_state(id, document(id, "New")).unwrap();
        }
        store.inject(Fault::QueryAdvance { after: 2 });

        let items: Vec<_> = store.get_query_result(&Selector::vehicles()).unwrap().collect();
        assert_eq!(items.len(), 3);
        assert!(items[0].is_ok());
        assert!(items[1].is_ok());
        assert!(matches!(items[2], Err(StoreError::Query { .. })));
    }

    #[test]
    fn cursors_are_released_on_drop() {
        let store = MemoryStore::new();
        store.put_state("V1", document("V1", "New")).unwrap();

        let cursor = store.get_history_for_key("V1").unwrap();
        let query = store.get_query_result(&Selector::vehicles()).unwrap();
        assert_eq!(store.open_cursors(), 2);

        drop(cursor);
        drop(query);
        assert_eq!(store.open_cursors(), 0);
    }

    #[test]
    fn checkpoint_restores_history() {
        let store = MemoryStore::new();
        store.put_state("V1", document("V1", "New")).unwrap();
        store.put_state("V1", document("V1", "Sold")).unwrap();

        let restored = MemoryStore::from_checkpoint(store.checkpoint()).unwrap();
        assert_eq!(restored.get_state("V1").unwrap(), Some(document("V1", "Sold")));
        assert_eq!(restored.get_history_for_key("V1").unwrap().count(), 2);
    }
}
