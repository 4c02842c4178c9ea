//! Core vehicle record types and logic.
//!
//! This module contains the pure core of the ledger:
//! - The `Vehicle` record and its creation-time constants
//! - The document codec and its discriminator
//! - Rich-query selectors over stored documents
//! - History entries and their timestamp rendering
//!
//! Nothing in this module touches a store; reads and writes happen in
//! [`effects`](crate::effects).

pub mod codec;
mod history;
mod selector;
mod vehicle;

pub use history::{HistoryEntry, LedgerTimestamp, QueryRecord, VehicleHistory};
pub use selector::Selector;
pub use vehicle::{Vehicle, INITIAL_OWNER, INITIAL_STATUS};
