//! Vehicle Ledger: ownership-lifecycle tracking on an append-only ledger
//!
//! Every vehicle lives under a caller-chosen key as a single current state
//! record; every change to it is appended to the key's history by the
//! underlying state store. The crate follows a "pure core, imperative shell"
//! split: records, documents, selectors and history formatting are pure,
//! and every store access happens inside a Stillwater effect.
//!
//! # Core Concepts
//!
//! - **Vehicle**: the current state record (owner, status, dates)
//! - **Codec**: field-keyed JSON documents tagged with a discriminator
//! - **Selector**: rich-query predicates scoped to vehicle documents
//! - **History**: the store's per-key modification log, in store order
//! - **Dispatch**: named operations with typed, arity-checked arguments
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use vehicle_ledger::dispatch::VehicleLedger;
//! use vehicle_ledger::effects::LedgerEnv;
//! use vehicle_ledger::store::MemoryStore;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let ledger = VehicleLedger::new(LedgerEnv::new(Arc::new(MemoryStore::new())));
//!
//! let args = vec!["V1".to_string(), "2024-01-01".to_string()];
//! assert!(ledger.invoke("createVehicles", &args).await.is_success());
//!
//! let again = ledger.invoke("createVehicles", &args).await;
//! assert_eq!(again.message, "vehicle id already exists: V1");
//! # }
//! ```

pub mod checkpoint;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod effects;
pub mod error;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Selector, Vehicle, VehicleHistory};
pub use dispatch::{Operation, Response, VehicleLedger};
pub use effects::LedgerEnv;
pub use error::{LedgerError, LedgerResult};
pub use store::{MemoryStore, StateStore, StoreError};
