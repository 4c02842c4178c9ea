//! Effectful ledger operations using Stillwater 0.11.0.
//!
//! This module provides the "imperative shell" around the pure core: every
//! read and write against the state store happens inside an effect that
//! runs against a [`LedgerEnv`].
//!
//! # Key Concepts
//!
//! - **Environment**: the shared state store plus ledger configuration
//! - **Lifecycle**: create, transfer, rich queries and history reads
//! - **Effects**: built with `from_fn`, composed with `map`, boxed only at
//!   the dispatch seam
//!
//! Every operation starts from a fresh store read; nothing is cached
//! between runs.

mod env;
pub mod lifecycle;

pub use env::LedgerEnv;
