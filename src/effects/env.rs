//! Environment the lifecycle effects run against.

use crate::config::LedgerConfig;
use crate::store::StateStore;
use std::sync::Arc;

/// Shared state store plus ledger settings.
///
/// Cloning is cheap: clones share the same store.
#[derive(Clone)]
pub struct LedgerEnv {
    store: Arc<dyn StateStore>,
    config: LedgerConfig,
}

impl LedgerEnv {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self {
            store,
            config: LedgerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LedgerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &dyn StateStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}
