//! Ledger configuration.

use serde::{Deserialize, Serialize};

/// Runtime settings for a [`VehicleLedger`](crate::dispatch::VehicleLedger).
///
/// # Example
///
/// ```rust
/// use vehicle_ledger::config::LedgerConfig;
///
/// let config = LedgerConfig::from_json(r#"{ "trace_payloads": true }"#).unwrap();
/// assert!(config.trace_payloads);
/// assert_eq!(LedgerConfig::builder().build(), LedgerConfig::default());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Log full query and history payloads at debug level
    pub trace_payloads: bool,
}

impl LedgerConfig {
    pub fn builder() -> LedgerConfigBuilder {
        LedgerConfigBuilder::new()
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Builder for [`LedgerConfig`]
#[derive(Debug, Default)]
pub struct LedgerConfigBuilder {
    trace_payloads: bool,
}

impl LedgerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log full response payloads
    pub fn trace_payloads(mut self, enabled: bool) -> Self {
        self.trace_payloads = enabled;
        self
    }

    pub fn build(self) -> LedgerConfig {
        LedgerConfig {
            trace_payloads: self.trace_payloads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_payloads_out_of_logs() {
        assert!(!LedgerConfig::default().trace_payloads);
        assert_eq!(LedgerConfig::from_json("{}").unwrap(), LedgerConfig::default());
    }

    #[test]
    fn builder_sets_fields() {
        let config = LedgerConfig::builder().trace_payloads(true).build();
        assert!(config.trace_payloads);
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(LedgerConfig::from_json(r#"{ "trace_payloads": "yes" }"#).is_err());
    }
}
