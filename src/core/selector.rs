//! Rich-query selectors over stored vehicle documents.
//!
//! A selector is a pure predicate: every condition is a field equality and
//! every selector built here is scoped to the vehicle discriminator.

use super::codec::{DOC_TYPE, FIELD_DOC_TYPE};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Conjunction of field-equality conditions on a stored document.
///
/// # Example
///
/// ```rust
/// use vehicle_ledger::core::codec::FIELD_STATUS;
/// use vehicle_ledger::core::Selector;
///
/// let selector = Selector::vehicles().field_eq(FIELD_STATUS, "New");
/// assert_eq!(
///     selector.to_query_string(),
///     r#"{"selector":{"docType":"vehicles","status":"New"}}"#
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    conditions: BTreeMap<String, String>,
}

impl Selector {
    /// Selector matching every vehicle document.
    pub fn vehicles() -> Self {
        let mut conditions = BTreeMap::new();
        conditions.insert(FIELD_DOC_TYPE.to_string(), DOC_TYPE.to_string());
        Self { conditions }
    }

    /// Add an equality condition. A later condition on the same field
    /// replaces the earlier one.
    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.insert(field.into(), value.into());
        self
    }

    /// Conditions in field-name order.
    pub fn conditions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.conditions
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// Check a parsed document against every condition (pure).
    ///
    /// Only string fields can match; documents that are not JSON objects
    /// never match.
    pub fn matches(&self, document: &Value) -> bool {
        let Some(object) = document.as_object() else {
            return false;
        };
        self.conditions
            .iter()
            .all(|(field, expected)| object.get(field).and_then(Value::as_str) == Some(expected.as_str()))
    }

    /// Render as a document-database rich query.
    pub fn to_query_string(&self) -> String {
        json!({ "selector": self.conditions }).to_string()
    }
}
