//! Insertion-ordered field/value input.

use crate::value::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered mapping of semantic field name to [`Value`].
///
/// Used both for partial updates and for search filters. Iteration follows
/// insertion order, which fixes clause order and placeholder numbering.
/// Deserializing from a JSON object keeps the object's key order.
///
/// # Example
/// ```ignore
/// let patch = Fields::new().with("numEmployees", 5).with("logoUrl", "https://ibm.test/logo.png");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields {
    entries: IndexMap<String, Value>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Consuming counterpart of [`Fields::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_keeps_key_order() {
        let fields: Fields =
            serde_json::from_str(r#"{"numEmployees": 5, "description": "x", "logoUrl": null}"#)
                .unwrap();
        let keys: Vec<&str> = fields.keys().collect();
        assert_eq!(keys, ["numEmployees", "description", "logoUrl"]);
        assert_eq!(fields.get("logoUrl"), Some(&Value::Null));
    }

    #[test]
    fn reinsert_replaces_in_place() {
        let mut fields = Fields::new().with("a", 1).with("b", 2);
        fields.insert("a", 3);
        let pairs: Vec<(&str, &Value)> = fields.iter().collect();
        assert_eq!(pairs, [("a", &Value::Int(3)), ("b", &Value::Int(2))]);
    }

    #[test]
    fn collect_keeps_first_position_of_repeated_key() {
        let fields: Fields = [("x", 1), ("y", 2), ("x", 3)].into_iter().collect();
        let pairs: Vec<(&str, &Value)> = fields.iter().collect();
        assert_eq!(pairs, [("x", &Value::Int(3)), ("y", &Value::Int(2))]);
    }

    #[test]
    fn rejects_non_object() {
        assert!(serde_json::from_str::<Fields>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Fields>(r#"{"a": [1]}"#).is_err());
    }

    #[test]
    fn serializes_in_order() {
        let fields = Fields::new().with("title", "Engineer").with("salary", 100_000);
        assert_eq!(
            serde_json::to_string(&fields).unwrap(),
            r#"{"title":"Engineer","salary":100000}"#
        );
    }
}
