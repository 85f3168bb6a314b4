//! Ordered request payloads.
//!
//! # Design
//! A `Payload` is built field by field from an operation's declared
//! parameters. `optional` skips `None` entirely, so an omitted parameter
//! never produces a key (not even `null`), while a supplied empty list is
//! kept. Entries stay in insertion order, which is the operation's
//! declaration order; both the JSON body and the query string rely on it.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    entries: Vec<(&'static str, Value)>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value that is always sent.
    pub fn required<V: Serialize + ?Sized>(mut self, key: &'static str, value: &V) -> Result<Self, ApiError> {
        let value = serde_json::to_value(value).map_err(ApiError::Serialization)?;
        self.insert(key, value);
        Ok(self)
    }

    /// Insert a value only if the caller supplied it.
    pub fn optional<V: Serialize + ?Sized>(self, key: &'static str, value: Option<&V>) -> Result<Self, ApiError> {
        match value {
            Some(value) => self.required(key, value),
            None => Ok(self),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(k, _)| *k).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy into a JSON object. Key order follows serde_json's map ordering.
    pub fn to_value(&self) -> Value {
        Value::Object(self.entries.iter().map(|(k, v)| (k.to_string(), v.clone())).collect())
    }

    // Keys are fixed per operation, so a repeat replaces in place.
    fn insert(&mut self, key: &'static str, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omitted_parameters_produce_no_key() {
        let offset: Option<u32> = None;
        let payload = Payload::new()
            .optional("limit", Some(&10u32))
            .unwrap()
            .optional("offset", offset.as_ref())
            .unwrap();
        assert_eq!(payload.keys(), vec!["limit"]);
        assert_eq!(payload.to_value(), json!({"limit": 10}));
    }

    #[test]
    fn empty_list_is_still_included() {
        let read: Vec<String> = Vec::new();
        let payload = Payload::new().optional("read", Some(&read)).unwrap();
        assert_eq!(payload.get("read"), Some(&json!([])));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let payload = Payload::new()
            .required("documentId", "doc1")
            .unwrap()
            .required("data", &json!({"text": "hi"}))
            .unwrap()
            .optional("read", Some(&["role:all"]))
            .unwrap()
            .optional("write", Some(&["user:1"]))
            .unwrap();
        assert_eq!(payload.keys(), vec!["documentId", "data", "read", "write"]);
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"documentId":"doc1","data":{"text":"hi"},"read":["role:all"],"write":["user:1"]}"#
        );
    }

    #[test]
    fn values_pass_through_unchanged() {
        let nested = json!({"a": [1, 2, {"b": null}], "c": true});
        let payload = Payload::new().required("data", &nested).unwrap();
        assert_eq!(payload.get("data"), Some(&nested));
    }

    #[test]
    fn repeated_key_replaces_value() {
        let payload = Payload::new()
            .required("limit", &1)
            .unwrap()
            .required("limit", &2)
            .unwrap();
        assert_eq!(payload.len(), 1);
        assert_eq!(payload.get("limit"), Some(&json!(2)));
    }

    #[test]
    fn empty_payload_serializes_to_empty_object() {
        let payload = Payload::new();
        assert!(payload.is_empty());
        assert_eq!(serde_json::to_string(&payload).unwrap(), "{}");
    }
}
