//! Domain DTOs for the documents API.
//!
//! # Design
//! The client only knows a document's system attributes (the `$`-prefixed
//! keys). Everything else is the caller's custom shape `T`, flattened into
//! the same JSON object. `T` defaults to a raw JSON map for callers that do
//! not want a typed model. These types are defined independently from the
//! mock-server crate; integration tests catch schema drift.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document: system attributes plus custom fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document<T = Map<String, Value>> {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$collection")]
    pub collection_id: String,
    #[serde(rename = "$read", default)]
    pub read: Vec<String>,
    #[serde(rename = "$write", default)]
    pub write: Vec<String>,
    /// Unix seconds.
    #[serde(rename = "$createdAt", default)]
    pub created_at: i64,
    /// Unix seconds.
    #[serde(rename = "$updatedAt", default)]
    pub updated_at: i64,
    #[serde(flatten)]
    pub data: T,
}

/// One page of a `list` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentList<T = Map<String, Value>> {
    pub total: u64,
    pub documents: Vec<Document<T>>,
}

/// Which side of the cursor document a page is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorDirection {
    Before,
    After,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "ASC")]
    Asc,
    #[serde(rename = "DESC")]
    Desc,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Message {
        user: String,
        message: String,
    }

    fn raw() -> Value {
        json!({
            "$id": "doc1",
            "$collection": "messages",
            "$read": ["role:all"],
            "$write": ["user:42"],
            "$createdAt": 1660000000,
            "$updatedAt": 1660000100,
            "user": "ada",
            "message": "hello"
        })
    }

    #[test]
    fn document_splits_system_and_custom_fields() {
        let doc: Document<Message> = serde_json::from_value(raw()).unwrap();
        assert_eq!(doc.id, "doc1");
        assert_eq!(doc.collection_id, "messages");
        assert_eq!(doc.read, vec!["role:all"]);
        assert_eq!(doc.updated_at, 1660000100);
        assert_eq!(
            doc.data,
            Message {
                user: "ada".to_string(),
                message: "hello".to_string()
            }
        );
    }

    #[test]
    fn untyped_document_keeps_only_custom_fields() {
        let doc: Document = serde_json::from_value(raw()).unwrap();
        assert_eq!(doc.data.len(), 2);
        assert_eq!(doc.data["user"], "ada");
        assert!(!doc.data.contains_key("$id"));
    }

    #[test]
    fn document_serializes_back_to_flat_object() {
        let doc: Document = serde_json::from_value(raw()).unwrap();
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw());
    }

    #[test]
    fn document_list_parses() {
        let list: DocumentList<Message> =
            serde_json::from_value(json!({"total": 7, "documents": [raw()]})).unwrap();
        assert_eq!(list.total, 7);
        assert_eq!(list.documents[0].data.user, "ada");
    }

    #[test]
    fn enums_use_wire_names() {
        assert_eq!(serde_json::to_value(CursorDirection::After).unwrap(), json!("after"));
        assert_eq!(serde_json::to_value(CursorDirection::Before).unwrap(), json!("before"));
        assert_eq!(serde_json::to_value(OrderType::Desc).unwrap(), json!("DESC"));
    }
}
