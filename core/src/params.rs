//! Per-operation parameter sets.
//!
//! Every field is an `Option` so that "not supplied" is explicit. The `new`
//! constructors take the required parameters; `Default` gives an empty set
//! whose required fields are absent and will fail validation. The serde
//! derives use the wire names so parameter sets can be loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::types::{CursorDirection, OrderType};

/// `GET /databases/{databaseId}/collections/{collectionId}/documents`
///
/// `offset` and `cursor` may both be set; both are forwarded and the backend
/// decides which one applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocuments {
    pub database_id: Option<String>,
    pub collection_id: Option<String>,
    pub queries: Option<Vec<String>>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub cursor: Option<String>,
    pub cursor_direction: Option<CursorDirection>,
    pub order_attributes: Option<Vec<String>>,
    pub order_types: Option<Vec<OrderType>>,
}

impl ListDocuments {
    pub fn new(database_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            database_id: Some(database_id.into()),
            collection_id: Some(collection_id.into()),
            ..Self::default()
        }
    }

    pub fn queries<I, S>(mut self, queries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.queries = Some(queries.into_iter().map(Into::into).collect());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn cursor_direction(mut self, direction: CursorDirection) -> Self {
        self.cursor_direction = Some(direction);
        self
    }

    pub fn order_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.order_attributes = Some(attributes.into_iter().map(Into::into).collect());
        self
    }

    pub fn order_types(mut self, types: impl IntoIterator<Item = OrderType>) -> Self {
        self.order_types = Some(types.into_iter().collect());
        self
    }
}

/// `POST /databases/{databaseId}/collections/{collectionId}/documents`
///
/// `D` is the custom-field shape sent as `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument<D> {
    pub database_id: Option<String>,
    pub collection_id: Option<String>,
    pub document_id: Option<String>,
    pub data: Option<D>,
    pub read: Option<Vec<String>>,
    pub write: Option<Vec<String>>,
}

impl<D> Default for CreateDocument<D> {
    fn default() -> Self {
        Self {
            database_id: None,
            collection_id: None,
            document_id: None,
            data: None,
            read: None,
            write: None,
        }
    }
}

impl<D> CreateDocument<D> {
    pub fn new(
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
        data: D,
    ) -> Self {
        Self {
            database_id: Some(database_id.into()),
            collection_id: Some(collection_id.into()),
            document_id: Some(document_id.into()),
            data: Some(data),
            read: None,
            write: None,
        }
    }

    pub fn read<I, S>(mut self, read: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.read = Some(read.into_iter().map(Into::into).collect());
        self
    }

    pub fn write<I, S>(mut self, write: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.write = Some(write.into_iter().map(Into::into).collect());
        self
    }
}

/// `GET /databases/{databaseId}/collections/{collectionId}/documents/{documentId}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDocument {
    pub database_id: Option<String>,
    pub collection_id: Option<String>,
    pub document_id: Option<String>,
}

impl GetDocument {
    pub fn new(
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
    ) -> Self {
        Self {
            database_id: Some(database_id.into()),
            collection_id: Some(collection_id.into()),
            document_id: Some(document_id.into()),
        }
    }
}

/// `PATCH /databases/{databaseId}/collections/{collectionId}/documents/{documentId}`
///
/// `data` carries only the fields to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocument<D> {
    pub database_id: Option<String>,
    pub collection_id: Option<String>,
    pub document_id: Option<String>,
    pub data: Option<D>,
    pub read: Option<Vec<String>>,
    pub write: Option<Vec<String>>,
}

impl<D> Default for UpdateDocument<D> {
    fn default() -> Self {
        Self {
            database_id: None,
            collection_id: None,
            document_id: None,
            data: None,
            read: None,
            write: None,
        }
    }
}

impl<D> UpdateDocument<D> {
    pub fn new(
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
        document_id: impl Into<String>,
        data: D,
    ) -> Self {
        Self {
            database_id: Some(database_id.into()),
            collection_id: Some(collection_id.into()),
            document_id: Some(document_id.into()),
            data: Some(data),
            read: None,
            write: None,
        }
    }

    pub fn read<I, S>(mut self, read: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.read = Some(read.into_iter().map(Into::into).collect());
        self
    }

    pub fn write<I, S>(mut self, write: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.write = Some(write.into_iter().map(Into::into).collect());
        self
    }
}

/// `DELETE /databases/{databaseId}/collections/{collectionId}/documents/{documentId}`
pub type DeleteDocument = GetDocument;
