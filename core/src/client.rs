//! Document resource client.
//!
//! # Design
//! `DatabasesClient` holds only its `ClientConfig` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! validates the parameters, renders the endpoint path and assembles the
//! payload into an `HttpRequest`, and a `parse_*` method that consumes the
//! matching `HttpResponse`. Both halves are pure.
//!
//! `Databases` pairs a `DatabasesClient` with a `Transport` and runs
//! build, one round-trip, then parse. A failed validation returns before the
//! transport is touched.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::params::{CreateDocument, DeleteDocument, GetDocument, ListDocuments, UpdateDocument};
use crate::path::{DOCUMENT, DOCUMENTS};
use crate::payload::Payload;
use crate::transport::ReqwestTransport;
use crate::types::{Document, DocumentList};
use crate::validate::require;

const DATABASE_ID: &str = "databaseId";
const COLLECTION_ID: &str = "collectionId";
const DOCUMENT_ID: &str = "documentId";
const DATA: &str = "data";
const READ: &str = "read";
const WRITE: &str = "write";

/// Synchronous, stateless request builder and response parser for the
/// documents endpoints.
#[derive(Debug, Clone)]
pub struct DatabasesClient {
    config: ClientConfig,
}

impl DatabasesClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_list_documents(&self, params: &ListDocuments) -> Result<HttpRequest, ApiError> {
        let database_id = require(DATABASE_ID, params.database_id.as_deref())?;
        let collection_id = require(COLLECTION_ID, params.collection_id.as_deref())?;

        let path = DOCUMENTS.render(&[(DATABASE_ID, database_id), (COLLECTION_ID, collection_id)])?;
        let payload = Payload::new()
            .optional("queries", params.queries.as_ref())?
            .optional("limit", params.limit.as_ref())?
            .optional("offset", params.offset.as_ref())?
            .optional("cursor", params.cursor.as_ref())?
            .optional("cursorDirection", params.cursor_direction.as_ref())?
            .optional("orderAttributes", params.order_attributes.as_ref())?
            .optional("orderTypes", params.order_types.as_ref())?;
        self.request(HttpMethod::Get, &path, payload)
    }

    pub fn build_create_document<D: Serialize>(&self, params: &CreateDocument<D>) -> Result<HttpRequest, ApiError> {
        let database_id = require(DATABASE_ID, params.database_id.as_deref())?;
        let collection_id = require(COLLECTION_ID, params.collection_id.as_deref())?;
        let document_id = require(DOCUMENT_ID, params.document_id.as_deref())?;
        let data = require(DATA, params.data.as_ref())?;

        let path = DOCUMENTS.render(&[(DATABASE_ID, database_id), (COLLECTION_ID, collection_id)])?;
        let payload = Payload::new()
            .required(DOCUMENT_ID, document_id)?
            .required(DATA, data)?
            .optional(READ, params.read.as_ref())?
            .optional(WRITE, params.write.as_ref())?;
        self.request(HttpMethod::Post, &path, payload)
    }

    pub fn build_get_document(&self, params: &GetDocument) -> Result<HttpRequest, ApiError> {
        let path = self.document_path(params)?;
        self.request(HttpMethod::Get, &path, Payload::new())
    }

    pub fn build_update_document<D: Serialize>(&self, params: &UpdateDocument<D>) -> Result<HttpRequest, ApiError> {
        let database_id = require(DATABASE_ID, params.database_id.as_deref())?;
        let collection_id = require(COLLECTION_ID, params.collection_id.as_deref())?;
        let document_id = require(DOCUMENT_ID, params.document_id.as_deref())?;
        let data = require(DATA, params.data.as_ref())?;

        let path = DOCUMENT.render(&[
            (DATABASE_ID, database_id),
            (COLLECTION_ID, collection_id),
            (DOCUMENT_ID, document_id),
        ])?;
        let payload = Payload::new()
            .required(DATA, data)?
            .optional(READ, params.read.as_ref())?
            .optional(WRITE, params.write.as_ref())?;
        self.request(HttpMethod::Patch, &path, payload)
    }

    pub fn build_delete_document(&self, params: &DeleteDocument) -> Result<HttpRequest, ApiError> {
        let path = self.document_path(params)?;
        self.request(HttpMethod::Delete, &path, Payload::new())
    }

    pub fn parse_list_documents<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<DocumentList<T>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create_document<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Document<T>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get_document<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Document<T>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_update_document<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Document<T>, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// The backend acknowledges with an empty body (204) or `{}` (200).
    pub fn parse_delete_document(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)?;
        Ok(())
    }

    fn document_path(&self, params: &GetDocument) -> Result<String, ApiError> {
        let database_id = require(DATABASE_ID, params.database_id.as_deref())?;
        let collection_id = require(COLLECTION_ID, params.collection_id.as_deref())?;
        let document_id = require(DOCUMENT_ID, params.document_id.as_deref())?;
        DOCUMENT.render(&[
            (DATABASE_ID, database_id),
            (COLLECTION_ID, collection_id),
            (DOCUMENT_ID, document_id),
        ])
    }

    fn request(&self, method: HttpMethod, path: &str, payload: Payload) -> Result<HttpRequest, ApiError> {
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        headers.extend(self.config.default_headers());
        let mut request = HttpRequest {
            method,
            url: format!("{}{path}", self.config.endpoint()),
            headers,
            payload,
            body: None,
        };
        if method != HttpMethod::Get {
            request.body = Some(request.json_body().map_err(ApiError::Serialization)?);
        }
        Ok(request)
    }
}

/// Map any non-2xx status to `ApiError::Transport`. A 2xx whose body does
/// not fit the expected shape fails later, in decoding.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    let err = TransportError::from_response(response);
    warn!("request failed with status {}: {}", err.status, err.message);
    Err(err.into())
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(ApiError::Deserialization)
}

/// Document operations over a transport.
///
/// Holds no mutable state; concurrent calls on one instance are independent.
#[derive(Debug, Clone)]
pub struct Databases<T> {
    client: DatabasesClient,
    transport: T,
}

impl Databases<ReqwestTransport> {
    pub fn with_reqwest(config: ClientConfig) -> Self {
        Self::new(config, ReqwestTransport::new())
    }
}

impl<T: Transport> Databases<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            client: DatabasesClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &DatabasesClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list_documents<D: DeserializeOwned>(&self, params: &ListDocuments) -> Result<DocumentList<D>, ApiError> {
        let request = self.client.build_list_documents(params)?;
        let response = self.dispatch(request).await?;
        self.client.parse_list_documents(response)
    }

    pub async fn create_document<P, D>(&self, params: &CreateDocument<P>) -> Result<Document<D>, ApiError>
    where
        P: Serialize + Sync,
        D: DeserializeOwned,
    {
        let request = self.client.build_create_document(params)?;
        let response = self.dispatch(request).await?;
        self.client.parse_create_document(response)
    }

    pub async fn get_document<D: DeserializeOwned>(&self, params: &GetDocument) -> Result<Document<D>, ApiError> {
        let request = self.client.build_get_document(params)?;
        let response = self.dispatch(request).await?;
        self.client.parse_get_document(response)
    }

    pub async fn update_document<P, D>(&self, params: &UpdateDocument<P>) -> Result<Document<D>, ApiError>
    where
        P: Serialize + Sync,
        D: DeserializeOwned,
    {
        let request = self.client.build_update_document(params)?;
        let response = self.dispatch(request).await?;
        self.client.parse_update_document(response)
    }

    pub async fn delete_document(&self, params: &DeleteDocument) -> Result<(), ApiError> {
        let request = self.client.build_delete_document(params)?;
        let response = self.dispatch(request).await?;
        self.client.parse_delete_document(response)
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!("{} {}", request.method, request.url);
        let response = self.transport.call(request).await?;
        debug!("-> {}", response.status);
        Ok(response)
    }
}
