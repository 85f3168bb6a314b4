//! Typed client core for the documents API.
//!
//! # Overview
//! Exposes the document endpoints (list, create, get, update, delete) as
//! strongly-typed calls over a pluggable HTTP transport. Required parameters
//! are checked before any I/O, endpoint paths are rendered from templates,
//! and payloads contain exactly the parameters the caller supplied.
//!
//! # Design
//! - `DatabasesClient` is stateless: it holds only an immutable
//!   `ClientConfig`. Each operation is split into `build_*` (produces an
//!   `HttpRequest`) and `parse_*` (consumes an `HttpResponse`), so the I/O
//!   boundary is explicit and both halves are testable without a network.
//! - `Databases<T: Transport>` runs build, exactly one round-trip, then parse.
//!   `ReqwestTransport` is the production transport.
//! - Documents are generic over the caller's custom-field type; the client
//!   only knows the `$`-prefixed system attributes.
//! - Errors are one `ApiError` enum: validation, template, transport.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod params;
pub mod path;
pub mod payload;
pub mod query;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::{Databases, DatabasesClient};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ErrorBody, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use params::{CreateDocument, DeleteDocument, GetDocument, ListDocuments, UpdateDocument};
pub use payload::Payload;
pub use query::{Id, Query, QueryValue};
pub use transport::ReqwestTransport;
pub use types::{CursorDirection, Document, DocumentList, OrderType};
