//! HTTP request descriptor and the transport seam.
//!
//! # Design
//! `HttpRequest` describes one outbound call as plain data: method, resolved
//! URL, headers and the assembled `Payload`. The core builds these values and
//! parses `HttpResponse` values without touching the network; a `Transport`
//! implementation executes the round-trip in between. Tests swap in a spy
//! transport, production code uses `ReqwestTransport`.
//!
//! The payload is rendered lazily: as a query string for `GET`, as a JSON
//! body for every other method.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::TransportError;
use crate::payload::Payload;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// Built by `DatabasesClient::build_*` methods. `url` is always fully
/// resolved; it never contains a template placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub payload: Payload,
    /// Encoded JSON body. `None` for `GET`, where the payload travels in the
    /// query string.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Render the payload as an URL query string in payload order.
    ///
    /// Arrays expand to one `key[]=item` pair per element.
    pub fn query_string(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.payload.iter() {
            match value {
                Value::Array(items) => {
                    let name = format!("{key}[]");
                    for item in items {
                        query.append_pair(&name, &query_value(item));
                    }
                }
                other => {
                    query.append_pair(key, &query_value(other));
                }
            }
        }
        query.finish()
    }

    /// Render the payload as a JSON object in payload order.
    pub fn json_body(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.payload)
    }

    /// The URL the transport should hit: for `GET` the payload is appended as
    /// a query string, for every other method the URL is used as-is.
    pub fn target_url(&self) -> String {
        if self.method != HttpMethod::Get {
            return self.url.clone();
        }
        match self.query_string() {
            query if query.is_empty() => self.url.clone(),
            query => format!("{}?{query}", self.url),
        }
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport`, then passed to `DatabasesClient::parse_*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one HTTP round-trip.
///
/// Non-success statuses are returned as data; only failures to obtain a
/// response at all are reported as `TransportError`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn call(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).call(request).await
    }
}
