//! Error types for the document client.
//!
//! # Design
//! Every failure reaches the caller as one `ApiError`. The three kinds a
//! caller has to tell apart get their own variants: `Validation` is raised
//! before any I/O, `Template` points at a broken endpoint template inside the
//! client, and `Transport` carries the HTTP status and the backend's message
//! verbatim. Nothing here is retried or swallowed.

use serde::Deserialize;
use thiserror::Error;

use crate::http::HttpResponse;

/// Errors returned by `DatabasesClient` and `Databases` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required parameter was not supplied. No request was issued.
    #[error("missing required parameter: \"{parameter}\"")]
    Validation { parameter: &'static str },

    /// An endpoint template references a placeholder with no value.
    #[error("unresolved placeholder `{{{placeholder}}}` in endpoint template `{template}`")]
    Template {
        template: &'static str,
        placeholder: String,
    },

    /// The backend answered with a non-success status, or the round-trip failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A request value could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a transport error. `Some(0)` for network failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(err) => Some(err.status),
            _ => None,
        }
    }
}

/// Structured failure of one HTTP round-trip.
///
/// `status` is `0` when no response was received at all.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("HTTP {status}: {message}")]
pub struct TransportError {
    pub status: u16,
    pub message: String,
    /// Backend error type, e.g. `document_not_found`.
    pub kind: Option<String>,
}

impl TransportError {
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
            kind: None,
        }
    }

    /// Build from a non-success response, preferring the backend's error
    /// envelope and falling back to the raw body.
    pub fn from_response(response: &HttpResponse) -> Self {
        match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(body) => Self {
                status: response.status,
                message: body.message,
                kind: body.kind,
            },
            Err(_) => Self {
                status: response.status,
                message: response.body.clone(),
                kind: None,
            },
        }
    }

    pub fn is_network(&self) -> bool {
        self.status == 0
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            message: err.to_string(),
            kind: None,
        }
    }
}

/// Error envelope returned by the backend on non-2xx responses.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: u16,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Errors raised while assembling a `ClientConfig` from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn transport_error_reads_backend_envelope() {
        let err = TransportError::from_response(&response(
            404,
            r#"{"message":"Document with the requested ID could not be found.","code":404,"type":"document_not_found"}"#,
        ));
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Document with the requested ID could not be found.");
        assert_eq!(err.kind.as_deref(), Some("document_not_found"));
    }

    #[test]
    fn transport_error_falls_back_to_raw_body() {
        let err = TransportError::from_response(&response(502, "bad gateway"));
        assert_eq!(err.status, 502);
        assert_eq!(err.message, "bad gateway");
        assert!(err.kind.is_none());
    }

    #[test]
    fn validation_message_names_parameter() {
        let err = ApiError::Validation {
            parameter: "databaseId",
        };
        assert_eq!(err.to_string(), "missing required parameter: \"databaseId\"");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn template_message_shows_placeholder() {
        let err = ApiError::Template {
            template: "/a/{b}",
            placeholder: "b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "unresolved placeholder `{b}` in endpoint template `/a/{b}`"
        );
    }

    #[test]
    fn status_is_exposed_for_transport_errors() {
        let err: ApiError = TransportError::network("connection refused").into();
        assert_eq!(err.status(), Some(0));
        assert!(matches!(err, ApiError::Transport(ref t) if t.is_network()));
    }
}
