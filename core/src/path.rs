//! Endpoint templates and path rendering.

use crate::error::ApiError;

/// Documents of one collection.
pub const DOCUMENTS: EndpointTemplate =
    EndpointTemplate::new("/databases/{databaseId}/collections/{collectionId}/documents");

/// A single document.
pub const DOCUMENT: EndpointTemplate =
    EndpointTemplate::new("/databases/{databaseId}/collections/{collectionId}/documents/{documentId}");

/// An URL path containing `{name}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointTemplate(&'static str);

impl EndpointTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Placeholder names in template order.
    pub fn placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.0;
        while let Some(open) = rest.find('{') {
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                break;
            };
            names.push(&after[..close]);
            rest = &after[close + 1..];
        }
        names
    }

    /// Substitute every `{name}` with its value from `params`.
    ///
    /// Values are inserted verbatim and never re-scanned, so a value that
    /// itself contains braces is left alone. Entries in `params` without a
    /// matching placeholder are ignored; a placeholder without an entry is an
    /// `ApiError::Template`.
    pub fn render(&self, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let mut rendered = String::with_capacity(self.0.len() + 32);
        let mut rest = self.0;
        while let Some(open) = rest.find('{') {
            rendered.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                rendered.push_str(&rest[open..]);
                return Ok(rendered);
            };
            let name = &after[..close];
            let value = params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .ok_or_else(|| ApiError::Template {
                    template: self.0,
                    placeholder: name.to_string(),
                })?;
            rendered.push_str(value);
            rest = &after[close + 1..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}
