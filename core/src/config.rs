//! Client configuration.
//!
//! A `ClientConfig` is built once and handed to a client by value; clients
//! never mutate it. Several clients with different configurations can live
//! side by side, which is what the tests do.

use crate::error::ConfigError;

/// Response format the client understands, sent on every request.
pub const RESPONSE_FORMAT: &str = "0.15.0";

pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_ENDPOINT: &str = "DOCSTORE_ENDPOINT";
pub const ENV_PROJECT: &str = "DOCSTORE_PROJECT";
pub const ENV_LOCALE: &str = "DOCSTORE_LOCALE";
pub const ENV_JWT: &str = "DOCSTORE_JWT";
pub const ENV_KEY: &str = "DOCSTORE_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: String,
    project: String,
    locale: Option<String>,
    jwt: Option<String>,
    key: Option<String>,
}

impl ClientConfig {
    /// `endpoint` is the API root, e.g. `https://cloud.example.com/v1`.
    pub fn new(endpoint: impl Into<String>, project: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project: project.into(),
            locale: None,
            jwt: None,
            key: None,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_jwt(mut self, jwt: impl Into<String>) -> Self {
        self.jwt = Some(jwt.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Read `DOCSTORE_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENV_ENDPOINT).ok_or(ConfigError::MissingVar(ENV_ENDPOINT))?;
        let project = lookup(ENV_PROJECT).ok_or(ConfigError::MissingVar(ENV_PROJECT))?;
        let mut config = Self::new(endpoint, project);
        config.locale = lookup(ENV_LOCALE);
        config.jwt = lookup(ENV_JWT);
        config.key = lookup(ENV_KEY);
        Ok(config)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    /// Headers sent with every request, after `content-type`.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("x-sdk-version".to_string(), format!("docstore-rust:{SDK_VERSION}")),
            ("x-appwrite-response-format".to_string(), RESPONSE_FORMAT.to_string()),
            ("x-appwrite-project".to_string(), self.project.clone()),
        ];
        if let Some(locale) = &self.locale {
            headers.push(("x-appwrite-locale".to_string(), locale.clone()));
        }
        if let Some(jwt) = &self.jwt {
            headers.push(("x-appwrite-jwt".to_string(), jwt.clone()));
        }
        if let Some(key) = &self.key {
            headers.push(("x-appwrite-key".to_string(), key.clone()));
        }
        headers
    }
}
