//! Client configuration: upstream base URL and optional API key.

use std::env;

/// Base URL of the public reqres API.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api/";

/// Overrides the base URL, e.g. to point at a local mock server.
pub const BASE_URL_ENV: &str = "REQRES_BASE_URL";

/// Sent as `x-api-key` on every request when set.
pub const API_KEY_ENV: &str = "REQRES_API_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: None,
        }
    }

    /// Read `REQRES_BASE_URL` and `REQRES_API_KEY`, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let present = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let config = match present(BASE_URL_ENV) {
            Some(base_url) => Self::new(base_url.trim()),
            None => Self::default(),
        };
        match present(API_KEY_ENV) {
            Some(key) => config.with_api_key(key.trim()),
            None => config,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Always ends with exactly one `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}
