//! client configuration
//!
//! build a [`ClientConfig`] with the graphql endpoint url and optional
//! overrides, then pass it to [`crate::Client::new`].

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

/// default graphql endpoint, matching the generator's usual local setup
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5678/graphql";

/// configuration for the introspection client
#[derive(Clone)]
pub struct ClientConfig {
    /// original endpoint input
    pub(crate) raw_endpoint: String,

    /// graphql endpoint url (e.g., "<http://localhost:5678/graphql>")
    pub(crate) endpoint: Url,

    /// whether the provided endpoint parsed successfully
    pub(crate) endpoint_valid: bool,

    /// request timeout duration
    pub(crate) timeout: Duration,

    /// user agent string
    pub(crate) user_agent: String,

    /// additional headers to send with the introspection request
    pub(crate) extra_headers: HeaderMap,
}

impl ClientConfig {
    /// create a new client configuration
    ///
    /// # arguments
    ///
    /// * `endpoint` - the full graphql endpoint url
    ///
    /// # example
    ///
    /// ```
    /// use crudgen::ClientConfig;
    ///
    /// let config = ClientConfig::new("http://localhost:5678/graphql");
    /// ```
    pub fn new(endpoint: impl AsRef<str>) -> Self {
        let endpoint_str = endpoint.as_ref();

        let normalized = endpoint_str.trim_end_matches('/');

        let (endpoint, endpoint_valid) = match Url::parse(normalized)
            .or_else(|_| Url::parse(&format!("http://{}", normalized)))
        {
            Ok(url) => (url, true),
            Err(_) => (Url::parse("http://invalid.invalid").unwrap(), false),
        };

        Self {
            raw_endpoint: endpoint_str.to_string(),
            endpoint,
            endpoint_valid,
            timeout: Duration::from_secs(30),
            user_agent: format!("crudgen/{} (Rust)", env!("CARGO_PKG_VERSION")),
            extra_headers: HeaderMap::new(),
        }
    }

    /// set the request timeout
    ///
    /// default: 30 seconds
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// set a custom user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// add a header to the introspection request
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.insert(name, value);
        self
    }

    /// add a set of headers to the introspection request
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.extra_headers.extend(headers);
        self
    }

    /// access the configured endpoint url
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if !self.endpoint_valid {
            return Err(Error::Config(format!(
                "invalid endpoint url: {}",
                self.raw_endpoint
            )));
        }

        if self.endpoint.scheme() != "http" && self.endpoint.scheme() != "https" {
            return Err(Error::Config(format!(
                "invalid url scheme: {}. must be http or https",
                self.endpoint.scheme()
            )));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("extra_headers", &self.extra_headers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = ClientConfig::new("http://localhost:5678/graphql");
        assert_eq!(config.endpoint.as_str(), "http://localhost:5678/graphql");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scheme_prepended_when_missing() {
        let config = ClientConfig::new("example.com/graphql");
        assert_eq!(config.endpoint.scheme(), "http");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_url() {
        let mut config = ClientConfig::new("http://localhost:5678/graphql");
        config.endpoint_valid = false;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_validation_invalid_scheme() {
        let config = ClientConfig::new("ftp://example.com/graphql");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_builder_helpers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-test"),
            HeaderValue::from_static("value"),
        );

        let config = ClientConfig::new("http://localhost:5678/graphql")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("crudgen-test")
            .with_headers(headers)
            .with_header(
                HeaderName::from_static("x-other"),
                HeaderValue::from_static("other"),
            );

        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "crudgen-test");
        assert_eq!(config.extra_headers.get("x-test").unwrap(), "value");
        assert_eq!(config.extra_headers.get("x-other").unwrap(), "other");
    }

    #[test]
    fn test_debug_output() {
        let config = ClientConfig::new("http://localhost:5678/graphql");
        let debug = format!("{config:?}");
        assert!(debug.contains("endpoint"));
        assert!(debug.contains("user_agent"));
    }
}
