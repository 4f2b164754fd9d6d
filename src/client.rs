//! introspection client
//!
//! posts the standard introspection query to the configured endpoint and
//! materializes the schema for the generator.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::graphql::GraphQlResponse;
use crate::introspection::{IntrospectionData, Schema, INTROSPECTION_QUERY};
use reqwest::StatusCode;
use std::future::Future;
use std::sync::Arc;
use url::Url;

/// graphql introspection client
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl Client {
    /// create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .default_headers(config.extra_headers.clone())
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// access the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// fetch the schema via introspection. this is the only suspension
    /// point in the system; generation itself is synchronous.
    pub async fn fetch_schema(&self) -> Result<Schema> {
        self.fetch_schema_with(|url, body| async move {
            let response = self.http.post(url).json(&body).send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok((status, text))
        })
        .await
    }
}

fn parse_introspection_response(status: StatusCode, text: String) -> Result<Schema> {
    let parsed: GraphQlResponse<IntrospectionData> = match serde_json::from_str(&text) {
        Ok(parsed) => parsed,
        // surface the raw body when the response is not valid json
        Err(err) => {
            return Err(Error::GraphQl {
                status: Some(status.as_u16()),
                errors: Vec::new(),
                body: text,
                message: format!("invalid introspection response: {err}"),
            })
        }
    };

    if parsed.has_errors() {
        let message = parsed
            .first_error_message()
            .unwrap_or("graphql error")
            .to_string();
        return Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: parsed.errors,
            body: text,
            message,
        });
    }

    if !status.is_success() {
        return Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: Vec::new(),
            body: text,
            message: format!("introspection http error: {}", status),
        });
    }

    match parsed.data {
        Some(data) => Ok(data.schema),
        None => Err(Error::GraphQl {
            status: Some(status.as_u16()),
            errors: Vec::new(),
            body: text,
            message: "introspection response has no data".to_string(),
        }),
    }
}

impl Client {
    pub(crate) async fn fetch_schema_with<F, Fut>(&self, send: F) -> Result<Schema>
    where
        F: FnOnce(Url, serde_json::Value) -> Fut,
        Fut: Future<Output = Result<(StatusCode, String)>>,
    {
        let url = self.config.endpoint.clone();
        let body = serde_json::json!({
            "query": INTROSPECTION_QUERY,
            "variables": {},
        });

        tracing::debug!(endpoint = url.as_str(), "posting introspection query");
        let (status, text) = send(url, body).await?;
        parse_introspection_response(status, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(config: ClientConfig) -> Client {
        config.validate().unwrap();
        let http = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("test http client");
        Client {
            config: Arc::new(config),
            http,
        }
    }

    fn schema_body() -> String {
        serde_json::json!({
            "data": {
                "__schema": {
                    "mutationType": { "name": "Mutation" },
                    "types": [
                        { "kind": "OBJECT", "name": "Mutation", "fields": [] }
                    ]
                }
            }
        })
        .to_string()
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_fetch_schema_posts_introspection_query() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let schema = client
            .fetch_schema_with(|url, body| async move {
                assert_eq!(url.path(), "/graphql");
                assert!(body["query"]
                    .as_str()
                    .unwrap()
                    .contains("IntrospectionQuery"));
                Ok((StatusCode::OK, schema_body()))
            })
            .await
            .unwrap();

        assert_eq!(schema.mutation_type.unwrap().name, "Mutation");
        assert_eq!(schema.types.len(), 1);
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_fetch_schema_graphql_error() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let err = client
            .fetch_schema_with(|_url, _body| async move {
                Ok((
                    StatusCode::OK,
                    "{\"data\": null, \"errors\": [{\"message\": \"introspection disabled\"}]}"
                        .to_string(),
                ))
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::GraphQl { message, .. } if message == "introspection disabled"
        ));
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_fetch_schema_http_error() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let err = client
            .fetch_schema_with(|_url, _body| async move {
                Ok((StatusCode::INTERNAL_SERVER_ERROR, "{\"data\":null}".to_string()))
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::GraphQl {
                status: Some(500),
                ..
            }
        ));
    }

    #[cfg_attr(miri, ignore)]
    #[tokio::test]
    async fn test_fetch_schema_invalid_body_surfaces_raw_text() {
        let config = ClientConfig::new("http://localhost:1234/graphql");
        let client = test_client(config);
        let err = client
            .fetch_schema_with(|_url, _body| async move {
                Ok((StatusCode::OK, "<html>not json</html>".to_string()))
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::GraphQl { body, .. } if body == "<html>not json</html>"
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ClientConfig::new("ftp://example.com/graphql");
        let err = Client::new(config).err().expect("expected error");
        assert!(matches!(err, Error::Config(_)));
    }
}
