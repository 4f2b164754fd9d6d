//! error types
//!
//! structured errors for config, http, json, schema lookup, and generation.

use crate::graphql::GraphQlError;
use std::fmt;

/// library result type
pub type Result<T> = std::result::Result<T, Error>;

/// error type for the client and the mutation generator
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document error: {0}")]
    Document(#[from] graphql_parser::query::ParseError),

    #[error("graphql error: {message}")]
    GraphQl {
        /// http status if available
        status: Option<u16>,
        /// graphql error list
        errors: Vec<GraphQlError>,
        /// raw response body
        body: String,
        /// top-level message
        message: String,
    },

    /// a type referenced by name did not resolve; the schema is
    /// malformed or incompatible with the requested entity
    #[error("type not found in schema: {name}")]
    TypeNotFound { name: String },

    #[error("schema error: {0}")]
    Schema(String),
}

impl fmt::Display for GraphQlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_not_found_display() {
        let err = Error::TypeNotFound {
            name: "UsersInput".to_string(),
        };
        assert_eq!(err.to_string(), "type not found in schema: UsersInput");
    }

    #[test]
    fn test_graphql_error_display() {
        let err = GraphQlError {
            message: "boom".to_string(),
            locations: vec![],
            path: vec![],
            extensions: None,
        };
        assert_eq!(err.to_string(), "boom");
    }
}
