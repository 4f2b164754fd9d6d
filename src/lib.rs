//! graphql crud mutation generator
//!
//! this crate derives ready-to-use create/update/delete mutation documents
//! for a named entity type from an introspected graphql schema. fetch the
//! schema with [`Client`], then drive generation with [`Generator`].
//!
//! ## quick start
//!
//! ```no_run
//! use crudgen::{Client, ClientConfig, Generator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::new("http://localhost:5678/graphql"))?;
//! let schema = client.fetch_schema().await?;
//! let generator = Generator::new(&schema, "users");
//! for mutation in generator.generate_all()? {
//!     println!("{}", mutation.document);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod generate;
mod graphql;
mod introspection;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_ENDPOINT};
pub use error::{Error, Result};
pub use generate::{GeneratedMutation, Generator};
pub use graphql::{GraphQlError, GraphQlLocation, GraphQlResponse};
pub use introspection::{
    FieldDef, InputValueDef, NamedType, Schema, TypeDef, TypeKind, TypeRef, INTROSPECTION_QUERY,
};
