//! introspection data model
//!
//! serde types for the standard graphql introspection result
//! (`data.__schema`), plus name-based type lookup. the model is read-only:
//! it is deserialized once from the introspection response and walked by
//! the generator.

use crate::error::{Error, Result};
use serde::Deserialize;

/// introspection query posted to the endpoint, trimmed to the fields the
/// generator consumes. `ofType` is requested three levels deep; the
/// generator itself only unwraps a single NON_NULL layer.
pub const INTROSPECTION_QUERY: &str = r#"
query IntrospectionQuery {
  __schema {
    mutationType { name }
    types {
      kind
      name
      fields(includeDeprecated: true) {
        name
        args {
          name
          type { ...TypeRef }
        }
        type { ...TypeRef }
      }
      inputFields {
        name
        type { ...TypeRef }
      }
    }
  }
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
      }
    }
  }
}
"#;

/// `data` payload of the introspection response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub(crate) schema: Schema,
}

/// the full introspected schema
#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    /// root mutation type reference, when the schema declares one
    #[serde(rename = "mutationType", default)]
    pub mutation_type: Option<NamedType>,
    /// every type declared by the schema, in server order
    pub types: Vec<TypeDef>,
}

impl Schema {
    /// look up a type definition by name
    pub fn type_named(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|ty| ty.name == name)
    }

    /// look up a type definition by name, failing if it does not resolve.
    /// an unresolvable reference means the schema is malformed or does not
    /// match the requested entity, and aborts the whole generation run.
    pub fn resolve(&self, name: &str) -> Result<&TypeDef> {
        self.type_named(name).ok_or_else(|| Error::TypeNotFound {
            name: name.to_string(),
        })
    }
}

/// bare type-name reference (`mutationType { name }`)
#[derive(Debug, Clone, Deserialize)]
pub struct NamedType {
    pub name: String,
}

/// a single entry of the schema's type list
#[derive(Debug, Clone, Deserialize)]
pub struct TypeDef {
    pub kind: TypeKind,
    pub name: String,
    /// output fields, present for OBJECT and INTERFACE types
    #[serde(default)]
    pub fields: Option<Vec<FieldDef>>,
    /// input fields, present for INPUT_OBJECT types
    #[serde(rename = "inputFields", default)]
    pub input_fields: Option<Vec<InputValueDef>>,
}

impl TypeDef {
    /// output fields, empty when absent
    pub fn fields(&self) -> &[FieldDef] {
        self.fields.as_deref().unwrap_or_default()
    }

    /// input fields, empty when absent
    pub fn input_fields(&self) -> &[InputValueDef] {
        self.input_fields.as_deref().unwrap_or_default()
    }
}

/// output field of an object type
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDef {
    pub name: String,
    /// declared arguments; mutations carry their input object as the
    /// first (and only consulted) argument
    #[serde(default)]
    pub args: Vec<InputValueDef>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// input field or argument
#[derive(Debug, Clone, Deserialize)]
pub struct InputValueDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// possibly-wrapped type reference. a NON_NULL wrapper carries no name of
/// its own; the wrapped type supplies the name and kind.
#[derive(Debug, Clone, Deserialize)]
pub struct TypeRef {
    pub kind: TypeKind,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "ofType", default)]
    pub of_type: Option<Box<TypeRef>>,
}

/// introspection `__TypeKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}
