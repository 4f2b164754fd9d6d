//! mutation document generation
//!
//! the schema-driven core: walks introspected type metadata to expand a
//! mutation's input object into an argument literal plus a flat variable
//! declaration list, selects the entity's scalar payload, and assembles
//! the final create/update/delete documents.

use crate::error::{Error, Result};
use crate::introspection::{Schema, TypeDef, TypeKind, TypeRef};

/// relay-style mutation protocol field, never emitted
const CLIENT_MUTATION_ID: &str = "clientMutationId";

/// primary-key field name, suppressed at the top level for create
const PRIMARY_KEY: &str = "id";

/// root mutation type name when the schema does not declare one
const MUTATION_TYPE_NAME: &str = "Mutation";

/// one generated mutation document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMutation {
    /// mutation field name, e.g. `createUsers`
    pub name: String,
    /// pretty-printed graphql document
    pub document: String,
}

/// flat variable declaration list built up across one recursive argument
/// synthesis. nested input objects contribute to the same list because
/// graphql variable declarations cannot be nested. insertion order is
/// declaration order; re-registering a name is last-writer-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct VarDecls {
    entries: Vec<(String, String)>,
}

impl VarDecls {
    pub(crate) fn insert(&mut self, name: String, signature: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            entry.1 = signature;
        } else {
            self.entries.push((name, signature));
        }
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, signature)| signature.as_str())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// render as the document's variable section, e.g. `$name:String!, $age:Int`
    pub(crate) fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(name, signature)| format!("{name}:{signature}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// strip one NON_NULL wrapper, returning the effective type reference and
/// whether the field is non-null. list wrappers are not unwrapped; the
/// classifier sees their LIST kind and skips them.
fn effective_type(ty: &TypeRef) -> (&TypeRef, bool) {
    match (ty.kind, ty.of_type.as_deref()) {
        (TypeKind::NonNull, Some(inner)) => (inner, true),
        _ => (ty, false),
    }
}

/// render a variable type signature from a type name and nullability
fn type_signature(name: &str, non_null: bool) -> String {
    if non_null {
        format!("{name}!")
    } else {
        name.to_string()
    }
}

/// trim the trailing comma artifact and surrounding whitespace left by
/// fragment accumulation. shared by the argument and payload synthesizers.
fn finalize_fragment(fragment: &str) -> String {
    let trimmed = fragment.trim_end();
    let trimmed = trimmed.strip_suffix(',').unwrap_or(trimmed);
    trimmed.trim().to_string()
}

/// parse the rendered template and re-emit it formatted
fn pretty_print(raw: &str) -> Result<String> {
    let document = graphql_parser::parse_query::<String>(raw)?;
    Ok(document.to_string())
}

/// mutation document generator for one entity/table
#[derive(Debug)]
pub struct Generator<'a> {
    schema: &'a Schema,
    /// pascal-cased entity name, drives type and mutation name lookups
    type_name: String,
    /// camel-cased entity field name inside the mutation payload
    field_name: String,
}

impl<'a> Generator<'a> {
    /// create a generator for the given table name
    pub fn new(schema: &'a Schema, table: &str) -> Self {
        Self {
            schema,
            type_name: to_pascal_case(table),
            field_name: to_camel_case(table),
        }
    }

    /// pascal-cased entity name derived from the table name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// generate the create, update, and delete documents. a mutation the
    /// schema does not declare is logged and skipped; an unresolvable type
    /// reference aborts the run.
    pub fn generate_all(&self) -> Result<Vec<GeneratedMutation>> {
        let kinds = [("create", true), ("update", false), ("delete", false)];

        let mut generated = Vec::new();
        for (kind, ignore_primary_key) in kinds {
            let name = format!("{kind}{}", self.type_name);
            match self.assemble(&name, ignore_primary_key)? {
                Some(document) => generated.push(GeneratedMutation { name, document }),
                None => {
                    tracing::warn!(mutation = name.as_str(), "mutation not found in schema, skipping")
                }
            }
        }
        Ok(generated)
    }

    /// assemble one mutation document. returns `Ok(None)` when the root
    /// mutation type has no field with this name.
    pub fn assemble(&self, mutation_name: &str, ignore_primary_key: bool) -> Result<Option<String>> {
        let root_name = self
            .schema
            .mutation_type
            .as_ref()
            .map(|ty| ty.name.as_str())
            .unwrap_or(MUTATION_TYPE_NAME);
        let root = self.schema.resolve(root_name)?;

        let Some(mutation) = root.fields().iter().find(|field| field.name == mutation_name)
        else {
            return Ok(None);
        };
        tracing::debug!(mutation = mutation_name, "generating mutation");

        let input_arg = mutation.args.first().ok_or_else(|| {
            Error::Schema(format!("mutation {mutation_name} declares no input argument"))
        })?;
        let (input_ref, _) = effective_type(&input_arg.ty);
        let input_name = input_ref.name.as_deref().ok_or_else(|| {
            Error::Schema(format!("mutation {mutation_name} input argument has no named type"))
        })?;
        let input_type = self.schema.resolve(input_name)?;

        let mut vars = VarDecls::default();
        let input_fragment = self.synthesize_args(input_type, &mut vars, ignore_primary_key)?;

        let payload_type = self.schema.resolve(&self.type_name)?;
        let payload = self.synthesize_payload(payload_type);

        let raw = self.render_document(mutation_name, &vars, &input_fragment, &payload);
        pretty_print(&raw).map(Some)
    }

    /// recursively expand an input object into an argument literal
    /// fragment, registering every leaf variable into `vars`. scalar and
    /// enum fields are emitted directly; input object fields recurse;
    /// lists, objects, interfaces, and unions are skipped by design.
    fn synthesize_args(
        &self,
        input_type: &TypeDef,
        vars: &mut VarDecls,
        ignore_primary_key: bool,
    ) -> Result<String> {
        let mut fragment = String::new();
        for field in input_type.input_fields() {
            if field.name == CLIENT_MUTATION_ID {
                continue;
            }
            if ignore_primary_key && field.name == PRIMARY_KEY {
                continue;
            }

            let (effective, non_null) = effective_type(&field.ty);
            match effective.kind {
                TypeKind::Scalar | TypeKind::Enum => {
                    let type_name = effective.name.as_deref().ok_or_else(|| {
                        Error::Schema(format!("input field {} has no type name", field.name))
                    })?;
                    fragment.push_str(&format!("{name}:${name}, ", name = field.name));
                    vars.insert(
                        format!("${}", field.name),
                        type_signature(type_name, non_null),
                    );
                }
                TypeKind::InputObject => {
                    let type_name = effective.name.as_deref().ok_or_else(|| {
                        Error::Schema(format!("input field {} has no type name", field.name))
                    })?;
                    let nested_type = self.schema.resolve(type_name)?;
                    // primary-key suppression applies to the top level
                    // only; a nested input's own id field is still emitted
                    let nested = self.synthesize_args(nested_type, vars, false)?;
                    fragment.push_str(&format!("{}:{{{}}}, ", field.name, nested));
                }
                _ => {}
            }
        }
        Ok(finalize_fragment(&fragment))
    }

    /// select the entity's scalar and enum fields, one level deep. this is
    /// what the generated mutation returns on success.
    fn synthesize_payload(&self, object_type: &TypeDef) -> String {
        let mut payload = String::new();
        for field in object_type.fields() {
            if field.name == CLIENT_MUTATION_ID {
                continue;
            }
            let (effective, _) = effective_type(&field.ty);
            if matches!(effective.kind, TypeKind::Scalar | TypeKind::Enum) {
                payload.push_str(&field.name);
                payload.push(',');
            }
        }
        finalize_fragment(&payload)
    }

    /// render the raw document template. the variable section is omitted
    /// entirely when no variables were registered, since `()` is not valid
    /// graphql.
    fn render_document(
        &self,
        mutation_name: &str,
        vars: &VarDecls,
        input_fragment: &str,
        payload: &str,
    ) -> String {
        let header = if vars.is_empty() {
            format!("mutation {mutation_name}")
        } else {
            format!("mutation {mutation_name}({})", vars.render())
        };
        format!(
            "{header} {{ {mutation_name}(input: {{{input_fragment}}}) {{ {field} {{ {payload} }} }} }}",
            field = self.field_name
        )
    }
}

fn to_pascal_case(name: &str) -> String {
    let mut out = String::new();
    let mut upper = true;
    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch == ' ' {
            upper = true;
            continue;
        }
        if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn to_camel_case(name: &str) -> String {
    let pascal = to_pascal_case(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => pascal,
    }
}
