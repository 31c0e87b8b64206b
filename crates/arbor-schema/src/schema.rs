//! Schema fields, registries, and verification.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::errors::SchemaError;
use crate::expr::{parse_type_expr, TypeExpr};
use crate::unpack::unpack_fully;
use crate::verify::{verify_base_types, Verdict};

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new instance without validation; callers are responsible for conformity.
            pub fn new(value: String) -> Self {
                Self(value)
            }

            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, SchemaError> {
                let s = value.into();
                if !Regex::new($pattern).expect("invalid regex").is_match(&s) {
                    return Err(SchemaError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

newtype!(
    FieldName,
    "Validated schema field name (pattern: `[A-Za-z_][A-Za-z0-9_-]{0,63}`).",
    r"^[A-Za-z_][A-Za-z0-9_-]{0,63}$"
);
newtype!(
    SchemaName,
    "Validated registry name for a schema (pattern: `[A-Za-z_][A-Za-z0-9_.-]{0,63}`).",
    r"^[A-Za-z_][A-Za-z0-9_.-]{0,63}$"
);

/// Declared type of a schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A type-expression string, e.g. `"list[dict[string, int]]"`.
    Expr(String),
    /// An embedded sub-schema.
    Nested(Schema),
}

/// Declarative description of a record's field names and expected
/// types, possibly nesting other schemas.
///
/// Field iteration order is insertion order. Verification is
/// idempotent and side-effect-free; a schema never mutates after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    fields: Vec<(FieldName, FieldType)>,
}

impl Schema {
    /// Creates a schema from named fields.
    pub fn new(fields: Vec<(FieldName, FieldType)>) -> Self {
        Schema { fields }
    }

    /// Builds a schema from a JSON object.
    ///
    /// String values are type expressions; object values are embedded
    /// sub-schemas. Anything else is rejected.
    pub fn from_json(value: &Value) -> Result<Self, SchemaError> {
        let map = value
            .as_object()
            .ok_or_else(|| SchemaError::InvalidDocument {
                reason: "expected a JSON object".to_string(),
            })?;
        let mut fields = Vec::with_capacity(map.len());
        for (key, field_value) in map {
            let name = FieldName::parse(key.as_str())?;
            let field_type = match field_value {
                Value::String(expr) => FieldType::Expr(expr.clone()),
                Value::Object(_) => FieldType::Nested(Schema::from_json(field_value)?),
                other => {
                    return Err(SchemaError::InvalidDocument {
                        reason: format!(
                            "field '{}' must be a type expression or sub-schema, got {}",
                            key, other
                        ),
                    })
                }
            };
            fields.push((name, field_type));
        }
        Ok(Schema { fields })
    }

    /// Fields in insertion order.
    pub fn fields(&self) -> &[(FieldName, FieldType)] {
        &self.fields
    }

    /// True when the schema declares a field with this name.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field.as_ref() == name)
    }

    /// Verifies every field's type expression against the base-type
    /// vocabulary.
    ///
    /// Composition: [`get_key_types`] → [`unpack_fully`] per field →
    /// [`verify_base_types`]. Structural misuse (a map container used
    /// as a field type) is an error; a malformed expression is fatal
    /// to that field only and degrades to a failing verdict that still
    /// covers the remaining fields.
    pub fn verify(&self) -> Result<Verdict, SchemaError> {
        let mut verdict = Verdict::ok();
        for (_, expr) in get_key_types(self)? {
            apply_expr(&expr, &mut verdict)?;
        }
        Ok(verdict)
    }
}

/// Depth-first walk collecting `(field path, raw type expression)`
/// pairs from the schema and its embedded sub-schemas.
///
/// A field whose expression is a named map container
/// (`dict[...]`/`dict{...}`) is rejected immediately: maps must be
/// modeled as sub-schemas, not as a generic container type string.
pub fn get_key_types(schema: &Schema) -> Result<Vec<(String, String)>, SchemaError> {
    let mut collected = Vec::new();
    collect_key_types(schema, "", &mut collected)?;
    Ok(collected)
}

fn collect_key_types(
    schema: &Schema,
    prefix: &str,
    out: &mut Vec<(String, String)>,
) -> Result<(), SchemaError> {
    for (name, field_type) in schema.fields() {
        let path = if prefix.is_empty() {
            name.as_ref().to_string()
        } else {
            format!("{}.{}", prefix, name.as_ref())
        };
        match field_type {
            FieldType::Expr(expr) => {
                if is_named_map(expr) {
                    return Err(SchemaError::UnsupportedContainer { field: path });
                }
                out.push((path, expr.clone()));
            }
            FieldType::Nested(nested) => collect_key_types(nested, &path, out)?,
        }
    }
    Ok(())
}

// A top-level `dict[...]`/`dict{...}` expression. Exact-name check, so
// `dictionary[...]` is not a map and falls through to the parser.
fn is_named_map(expr: &str) -> bool {
    expr.trim()
        .strip_prefix("dict")
        .map_or(false, |rest| rest.trim_start().starts_with(['[', '{']))
}

fn apply_expr(expr: &str, verdict: &mut Verdict) -> Result<(), SchemaError> {
    match unpack_fully(expr) {
        Ok(tokens) => verdict.merge(verify_base_types(&tokens)),
        Err(SchemaError::MalformedExpression { reason, .. }) => {
            verdict.push_malformed(expr, &reason)
        }
        Err(SchemaError::DepthExceeded { max, .. }) => {
            verdict.push_malformed(expr, &format!("nesting exceeds {} levels", max))
        }
        Err(other) => return Err(other),
    }
    Ok(())
}

/// Immutable name → schema table resolving `schema:<name>` references.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    /// Builds a registry from named schemas.
    pub fn new(schemas: impl IntoIterator<Item = (SchemaName, Schema)>) -> Self {
        SchemaRegistry {
            schemas: schemas
                .into_iter()
                .map(|(name, schema)| (name.as_ref().to_string(), schema))
                .collect(),
        }
    }

    /// Looks a schema up by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Verifies a schema, resolving `schema:<name>` references through
    /// the registry.
    ///
    /// Recursion into referenced schemas carries a visited set keyed
    /// by schema name, so a direct or transitive self-reference fails
    /// with [`SchemaError::CyclicReference`] instead of looping.
    /// References that do not resolve are
    /// [`SchemaError::UnknownReference`].
    pub fn verify(&self, schema: &Schema) -> Result<Verdict, SchemaError> {
        let mut visited = HashSet::new();
        let mut verdict = Verdict::ok();
        self.verify_inner(schema, &mut visited, &mut verdict)?;
        Ok(verdict)
    }

    fn verify_inner(
        &self,
        schema: &Schema,
        visited: &mut HashSet<String>,
        verdict: &mut Verdict,
    ) -> Result<(), SchemaError> {
        for (_, expr) in get_key_types(schema)? {
            if let Ok(parsed) = parse_type_expr(&expr) {
                self.visit_refs(&parsed, visited, verdict)?;
            }
            apply_expr(&expr, verdict)?;
        }
        Ok(())
    }

    fn visit_refs(
        &self,
        parsed: &TypeExpr,
        visited: &mut HashSet<String>,
        verdict: &mut Verdict,
    ) -> Result<(), SchemaError> {
        match parsed {
            TypeExpr::SchemaRef(name) => {
                if name.is_empty() {
                    return Ok(());
                }
                let target =
                    self.schemas
                        .get(name)
                        .ok_or_else(|| SchemaError::UnknownReference {
                            name: name.clone(),
                        })?;
                if !visited.insert(name.clone()) {
                    return Err(SchemaError::CyclicReference { name: name.clone() });
                }
                self.verify_inner(target, visited, verdict)?;
                visited.remove(name);
                Ok(())
            }
            TypeExpr::Container { children, .. } => {
                for child in children {
                    self.visit_refs(child, visited, verdict)?;
                }
                Ok(())
            }
            TypeExpr::Primitive(_) => Ok(()),
        }
    }
}
