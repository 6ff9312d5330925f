//! Structures and tools to parse, validate, and round-trip
//! [JSON Schema Draft 4](https://json-schema.org/specification-links) documents.
//!
//! The schema model preserves presence and absence of every keyword, so a
//! document that never mentions `minItems` serializes without it. On top
//! of the model sit reference [`collapse`], instance validation with
//! numbered diagnostics, and the equality metadata queried by schema-driven
//! code generators.
//!
//! # Examples
//!
//! ```
//! # fn main() -> jschema::Result<()> {
//! let schema = jschema::from_str(r#"{ "type": "object", "required": ["name"] }"#)?;
//!
//! let mut validator = jschema::validation::Validator::new(&schema)?;
//! let messages = validator.validate(r#"{ "id": 17 }"#)?;
//!
//! assert_eq!(messages.len(), 1);
//! assert!(messages[0].contains("required property \"name\" is missing"));
//! # Ok(())
//! # }
//! ```

use std::{io::Read, path::Path, result::Result as StdResult};

mod collapse;
mod error;
mod rewrite;

pub mod codegen;
pub mod instance;
pub mod schema;
pub mod validation;

pub use self::collapse::collapse;
pub use self::error::Error;
pub use self::schema::{
    AdditionalProperties, Items, RefError, Schema, Type, TypeSet, UriOrFragment,
};

pub type Result<T> = StdResult<T, Error>;

/// Parses a schema from JSON text.
///
/// The `$ref` key is renamed to `$$ref` before deserialization so that
/// generic JSON tooling never mistakes it for a graph directive; the
/// writer restores it. Fails with a malformed-JSON error on invalid text,
/// a type-mismatch error on a keyword holding the wrong JSON type, and an
/// invalid-reference error on a fragment reference that does not target a
/// definition.
pub fn from_str(text: &str) -> Result<Schema> {
    let text = rewrite::rename_keys(text, "$ref", "$$ref");
    let schema: Schema = serde_json::from_str(&text).map_err(Error::read)?;
    check_references(&schema)?;
    Ok(schema)
}

/// Parses a schema from a type which implements `Read`.
pub fn from_reader<R>(mut read: R) -> Result<Schema>
where
    R: Read,
{
    let mut text = String::new();
    read.read_to_string(&mut text)?;
    from_str(&text)
}

/// Parses a schema from a file path.
pub fn from_path<P>(path: P) -> Result<Schema>
where
    P: AsRef<Path>,
{
    from_str(&std::fs::read_to_string(path)?)
}

/// Serializes a schema to compact JSON text, emitting `$ref` for
/// reference nodes and omitting every absent keyword.
pub fn to_string(schema: &Schema) -> Result<String> {
    let text = serde_json::to_string(schema).map_err(Error::Serialize)?;
    Ok(rewrite::rename_keys(&text, "$$ref", "$ref"))
}

/// Serializes a schema to pretty-printed JSON text.
pub fn to_string_pretty(schema: &Schema) -> Result<String> {
    let text = serde_json::to_string_pretty(schema).map_err(Error::Serialize)?;
    Ok(rewrite::rename_keys(&text, "$$ref", "$ref"))
}

/// Every fragment reference in the document must target a definition.
fn check_references(root: &Schema) -> Result<()> {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if let Some(reference) = &node.reference {
            if reference.is_fragment() {
                reference.definition_name()?;
            }
        }
        stack.extend(node.children());
    }

    Ok(())
}
