//! Inlining of `$ref` targets into their referring nodes.

use log::trace;

use crate::schema::{AdditionalProperties, Items, RefError, Schema};

/// Returns a deep copy of `schema` in which every reference node has been
/// merged with the definition it points at.
///
/// Only same-document `#/definitions/<name>` fragments are supported; the
/// first unresolvable or unsupported reference aborts the whole operation.
/// Definitions are looked up against the root schema, not the subtree a
/// reference happens to sit in.
pub fn collapse(schema: &Schema) -> Result<Schema, RefError> {
    let mut copy = schema.clone();
    collapse_node(&mut copy, schema)?;
    Ok(copy)
}

fn collapse_node(node: &mut Schema, root: &Schema) -> Result<(), RefError> {
    if let Some(reference) = node.reference.clone() {
        if !reference.is_fragment() {
            return Err(RefError::UnsupportedReferenceForm(
                reference.as_str().to_owned(),
            ));
        }

        let name = reference.definition_name()?.to_owned();
        let definition = root
            .definitions
            .as_ref()
            .and_then(|definitions| definitions.get(&name))
            .ok_or_else(|| RefError::DefinitionNotFound(name.clone()))?;

        trace!("inlining definition {name}");
        inline_definition(node, definition, root)?;
        node.reference = None;
    }

    match &mut node.items {
        Some(Items::Single(sub)) => collapse_node(sub, root)?,
        Some(Items::List(subs)) => {
            for sub in subs {
                collapse_node(sub, root)?;
            }
        }
        None => {}
    }

    let maps = [node.properties.as_mut(), node.definitions.as_mut()];
    for map in maps.into_iter().flatten() {
        for sub in map.values_mut() {
            collapse_node(sub, root)?;
        }
    }

    if let Some(AdditionalProperties::Schema(sub)) = &mut node.additional_properties {
        collapse_node(sub, root)?;
    }

    Ok(())
}

/// Copies the scalar constraint fields and `items` of `definition` onto
/// `node`. Structural fields such as `properties`, `required` and the
/// combinators stay with the referring node.
fn inline_definition(node: &mut Schema, definition: &Schema, root: &Schema) -> Result<(), RefError> {
    node.schema_type = definition.schema_type.clone();
    node.enum_values = definition.enum_values.clone();

    node.items = match &definition.items {
        Some(items) => {
            let mut items = items.clone();
            match &mut items {
                Items::Single(sub) => collapse_node(sub, root)?,
                Items::List(subs) => {
                    for sub in subs {
                        collapse_node(sub, root)?;
                    }
                }
            }
            Some(items)
        }
        None => None,
    };

    node.pattern = definition.pattern.clone();
    node.max_length = definition.max_length;
    node.min_length = definition.min_length;
    node.multiple_of = definition.multiple_of;
    node.maximum = definition.maximum;
    node.exclusive_maximum = definition.exclusive_maximum;
    node.min_items = definition.min_items;
    node.max_items = definition.max_items;
    node.unique_items = definition.unique_items;
    node.format = definition.format.clone();

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::schema::{Type, TypeSet};

    fn parse(text: &str) -> Schema {
        crate::from_str(text).unwrap()
    }

    #[test]
    fn inlines_scalar_constraints_from_the_definition() {
        let schema = parse(
            r##"{
                "properties": { "p": { "$ref": "#/definitions/short" } },
                "definitions": {
                    "short": { "type": "string", "maxLength": 8, "format": "hostname" }
                }
            }"##,
        );

        let collapsed = collapse(&schema).unwrap();
        let p = &collapsed.properties.as_ref().unwrap()["p"];

        assert_eq!(p.reference, None);
        assert_eq!(p.schema_type, Some(TypeSet::from(Type::String)));
        assert_eq!(p.max_length, Some(8));
        assert_eq!(p.format, Some("hostname".to_owned()));
    }

    #[test]
    fn referring_node_keeps_its_structural_fields() {
        let schema = parse(
            r##"{
                "properties": {
                    "p": {
                        "$ref": "#/definitions/obj",
                        "required": ["x"],
                        "properties": { "x": {} }
                    }
                },
                "definitions": { "obj": { "type": "object" } }
            }"##,
        );

        let collapsed = collapse(&schema).unwrap();
        let p = &collapsed.properties.as_ref().unwrap()["p"];

        assert_eq!(p.schema_type, Some(TypeSet::from(Type::Object)));
        assert_eq!(p.required, Some(vec!["x".to_owned()]));
        assert!(p.properties.is_some());
    }

    #[test]
    fn items_of_the_definition_collapse_recursively() {
        let schema = parse(
            r##"{
                "properties": { "p": { "$ref": "#/definitions/list" } },
                "definitions": {
                    "list": { "type": "array", "items": { "$ref": "#/definitions/digit" } },
                    "digit": { "type": "integer", "maximum": 9 }
                }
            }"##,
        );

        let collapsed = collapse(&schema).unwrap();
        let p = &collapsed.properties.as_ref().unwrap()["p"];

        let Some(Items::Single(item)) = &p.items else {
            panic!("expected a single item schema");
        };
        assert_eq!(item.reference, None);
        assert_eq!(item.maximum, Some(9.0));
    }

    #[test]
    fn non_fragment_references_are_unsupported() {
        let schema = parse(r#"{ "items": { "$ref": "other.json#/definitions/d" } }"#);
        assert_matches!(
            collapse(&schema),
            Err(RefError::UnsupportedReferenceForm(_))
        );
    }

    #[test]
    fn missing_definitions_are_reported_by_name() {
        let schema = parse(r##"{ "items": { "$ref": "#/definitions/ghost" } }"##);
        assert_eq!(
            collapse(&schema),
            Err(RefError::DefinitionNotFound("ghost".to_owned())),
        );
    }

    #[test]
    fn definitions_resolve_against_the_root() {
        let schema = parse(
            r##"{
                "properties": {
                    "outer": {
                        "properties": { "inner": { "$ref": "#/definitions/d" } }
                    }
                },
                "definitions": { "d": { "type": "boolean" } }
            }"##,
        );

        let collapsed = collapse(&schema).unwrap();
        let inner = &collapsed.properties.as_ref().unwrap()["outer"]
            .properties
            .as_ref()
            .unwrap()["inner"];

        assert_eq!(inner.schema_type, Some(TypeSet::from(Type::Boolean)));
    }

    #[test]
    fn untouched_trees_collapse_to_an_equal_copy() {
        let schema = parse(r#"{ "type": "object", "properties": { "a": { "type": "null" } } }"#);
        assert_eq!(collapse(&schema).unwrap(), schema);
    }
}
