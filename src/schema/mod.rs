//! The JSON Schema Draft 4 data model.
//!
//! A [`Schema`] is a plain record in which every keyword is optional, so
//! that a document which omits a keyword round-trips without it. `Clone`
//! performs the deep copy; `PartialEq` is structural and recurses through
//! every keyword.

use std::fmt;

use indexmap::IndexMap;
use serde::{
    de::{self, IntoDeserializer},
    Deserialize, Deserializer, Serialize, Serializer,
};
use serde_json::Value as JsonValue;

mod reference;

pub use self::reference::{Error as RefError, UriOrFragment};

/// JSON type tags usable in the `type` keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl Type {
    /// The Draft 4 name of the type, as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ordered sequence of type tags a `type` keyword admits.
///
/// A one-element sequence serializes as a bare string, matching the common
/// `"type": "object"` shorthand; anything else serializes as an array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeSet(Vec<Type>);

impl TypeSet {
    pub fn new(types: impl Into<Vec<Type>>) -> Self {
        Self(types.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn types(&self) -> &[Type] {
        &self.0
    }

    pub fn contains(&self, ty: Type) -> bool {
        self.0.contains(&ty)
    }

    /// Whether an instance of type `ty` satisfies this set. Integers also
    /// satisfy a set that admits numbers.
    pub fn admits(&self, ty: Type) -> bool {
        self.contains(ty) || (ty == Type::Integer && self.contains(Type::Number))
    }
}

impl From<Type> for TypeSet {
    fn from(ty: Type) -> Self {
        Self(vec![ty])
    }
}

impl From<Vec<Type>> for TypeSet {
    fn from(types: Vec<Type>) -> Self {
        Self(types)
    }
}

impl fmt::Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, ty) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{ty}\"")?;
        }
        f.write_str("]")
    }
}

impl Serialize for TypeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.as_slice() {
            [single] => single.serialize(serializer),
            types => types.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TypeSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Visitor;

        impl<'de> de::Visitor<'de> for Visitor {
            type Value = TypeSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON type name or an array of type names")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TypeSet, E> {
                Type::deserialize(v.into_deserializer()).map(TypeSet::from)
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<TypeSet, A::Error> {
                let mut types = Vec::new();
                while let Some(ty) = seq.next_element::<Type>()? {
                    types.push(ty);
                }
                Ok(TypeSet(types))
            }
        }

        deserializer.deserialize_any(Visitor)
    }
}

/// The `items` keyword: one schema for every element, or one schema per
/// position.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Items {
    Single(Box<Schema>),
    List(Vec<Schema>),
}

/// The `additionalProperties` keyword: a blanket permission flag or a
/// schema for properties not named in `properties`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// A JSON Schema Draft 4 document or sub-schema.
///
/// The `$ref` keyword maps to [`Schema::reference`] through the `$$ref`
/// intermediate key; see [`crate::from_str`].
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Schema {
    /// Alters resolution scope for descendants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UriOrFragment>,

    /// The `$schema` keyword; stored, not enforced.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<TypeSet>,

    /// Literal values the instance must deep-equal one of.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<JsonValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definitions: Option<IndexMap<String, Schema>>,

    /// Regex patterns mapped to the schema for matching property names.
    #[serde(rename = "patternProperties", skip_serializing_if = "Option::is_none")]
    pub pattern_properties: Option<IndexMap<String, Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(rename = "maxProperties", skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,

    #[serde(rename = "minProperties", skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,

    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(rename = "maxItems", skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(rename = "minItems", skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "multipleOf", skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(rename = "exclusiveMaximum", skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,

    #[serde(rename = "exclusiveMinimum", skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,

    #[serde(rename = "uniqueItems", skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,

    #[serde(rename = "anyOf", skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,

    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<Schema>>,

    #[serde(rename = "$$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<UriOrFragment>,
}

impl Schema {
    /// Immediate sub-schemas across every keyword that can hold one.
    pub fn children(&self) -> Vec<&Schema> {
        let mut out = Vec::new();

        match &self.items {
            Some(Items::Single(sub)) => out.push(&**sub),
            Some(Items::List(subs)) => out.extend(subs.iter()),
            None => {}
        }

        for map in [&self.properties, &self.definitions, &self.pattern_properties]
            .into_iter()
            .flatten()
        {
            out.extend(map.values());
        }

        if let Some(AdditionalProperties::Schema(sub)) = &self.additional_properties {
            out.push(&**sub);
        }

        for seq in [&self.all_of, &self.any_of, &self.one_of]
            .into_iter()
            .flatten()
        {
            out.extend(seq.iter());
        }

        if let Some(sub) = &self.not {
            out.push(&**sub);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use indexmap::indexmap;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn string_schema() -> Schema {
        Schema {
            schema_type: Some(Type::String.into()),
            ..Schema::default()
        }
    }

    #[test]
    fn typeset_deserializes_string_or_array() {
        let single: TypeSet = serde_json::from_value(json!("integer")).unwrap();
        assert_eq!(single, TypeSet::from(Type::Integer));

        let many: TypeSet = serde_json::from_value(json!(["string", "null"])).unwrap();
        assert_eq!(many, TypeSet::new(vec![Type::String, Type::Null]));
    }

    #[test]
    fn singleton_typeset_serializes_as_bare_string() {
        assert_eq!(
            serde_json::to_value(TypeSet::from(Type::Array)).unwrap(),
            json!("array"),
        );
        assert_eq!(
            serde_json::to_value(TypeSet::new(vec![Type::Integer, Type::String])).unwrap(),
            json!(["integer", "string"]),
        );
    }

    #[test]
    fn typeset_admits_integer_for_number() {
        let set = TypeSet::from(Type::Number);
        assert!(set.admits(Type::Integer));
        assert!(set.admits(Type::Number));
        assert!(!set.admits(Type::String));

        let set = TypeSet::from(Type::Integer);
        assert!(!set.admits(Type::Number));
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let original = Schema {
            properties: Some(indexmap! {
                "name".to_owned() => string_schema(),
            }),
            ..Schema::default()
        };

        let mut copy = original.clone();
        copy.properties
            .as_mut()
            .unwrap()
            .get_mut("name")
            .unwrap()
            .max_length = Some(5);

        assert_eq!(
            original.properties.as_ref().unwrap()["name"].max_length,
            None,
        );
    }

    #[test]
    fn equality_recurses_through_sub_schemas() {
        let a = Schema {
            items: Some(Items::Single(Box::new(string_schema()))),
            ..Schema::default()
        };
        let b = a.clone();
        assert_eq!(a, b);

        let c = Schema {
            items: Some(Items::Single(Box::new(Schema {
                schema_type: Some(Type::Integer.into()),
                ..Schema::default()
            }))),
            ..Schema::default()
        };
        assert_ne!(a, c);
    }

    #[test]
    fn mapping_equality_ignores_insertion_order() {
        let forward = Schema {
            properties: Some(indexmap! {
                "a".to_owned() => string_schema(),
                "b".to_owned() => string_schema(),
            }),
            ..Schema::default()
        };
        let backward = Schema {
            properties: Some(indexmap! {
                "b".to_owned() => string_schema(),
                "a".to_owned() => string_schema(),
            }),
            ..Schema::default()
        };

        assert_eq!(forward, backward);
    }

    #[test]
    fn type_sequence_order_is_significant() {
        let a = Schema {
            schema_type: Some(TypeSet::new(vec![Type::String, Type::Null])),
            ..Schema::default()
        };
        let b = Schema {
            schema_type: Some(TypeSet::new(vec![Type::Null, Type::String])),
            ..Schema::default()
        };
        assert_ne!(a, b);
    }

    #[test]
    fn absent_is_distinct_from_present_with_default() {
        let absent = Schema::default();
        let zeroed = Schema {
            min_items: Some(0),
            ..Schema::default()
        };
        assert_ne!(absent, zeroed);
    }

    #[test]
    fn children_covers_every_nesting_keyword() {
        let schema = Schema {
            items: Some(Items::List(vec![string_schema(), string_schema()])),
            properties: Some(indexmap! { "p".to_owned() => string_schema() }),
            definitions: Some(indexmap! { "d".to_owned() => string_schema() }),
            pattern_properties: Some(indexmap! { "^x".to_owned() => string_schema() }),
            additional_properties: Some(AdditionalProperties::Schema(Box::new(string_schema()))),
            all_of: Some(vec![string_schema()]),
            any_of: Some(vec![string_schema()]),
            one_of: Some(vec![string_schema()]),
            not: Some(Box::new(string_schema())),
            ..Schema::default()
        };

        assert_eq!(schema.children().len(), 10);
    }
}
