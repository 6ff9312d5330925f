use std::fmt;

use serde_json::Value as JsonValue;

use super::Path;
use crate::{
    instance::{fmt_string, fmt_value},
    schema::{Type, TypeSet},
};

/// A single validation finding at a specific instance location.
///
/// Renders as `{path}: error JS{number}: {text}`, with strings
/// double-quoted, booleans lowercase, and arrays compacted to a single
/// line.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub path: Path,
    pub kind: Kind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: error JS{:04}: {}",
            self.path,
            self.kind.number(),
            self.kind
        )
    }
}

/// The closed set of validation diagnostics.
///
/// Numbers 1 through 5 belong to the structural errors in
/// [`crate::Error`] and [`crate::schema::RefError`].
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    WrongType { expected: TypeSet, actual: Type },
    StringTooLong { limit: u64, length: u64 },
    StringTooShort { limit: u64, length: u64 },
    StringDoesNotMatchPattern { pattern: String, value: String },
    ValueTooLarge { limit: f64, value: JsonValue },
    ValueTooLargeExclusive { limit: f64, value: JsonValue },
    ValueTooSmall { limit: f64, value: JsonValue },
    ValueTooSmallExclusive { limit: f64, value: JsonValue },
    NotAMultiple { factor: f64, value: JsonValue },
    TooFewArrayItems { limit: u64, count: usize },
    TooManyArrayItems { limit: u64, count: usize },
    TooFewItemSchemas { schemas: usize, count: usize },
    NotUnique { value: JsonValue },
    TooManyProperties { limit: u64, count: usize },
    TooFewProperties { limit: u64, count: usize },
    RequiredPropertyMissing { name: String },
    AdditionalPropertiesProhibited { name: String },
    InvalidEnumValue { value: JsonValue, allowed: Vec<JsonValue> },
    NotAllOf { count: usize },
    NotAnyOf { count: usize },
    NotOneOf { matched: usize, count: usize },
    ValidatesAgainstNotSchema,
}

impl Kind {
    /// Stable diagnostic number.
    pub fn number(&self) -> u16 {
        match self {
            Self::WrongType { .. } => 6,
            Self::StringTooLong { .. } => 7,
            Self::StringTooShort { .. } => 8,
            Self::StringDoesNotMatchPattern { .. } => 9,
            Self::ValueTooLarge { .. } => 10,
            Self::ValueTooLargeExclusive { .. } => 11,
            Self::ValueTooSmall { .. } => 12,
            Self::ValueTooSmallExclusive { .. } => 13,
            Self::NotAMultiple { .. } => 14,
            Self::TooFewArrayItems { .. } => 15,
            Self::TooManyArrayItems { .. } => 16,
            Self::TooFewItemSchemas { .. } => 17,
            Self::NotUnique { .. } => 18,
            Self::TooManyProperties { .. } => 19,
            Self::TooFewProperties { .. } => 20,
            Self::RequiredPropertyMissing { .. } => 21,
            Self::AdditionalPropertiesProhibited { .. } => 22,
            Self::InvalidEnumValue { .. } => 23,
            Self::NotAllOf { .. } => 24,
            Self::NotAnyOf { .. } => 25,
            Self::NotOneOf { .. } => 26,
            Self::ValidatesAgainstNotSchema => 27,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType { expected, actual } => {
                write!(
                    f,
                    "expected type {expected}, but instance has type \"{actual}\"",
                )
            }
            Self::StringTooLong { limit, length } => {
                write!(
                    f,
                    "string has {length} characters, more than the maxLength of {limit}",
                )
            }
            Self::StringTooShort { limit, length } => {
                write!(
                    f,
                    "string has {length} characters, fewer than the minLength of {limit}",
                )
            }
            Self::StringDoesNotMatchPattern { pattern, value } => {
                write!(
                    f,
                    "string {} does not match the pattern {}",
                    fmt_string(value),
                    fmt_string(pattern),
                )
            }
            Self::ValueTooLarge { limit, value } => {
                write!(
                    f,
                    "value {} exceeds the maximum of {limit}",
                    fmt_value(value),
                )
            }
            Self::ValueTooLargeExclusive { limit, value } => {
                write!(
                    f,
                    "value {} is not below the exclusive maximum of {limit}",
                    fmt_value(value),
                )
            }
            Self::ValueTooSmall { limit, value } => {
                write!(
                    f,
                    "value {} falls below the minimum of {limit}",
                    fmt_value(value),
                )
            }
            Self::ValueTooSmallExclusive { limit, value } => {
                write!(
                    f,
                    "value {} is not above the exclusive minimum of {limit}",
                    fmt_value(value),
                )
            }
            Self::NotAMultiple { factor, value } => {
                write!(
                    f,
                    "value {} is not a multiple of {factor}",
                    fmt_value(value),
                )
            }
            Self::TooFewArrayItems { limit, count } => {
                write!(
                    f,
                    "array has {count} items, fewer than the minItems of {limit}",
                )
            }
            Self::TooManyArrayItems { limit, count } => {
                write!(
                    f,
                    "array has {count} items, more than the maxItems of {limit}",
                )
            }
            Self::TooFewItemSchemas { schemas, count } => {
                write!(
                    f,
                    "array has {count} items but only {schemas} item schemas are given",
                )
            }
            Self::NotUnique { value } => {
                write!(
                    f,
                    "array items are not unique; {} occurs more than once",
                    fmt_value(value),
                )
            }
            Self::TooManyProperties { limit, count } => {
                write!(
                    f,
                    "object has {count} properties, more than the maxProperties of {limit}",
                )
            }
            Self::TooFewProperties { limit, count } => {
                write!(
                    f,
                    "object has {count} properties, fewer than the minProperties of {limit}",
                )
            }
            Self::RequiredPropertyMissing { name } => {
                write!(f, "required property {} is missing", fmt_string(name))
            }
            Self::AdditionalPropertiesProhibited { name } => {
                write!(
                    f,
                    "property {} is not defined and additionalProperties is false",
                    fmt_string(name),
                )
            }
            Self::InvalidEnumValue { value, allowed } => {
                write!(
                    f,
                    "value {} is not one of the enum values {}",
                    fmt_value(value),
                    fmt_value(&JsonValue::Array(allowed.clone())),
                )
            }
            Self::NotAllOf { count } => {
                write!(f, "instance does not satisfy all {count} schemas of the allOf")
            }
            Self::NotAnyOf { count } => {
                write!(
                    f,
                    "instance does not satisfy any of the {count} schemas of the anyOf",
                )
            }
            Self::NotOneOf { matched, count } => {
                write!(
                    f,
                    "instance satisfies {matched} of the {count} schemas of the oneOf, not exactly one",
                )
            }
            Self::ValidatesAgainstNotSchema => {
                f.write_str("instance validates against the not schema")
            }
        }
    }
}
