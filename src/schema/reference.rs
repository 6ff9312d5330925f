//! Reference values carried by the `$ref` and `id` keywords.

use std::fmt;

use derive_more::derive::{Display, Error};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

static DEFINITION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new("^#/definitions/(?P<name>.+)$").unwrap());

/// Reference errors
#[derive(Clone, Debug, PartialEq, Eq, Display, Error)]
pub enum Error {
    #[display("error JS0003: fragment \"{_0}\" does not reference a definition")]
    InvalidReferenceForm(#[error(not(source))] String),

    #[display("error JS0004: reference \"{_0}\" is not a same-document fragment")]
    UnsupportedReferenceForm(#[error(not(source))] String),

    #[display("error JS0005: definition \"{_0}\" does not exist in this document")]
    DefinitionNotFound(#[error(not(source))] String),
}

/// A reference value: an absolute URI, a relative URI, or a bare fragment
/// such as `#/definitions/widget`.
///
/// Fragments are part of identity, so `a.json` and `a.json#/definitions/x`
/// compare unequal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UriOrFragment {
    value: String,
    fragment: bool,
}

impl UriOrFragment {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let fragment = value.starts_with('#');
        Self { value, fragment }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether this reference is a bare fragment within the same document.
    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    /// The trailing segment of a `#/definitions/<name>` fragment.
    pub fn definition_name(&self) -> Result<&str, Error> {
        DEFINITION_NAME
            .captures(&self.value)
            .map(|parts| parts.name("name").map_or("", |m| m.as_str()))
            .ok_or_else(|| Error::InvalidReferenceForm(self.value.clone()))
    }
}

impl fmt::Display for UriOrFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for UriOrFragment {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for UriOrFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de> Deserialize<'de> for UriOrFragment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fragment_detection() {
        assert!(UriOrFragment::new("#/definitions/widget").is_fragment());
        assert!(UriOrFragment::new("#").is_fragment());
        assert!(!UriOrFragment::new("http://example.com/schema.json").is_fragment());
        assert!(!UriOrFragment::new("sibling.json#/definitions/widget").is_fragment());
    }

    #[test]
    fn definition_name_of_fragment() {
        let reference = UriOrFragment::new("#/definitions/widget");
        assert_eq!(reference.definition_name(), Ok("widget"));
    }

    #[test]
    fn definition_name_requires_definitions_prefix() {
        let reference = UriOrFragment::new("#/properties/widget");
        assert_matches!(
            reference.definition_name(),
            Err(Error::InvalidReferenceForm(_))
        );

        let reference = UriOrFragment::new("http://example.com/schema.json");
        assert_matches!(
            reference.definition_name(),
            Err(Error::InvalidReferenceForm(_))
        );
    }

    #[test]
    fn equality_is_string_exact() {
        assert_eq!(
            UriOrFragment::new("#/definitions/a"),
            UriOrFragment::new("#/definitions/a"),
        );
        assert_ne!(
            UriOrFragment::new("schema.json"),
            UriOrFragment::new("schema.json#/definitions/a"),
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let reference = UriOrFragment::new("#/definitions/a");
        let json = serde_json::to_string(&reference).unwrap();
        assert_eq!(json, r##""#/definitions/a""##);

        let back: UriOrFragment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, reference);
    }
}
