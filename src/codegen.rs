//! Equality and hashing metadata for schema-driven code generators.
//!
//! A generator emitting data classes asks, per property, how the generated
//! equality and hash code should treat that property. The answers depend
//! only on the property's schema, so they live here rather than in any
//! particular generator.

use crate::schema::{Schema, Type};

/// Seed for generated hash-code accumulators.
pub const HASH_SEED: i32 = 17;

/// Per-component multiplier for generated hash-code accumulators. Mapping
/// properties combine key and value hashes with XOR so the result stays
/// independent of iteration order.
pub const HASH_MULTIPLIER: i32 = 31;

/// How generated equality code compares a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComparisonKind {
    /// Built-in value semantics via the equality operator.
    OperatorEquals,
    /// A general object-equality helper.
    ObjectEquals,
    /// A dedicated comparer instance for a user-defined type.
    EqualityComparerEquals,
    /// Element-wise comparison with a length check.
    Collection,
    /// Key-set equality plus per-key value equality.
    Dictionary,
}

/// How generated hash code folds a property in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashKind {
    ScalarValueType,
    ScalarReferenceType,
    Collection,
    Dictionary,
}

/// Classifies the comparison a generator should emit for a property with
/// this schema. References and object schemas that declare `properties`
/// denote user-defined types; other object schemas denote mappings.
pub fn comparison_kind(schema: &Schema) -> ComparisonKind {
    if schema.reference.is_some() {
        return ComparisonKind::EqualityComparerEquals;
    }

    match primary_type(schema) {
        Some(Type::Array) => ComparisonKind::Collection,
        Some(Type::Object) if schema.properties.is_some() => ComparisonKind::EqualityComparerEquals,
        Some(Type::Object) => ComparisonKind::Dictionary,
        Some(Type::Boolean | Type::Integer | Type::Number | Type::String) => {
            ComparisonKind::OperatorEquals
        }
        Some(Type::Null) | None => ComparisonKind::ObjectEquals,
    }
}

/// Classifies the hash contribution for a property with this schema.
pub fn hash_kind(schema: &Schema) -> HashKind {
    if schema.reference.is_some() {
        return HashKind::ScalarReferenceType;
    }

    match primary_type(schema) {
        Some(Type::Array) => HashKind::Collection,
        Some(Type::Object) if schema.properties.is_some() => HashKind::ScalarReferenceType,
        Some(Type::Object) => HashKind::Dictionary,
        Some(Type::Boolean | Type::Integer | Type::Number) => HashKind::ScalarValueType,
        Some(Type::String) | Some(Type::Null) | None => HashKind::ScalarReferenceType,
    }
}

fn primary_type(schema: &Schema) -> Option<Type> {
    schema
        .schema_type
        .as_ref()
        .and_then(|set| set.types().first().copied())
}
