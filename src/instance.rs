//! Typed views over instance JSON values.
//!
//! Instances are plain [`serde_json::Value`] trees; this module supplies
//! the type classification, the deep equality used by `enum` and
//! `uniqueItems`, and the rendering rules diagnostics use for embedded
//! JSON arguments.

use std::fmt::Write;

use serde_json::Value;

use crate::schema::Type;

/// JSON type tag of an instance value.
///
/// Whole numbers classify as [`Type::Integer`]; everything else a JSON
/// number can hold classifies as [`Type::Number`].
pub fn json_type(value: &Value) -> Type {
    match value {
        Value::Null => Type::Null,
        Value::Bool(_) => Type::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => Type::Integer,
        Value::Number(_) => Type::Number,
        Value::String(_) => Type::String,
        Value::Array(_) => Type::Array,
        Value::Object(_) => Type::Object,
    }
}

/// Structural equality with numbers compared by value, so `1` and `1.0`
/// are equal. Objects compare as unordered key/value sets.
pub fn deep_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| deep_eq(a, b))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| deep_eq(a, b)))
        }
        (a, b) => a == b,
    }
}

/// Renders a JSON value for use inside a diagnostic message: strings
/// double-quoted, booleans lowercase, arrays and objects on one line with
/// a single space after each comma, `null` as the literal.
pub fn fmt_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => fmt_string(s),
        Value::Array(items) => {
            let items: Vec<_> = items.iter().map(fmt_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(members) => {
            let members: Vec<_> = members
                .iter()
                .map(|(key, value)| format!("{}: {}", fmt_string(key), fmt_value(value)))
                .collect();
            format!("{{{}}}", members.join(", "))
        }
    }
}

/// Double-quotes a string with JSON escaping.
pub fn fmt_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn classifies_numbers_by_integrality() {
        assert_eq!(json_type(&json!(7)), Type::Integer);
        assert_eq!(json_type(&json!(-7)), Type::Integer);
        assert_eq!(json_type(&json!(7.5)), Type::Number);
        assert_eq!(json_type(&json!(null)), Type::Null);
        assert_eq!(json_type(&json!("x")), Type::String);
        assert_eq!(json_type(&json!([1])), Type::Array);
        assert_eq!(json_type(&json!({})), Type::Object);
        assert_eq!(json_type(&json!(true)), Type::Boolean);
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(deep_eq(&json!(1), &json!(1.0)));
        assert!(deep_eq(&json!([1, 2]), &json!([1.0, 2.0])));
        assert!(!deep_eq(&json!(1), &json!(2)));
    }

    #[test]
    fn objects_compare_unordered() {
        assert!(deep_eq(
            &json!({ "a": 1, "b": [true] }),
            &json!({ "b": [true], "a": 1.0 }),
        ));
        assert!(!deep_eq(&json!({ "a": 1 }), &json!({ "a": 1, "b": 2 })));
    }

    #[test]
    fn arrays_compare_elementwise() {
        assert!(deep_eq(&json!([1, "x"]), &json!([1, "x"])));
        assert!(!deep_eq(&json!([1, 2]), &json!([2, 1])));
    }

    #[test]
    fn renders_scalars() {
        assert_eq!(fmt_value(&json!(null)), "null");
        assert_eq!(fmt_value(&json!(true)), "true");
        assert_eq!(fmt_value(&json!(3.5)), "3.5");
        assert_eq!(fmt_value(&json!("hi")), r#""hi""#);
    }

    #[test]
    fn renders_arrays_compactly() {
        assert_eq!(fmt_value(&json!([1, 2, 1])), "[1, 2, 1]");
        assert_eq!(fmt_value(&json!(["a", false])), r#"["a", false]"#);
    }

    #[test]
    fn renders_objects_compactly() {
        assert_eq!(
            fmt_value(&json!({ "a": 1, "b": "x" })),
            r#"{"a": 1, "b": "x"}"#,
        );
    }

    #[test]
    fn escapes_strings() {
        assert_eq!(fmt_string("a\"b\\c\n"), r#""a\"b\\c\n""#);
    }
}
