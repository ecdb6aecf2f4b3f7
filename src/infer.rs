//! Type inference - map any [`Value`] to its type tag.
//!
//! Precedence, first match wins:
//!
//! 1. null → `"null"`
//! 2. undefined → `"undefined"`
//! 3. callable → `"function"`
//! 4. primitives → `"string"`, `"number"`, `"boolean"`
//! 5. explicit [`Kind`](crate::value::Kind) marker → the marker's tag, whatever it wraps
//! 6. array → `"array"`
//! 7. date → `"date"`
//! 8. anything else → `"object"`
//!
//! Classification is total: every value gets exactly one tag.

use crate::value::Value;

// =============================================================================
// Built-in tags
// =============================================================================

pub const NULL: &str = "null";
pub const UNDEFINED: &str = "undefined";
pub const STRING: &str = "string";
pub const NUMBER: &str = "number";
pub const BOOLEAN: &str = "boolean";
pub const DATE: &str = "date";
pub const ARRAY: &str = "array";
pub const OBJECT: &str = "object";
pub const FUNCTION: &str = "function";

/// Every tag [`classify`] can produce without a custom marker.
pub const BUILTIN_TAGS: [&str; 9] = [
    NULL, UNDEFINED, STRING, NUMBER, BOOLEAN, DATE, ARRAY, OBJECT, FUNCTION,
];

/// Whether `tag` is one of the built-in tags.
pub fn is_builtin(tag: &str) -> bool {
    BUILTIN_TAGS.contains(&tag)
}

// =============================================================================
// Classification
// =============================================================================

/// Infer the type tag of a value.
pub fn classify(value: &Value) -> &str {
    match value {
        Value::Null => NULL,
        Value::Undefined => UNDEFINED,
        Value::Function(_) => FUNCTION,
        Value::String(_) => STRING,
        Value::Number(_) => NUMBER,
        Value::Bool(_) => BOOLEAN,
        Value::Custom(marker) => marker.kind(),
        Value::Array(_) => ARRAY,
        Value::Date(_) => DATE,
        Value::Object(_) => OBJECT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use proptest::prelude::*;

    use crate::value::Kind;

    #[test]
    fn test_null_and_undefined() {
        assert_eq!(classify(&Value::Null), "null");
        assert_eq!(classify(&Value::Undefined), "undefined");
    }

    #[test]
    fn test_strings() {
        assert_eq!(classify(&Value::from("hello")), "string");
        assert_eq!(classify(&Value::from("")), "string");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(classify(&Value::from(42)), "number");
        assert_eq!(classify(&Value::from(0)), "number");
        assert_eq!(classify(&Value::from(-1.5)), "number");
        assert_eq!(classify(&Value::Number(f64::NAN)), "number");
        assert_eq!(classify(&Value::Number(f64::INFINITY)), "number");
    }

    #[test]
    fn test_booleans() {
        assert_eq!(classify(&Value::from(true)), "boolean");
        assert_eq!(classify(&Value::from(false)), "boolean");
    }

    #[test]
    fn test_functions() {
        assert_eq!(classify(&Value::function(|_| Value::Undefined)), "function");
    }

    #[test]
    fn test_structured() {
        assert_eq!(classify(&Value::Array(vec![])), "array");
        assert_eq!(classify(&Value::array([1, 2, 3])), "array");
        assert_eq!(classify(&Value::from(Utc::now())), "date");
        assert_eq!(classify(&Value::object(Vec::<(&str, Value)>::new())), "object");
        assert_eq!(classify(&Value::object([("a", 1)])), "object");
    }

    #[test]
    fn test_custom_kind() {
        #[derive(Debug)]
        struct Temperature(f64);

        impl Kind for Temperature {
            fn kind(&self) -> &str {
                "temperature"
            }
        }

        assert_eq!(classify(&Value::custom(Temperature(21.5))), "temperature");
        assert_eq!(classify(&Value::tagged("custom-type", Value::from(42))), "custom-type");
    }

    #[test]
    fn test_marker_wins_over_shape() {
        let list = Value::tagged("my-list", Value::array([1, 2, 3]));
        let when = Value::tagged("deadline", Utc::now());
        let record = Value::tagged("user", Value::object([("name", "ada")]));

        assert_eq!(classify(&list), "my-list");
        assert_eq!(classify(&when), "deadline");
        assert_eq!(classify(&record), "user");
    }

    #[test]
    fn test_builtin_tags() {
        assert!(is_builtin("array"));
        assert!(is_builtin("function"));
        assert!(!is_builtin("my-list"));
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            Just(Value::Undefined),
            any::<bool>().prop_map(Value::Bool),
            any::<f64>().prop_map(Value::Number),
            ".*".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec(("[a-z]{1,4}", inner.clone()), 0..4)
                    .prop_map(|entries| Value::object(entries)),
                ("[a-z-]{1,8}", inner).prop_map(|(kind, v)| Value::tagged(kind, v)),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_classify_is_stable(value in arb_value()) {
            let first = classify(&value).to_string();
            prop_assert_eq!(classify(&value), first.as_str());
            prop_assert!(is_builtin(&first) || matches!(value, Value::Custom(_)));
        }
    }
}
