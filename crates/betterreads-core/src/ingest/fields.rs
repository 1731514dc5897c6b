//! Field accessors over a parsed dump record.
//!
//! Two families on purpose: the `*_or_default` / `optional_*` accessors never
//! fail, the `required_*` accessors fail the line. Which one a loader uses for a
//! given field decides which malformed lines get skipped.

use serde_json::{Map, Value};

use super::error::RecordError;

pub type JsonObject = Map<String, Value>;

/// Parse a dump record. The document must be a single JSON object.
pub fn parse_object(json: &str) -> Result<JsonObject, RecordError> {
    Ok(serde_json::from_str(json)?)
}

/// The string at `key`, or `""` when it is absent or not a string.
pub fn string_or_default(obj: &JsonObject, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// The object at `key`, if present and an object.
pub fn optional_object<'a>(obj: &'a JsonObject, key: &str) -> Option<&'a JsonObject> {
    obj.get(key).and_then(Value::as_object)
}

/// The array at `key`, if present and an array.
pub fn optional_array<'a>(obj: &'a JsonObject, key: &str) -> Option<&'a Vec<Value>> {
    obj.get(key).and_then(Value::as_array)
}

/// The string at `key`. `path` names the field in errors.
pub fn required_str<'a>(obj: &'a JsonObject, key: &str, path: &str) -> Result<&'a str, RecordError> {
    match obj.get(key) {
        None => Err(RecordError::MissingField { path: path.to_string() }),
        Some(value) => value.as_str().ok_or_else(|| RecordError::WrongType {
            path: path.to_string(),
            expected: "a string",
        }),
    }
}

/// The object at `key`. `path` names the field in errors.
pub fn required_object<'a>(
    obj: &'a JsonObject,
    key: &str,
    path: &str,
) -> Result<&'a JsonObject, RecordError> {
    match obj.get(key) {
        None => Err(RecordError::MissingField { path: path.to_string() }),
        Some(value) => as_object(value, path),
    }
}

pub fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a JsonObject, RecordError> {
    value.as_object().ok_or_else(|| RecordError::WrongType {
        path: path.to_string(),
        expected: "an object",
    })
}

/// Strip a namespace prefix such as `/authors/` when present.
pub fn strip_namespace<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> JsonObject {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_string_or_default() {
        let o = obj(json!({"name": "Jane", "n": 3, "nil": null}));
        assert_eq!(string_or_default(&o, "name"), "Jane");
        assert_eq!(string_or_default(&o, "missing"), "");
        assert_eq!(string_or_default(&o, "n"), "");
        assert_eq!(string_or_default(&o, "nil"), "");
    }

    #[test]
    fn test_required_str() {
        let o = obj(json!({"key": "/works/OL1W", "n": 1}));
        assert_eq!(required_str(&o, "key", "key").unwrap(), "/works/OL1W");
        assert!(matches!(
            required_str(&o, "missing", "a.missing"),
            Err(RecordError::MissingField { path }) if path == "a.missing"
        ));
        assert!(matches!(
            required_str(&o, "n", "n"),
            Err(RecordError::WrongType { expected: "a string", .. })
        ));
    }

    #[test]
    fn test_optional_shapes_ignore_wrong_types() {
        let o = obj(json!({"description": "plain", "covers": {"0": 1}, "created": {"value": "x"}}));
        assert!(optional_object(&o, "description").is_none());
        assert!(optional_array(&o, "covers").is_none());
        assert!(optional_object(&o, "created").is_some());
    }

    #[test]
    fn test_required_object() {
        let o = obj(json!({"author": {"key": "k"}, "flat": "k"}));
        assert!(required_object(&o, "author", "author").is_ok());
        assert!(matches!(
            required_object(&o, "flat", "flat"),
            Err(RecordError::WrongType { expected: "an object", .. })
        ));
        assert!(matches!(
            required_object(&o, "nope", "nope"),
            Err(RecordError::MissingField { .. })
        ));
    }

    #[test]
    fn test_parse_object_rejects_trailing_garbage_and_non_objects() {
        assert!(parse_object("{\"a\":1}").is_ok());
        assert!(matches!(parse_object("{\"a\":1} junk"), Err(RecordError::Json(_))));
        assert!(matches!(parse_object("{\"a\":"), Err(RecordError::Json(_))));
        assert!(matches!(parse_object("[1,2]"), Err(RecordError::Json(_))));
    }

    #[test]
    fn test_strip_namespace() {
        assert_eq!(strip_namespace("/authors/OL1A", "/authors/"), "OL1A");
        assert_eq!(strip_namespace("OL1A", "/authors/"), "OL1A");
        assert_eq!(strip_namespace("", "/authors/"), "");
    }
}
