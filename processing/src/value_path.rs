//! Option-returning navigation over untyped JSON trees.
//!
//! Input documents may omit any key at any depth. These accessors never fail:
//! a missing or mistyped branch reads as an empty object, a missing list reads
//! as an empty slice, and a missing leaf reads as `None`.

use once_cell::sync::Lazy;
use serde_json::{Map, Value};

static EMPTY_OBJECT: Lazy<Value> = Lazy::new(|| Value::Object(Map::new()));

pub trait ValuePath {
    /// Raw child lookup; distinguishes a missing key (`None`) from an explicit `null`.
    fn lookup(&self, key: &str) -> Option<&Value>;

    /// Child value, with `null` treated as missing.
    fn field(&self, key: &str) -> Option<&Value> {
        self.lookup(key).filter(|value| !value.is_null())
    }

    /// Child object, or a shared empty object when the key is missing or not an object.
    fn branch(&self, key: &str) -> &Value;

    /// Child array, or an empty slice when the key is missing or not an array.
    fn items(&self, key: &str) -> &[Value];

    /// Follows `keys` through nested objects, defaulting every absent level.
    fn path(&self, keys: &[&str]) -> &Value;
}

impl ValuePath for Value {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(key))
    }

    fn branch(&self, key: &str) -> &Value {
        match self.lookup(key) {
            Some(child @ Value::Object(_)) => child,
            _ => &*EMPTY_OBJECT,
        }
    }

    fn items(&self, key: &str) -> &[Value] {
        self.lookup(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn path(&self, keys: &[&str]) -> &Value {
        let start: &Value = if self.is_object() { self } else { &*EMPTY_OBJECT };
        keys.iter().fold(start, |node, key| node.branch(key))
    }
}

/// Renders a JSON scalar as a table cell; `null` becomes an absent cell.
pub fn render_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        nested => Some(nested.to_string()),
    }
}

pub fn render_optional(value: Option<&Value>) -> Option<String> {
    value.and_then(render_cell)
}

pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
