//! Export of a section tree to JSON.
//!
//! Each section becomes an object holding its values followed by its child
//! sections. Comments and integer radix styles have no JSON counterpart and
//! are dropped. A child section shadows a value with the same name.

use crate::section::Section;
use crate::value::Value;
use serde_json::{Map, Number, Value as Json};

/// Convert a section (normally the root) into a JSON object.
///
/// ```
/// use mini_core::{parse, to_json};
///
/// let root = parse("[app]\nname = \"demo\"\nports = [80, 443]").unwrap();
/// let json = to_json(&root);
/// assert_eq!(json["app"]["ports"][1], 443);
/// ```
pub fn to_json(section: &Section) -> Json {
    let mut map = Map::new();
    for (key, entry) in section.values() {
        map.insert(key.to_string(), value_to_json(&entry.value));
    }
    for (name, child) in section.sections() {
        map.insert(name.to_string(), to_json(child));
    }
    Json::Object(map)
}

/// Convert a single value. Non-finite floats become `null`.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::String(s) => Json::String(s.clone()),
        Value::Int { value, .. } => Json::Number((*value).into()),
        Value::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::Bool(b) => Json::Bool(*b),
        Value::Array(items) => Json::Array(items.iter().map(value_to_json).collect()),
    }
}
