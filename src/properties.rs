use crate::node::InspectNode;
use crate::registry::NodeMetadata;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Reserved key carrying the node's own metadata in a formatted property map.
pub const METADATA_KEY: &str = "_inspector";

const PRIVATE_PREFIX: char = '_';
const STRUCTURAL_FIELDS: &[&str] = &["children", "parent"];

/// Kind-tagged field value reported by a node's property descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Null,
    /// 2D-vector-like composite; flattened one level into `field.subfield`
    /// rows by the formatter. Deeper nesting is not followed.
    Vec2(Vec<(String, PropertyValue)>),
    /// A value with no display-safe form. The tag names its kind and is
    /// rendered as `"...kind"` instead of the value itself.
    Opaque(&'static str),
}

impl PropertyValue {
    /// Descriptor sugar for the common x/y point field.
    pub fn point(x: f64, y: f64) -> Self {
        PropertyValue::Vec2(vec![
            ("x".to_string(), PropertyValue::Number(x)),
            ("y".to_string(), PropertyValue::Number(y)),
        ])
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        PropertyValue::Number(f64::from(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

/// The current selection: the node's id plus its flattened field map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionRecord {
    pub id: u64,
    pub properties: BTreeMap<String, Value>,
}

/// Flattens a node's descriptor into a display-safe map. Strings and numbers
/// pass through; booleans and null become their literal text; vec2 composites
/// flatten one level; anything else becomes a `"...kind"` placeholder so the
/// map never serializes unbounded or cyclic values.
pub fn format_properties(node: &dyn InspectNode, meta: &NodeMetadata) -> BTreeMap<String, Value> {
    let mut out = BTreeMap::new();
    out.insert(
        METADATA_KEY.to_string(),
        serde_json::to_value(meta).unwrap_or(Value::Null),
    );
    for (name, value) in node.properties() {
        if name.starts_with(PRIVATE_PREFIX) || STRUCTURAL_FIELDS.contains(&name.as_str()) {
            continue;
        }
        match value {
            PropertyValue::Vec2(fields) => {
                for (sub, sub_value) in fields {
                    out.insert(format!("{name}.{sub}"), display_scalar(sub_value));
                }
            }
            other => {
                out.insert(name, display_scalar(other));
            }
        }
    }
    out
}

fn display_scalar(value: PropertyValue) -> Value {
    match value {
        PropertyValue::Number(n) => {
            // NaN and infinities have no JSON number form.
            serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(n.to_string()))
        }
        PropertyValue::Text(s) => Value::String(s),
        PropertyValue::Bool(b) => Value::String(if b { "true" } else { "false" }.to_string()),
        PropertyValue::Null => Value::String("null".to_string()),
        PropertyValue::Vec2(_) => Value::String("...vec2".to_string()),
        PropertyValue::Opaque(kind) => Value::String(format!("...{kind}")),
    }
}
