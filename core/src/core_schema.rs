//! Core schema construction from flat field rows.
//!
//! Turns the editor's parent-pointer-linked field list into a nested
//! `{type, properties, required}` fragment. Grouping is strictly by key
//! name: a children index is built once per pass, and a field whose
//! `parentKey` matches no other field's key is silently omitted (callers
//! wanting a diagnostic run [`validate_fields`](crate::validate_fields)
//! first).

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::types::{Field, FieldType};

/// Children of each parent key, in field-list order.
///
/// Built once per generation pass so nested lookups are O(1) instead of
/// re-filtering the whole list at every recursion step.
pub(crate) struct FieldIndex<'a> {
    children: HashMap<Option<&'a str>, Vec<&'a Field>>,
}

impl<'a> FieldIndex<'a> {
    pub(crate) fn build(fields: &'a [Field]) -> Self {
        let mut children: HashMap<Option<&'a str>, Vec<&'a Field>> = HashMap::new();
        for field in fields {
            children
                .entry(field.parent_key.as_deref())
                .or_default()
                .push(field);
        }
        Self { children }
    }

    pub(crate) fn children_of(&self, parent: Option<&'a str>) -> &[&'a Field] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Builds the core schema fragment for the whole field list.
///
/// The result is always `{type: "object", properties: {...}}` with a
/// `required` array appended when any top-level field asks for it. Property
/// insertion order follows field-list order.
///
/// # Examples
///
/// ```
/// use structout_core::{build_core_schema, Field, FieldType};
/// use serde_json::json;
///
/// let fields = vec![
///     Field::new("title", FieldType::String).with_prompt("doc title").required(),
/// ];
/// let core = build_core_schema(&fields);
/// assert_eq!(
///     serde_json::Value::Object(core),
///     json!({
///         "type": "object",
///         "properties": {"title": {"description": "doc title", "type": "string"}},
///         "required": ["title"]
///     })
/// );
/// ```
pub fn build_core_schema(fields: &[Field]) -> Map<String, Value> {
    let index = FieldIndex::build(fields);
    build_fragment(&index, None)
}

/// Recursively builds the fragment for the fields under `parent`.
fn build_fragment<'a>(index: &FieldIndex<'a>, parent: Option<&'a str>) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required: Vec<Value> = Vec::new();

    for field in index.children_of(parent) {
        let mut property = Map::new();
        property.insert(
            "description".to_string(),
            Value::String(field.ai_prompt.clone()),
        );
        property.insert(
            "type".to_string(),
            Value::String(field.field_type.schema_type().to_string()),
        );

        match field.field_type {
            FieldType::ArrayObject => {
                let items = if index.children_of(Some(&field.key)).is_empty() {
                    empty_object_schema()
                } else {
                    build_fragment(index, Some(&field.key))
                };
                property.insert("items".to_string(), Value::Object(items));
            }
            FieldType::Object => {
                if index.children_of(Some(&field.key)).is_empty() {
                    property.insert("properties".to_string(), Value::Object(Map::new()));
                } else {
                    // Flatten one level: the property itself becomes the
                    // object schema rather than wrapping the child fragment.
                    let mut child = build_fragment(index, Some(&field.key));
                    if let Some(child_properties) = child.remove("properties") {
                        property.insert("properties".to_string(), child_properties);
                    }
                    if let Some(child_required) = child.remove("required") {
                        property.insert("required".to_string(), child_required);
                    }
                }
            }
            FieldType::ArrayString => {
                property.insert("items".to_string(), typed_items("string"));
            }
            FieldType::ArrayNumber => {
                property.insert("items".to_string(), typed_items("number"));
            }
            FieldType::String
            | FieldType::Number
            | FieldType::Integer
            | FieldType::Boolean => {}
        }

        if field.required {
            let key = Value::String(field.key.clone());
            if !required.contains(&key) {
                required.push(key);
            }
        }
        properties.insert(field.key.clone(), Value::Object(property));
    }

    let mut fragment = Map::new();
    fragment.insert("type".to_string(), Value::String("object".to_string()));
    fragment.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        fragment.insert("required".to_string(), Value::Array(required));
    }
    fragment
}

fn empty_object_schema() -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".to_string(), Value::String("object".to_string()));
    schema.insert("properties".to_string(), Value::Object(Map::new()));
    schema
}

fn typed_items(type_name: &str) -> Value {
    let mut items = Map::new();
    items.insert("type".to_string(), Value::String(type_name.to_string()));
    Value::Object(items)
}
