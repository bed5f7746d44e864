//! Splicing the core schema fragment into the provider envelope.
//!
//! The envelope built from header rules usually contains exactly one schema
//! body — a node with `type: "object"` and a `properties` map — somewhere
//! under a vendor-specific wrapper key. The merger locates that node and
//! splices the core fragment's properties and required list into it.
//!
//! When several nodes qualify, the **last one visited** by a full
//! depth-first traversal wins. That tie-break reproduces the behavior
//! downstream consumers already depend on; it is not "first match" and not
//! "deepest by nesting depth". The traversal descends into arrays as well
//! as objects. When nothing qualifies, the core fragment's own keys are
//! assigned directly onto the envelope root, so the document degrades to a
//! bare schema object.

use serde_json::{Map, Value};

/// One step of a path into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PathSeg {
    Key(String),
    Index(usize),
}

/// Resolves a path produced by [`find_target`] back into the document.
pub(crate) fn resolve_mut<'a>(root: &'a mut Value, path: &[PathSeg]) -> Option<&'a mut Value> {
    let mut node = root;
    for seg in path {
        node = match (seg, node) {
            (PathSeg::Key(key), Value::Object(map)) => map.get_mut(key)?,
            (PathSeg::Index(index), Value::Array(values)) => values.get_mut(*index)?,
            _ => return None,
        };
    }
    Some(node)
}

/// Full preorder DFS; every qualifying node overwrites `found`, so the last
/// one visited survives.
fn find_target(value: &Value, path: &mut Vec<PathSeg>, found: &mut Option<Vec<PathSeg>>) {
    match value {
        Value::Object(map) => {
            let is_schema_body = map.get("type").and_then(Value::as_str) == Some("object")
                && map.contains_key("properties");
            if is_schema_body {
                *found = Some(path.clone());
            }
            for (key, child) in map {
                path.push(PathSeg::Key(key.clone()));
                find_target(child, path, found);
                path.pop();
            }
        }
        Value::Array(values) => {
            for (index, child) in values.iter().enumerate() {
                path.push(PathSeg::Index(index));
                find_target(child, path, found);
                path.pop();
            }
        }
        _ => {}
    }
}

/// Merges the core schema fragment into the envelope document, in place.
///
/// Core properties override same-named envelope properties (overwritten
/// keys keep their original insertion slot); a non-empty core `required`
/// replaces the target's. Without a qualifying target node the core
/// fragment becomes the document itself.
///
/// # Examples
///
/// ```
/// use structout_core::{build_core_schema, merge_into_document, Field, FieldType};
/// use serde_json::json;
///
/// let mut document = json!({
///     "name": "Doc",
///     "schema": {"type": "object", "properties": {}}
/// });
/// let core = build_core_schema(&[Field::new("title", FieldType::String)]);
/// merge_into_document(&mut document, core);
/// assert!(document["schema"]["properties"]["title"].is_object());
/// ```
pub fn merge_into_document(document: &mut Value, core: Map<String, Value>) {
    let mut found = None;
    find_target(document, &mut Vec::new(), &mut found);

    let target = found.and_then(|path| resolve_mut(document, &path));
    match target.and_then(Value::as_object_mut) {
        Some(target) => {
            let core_properties = core
                .get("properties")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            match target.get_mut("properties") {
                Some(Value::Object(properties)) => {
                    for (key, value) in core_properties {
                        properties.insert(key, value);
                    }
                }
                _ => {
                    target.insert("properties".to_string(), Value::Object(core_properties));
                }
            }
            if let Some(required) = core.get("required") {
                target.insert("required".to_string(), required.clone());
            }
        }
        None => {
            if let Some(root) = document.as_object_mut() {
                for (key, value) in core {
                    root.insert(key, value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_core_schema;
    use crate::types::{Field, FieldType};
    use serde_json::json;

    fn core_for(fields: &[Field]) -> Map<String, Value> {
        build_core_schema(fields)
    }

    #[test]
    fn test_merge_splices_into_single_schema_body() {
        let mut document = json!({
            "name": "Doc",
            "schema": {
                "type": "object",
                "properties": {"vendor_key": {"type": "string"}}
            }
        });
        let core = core_for(&[Field::new("title", FieldType::String).required()]);
        merge_into_document(&mut document, core);

        let schema = &document["schema"];
        // Envelope property kept, core property appended, required replaced.
        assert!(schema["properties"]["vendor_key"].is_object());
        assert!(schema["properties"]["title"].is_object());
        assert_eq!(schema["required"], json!(["title"]));
        // The wrapper itself is untouched.
        assert_eq!(document["name"], "Doc");
    }

    #[test]
    fn test_last_candidate_in_traversal_order_wins() {
        let mut document = json!({
            "first": {"type": "object", "properties": {}},
            "second": {"type": "object", "properties": {}}
        });
        let core = core_for(&[Field::new("x", FieldType::String)]);
        merge_into_document(&mut document, core);

        assert_eq!(document["first"]["properties"], json!({}));
        assert!(document["second"]["properties"]["x"].is_object());
    }

    #[test]
    fn test_nested_candidate_beats_enclosing_one() {
        let mut document = json!({
            "type": "object",
            "properties": {},
            "wrapper": {
                "inner": {"type": "object", "properties": {}}
            }
        });
        let core = core_for(&[Field::new("x", FieldType::String)]);
        merge_into_document(&mut document, core);

        // The root matches first, but the traversal continues and the inner
        // node is visited later.
        assert_eq!(document["properties"], json!({}));
        assert!(document["wrapper"]["inner"]["properties"]["x"].is_object());
    }

    #[test]
    fn test_candidates_inside_arrays_are_found() {
        let mut document = json!({
            "tools": [{"type": "object", "properties": {}}]
        });
        let core = core_for(&[Field::new("x", FieldType::String)]);
        merge_into_document(&mut document, core);
        assert!(document["tools"][0]["properties"]["x"].is_object());
    }

    #[test]
    fn test_no_candidate_assigns_core_onto_root() {
        let mut document = json!({"name": "Doc"});
        let core = core_for(&[Field::new("title", FieldType::String).required()]);
        merge_into_document(&mut document, core);

        assert_eq!(document["name"], "Doc");
        assert_eq!(document["type"], "object");
        assert!(document["properties"]["title"].is_object());
        assert_eq!(document["required"], json!(["title"]));
    }

    #[test]
    fn test_core_property_overrides_envelope_property_in_place() {
        let mut document = json!({
            "schema": {
                "type": "object",
                "properties": {
                    "title": {"type": "number"},
                    "vendor": {"type": "string"}
                }
            }
        });
        let core = core_for(&[Field::new("title", FieldType::String)]);
        merge_into_document(&mut document, core);

        let properties = document["schema"]["properties"].as_object().unwrap();
        assert_eq!(properties["title"]["type"], "string");
        // Overwritten key keeps its original slot.
        let keys: Vec<&String> = properties.keys().collect();
        assert_eq!(keys, ["title", "vendor"]);
    }

    #[test]
    fn test_object_without_properties_key_is_not_a_candidate() {
        let mut document = json!({
            "schema": {"type": "object"}
        });
        let core = core_for(&[Field::new("x", FieldType::String)]);
        merge_into_document(&mut document, core);

        // Fallback path: core assigned onto the root.
        assert!(document["properties"]["x"].is_object());
        assert_eq!(document["schema"], json!({"type": "object"}));
    }
}
