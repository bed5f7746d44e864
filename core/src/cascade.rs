//! Post-merge cascade of structural flags.
//!
//! Header rules are declared once, at the envelope's nesting depth, but
//! directives like "every object forbids extra properties" or "list every
//! property name" must hold at every depth of the final document — including
//! nodes produced by the core schema builder, which knows nothing about
//! provider flags. This pass walks the merged document breadth-first and
//! re-applies every `include` rule to each node whose kind matches the
//! rule's `actionLevel`.
//!
//! Documents produced by this pipeline are trees, so the walk needs no
//! cycle guard; a generous depth limit bounds it anyway without changing
//! behavior on well-formed input.

use std::collections::VecDeque;

use serde_json::{Map, Value};

use crate::header::{coerce_string, json_truthy, keynames_of};
use crate::merge::{PathSeg, resolve_mut};
use crate::types::{NodeKind, Rule, RuleType};

/// Hard bound on traversal depth. Unreachable for documents built by this
/// crate; guards against hand-crafted pathological input.
const MAX_CASCADE_DEPTH: usize = 128;

/// Re-applies every matching `include` rule at every object/array node of
/// the document, in place.
///
/// Arrays are traversed but never match a kind themselves; only nodes whose
/// `type` property is `"object"` or `"array"` receive rules. `object` rules
/// degrade to "ensure the key exists" here — there is no scope stack at
/// this phase.
///
/// # Examples
///
/// ```
/// use structout_core::{cascade_rules, parse_header_rules};
/// use serde_json::json;
///
/// let rules = parse_header_rules(
///     r#"[{"key":"additionalProperties","type":"boolean","value":false,
///          "level":2,"action":"include","actionLevel":["object"]}]"#,
/// );
/// let mut document = json!({
///     "type": "object",
///     "properties": {"meta": {"type": "object", "properties": {}}}
/// });
/// cascade_rules(&mut document, &rules);
/// assert_eq!(document["additionalProperties"], false);
/// assert_eq!(document["properties"]["meta"]["additionalProperties"], false);
/// ```
pub fn cascade_rules(document: &mut Value, rules: &[Rule]) {
    if !document.is_object() && !document.is_array() {
        return;
    }

    let mut queue: VecDeque<Vec<PathSeg>> = VecDeque::new();
    queue.push_back(Vec::new());

    while let Some(path) = queue.pop_front() {
        let Some(node) = resolve_mut(document, &path) else {
            continue;
        };

        if let Value::Object(map) = node {
            if let Some(kind) = NodeKind::of_node(map) {
                apply_rules(map, rules, kind);
            }
        }

        if path.len() >= MAX_CASCADE_DEPTH {
            continue;
        }
        match node {
            Value::Object(map) => {
                for (key, child) in map.iter() {
                    if child.is_object() || child.is_array() {
                        let mut child_path = path.clone();
                        child_path.push(PathSeg::Key(key.clone()));
                        queue.push_back(child_path);
                    }
                }
            }
            Value::Array(values) => {
                for (index, child) in values.iter().enumerate() {
                    if child.is_object() || child.is_array() {
                        let mut child_path = path.clone();
                        child_path.push(PathSeg::Index(index));
                        queue.push_back(child_path);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Applies every rule whose `actionLevel` lists `kind` to one node.
fn apply_rules(node: &mut Map<String, Value>, rules: &[Rule], kind: NodeKind) {
    for rule in rules {
        if !rule.applies_to(kind) {
            continue;
        }
        match rule.rule_type {
            RuleType::Boolean => {
                node.insert(
                    rule.key.clone(),
                    Value::Bool(json_truthy(rule.value.as_ref())),
                );
            }
            RuleType::Array => {
                let items = if rule.wants_keynames() {
                    keynames_of(node).unwrap_or_default()
                } else if let Some(Value::Array(values)) = &rule.value {
                    values.clone()
                } else {
                    Vec::new()
                };
                node.insert(rule.key.clone(), Value::Array(items));
            }
            RuleType::Keyvalue => {
                if let Some(value) = &rule.value {
                    node.insert(rule.key.clone(), value.clone());
                }
            }
            RuleType::String => {
                node.insert(
                    rule.key.clone(),
                    Value::String(coerce_string(rule.value.as_ref())),
                );
            }
            RuleType::Object => {
                if !node.contains_key(&rule.key) {
                    node.insert(rule.key.clone(), Value::Object(Map::new()));
                }
            }
            RuleType::Unknown => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::parse_header_rules;
    use serde_json::json;

    fn nested_document() -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {"description": "", "type": "string"},
                "meta": {
                    "description": "", "type": "object",
                    "properties": {
                        "author": {"description": "", "type": "string"}
                    }
                },
                "entries": {
                    "description": "", "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "label": {"description": "", "type": "string"}
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_boolean_rule_reaches_every_object_node() {
        let rules = parse_header_rules(
            r#"[{"key":"additionalProperties","type":"boolean","value":false,
                 "level":2,"action":"include","actionLevel":["object"]}]"#,
        );
        let mut document = nested_document();
        cascade_rules(&mut document, &rules);

        // Root, meta, and the array item schema: three object nodes.
        assert_eq!(document["additionalProperties"], false);
        assert_eq!(
            document["properties"]["meta"]["additionalProperties"],
            false
        );
        assert_eq!(
            document["properties"]["entries"]["items"]["additionalProperties"],
            false
        );
        // Scalar property nodes and the array node are untouched.
        assert!(
            document["properties"]["title"]
                .get("additionalProperties")
                .is_none()
        );
        assert!(
            document["properties"]["entries"]
                .get("additionalProperties")
                .is_none()
        );

        let text = serde_json::to_string(&document).unwrap();
        assert_eq!(text.matches("additionalProperties").count(), 3);
    }

    #[test]
    fn test_keynames_arrays_match_property_order() {
        let rules = parse_header_rules(
            r#"[{"key":"required","type":"array","value":"{keynames}",
                 "level":2,"action":"include","actionLevel":["object"]}]"#,
        );
        let mut document = nested_document();
        cascade_rules(&mut document, &rules);

        assert_eq!(
            document["required"],
            json!(["title", "meta", "entries"])
        );
        assert_eq!(
            document["properties"]["meta"]["required"],
            json!(["author"])
        );
        assert_eq!(
            document["properties"]["entries"]["items"]["required"],
            json!(["label"])
        );
    }

    #[test]
    fn test_array_kind_rules_use_items_properties() {
        let rules = parse_header_rules(
            r#"[{"key":"itemNames","type":"array","value":"{keynames}",
                 "level":2,"action":"include","actionLevel":["array"]}]"#,
        );
        let mut document = nested_document();
        cascade_rules(&mut document, &rules);

        // Only the array-typed node qualifies; its keynames come from
        // items.properties.
        assert_eq!(
            document["properties"]["entries"]["itemNames"],
            json!(["label"])
        );
        assert!(document.get("itemNames").is_none());
    }

    #[test]
    fn test_string_rule_coerces_value_not_sourceparam() {
        let rules = parse_header_rules(
            r#"[{"key":"note","type":"string","value":7,
                 "level":2,"action":"include","actionLevel":["object"]},
                {"key":"blank","type":"string",
                 "level":2,"action":"include","actionLevel":["object"]}]"#,
        );
        let mut document = json!({"type": "object", "properties": {}});
        cascade_rules(&mut document, &rules);
        assert_eq!(document["note"], "7");
        assert_eq!(document["blank"], "");
    }

    #[test]
    fn test_object_rule_only_fills_missing_keys() {
        let rules = parse_header_rules(
            r#"[{"key":"extras","type":"object",
                 "level":2,"action":"include","actionLevel":["object"]}]"#,
        );
        let mut document = json!({
            "type": "object",
            "properties": {},
            "extras": {"keep": true}
        });
        cascade_rules(&mut document, &rules);
        assert_eq!(document["extras"], json!({"keep": true}));
    }

    #[test]
    fn test_non_include_rules_never_cascade() {
        let rules = parse_header_rules(
            r#"[{"key":"x","type":"boolean","value":true,
                 "level":2,"action":"exclude","actionLevel":["object"]},
                {"key":"y","type":"boolean","value":true,"level":2}]"#,
        );
        let mut document = json!({"type": "object", "properties": {}});
        cascade_rules(&mut document, &rules);
        assert!(document.get("x").is_none());
        assert!(document.get("y").is_none());
    }

    #[test]
    fn test_scalar_document_is_left_alone() {
        let rules = parse_header_rules(
            r#"[{"key":"x","type":"boolean","value":true,
                 "level":2,"action":"include","actionLevel":["object"]}]"#,
        );
        let mut document = json!("just a string");
        cascade_rules(&mut document, &rules);
        assert_eq!(document, json!("just a string"));
    }
}
