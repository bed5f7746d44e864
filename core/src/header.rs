//! Header rule parsing and envelope construction.
//!
//! Providers describe their schema envelope (vendor wrapper keys, sibling
//! flags, parameter substitution points) as a JSON-encoded list of [`Rule`]
//! directives. This module parses that list and interprets it with a small
//! stack machine: `object` rules open nested scopes, rule `level`s close
//! them, and conditional rules fire only where their `actionLevel` matches
//! the kind of the currently open node.
//!
//! Parsing fails soft: a malformed rule string is logged and treated as "no
//! rules, empty envelope" so schema generation always produces a document.

use serde_json::{Map, Value};
use tracing::warn;

use crate::types::{NodeKind, Rule, RuleType};

/// Parses a JSON-encoded header rule list.
///
/// Returns an empty list if the string is not a well-formed rule array; the
/// failure is logged, never propagated (callers must tolerate an empty
/// envelope).
///
/// # Examples
///
/// ```
/// use structout_core::parse_header_rules;
///
/// let rules = parse_header_rules(r#"[{"key":"name","type":"string","level":1}]"#);
/// assert_eq!(rules.len(), 1);
///
/// // Malformed input degrades to "no rules"
/// assert!(parse_header_rules("not json").is_empty());
/// ```
pub fn parse_header_rules(header_rule: &str) -> Vec<Rule> {
    match serde_json::from_str::<Vec<Rule>>(header_rule) {
        Ok(rules) => rules,
        Err(err) => {
            warn!(error = %err, "invalid header rule JSON; using empty envelope");
            Vec::new()
        }
    }
}

/// One open scope while interpreting the rule list.
struct Frame {
    /// Key path from the envelope root to this scope's node.
    path: Vec<String>,
    /// Level declared by the rule that opened the scope.
    level: i64,
    /// Kind the scope was opened as; gates `boolean`/`array` rules.
    kind: NodeKind,
}

impl Frame {
    fn root() -> Self {
        Frame {
            path: Vec::new(),
            level: 0,
            kind: NodeKind::Object,
        }
    }
}

/// Interprets a rule list into the provider envelope.
///
/// `schema_name` and `schema_description` are substituted wherever a
/// `string` rule's `sourceparam` asks for them. Scopes still open when the
/// rule list ends are simply discarded.
///
/// # Examples
///
/// ```
/// use structout_core::{build_envelope, parse_header_rules};
///
/// let rules = parse_header_rules(
///     r#"[{"key":"name","type":"string","sourceparam":"schemaName","level":1},
///         {"key":"schema","type":"object","level":1},
///         {"key":"type","type":"keyvalue","value":"object","level":2}]"#,
/// );
/// let envelope = build_envelope(&rules, "Doc", "");
/// assert_eq!(envelope["name"], "Doc");
/// assert_eq!(envelope["schema"]["type"], "object");
/// ```
pub fn build_envelope(
    rules: &[Rule],
    schema_name: &str,
    schema_description: &str,
) -> Map<String, Value> {
    let mut root = Map::new();
    let mut stack: Vec<Frame> = vec![Frame::root()];

    for rule in rules {
        // Close every scope opened at or below this rule's depth.
        while stack.last().is_some_and(|frame| frame.level >= rule.level) {
            stack.pop();
        }
        if stack.is_empty() {
            stack.push(Frame::root());
        }
        let frame = &stack[stack.len() - 1];
        let parent_kind = frame.kind;
        let path = frame.path.clone();

        match rule.rule_type {
            RuleType::Object => {
                node_at_mut(&mut root, &path)
                    .insert(rule.key.clone(), Value::Object(Map::new()));
                let mut child_path = path;
                child_path.push(rule.key.clone());
                stack.push(Frame {
                    path: child_path,
                    level: rule.level,
                    kind: NodeKind::Object,
                });
            }
            RuleType::String => {
                let text = match rule.sourceparam.as_deref() {
                    Some("schemaName") => schema_name,
                    Some("schemaDescription") => schema_description,
                    _ => "",
                };
                node_at_mut(&mut root, &path)
                    .insert(rule.key.clone(), Value::String(text.to_string()));
            }
            RuleType::Keyvalue => {
                // A missing value would serialize to nothing anyway.
                if let Some(value) = &rule.value {
                    node_at_mut(&mut root, &path).insert(rule.key.clone(), value.clone());
                }
            }
            RuleType::Boolean => {
                if rule.applies_to(parent_kind) {
                    let flag = json_truthy(rule.value.as_ref());
                    node_at_mut(&mut root, &path).insert(rule.key.clone(), Value::Bool(flag));
                }
            }
            RuleType::Array => {
                if rule.applies_to(parent_kind) {
                    let parent = node_at_mut(&mut root, &path);
                    let items = if rule.wants_keynames() {
                        keynames_of(parent).unwrap_or_default()
                    } else if let Some(Value::Array(values)) = &rule.value {
                        values.clone()
                    } else {
                        Vec::new()
                    };
                    parent.insert(rule.key.clone(), Value::Array(items));
                }
            }
            RuleType::Unknown => {}
        }

        if rule.end {
            stack.pop();
        }
    }

    root
}

/// Resolves (and if necessary re-creates) the object node at `path`.
pub(crate) fn node_at_mut<'a>(
    root: &'a mut Map<String, Value>,
    path: &[String],
) -> &'a mut Map<String, Value> {
    let mut node = root;
    for key in path {
        let entry = node
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        node = match entry {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
    }
    node
}

/// Property names of a node, read from `properties` or `items.properties`.
///
/// Order matches property insertion order, which is why the generator keeps
/// `serde_json` maps order-preserving.
pub(crate) fn keynames_of(node: &Map<String, Value>) -> Option<Vec<Value>> {
    let properties = node.get("properties").and_then(Value::as_object).or_else(|| {
        node.get("items")
            .and_then(Value::as_object)
            .and_then(|items| items.get("properties"))
            .and_then(Value::as_object)
    })?;
    Some(properties.keys().cloned().map(Value::String).collect())
}

/// JavaScript-style truthiness for rule payloads: absent, `null`, `false`,
/// `0`, and `""` are false; everything else is true.
pub(crate) fn json_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// String coercion used when cascading `string` rules: absent and `null`
/// become the empty string, scalars render naturally, composite values fall
/// back to their JSON text.
pub(crate) fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Number(number)) => number.to_string(),
        Some(other) => other.to_string(),
    }
}
