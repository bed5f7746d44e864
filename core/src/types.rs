//! Type definitions for field rows, header rules, and design documents.
//!
//! This module defines the data model consumed by the schema generator. The
//! types are designed for serialization with [`serde`] and use the same wire
//! names as the design documents saved by the editing surface (`aiPrompt`,
//! `parentKey`, `metadataName`, ...), so stored designs round-trip through
//! JSON unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel accepted as a rule `value`, meaning "derive this array from the
/// node's own property names".
pub const KEYNAMES_SENTINEL: &str = "{keynames}";

/// Value type of a field row.
///
/// The three `array-*` tags select the element type of the emitted `items`
/// schema; every `array-*` tag maps to JSON Schema type `"array"`.
///
/// # Examples
///
/// ```
/// use structout_core::FieldType;
///
/// assert_eq!(FieldType::ArrayObject.schema_type(), "array");
/// assert_eq!(FieldType::Integer.schema_type(), "integer");
/// assert!(FieldType::Object.has_children());
/// assert!(!FieldType::Boolean.has_children());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    /// Free-form string value (the default).
    #[default]
    String,
    /// Floating-point number.
    Number,
    /// Integer number.
    Integer,
    /// Boolean flag.
    Boolean,
    /// Nested object; children are the fields whose `parentKey` names this
    /// field.
    Object,
    /// Array of strings.
    ArrayString,
    /// Array of numbers.
    ArrayNumber,
    /// Array of objects; children describe the element schema.
    ArrayObject,
}

impl FieldType {
    /// Returns the JSON Schema `type` keyword for this field type.
    ///
    /// Any `array-*` tag collapses to `"array"`.
    pub fn schema_type(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Object => "object",
            FieldType::ArrayString | FieldType::ArrayNumber | FieldType::ArrayObject => "array",
        }
    }

    /// Returns `true` if fields of this type act as a parent scope for other
    /// fields (their `key` can appear as another field's `parentKey`).
    pub fn has_children(&self) -> bool {
        matches!(self, FieldType::Object | FieldType::ArrayObject)
    }
}

/// A single editable field row in a schema design.
///
/// Rows are flat: nesting is expressed through `parentKey`, a weak reference
/// by name to the enclosing field's `key`. Keys must be unique among
/// siblings; reuse across different parents is allowed.
///
/// # Examples
///
/// ```
/// use structout_core::{Field, FieldType};
///
/// let title = Field::new("title", FieldType::String)
///     .with_prompt("document title")
///     .required();
/// assert!(title.required);
/// assert_eq!(title.ai_prompt, "document title");
///
/// let tags = Field::new("tags", FieldType::ArrayString).with_parent("meta");
/// assert_eq!(tags.parent_key.as_deref(), Some("meta"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    /// Property name, unique among siblings.
    pub key: String,
    /// Value type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Indentation depth maintained by the editor. Redundant with
    /// `parent_key`; the generator ignores it.
    #[serde(default)]
    pub level: u32,
    /// Free-text guidance, emitted as the schema `description`.
    #[serde(default, rename = "aiPrompt")]
    pub ai_prompt: String,
    /// Key of the enclosing field, or `None` for top-level fields.
    #[serde(default, rename = "parentKey")]
    pub parent_key: Option<String>,
    /// Whether this key is listed in the parent's `required` array.
    #[serde(default)]
    pub required: bool,
}

impl Field {
    /// Creates a top-level, optional field with an empty prompt.
    pub fn new(key: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            key: key.into(),
            field_type,
            level: 0,
            ai_prompt: String::new(),
            parent_key: None,
            required: false,
        }
    }

    /// Sets the description prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.ai_prompt = prompt.into();
        self
    }

    /// Nests this field under the field named `parent`.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_key = Some(parent.into());
        self
    }

    /// Marks this field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Behavior tag of a header rule.
///
/// Unrecognized tags deserialize to [`RuleType::Unknown`], which the
/// generator treats as a no-op so one exotic rule cannot invalidate a whole
/// provider rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    /// Open a nested envelope node and make it the current scope.
    Object,
    /// Insert an external parameter (schema name or description).
    String,
    /// Insert the rule's literal `value`.
    Keyvalue,
    /// Conditionally insert a boolean flag.
    Boolean,
    /// Conditionally insert an array, possibly derived from property names.
    Array,
    /// Any tag this version does not understand; ignored.
    #[serde(other)]
    Unknown,
}

/// Whether a conditional rule fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    /// Apply the rule wherever its `actionLevel` matches.
    Include,
    /// Present in provider files but never fires.
    Exclude,
}

/// Kind of an envelope/schema node, inferred from its `type` property.
///
/// # Examples
///
/// ```
/// use structout_core::NodeKind;
/// use serde_json::json;
///
/// let node = json!({"type": "object", "properties": {}});
/// assert_eq!(NodeKind::of_node(node.as_object().unwrap()), Some(NodeKind::Object));
///
/// let leaf = json!({"type": "string"});
/// assert_eq!(NodeKind::of_node(leaf.as_object().unwrap()), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Node carrying `type: "object"`.
    Object,
    /// Node carrying `type: "array"`.
    Array,
}

impl NodeKind {
    /// Infers the kind of a document node from its `type` property, if any.
    pub fn of_node(node: &serde_json::Map<String, Value>) -> Option<NodeKind> {
        match node.get("type").and_then(Value::as_str) {
            Some("object") => Some(NodeKind::Object),
            Some("array") => Some(NodeKind::Array),
            _ => None,
        }
    }
}

/// One directive in a provider header rule list.
///
/// Rules are parsed once per generation pass from a JSON-encoded array and
/// walked twice: once to build the envelope's nesting structure and once
/// while cascading structural flags over the merged document.
///
/// # Examples
///
/// ```
/// use structout_core::{Rule, RuleType, NodeKind};
///
/// let rules: Vec<Rule> = serde_json::from_str(
///     r#"[{"key":"additionalProperties","type":"boolean","value":false,
///          "level":2,"action":"include","actionLevel":["object"]}]"#,
/// ).unwrap();
/// assert_eq!(rules[0].rule_type, RuleType::Boolean);
/// assert!(rules[0].applies_to(NodeKind::Object));
/// assert!(!rules[0].applies_to(NodeKind::Array));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Property name to set on the current envelope node.
    pub key: String,
    /// Behavior tag.
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    /// Literal payload for `keyvalue`/`boolean`/`array` rules. The string
    /// [`KEYNAMES_SENTINEL`] derives the array from property names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// For `string` rules: which external parameter to substitute
    /// (`"schemaName"` or `"schemaDescription"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourceparam: Option<String>,
    /// Nesting depth; opening a rule at level N closes every scope opened at
    /// level >= N.
    #[serde(default)]
    pub level: i64,
    /// Close this rule's own scope immediately after applying it.
    #[serde(default)]
    pub end: bool,
    /// Only `include` rules fire during boolean/array processing and during
    /// the cascade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<RuleAction>,
    /// Node kinds this rule applies to.
    #[serde(default, rename = "actionLevel", skip_serializing_if = "Vec::is_empty")]
    pub action_level: Vec<NodeKind>,
}

impl Rule {
    /// Returns `true` if this is an `include` rule whose `actionLevel` lists
    /// `kind`.
    pub fn applies_to(&self, kind: NodeKind) -> bool {
        self.action == Some(RuleAction::Include) && self.action_level.contains(&kind)
    }

    /// Returns `true` if the rule's `value` is the `{keynames}` sentinel.
    pub fn wants_keynames(&self) -> bool {
        matches!(&self.value, Some(Value::String(s)) if s == KEYNAMES_SENTINEL)
    }
}

/// A complete schema design as persisted by the editing surface.
///
/// This is the document shape the editor stores (and the CLI loads): schema
/// metadata plus the flat field list.
///
/// # Examples
///
/// ```
/// use structout_core::SchemaDesign;
///
/// let design: SchemaDesign = serde_json::from_str(
///     r#"{"metadataName":"Doc","metadataDescription":"A document",
///         "fields":[{"key":"title","type":"string","required":true}]}"#,
/// ).unwrap();
/// assert_eq!(design.name, "Doc");
/// assert_eq!(design.fields.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaDesign {
    /// Schema name, substituted where a `string` rule asks for `schemaName`.
    #[serde(default, rename = "metadataName")]
    pub name: String,
    /// Schema description, substituted for `schemaDescription`.
    #[serde(default, rename = "metadataDescription")]
    pub description: String,
    /// Ordered field rows.
    #[serde(default)]
    pub fields: Vec<Field>,
}
