//! The four-stage generation pipeline.
//!
//! Every invocation runs to completion synchronously: parse the provider
//! header rules, build the envelope, build the core schema from the field
//! snapshot, merge, cascade. There is no shared state between invocations
//! and no failure mode — malformed rule strings degrade to an empty
//! envelope and the field list alone still produces a valid document, so
//! hosts can re-run the pipeline on every edit without error handling.

use serde_json::Value;

use crate::cascade::cascade_rules;
use crate::core_schema::build_core_schema;
use crate::header::{build_envelope, parse_header_rules};
use crate::merge::merge_into_document;
use crate::types::{Field, SchemaDesign};

/// Generates the final schema document for a field list.
///
/// `header_rule` is the provider's JSON-encoded rule list;
/// `schema_name`/`schema_description` are substituted where `string` rules
/// direct. The field slice is treated as an immutable snapshot for the
/// duration of the call.
///
/// Identical inputs produce byte-identical output.
///
/// # Examples
///
/// ```
/// use structout_core::{generate_schema, Field, FieldType};
/// use serde_json::json;
///
/// let fields = vec![
///     Field::new("title", FieldType::String).with_prompt("doc title").required(),
/// ];
/// let document = generate_schema(&fields, "Doc", "A document", "[]");
/// assert_eq!(
///     document,
///     json!({
///         "type": "object",
///         "properties": {"title": {"description": "doc title", "type": "string"}},
///         "required": ["title"]
///     })
/// );
/// ```
pub fn generate_schema(
    fields: &[Field],
    schema_name: &str,
    schema_description: &str,
    header_rule: &str,
) -> Value {
    let rules = parse_header_rules(header_rule);
    let envelope = build_envelope(&rules, schema_name, schema_description);
    let core = build_core_schema(fields);

    let mut document = Value::Object(envelope);
    merge_into_document(&mut document, core);
    cascade_rules(&mut document, &rules);
    document
}

/// Generates the schema document for a saved design.
///
/// Convenience wrapper around [`generate_schema`] using the design's own
/// metadata as the substitution parameters.
pub fn generate_for_design(design: &SchemaDesign, header_rule: &str) -> Value {
    generate_schema(
        &design.fields,
        design.name.trim(),
        design.description.trim(),
        header_rule,
    )
}
