//! Schema generation core: flat field designs in, provider-ready JSON
//! Schema documents out.
//!
//! This crate implements the two-stage compiler behind the structured-output
//! designer:
//!
//! - [`Field`] / [`SchemaDesign`] — the flat, parent-pointer-linked rows the
//!   editing surface maintains.
//! - [`Rule`] — one directive of a provider's header rule list, describing
//!   how to build the vendor envelope and which structural flags cascade.
//! - [`build_envelope`] / [`parse_header_rules`] — the stack-machine
//!   interpreter for the rule list.
//! - [`build_core_schema`] — the recursive `{type, properties, required}`
//!   builder over the field rows.
//! - [`merge_into_document`] — splices the core fragment into the deepest
//!   schema body of the envelope.
//! - [`cascade_rules`] — re-applies `include` rules at every object/array
//!   node of the merged document.
//! - [`generate_schema`] — the whole pipeline in one call; this is what
//!   hosts invoke on every edit.
//!
//! Generation never fails: malformed provider rules degrade to an empty
//! envelope and an empty field list yields a valid empty schema. The
//! opt-in [`validate_fields`] pass reports the conditions the generator
//! deliberately swallows (dangling parents, duplicate siblings).
//!
//! # Example
//!
//! ```
//! use structout_core::*;
//!
//! let fields = vec![
//!     Field::new("title", FieldType::String).with_prompt("doc title").required(),
//!     Field::new("tags", FieldType::ArrayString),
//! ];
//!
//! let rules = r#"[
//!     {"key":"name","type":"string","sourceparam":"schemaName","level":1},
//!     {"key":"schema","type":"object","level":1},
//!     {"key":"type","type":"keyvalue","value":"object","level":2},
//!     {"key":"properties","type":"object","level":2,"end":true},
//!     {"key":"additionalProperties","type":"boolean","value":false,
//!      "level":2,"action":"include","actionLevel":["object"]}
//! ]"#;
//!
//! let document = generate_schema(&fields, "Doc", "A document", rules);
//! assert_eq!(document["name"], "Doc");
//! assert_eq!(document["schema"]["additionalProperties"], false);
//! assert!(document["schema"]["properties"]["tags"].is_object());
//! ```

mod cascade;
mod core_schema;
mod generator;
mod header;
mod merge;
mod types;
mod validate;

pub use cascade::cascade_rules;
pub use core_schema::build_core_schema;
pub use generator::{generate_for_design, generate_schema};
pub use header::{build_envelope, parse_header_rules};
pub use merge::merge_into_document;
pub use types::{
    Field, FieldType, KEYNAMES_SENTINEL, NodeKind, Rule, RuleAction, RuleType, SchemaDesign,
};
pub use validate::{ValidationError, validate_fields};
