//! Field list validation.
//!
//! The generator itself never rejects input: a field whose `parentKey`
//! resolves to nothing is silently dropped from the output (see
//! [`build_core_schema`](crate::build_core_schema)). This module is the
//! opt-in diagnostic pass for callers who want that silent data loss — and
//! a few related structural problems — surfaced before generating.
//!
//! # Examples
//!
//! ```
//! use structout_core::*;
//!
//! let fields = vec![
//!     Field::new("title", FieldType::String),
//!     Field::new("orphan", FieldType::String).with_parent("nowhere"),
//! ];
//! let errors = validate_fields(&fields);
//! assert!(errors.iter().any(|e| matches!(e, ValidationError::DanglingParent { .. })));
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::types::Field;

/// Structural problems in a field list.
///
/// Each variant describes a condition under which the generator would drop
/// or mangle output without reporting it. The `Display` impl provides a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A field's key is empty or whitespace-only.
    #[error("field at position {0} has an empty key")]
    EmptyFieldKey(usize),
    /// Two sibling fields share a key; the later one silently overwrites
    /// the earlier in the generated properties map.
    #[error("duplicate key among siblings of {parent}: {key}")]
    DuplicateSibling {
        /// The repeated key.
        key: String,
        /// Parent key, or `<root>` for top-level fields.
        parent: String,
    },
    /// A field's `parentKey` matches no field at all; the generator omits
    /// the field from output.
    #[error("field {key} references missing parent {parent_key}")]
    DanglingParent {
        /// Key of the referencing field.
        key: String,
        /// The unresolved parent key.
        parent_key: String,
    },
    /// A field's parent exists but can never be visited — the parent is a
    /// scalar, sits under a dangling ancestor, or is part of a cycle.
    #[error("field {key} is unreachable from the root scope")]
    UnreachableField {
        /// Key of the unreachable field.
        key: String,
    },
}

/// Validates a field list, reporting every structural problem found.
///
/// An empty result means the generator will emit every field. This pass is
/// never run implicitly; generation stays error-free regardless.
///
/// # Examples
///
/// ```
/// use structout_core::*;
///
/// let fields = vec![
///     Field::new("meta", FieldType::Object),
///     Field::new("author", FieldType::String).with_parent("meta"),
/// ];
/// assert!(validate_fields(&fields).is_empty());
///
/// // A child of a scalar field is never reached.
/// let fields = vec![
///     Field::new("title", FieldType::String),
///     Field::new("stuck", FieldType::String).with_parent("title"),
/// ];
/// let errors = validate_fields(&fields);
/// assert!(errors.iter().any(|e| matches!(e, ValidationError::UnreachableField { .. })));
/// ```
pub fn validate_fields(fields: &[Field]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut seen_siblings: HashSet<(Option<&str>, &str)> = HashSet::new();
    for (index, field) in fields.iter().enumerate() {
        if field.key.trim().is_empty() {
            errors.push(ValidationError::EmptyFieldKey(index));
            continue;
        }
        if !seen_siblings.insert((field.parent_key.as_deref(), field.key.as_str())) {
            errors.push(ValidationError::DuplicateSibling {
                key: field.key.clone(),
                parent: field
                    .parent_key
                    .clone()
                    .unwrap_or_else(|| "<root>".to_string()),
            });
        }
    }

    let known_keys: HashSet<&str> = fields.iter().map(|f| f.key.as_str()).collect();
    for field in fields {
        if let Some(parent_key) = field.parent_key.as_deref() {
            if !known_keys.contains(parent_key) {
                errors.push(ValidationError::DanglingParent {
                    key: field.key.clone(),
                    parent_key: parent_key.to_string(),
                });
            }
        }
    }

    // Fixpoint reachability over the name-based parent relation: the root
    // scope is reachable; a container field reached through it opens a new
    // scope under its own key. Cycle members never become reachable.
    let mut reachable_scopes: HashSet<Option<&str>> = HashSet::new();
    reachable_scopes.insert(None);
    let mut reached = vec![false; fields.len()];
    loop {
        let mut changed = false;
        for (index, field) in fields.iter().enumerate() {
            if reached[index] || !reachable_scopes.contains(&field.parent_key.as_deref()) {
                continue;
            }
            reached[index] = true;
            changed = true;
            if field.field_type.has_children() {
                reachable_scopes.insert(Some(field.key.as_str()));
            }
        }
        if !changed {
            break;
        }
    }
    for (index, field) in fields.iter().enumerate() {
        let dangling = field
            .parent_key
            .as_deref()
            .is_some_and(|parent| !known_keys.contains(parent));
        if !reached[index] && !dangling {
            errors.push(ValidationError::UnreachableField {
                key: field.key.clone(),
            });
        }
    }

    errors
}
