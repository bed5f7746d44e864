//! Provider template catalog for structured-output schema generation.
//!
//! This crate provides the per-provider header-rule templates that wrap a
//! generated core schema in the envelope each LLM API expects, and the
//! catalog machinery for loading them from built-in presets or template
//! files on disk.
//!
//! # Quick start
//!
//! ```
//! use structout_providers::ProviderCatalog;
//! use structout_core::{Field, FieldType, generate_schema};
//!
//! let catalog = ProviderCatalog::builtin();
//! let openai = catalog.get("openai").unwrap();
//!
//! let fields = vec![Field::new("title", FieldType::String).required()];
//! let document = generate_schema(&fields, "Doc", "A document", &openai.llm_schema_header);
//! assert_eq!(document["strict"], true);
//! ```
//!
//! Custom templates live in a directory of `*.json`/`*.yaml` files and are
//! loaded with [`ProviderCatalog::from_dir`], or combined with the presets
//! through [`ProviderCatalog::builder`].

mod catalog;
mod config;
mod error;
mod presets;

pub use catalog::{CatalogBuilder, CatalogSource, ProviderCatalog};
pub use config::ProviderConfig;
pub use error::{ProviderError, Result};
pub use presets::{all as builtin_presets, anthropic, gemini, openai};
