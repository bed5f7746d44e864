//! Per-provider configuration templates.
//!
//! Each provider ships a small document naming the provider, the header-rule
//! string its envelopes are built from, and the upload path its API expects.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "provider": "openai",
//!   "llmSchemaHeader": "[{\"key\":\"name\",\"type\":\"string\",\"sourceparam\":\"schemaName\",\"level\":1}]",
//!   "genAIURLPathParameter": "/v1/responses"
//! }
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use structout_core::{Rule, parse_header_rules};

use crate::error::Result;

/// A provider template: header rules plus request metadata.
///
/// Field names on the wire match the template files consumed by the original
/// front end, so existing `*.json` templates load unchanged.
///
/// # Examples
///
/// ```
/// use structout_providers::ProviderConfig;
///
/// let config = ProviderConfig::new("openai", "[]", "/v1/responses");
/// assert_eq!(config.provider, "openai");
/// assert!(config.header_rules().is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider identifier (`"openai"`, `"anthropic"`, ...).
    pub provider: String,
    /// JSON-encoded rule array consumed by the schema generator.
    #[serde(rename = "llmSchemaHeader")]
    pub llm_schema_header: String,
    /// Request path the provider's structured-output endpoint expects.
    #[serde(rename = "genAIURLPathParameter", default)]
    pub gen_ai_url_path_parameter: String,
}

impl ProviderConfig {
    /// Creates a config from its three parts.
    pub fn new(
        provider: impl Into<String>,
        llm_schema_header: impl Into<String>,
        gen_ai_url_path_parameter: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            llm_schema_header: llm_schema_header.into(),
            gen_ai_url_path_parameter: gen_ai_url_path_parameter.into(),
        }
    }

    /// Loads a configuration from a JSON or YAML file, chosen by extension.
    ///
    /// Files without a `.yaml`/`.yml` extension are parsed as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ProviderError::IoError) if the file cannot
    /// be read, or [`JsonError`](crate::ProviderError::JsonError) /
    /// [`YamlError`](crate::ProviderError::YamlError) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = if is_yaml(path) {
            serde_yaml::from_reader(reader)?
        } else {
            serde_json::from_reader(reader)?
        };
        Ok(config)
    }

    /// Saves the configuration as JSON or YAML, chosen by extension.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ProviderError::IoError) if the file cannot
    /// be written, or a serialization error variant if encoding fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        if is_yaml(path) {
            serde_yaml::to_writer(writer, self)?;
        } else {
            serde_json::to_writer_pretty(writer, self)?;
        }
        Ok(())
    }

    /// Parses the header-rule string into rules.
    ///
    /// An empty or unparseable string yields no rules, matching the
    /// generator's fail-soft contract.
    pub fn header_rules(&self) -> Vec<Rule> {
        parse_header_rules(&self.llm_schema_header)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
