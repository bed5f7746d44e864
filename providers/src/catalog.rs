//! Provider catalog loading with builder pattern and fallback chains.
//!
//! Provides [`ProviderCatalog`] for in-memory provider lookup and
//! [`CatalogBuilder`] for constructing a catalog from multiple sources with
//! automatic fallback.
//!
//! # Loading patterns
//!
//! ```no_run
//! use structout_providers::ProviderCatalog;
//!
//! // The built-in presets
//! let catalog = ProviderCatalog::builtin();
//! assert!(catalog.contains("openai"));
//!
//! // Load from a directory of template files
//! let catalog = ProviderCatalog::from_dir("templates/").unwrap();
//!
//! // Use the builder for a fallback chain
//! let catalog = ProviderCatalog::builder()
//!     .from_dir("templates/")
//!     .with_builtin()
//!     .build()
//!     .unwrap();
//! ```
//!
//! All lookups are O(1) via the internal `HashMap`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{ProviderError, Result};
use crate::presets;

/// Describes where a [`ProviderCatalog`] was loaded from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// The compiled-in presets.
    Builtin,
    /// Loaded from a directory of individual template files.
    Directory(PathBuf),
    /// Loaded from a single template file.
    File(PathBuf),
    /// Loaded via a fallback chain of multiple sources.
    Multiple(Vec<CatalogSource>),
}

/// In-memory collection of provider templates with O(1) lookup by id.
///
/// # Examples
///
/// ```
/// use structout_providers::ProviderCatalog;
///
/// let catalog = ProviderCatalog::builtin();
/// assert_eq!(catalog.len(), 3);
///
/// let openai = catalog.get("openai").unwrap();
/// assert!(!openai.llm_schema_header.is_empty());
///
/// for id in catalog.providers() {
///     println!("  {}", id);
/// }
/// ```
#[derive(Debug)]
pub struct ProviderCatalog {
    configs: HashMap<String, ProviderConfig>,
    source: CatalogSource,
}

impl ProviderCatalog {
    /// Returns a new [`CatalogBuilder`] for configuring a fallback chain.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Returns the catalog of compiled-in presets (`openai`, `anthropic`,
    /// `gemini`).
    pub fn builtin() -> Self {
        let mut configs = HashMap::new();
        for config in presets::all() {
            configs.insert(config.provider.clone(), config);
        }
        Self {
            configs,
            source: CatalogSource::Builtin,
        }
    }

    /// Loads templates from a directory of `*.json`/`*.yaml`/`*.yml` files.
    ///
    /// Each file is parsed as a [`ProviderConfig`] and indexed by its
    /// `provider` field. Files with other extensions are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::IoError`] if the directory cannot be read or
    /// a file cannot be opened, or a parse error variant if any template is
    /// malformed.
    pub fn from_dir(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut configs = HashMap::new();

        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();
            let ext = file_path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("json") | Some("yaml") | Some("yml")) {
                let config = ProviderConfig::load(&file_path)?;
                debug!(provider = %config.provider, path = %file_path.display(), "loaded template");
                configs.insert(config.provider.clone(), config);
            }
        }

        Ok(Self {
            configs,
            source: CatalogSource::Directory(path.to_path_buf()),
        })
    }

    /// Loads a catalog holding the single template in `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::IoError`] if the file cannot be read, or a
    /// parse error variant if it is malformed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = ProviderConfig::load(path)?;

        let mut configs = HashMap::new();
        configs.insert(config.provider.clone(), config);

        Ok(Self {
            configs,
            source: CatalogSource::File(path.to_path_buf()),
        })
    }

    /// Looks up a template by provider id in O(1) time.
    pub fn get(&self, provider: &str) -> Option<&ProviderConfig> {
        self.configs.get(provider)
    }

    /// Looks up a template by provider id, failing on unknown ids.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownProvider`] when the catalog has no
    /// entry for `provider`.
    pub fn require(&self, provider: &str) -> Result<&ProviderConfig> {
        self.configs
            .get(provider)
            .ok_or_else(|| ProviderError::UnknownProvider(provider.to_string()))
    }

    /// Inserts a template, replacing any existing entry for the same id.
    pub fn insert(&mut self, config: ProviderConfig) {
        self.configs.insert(config.provider.clone(), config);
    }

    /// Returns `true` if the catalog contains a template for `provider`.
    pub fn contains(&self, provider: &str) -> bool {
        self.configs.contains_key(provider)
    }

    /// Returns the number of templates in the catalog.
    pub fn len(&self) -> usize {
        self.configs.len()
    }

    /// Returns `true` if the catalog contains no templates.
    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Returns an iterator over provider ids.
    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(|s| s.as_str())
    }

    /// Returns a reference to the source metadata.
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }
}

/// Builder for constructing a [`ProviderCatalog`] with a fallback chain.
///
/// Sources are tried in the order they are added. The first successful load
/// wins; if all fail, [`ProviderError::NoSourcesAvailable`] is returned.
///
/// # Example
///
/// ```no_run
/// use structout_providers::ProviderCatalog;
///
/// let catalog = ProviderCatalog::builder()
///     .from_dir("/etc/structout/providers/")
///     .with_builtin()
///     .build()
///     .unwrap();
/// ```
pub struct CatalogBuilder {
    sources: Vec<CatalogSource>,
}

impl CatalogBuilder {
    /// Creates a new builder with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Adds the compiled-in presets as a source. Always succeeds, so it
    /// should come last in a fallback chain.
    pub fn with_builtin(mut self) -> Self {
        self.sources.push(CatalogSource::Builtin);
        self
    }

    /// Adds a directory of template files as a source.
    pub fn from_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(CatalogSource::Directory(path.into()));
        self
    }

    /// Adds a single template file as a source.
    pub fn from_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(CatalogSource::File(path.into()));
        self
    }

    /// Attempts to load templates from configured sources in order.
    ///
    /// Returns the first successfully loaded catalog. If all sources fail,
    /// returns [`ProviderError::NoSourcesAvailable`].
    pub fn build(self) -> Result<ProviderCatalog> {
        if self.sources.is_empty() {
            return Err(ProviderError::NoSourcesAvailable);
        }

        let all_sources = self.sources.clone();

        for source in &self.sources {
            let result = match source {
                CatalogSource::Builtin => Ok(ProviderCatalog::builtin()),
                CatalogSource::Directory(path) => ProviderCatalog::from_dir(path),
                CatalogSource::File(path) => ProviderCatalog::from_file(path),
                CatalogSource::Multiple(_) => continue,
            };

            if let Ok(mut catalog) = result {
                catalog.source = CatalogSource::Multiple(all_sources);
                return Ok(catalog);
            }
        }

        Err(ProviderError::NoSourcesAvailable)
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_config(id: &str) -> ProviderConfig {
        ProviderConfig::new(id, "[]", format!("/v1/{id}"))
    }

    fn write_config(dir: &Path, config: &ProviderConfig) {
        let path = dir.join(format!("{}.json", config.provider));
        let mut f = std::fs::File::create(path).unwrap();
        serde_json::to_writer_pretty(&mut f, config).unwrap();
        f.flush().unwrap();
    }

    #[test]
    fn test_builtin_presets() {
        let catalog = ProviderCatalog::builtin();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.contains("openai"));
        assert!(catalog.contains("anthropic"));
        assert!(catalog.contains("gemini"));
    }

    #[test]
    fn test_from_dir() {
        let dir = std::env::temp_dir().join("so_prov_test_from_dir");
        std::fs::create_dir_all(&dir).unwrap();

        write_config(&dir, &test_config("alpha"));
        write_config(&dir, &test_config("beta"));
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let catalog = ProviderCatalog::from_dir(&dir).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("alpha"));
        assert!(catalog.contains("beta"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_require_unknown_provider() {
        let catalog = ProviderCatalog::builtin();
        let err = catalog.require("mystery").unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(id) if id == "mystery"));
    }

    #[test]
    fn test_builder_fallback_to_builtin() {
        let catalog = ProviderCatalog::builder()
            .from_dir("/nonexistent/dir/")
            .with_builtin()
            .build()
            .unwrap();
        assert!(catalog.contains("openai"));
        assert!(matches!(catalog.source(), CatalogSource::Multiple(_)));
    }

    #[test]
    fn test_builder_directory_overrides_builtin() {
        let dir = std::env::temp_dir().join("so_prov_test_builder_dir");
        std::fs::create_dir_all(&dir).unwrap();
        write_config(&dir, &test_config("openai"));

        let catalog = ProviderCatalog::builder()
            .from_dir(&dir)
            .with_builtin()
            .build()
            .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get("openai").unwrap().gen_ai_url_path_parameter,
            "/v1/openai"
        );

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_builder_all_fail() {
        let result = ProviderCatalog::builder()
            .from_dir("/nonexistent/dir1/")
            .from_file("/nonexistent/custom.json")
            .build();
        assert!(matches!(result, Err(ProviderError::NoSourcesAvailable)));
    }

    #[test]
    fn test_insert_and_iterate() {
        let mut catalog = ProviderCatalog::builtin();
        catalog.insert(test_config("custom"));
        assert_eq!(catalog.len(), 4);

        let mut ids: Vec<&str> = catalog.providers().collect();
        ids.sort();
        assert_eq!(ids, vec!["anthropic", "custom", "gemini", "openai"]);
    }
}
