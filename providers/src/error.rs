//! Error types for provider catalog operations.
//!
//! Provides a unified error type covering all failure modes: I/O,
//! serialization, and catalog lookup.

use thiserror::Error;

/// Errors that can occur while loading or querying provider configurations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Lookup of a provider id that the catalog does not contain.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// All configured catalog sources failed.
    #[error("no provider sources available")]
    NoSourcesAvailable,
}

/// Convenience alias for results with [`ProviderError`].
pub type Result<T> = std::result::Result<T, ProviderError>;
