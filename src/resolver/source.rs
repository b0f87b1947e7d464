//! Sources of raw model configuration documents

use crate::utils::model_utils::{find_config_file, hub_cache_root};
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("no configuration document found for '{0}'")]
    NotFound(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Supplies the raw configuration document for a model identifier.
///
/// Implementations may be slow; callers that need responsiveness run them off
/// their own main thread. The resolver treats every error the same way.
pub trait ConfigSource {
    fn fetch_raw_config(&self, model_id: &str) -> Result<Value, FetchError>;
}

/// Parse document text into a JSON value
pub fn parse_document(text: &str) -> Result<Value, FetchError> {
    Ok(serde_json::from_str(text)?)
}

/// Reads `config.json` from a local directory or the HuggingFace hub cache
#[derive(Debug, Clone, Default)]
pub struct LocalConfigSource {
    cache_root: Option<PathBuf>,
}

impl LocalConfigSource {
    /// Use `cache_dir` as the hub cache root, or the default under `$HOME`
    pub fn new(cache_dir: Option<&str>) -> Self {
        Self {
            cache_root: hub_cache_root(cache_dir),
        }
    }
}

impl ConfigSource for LocalConfigSource {
    fn fetch_raw_config(&self, model_id: &str) -> Result<Value, FetchError> {
        let path = find_config_file(model_id, self.cache_root.as_deref())
            .ok_or_else(|| FetchError::NotFound(model_id.to_string()))?;

        tracing::debug!("reading model config from {}", path.display());
        let text = std::fs::read_to_string(&path).map_err(|source| FetchError::Io {
            path: path.clone(),
            source,
        })?;
        parse_document(&text)
    }
}

/// In-memory documents keyed by model identifier
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    documents: HashMap<String, Value>,
}

impl StaticConfigSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, model_id: impl Into<String>, document: Value) -> Self {
        self.documents.insert(model_id.into(), document);
        self
    }
}

impl ConfigSource for StaticConfigSource {
    fn fetch_raw_config(&self, model_id: &str) -> Result<Value, FetchError> {
        self.documents
            .get(model_id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(model_id.to_string()))
    }
}
