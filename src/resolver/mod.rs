//! Config resolution: turn a model identifier (and optionally a raw config
//! document) into a best-effort `ModelConfig`.
//!
//! Resolution never fails. Lookup order is the known-model table, then the
//! document, then heuristics over the identifier string.

pub mod document;
pub mod heuristics;
pub mod source;

use crate::config::{ModelConfig, KNOWN_MODELS};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use document::resolve_from_document;
pub use heuristics::{detect_model_type, estimate_from_name, estimate_params_from_name};
pub use source::{parse_document, ConfigSource, FetchError, LocalConfigSource, StaticConfigSource};

/// Where a resolved config came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigOrigin {
    KnownModel,
    Document,
    NameHeuristic,
}

impl ConfigOrigin {
    pub fn description(self) -> &'static str {
        match self {
            ConfigOrigin::KnownModel => "built-in model table",
            ConfigOrigin::Document => "model configuration document",
            ConfigOrigin::NameHeuristic => "estimated from model name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub config: ModelConfig,
    pub origin: ConfigOrigin,
}

impl ResolvedConfig {
    /// True when every field came from name heuristics
    pub fn is_estimated(&self) -> bool {
        self.origin == ConfigOrigin::NameHeuristic
    }
}

/// Exact, case-sensitive lookup in the known-model table
pub fn lookup_known(model_id: &str) -> Option<ModelConfig> {
    KNOWN_MODELS.get(model_id).cloned()
}

/// Resolve a config and report which source produced it
pub fn resolve_model_config_with_origin(
    model_id: &str,
    document: Option<&Value>,
) -> ResolvedConfig {
    if let Some(config) = lookup_known(model_id) {
        tracing::debug!("'{}' found in known model table", model_id);
        return ResolvedConfig {
            config,
            origin: ConfigOrigin::KnownModel,
        };
    }

    if let Some(document) = document {
        if let Some(config) = resolve_from_document(model_id, document) {
            tracing::debug!("'{}' resolved from configuration document", model_id);
            return ResolvedConfig {
                config,
                origin: ConfigOrigin::Document,
            };
        }
        tracing::warn!(
            "configuration document for '{}' is not a JSON object, estimating from name",
            model_id
        );
    }

    ResolvedConfig {
        config: estimate_from_name(model_id),
        origin: ConfigOrigin::NameHeuristic,
    }
}

/// Resolve a config from the identifier and an optional raw document
pub fn resolve_model_config(model_id: &str, document: Option<&Value>) -> ModelConfig {
    resolve_model_config_with_origin(model_id, document).config
}

/// Resolve a config, fetching the document from `source` when the model is
/// not in the known table. Fetch errors degrade to the name heuristic.
pub fn resolve_with_source(model_id: &str, source: &dyn ConfigSource) -> ResolvedConfig {
    if let Some(config) = lookup_known(model_id) {
        return ResolvedConfig {
            config,
            origin: ConfigOrigin::KnownModel,
        };
    }

    match source.fetch_raw_config(model_id) {
        Ok(document) => resolve_model_config_with_origin(model_id, Some(&document)),
        Err(e) => {
            tracing::warn!("could not load config for '{}': {}", model_id, e);
            resolve_model_config_with_origin(model_id, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_known_is_exact() {
        assert!(lookup_known("bert-base-uncased").is_some());
        assert!(lookup_known("BERT-base-uncased").is_none());
        assert!(lookup_known("bert-base").is_none());
    }

    #[test]
    fn test_known_model_wins_over_document() {
        let document = json!({ "hidden_size": 1 });
        let resolved =
            resolve_model_config_with_origin("mistralai/Mistral-7B-v0.1", Some(&document));
        assert_eq!(resolved.origin, ConfigOrigin::KnownModel);
        assert_eq!(resolved.config.hidden_size, Some(4096));
    }

    #[test]
    fn test_malformed_document_degrades() {
        let resolved = resolve_model_config_with_origin("acme/tool-3b", Some(&json!("oops")));
        assert!(resolved.is_estimated());
        assert_eq!(resolved.config.total_params, 3_000_000_000);
    }

    #[test]
    fn test_source_failure_degrades() {
        let source = StaticConfigSource::new();
        let resolved = resolve_with_source("acme/tool-13b", &source);
        assert!(resolved.is_estimated());
        assert_eq!(resolved.config.hidden_size, Some(5120));
    }

    #[test]
    fn test_source_document_used() {
        let source =
            StaticConfigSource::new().with_document("acme/tool-13b", json!({"hidden_size": 6144}));
        let resolved = resolve_with_source("acme/tool-13b", &source);
        assert_eq!(resolved.origin, ConfigOrigin::Document);
        assert_eq!(resolved.config.hidden_size, Some(6144));
        assert_eq!(resolved.config.total_params, 13_000_000_000);
    }
}
