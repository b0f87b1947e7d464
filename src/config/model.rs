use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelConfigError {
    #[error("total_params must be greater than zero for model '{0}'")]
    ZeroParams(String),

    #[error("{field} must be greater than zero when present (model '{model_id}')")]
    ZeroField {
        model_id: String,
        field: &'static str,
    },
}

/// Architectural description of a transformer model.
///
/// Optional fields are `None` when the value is unknown; the estimator then
/// substitutes a derived default. They are never `Some(0)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_id: String,
    pub total_params: u64,
    pub hidden_size: Option<usize>,
    pub num_hidden_layers: Option<usize>,
    pub num_attention_heads: Option<usize>,
    pub num_key_value_heads: Option<usize>,
    pub intermediate_size: Option<usize>,
    pub vocab_size: Option<usize>,
    pub model_type: Option<String>,
}

impl ModelConfig {
    /// A config that only knows its parameter count
    pub fn new(model_id: impl Into<String>, total_params: u64) -> Self {
        Self {
            model_id: model_id.into(),
            total_params,
            hidden_size: None,
            num_hidden_layers: None,
            num_attention_heads: None,
            num_key_value_heads: None,
            intermediate_size: None,
            vocab_size: None,
            model_type: None,
        }
    }

    pub fn with_hidden_size(mut self, hidden_size: usize) -> Self {
        self.hidden_size = Some(hidden_size);
        self
    }

    pub fn with_num_hidden_layers(mut self, num_hidden_layers: usize) -> Self {
        self.num_hidden_layers = Some(num_hidden_layers);
        self
    }

    /// Check that `total_params` and every present dimension are positive
    pub fn validate(&self) -> Result<(), ModelConfigError> {
        if self.total_params == 0 {
            return Err(ModelConfigError::ZeroParams(self.model_id.clone()));
        }

        let fields = [
            ("hidden_size", self.hidden_size),
            ("num_hidden_layers", self.num_hidden_layers),
            ("num_attention_heads", self.num_attention_heads),
            ("num_key_value_heads", self.num_key_value_heads),
            ("intermediate_size", self.intermediate_size),
            ("vocab_size", self.vocab_size),
        ];

        for (field, value) in fields {
            if value == Some(0) {
                return Err(ModelConfigError::ZeroField {
                    model_id: self.model_id.clone(),
                    field,
                });
            }
        }

        Ok(())
    }

    /// Parameter count in billions, for display
    pub fn params_billions(&self) -> f64 {
        self.total_params as f64 / 1e9
    }
}

/// Fully specified configurations for well-known model identifiers.
///
/// Keys are matched exactly (case-sensitive).
pub static KNOWN_MODELS: Lazy<HashMap<String, ModelConfig>> = Lazy::new(|| {
    let mut models = HashMap::new();

    models.insert(
        "mistralai/Mistral-7B-v0.1".to_string(),
        ModelConfig {
            model_id: "mistralai/Mistral-7B-v0.1".to_string(),
            total_params: 7_000_000_000,
            hidden_size: Some(4096),
            num_hidden_layers: Some(32),
            num_attention_heads: Some(32),
            num_key_value_heads: Some(8),
            intermediate_size: Some(14336),
            vocab_size: Some(32000),
            model_type: Some("mistral".to_string()),
        },
    );

    models.insert(
        "google/flan-t5-large".to_string(),
        ModelConfig {
            model_id: "google/flan-t5-large".to_string(),
            total_params: 770_000_000,
            hidden_size: Some(1024),
            num_hidden_layers: Some(24),
            num_attention_heads: Some(16),
            num_key_value_heads: Some(16),
            intermediate_size: Some(2816),
            vocab_size: Some(32128),
            model_type: Some("t5".to_string()),
        },
    );

    models.insert(
        "bert-base-uncased".to_string(),
        ModelConfig {
            model_id: "bert-base-uncased".to_string(),
            total_params: 110_000_000,
            hidden_size: Some(768),
            num_hidden_layers: Some(12),
            num_attention_heads: Some(12),
            num_key_value_heads: Some(12),
            intermediate_size: Some(3072),
            vocab_size: Some(30522),
            model_type: Some("bert".to_string()),
        },
    );

    models
});

/// Known model identifiers in sorted order
pub fn known_model_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = KNOWN_MODELS.keys().map(String::as_str).collect();
    ids.sort_unstable();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_models_are_valid() {
        for (id, config) in KNOWN_MODELS.iter() {
            assert_eq!(id, &config.model_id);
            config.validate().unwrap();
        }
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = ModelConfig::new("empty", 0);
        assert_eq!(
            config.validate(),
            Err(ModelConfigError::ZeroParams("empty".to_string()))
        );

        let config = ModelConfig::new("tiny", 1_000).with_hidden_size(0);
        assert!(matches!(
            config.validate(),
            Err(ModelConfigError::ZeroField {
                field: "hidden_size",
                ..
            })
        ));
    }

    #[test]
    fn test_known_model_ids_sorted() {
        let ids = known_model_ids();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], "bert-base-uncased");
    }
}
