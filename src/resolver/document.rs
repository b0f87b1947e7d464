//! Reading architecture fields out of a raw `config.json`-style document

use crate::config::ModelConfig;
use crate::resolver::heuristics::{
    detect_model_type, estimate_hidden_size, estimate_intermediate_size, estimate_num_heads,
    estimate_num_kv_heads, estimate_num_layers, estimate_params_from_name,
};
use serde_json::{Map, Value};

pub const HIDDEN_SIZE: &str = "hidden_size";
pub const NUM_HIDDEN_LAYERS: &str = "num_hidden_layers";
pub const NUM_ATTENTION_HEADS: &str = "num_attention_heads";
pub const NUM_KEY_VALUE_HEADS: &str = "num_key_value_heads";
pub const INTERMEDIATE_SIZE: &str = "intermediate_size";
pub const VOCAB_SIZE: &str = "vocab_size";
pub const MODEL_TYPE: &str = "model_type";

/// Read a positive integer field. Missing, zero, negative, fractional and
/// non-numeric values all count as absent.
fn positive_field(document: &Map<String, Value>, key: &str) -> Option<usize> {
    let value = document.get(key)?;
    let number = match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && *f > 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;

    if number == 0 {
        None
    } else {
        usize::try_from(number).ok()
    }
}

fn string_field(document: &Map<String, Value>, key: &str) -> Option<String> {
    document
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Build a config from a document's fields, falling back to heuristics for
/// anything missing.
///
/// `total_params` always comes from the identifier: parameter counts are read
/// from naming conventions, not from the document. Missing head, KV-head and
/// feed-forward widths are estimated from the parameter-tier hidden size, never
/// from the document's own `hidden_size`.
pub fn resolve_from_object(model_id: &str, document: &Map<String, Value>) -> ModelConfig {
    let total_params = estimate_params_from_name(model_id);
    let estimated_hidden = estimate_hidden_size(total_params);
    let estimated_heads = estimate_num_heads(estimated_hidden);

    ModelConfig {
        model_id: model_id.to_string(),
        total_params,
        hidden_size: Some(positive_field(document, HIDDEN_SIZE).unwrap_or(estimated_hidden)),
        num_hidden_layers: Some(
            positive_field(document, NUM_HIDDEN_LAYERS)
                .unwrap_or_else(|| estimate_num_layers(total_params)),
        ),
        num_attention_heads: Some(
            positive_field(document, NUM_ATTENTION_HEADS).unwrap_or(estimated_heads),
        ),
        num_key_value_heads: Some(
            positive_field(document, NUM_KEY_VALUE_HEADS)
                .unwrap_or_else(|| estimate_num_kv_heads(estimated_heads)),
        ),
        intermediate_size: Some(
            positive_field(document, INTERMEDIATE_SIZE)
                .unwrap_or_else(|| estimate_intermediate_size(estimated_hidden)),
        ),
        vocab_size: positive_field(document, VOCAB_SIZE),
        model_type: Some(
            string_field(document, MODEL_TYPE).unwrap_or_else(|| detect_model_type(model_id)),
        ),
    }
}

/// Returns `None` when the document is not a JSON object
pub fn resolve_from_document(model_id: &str, document: &Value) -> Option<ModelConfig> {
    document
        .as_object()
        .map(|object| resolve_from_object(model_id, object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_document_fields() {
        let document = json!({
            "hidden_size": 5120,
            "num_hidden_layers": 40,
            "num_attention_heads": 40,
            "num_key_value_heads": 40,
            "intermediate_size": 13824,
            "vocab_size": 32000,
            "model_type": "llama"
        });

        let config = resolve_from_document("meta-llama/Llama-2-13b-hf", &document).unwrap();
        assert_eq!(config.total_params, 13_000_000_000);
        assert_eq!(config.hidden_size, Some(5120));
        assert_eq!(config.num_hidden_layers, Some(40));
        assert_eq!(config.num_attention_heads, Some(40));
        assert_eq!(config.num_key_value_heads, Some(40));
        assert_eq!(config.intermediate_size, Some(13824));
        assert_eq!(config.vocab_size, Some(32000));
        assert_eq!(config.model_type.as_deref(), Some("llama"));
    }

    #[test]
    fn test_sentinel_values_fall_back() {
        let document = json!({
            "hidden_size": 0,
            "num_hidden_layers": -3,
            "num_attention_heads": "n/a",
            "intermediate_size": 11008.5,
            "vocab_size": 0,
            "model_type": ""
        });

        let config = resolve_from_document("org/qwen-7b", &document).unwrap();
        assert_eq!(config.hidden_size, Some(4096));
        assert_eq!(config.num_hidden_layers, Some(32));
        assert_eq!(config.num_attention_heads, Some(32));
        assert_eq!(config.num_key_value_heads, Some(4));
        assert_eq!(config.intermediate_size, Some(16384));
        assert_eq!(config.vocab_size, None);
        assert_eq!(config.model_type.as_deref(), Some("qwen"));
        config.validate().unwrap();
    }

    #[test]
    fn test_coerces_numeric_strings_and_integral_floats() {
        let document = json!({ "hidden_size": "2048", "num_hidden_layers": 24.0 });
        let config = resolve_from_document("tiny", &document).unwrap();
        assert_eq!(config.hidden_size, Some(2048));
        assert_eq!(config.num_hidden_layers, Some(24));
        // Missing widths come from the 125M parameter tier (hidden 1024)
        assert_eq!(config.num_attention_heads, Some(8));
        assert_eq!(config.num_key_value_heads, Some(1));
        assert_eq!(config.intermediate_size, Some(4096));
    }

    #[test]
    fn test_huge_hidden_size_keeps_bounded_fallbacks() {
        let document = json!({ "hidden_size": 1u64 << 62 });
        let config = resolve_from_document("acme/x-7b", &document).unwrap();
        config.validate().unwrap();
        assert_eq!(config.num_attention_heads, Some(32));
        assert_eq!(config.num_key_value_heads, Some(4));
        assert_eq!(config.intermediate_size, Some(16384));
    }

    #[test]
    fn test_document_heads_do_not_drive_kv_fallback() {
        let document = json!({ "hidden_size": 5120, "num_attention_heads": 40 });
        let config = resolve_from_document("acme/llama-13b", &document).unwrap();
        assert_eq!(config.num_attention_heads, Some(40));
        assert_eq!(config.num_key_value_heads, Some(5));
        assert_eq!(config.intermediate_size, Some(20480));
    }

    #[test]
    fn test_total_params_ignores_document() {
        let document = json!({ "num_parameters": 8_000_000_000u64 });
        let config = resolve_from_document("mystery-model", &document).unwrap();
        assert_eq!(config.total_params, 125_000_000);
    }

    #[test]
    fn test_non_object_document() {
        assert!(resolve_from_document("x", &json!([1, 2, 3])).is_none());
        assert!(resolve_from_document("x", &Value::Null).is_none());
    }
}
