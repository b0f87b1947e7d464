//! Name- and size-based estimators for missing architecture fields

use crate::config::ModelConfig;

/// Parameter-count markers checked against the lowercased identifier, first match wins
const PARAM_MARKERS: &[(&str, u64)] = &[
    ("70b", 70_000_000_000),
    ("13b", 13_000_000_000),
    ("7b", 7_000_000_000),
    ("3b", 3_000_000_000),
    ("1.3b", 1_300_000_000),
    ("large", 350_000_000),
    ("base", 110_000_000),
];

pub const DEFAULT_PARAMS: u64 = 125_000_000;

const FAMILY_MARKERS: &[&str] = &["llama", "mistral", "qwen", "t5", "bert", "gpt"];

pub const DEFAULT_FAMILY: &str = "transformer";

/// (exclusive lower bound on total params, hidden size, layer count), descending
const SIZE_TIERS: &[(u64, usize, usize)] = &[
    (50_000_000_000, 8192, 80),
    (10_000_000_000, 5120, 48),
    (1_000_000_000, 4096, 32),
    (500_000_000, 2048, 24),
    (100_000_000, 1024, 12),
];

const SMALLEST_HIDDEN_SIZE: usize = 768;
const SMALLEST_NUM_LAYERS: usize = 6;

/// Estimate the parameter count from naming conventions like "llama-2-7b"
pub fn estimate_params_from_name(model_id: &str) -> u64 {
    let lower = model_id.to_lowercase();
    PARAM_MARKERS
        .iter()
        .find(|(marker, _)| lower.contains(marker))
        .map(|&(_, params)| params)
        .unwrap_or(DEFAULT_PARAMS)
}

/// Detect the model family tag from the identifier
pub fn detect_model_type(model_id: &str) -> String {
    let lower = model_id.to_lowercase();
    FAMILY_MARKERS
        .iter()
        .find(|family| lower.contains(*family))
        .copied()
        .unwrap_or(DEFAULT_FAMILY)
        .to_string()
}

fn size_tier(total_params: u64) -> Option<&'static (u64, usize, usize)> {
    SIZE_TIERS.iter().find(|(bound, _, _)| total_params > *bound)
}

pub fn estimate_hidden_size(total_params: u64) -> usize {
    size_tier(total_params)
        .map(|&(_, hidden, _)| hidden)
        .unwrap_or(SMALLEST_HIDDEN_SIZE)
}

pub fn estimate_num_layers(total_params: u64) -> usize {
    size_tier(total_params)
        .map(|&(_, _, layers)| layers)
        .unwrap_or(SMALLEST_NUM_LAYERS)
}

/// Head count assuming head dimension 128, then 64, else 12 heads
pub fn estimate_num_heads(hidden_size: usize) -> usize {
    if hidden_size % 128 == 0 {
        hidden_size / 128
    } else if hidden_size % 64 == 0 {
        hidden_size / 64
    } else {
        12
    }
}

/// Grouped-query attention approximation: one KV head per eight query heads
pub fn estimate_num_kv_heads(num_heads: usize) -> usize {
    (num_heads / 8).max(1)
}

/// Feed-forward width as four times the hidden size, saturating at `usize::MAX`
pub fn estimate_intermediate_size(hidden_size: usize) -> usize {
    hidden_size.saturating_mul(4)
}

/// Build a config purely from the identifier string
pub fn estimate_from_name(model_id: &str) -> ModelConfig {
    let total_params = estimate_params_from_name(model_id);
    let hidden_size = estimate_hidden_size(total_params);
    let num_heads = estimate_num_heads(hidden_size);

    ModelConfig {
        model_id: model_id.to_string(),
        total_params,
        hidden_size: Some(hidden_size),
        num_hidden_layers: Some(estimate_num_layers(total_params)),
        num_attention_heads: Some(num_heads),
        num_key_value_heads: Some(estimate_num_kv_heads(num_heads)),
        intermediate_size: Some(estimate_intermediate_size(hidden_size)),
        vocab_size: None,
        model_type: Some(detect_model_type(model_id)),
    }
}
