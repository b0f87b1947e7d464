//! The six memory components and their formulas

use crate::config::{ModelConfig, OperationMode, Workload};
use crate::estimation::estimate::{Confidence, MemoryEstimate};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BYTES_PER_GB: f64 = 1e9;

/// Non-weight tensors (norms, embeddings, buffers) on top of raw weights
const PARAMETER_OVERHEAD: f64 = 1.2;

/// AdamW keeps two fp32 moments per parameter regardless of compute precision
const OPTIMIZER_BYTES_PER_PARAM: f64 = 8.0;

/// GB per 1024 tokens of batch * sequence
const INFERENCE_ACTIVATION_GB_PER_1K_TOKENS: f64 = 0.1;
const TRAINING_ACTIVATION_GB_PER_1K_TOKENS: f64 = 8.0;

const KV_DEFAULT_HIDDEN_SIZE: usize = 4096;
const KV_DEFAULT_NUM_LAYERS: usize = 32;
/// Grouped-query attention reduction applied to the full KV width
const KV_GQA_REDUCTION: f64 = 8.0;

const INFERENCE_FRAMEWORK_GB: f64 = 1.0;
const TRAINING_FRAMEWORK_GB: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryComponent {
    Parameters,
    Optimizer,
    Gradients,
    Activations,
    KvCache,
    FrameworkOverhead,
}

impl MemoryComponent {
    pub const ALL: [MemoryComponent; 6] = [
        MemoryComponent::Parameters,
        MemoryComponent::Optimizer,
        MemoryComponent::Gradients,
        MemoryComponent::Activations,
        MemoryComponent::KvCache,
        MemoryComponent::FrameworkOverhead,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MemoryComponent::Parameters => "Model parameters",
            MemoryComponent::Optimizer => "Optimizer state",
            MemoryComponent::Gradients => "Gradients",
            MemoryComponent::Activations => "Activations",
            MemoryComponent::KvCache => "KV cache",
            MemoryComponent::FrameworkOverhead => "Framework overhead",
        }
    }

    /// Whether the component occupies memory for this operation
    pub fn applies_to(self, operation: OperationMode) -> bool {
        match self {
            MemoryComponent::Optimizer | MemoryComponent::Gradients => operation.is_training(),
            MemoryComponent::KvCache => operation == OperationMode::Inference,
            MemoryComponent::Parameters
            | MemoryComponent::Activations
            | MemoryComponent::FrameworkOverhead => true,
        }
    }

    fn inapplicable_note(self) -> &'static str {
        match self {
            MemoryComponent::Optimizer => "No optimizer for inference",
            MemoryComponent::Gradients => "No gradients for inference",
            MemoryComponent::KvCache => "KV cache not used outside inference",
            _ => "Not used",
        }
    }

    /// Estimate this component, or a zero estimate when it does not apply
    pub fn estimate(self, config: &ModelConfig, workload: &Workload) -> MemoryEstimate {
        if !self.applies_to(workload.operation) {
            return MemoryEstimate::zero(self.inapplicable_note());
        }

        match self {
            MemoryComponent::Parameters => parameter_memory(config, workload),
            MemoryComponent::Optimizer => optimizer_memory(config),
            MemoryComponent::Gradients => gradient_memory(config, workload),
            MemoryComponent::Activations => activation_memory(workload),
            MemoryComponent::KvCache => kv_cache_memory(config, workload),
            MemoryComponent::FrameworkOverhead => framework_overhead(workload),
        }
    }
}

impl fmt::Display for MemoryComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn parameter_memory(config: &ModelConfig, workload: &Workload) -> MemoryEstimate {
    let bytes_per_param = workload.precision.bytes_per_param();
    let typical = config.total_params as f64 * bytes_per_param * PARAMETER_OVERHEAD / BYTES_PER_GB;

    MemoryEstimate::from_typical(
        typical,
        0.9,
        1.1,
        0.15,
        Confidence::High,
        vec![
            format!(
                "{} weights at {} bytes per parameter",
                workload.precision, bytes_per_param
            ),
            "Includes 20% overhead for non-weight tensors".to_string(),
        ],
    )
}

fn optimizer_memory(config: &ModelConfig) -> MemoryEstimate {
    let typical = config.total_params as f64 * OPTIMIZER_BYTES_PER_PARAM / BYTES_PER_GB;

    MemoryEstimate::from_typical(
        typical,
        0.8,
        1.2,
        0.3,
        Confidence::Medium,
        vec!["AdamW optimizer: two full-precision moments per parameter".to_string()],
    )
}

fn gradient_memory(config: &ModelConfig, workload: &Workload) -> MemoryEstimate {
    let typical =
        config.total_params as f64 * workload.precision.bytes_per_param() / BYTES_PER_GB;

    MemoryEstimate::from_typical(
        typical,
        0.85,
        1.15,
        0.25,
        Confidence::Medium,
        vec![format!("One {} gradient per parameter", workload.precision)],
    )
}

fn activation_memory(workload: &Workload) -> MemoryEstimate {
    let per_1k_tokens = if workload.operation.is_training() {
        TRAINING_ACTIVATION_GB_PER_1K_TOKENS
    } else {
        INFERENCE_ACTIVATION_GB_PER_1K_TOKENS
    };
    let tokens = workload.batch_size as f64 * workload.sequence_length as f64;
    let typical = per_1k_tokens * tokens / 1024.0;

    MemoryEstimate::from_typical(
        typical,
        0.5,
        1.5,
        0.5,
        Confidence::Low,
        vec![
            format!(
                "Batch {} x sequence {} tokens",
                workload.batch_size, workload.sequence_length
            ),
            "Depends heavily on attention implementation and checkpointing".to_string(),
        ],
    )
}

fn kv_cache_memory(config: &ModelConfig, workload: &Workload) -> MemoryEstimate {
    let hidden_size = config.hidden_size.unwrap_or(KV_DEFAULT_HIDDEN_SIZE) as f64;
    let num_layers = config.num_hidden_layers.unwrap_or(KV_DEFAULT_NUM_LAYERS) as f64;
    let bytes_per_entry = workload.precision.bytes_per_kv_entry();

    // Factor 2: separate key and value tensors
    let typical = 2.0
        * workload.batch_size as f64
        * workload.sequence_length as f64
        * hidden_size
        * bytes_per_entry
        * num_layers
        / KV_GQA_REDUCTION
        / BYTES_PER_GB;

    let mut notes = vec![format!(
        "Keys and values for {} layers at {} bytes per entry",
        num_layers, bytes_per_entry
    )];
    if config.hidden_size.is_none() || config.num_hidden_layers.is_none() {
        notes.push("Hidden size or layer count unknown, using 7B-class defaults".to_string());
    }

    MemoryEstimate::from_typical(typical, 0.85, 1.15, 0.2, Confidence::Medium, notes)
}

fn framework_overhead(workload: &Workload) -> MemoryEstimate {
    let base = if workload.operation.is_training() {
        TRAINING_FRAMEWORK_GB
    } else {
        INFERENCE_FRAMEWORK_GB
    };

    MemoryEstimate::from_typical(
        base,
        0.5,
        2.0,
        0.5,
        Confidence::Low,
        vec!["CUDA context, allocator fragmentation and runtime buffers".to_string()],
    )
}
