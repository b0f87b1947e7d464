//! Breakdown assembly and total aggregation

use crate::config::{ModelConfig, OperationMode, Precision, Workload};
use crate::estimation::components::MemoryComponent;
use crate::estimation::estimate::{Confidence, MemoryEstimate};
use serde::{Deserialize, Serialize};

/// Global margin on top of per-component buffers, as a fraction of the typical total
const TOTAL_UNCERTAINTY_MARGIN: f64 = 0.2;

/// Full result of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VramBreakdown {
    pub parameters: MemoryEstimate,
    pub optimizer: MemoryEstimate,
    pub gradients: MemoryEstimate,
    pub activations: MemoryEstimate,
    pub kv_cache: MemoryEstimate,
    pub framework_overhead: MemoryEstimate,
    pub total: MemoryEstimate,
}

impl VramBreakdown {
    pub fn get(&self, component: MemoryComponent) -> &MemoryEstimate {
        match component {
            MemoryComponent::Parameters => &self.parameters,
            MemoryComponent::Optimizer => &self.optimizer,
            MemoryComponent::Gradients => &self.gradients,
            MemoryComponent::Activations => &self.activations,
            MemoryComponent::KvCache => &self.kv_cache,
            MemoryComponent::FrameworkOverhead => &self.framework_overhead,
        }
    }

    /// The six components in fixed order
    pub fn components(&self) -> [(MemoryComponent, &MemoryEstimate); 6] {
        MemoryComponent::ALL.map(|component| (component, self.get(component)))
    }
}

/// Sum the bounds of every component and add the global margin to the buffer
pub fn total_memory(components: &[MemoryEstimate]) -> MemoryEstimate {
    let minimum_gb: f64 = components.iter().map(|c| c.minimum_gb).sum();
    let typical_gb: f64 = components.iter().map(|c| c.typical_gb).sum();
    let maximum_gb: f64 = components.iter().map(|c| c.maximum_gb).sum();
    let buffers: f64 = components.iter().map(|c| c.safety_buffer_gb).sum();

    MemoryEstimate {
        minimum_gb,
        typical_gb,
        maximum_gb,
        safety_buffer_gb: buffers + typical_gb * TOTAL_UNCERTAINTY_MARGIN,
        confidence: Confidence::Medium,
        notes: vec![
            "Total VRAM requirement".to_string(),
            "Safety buffer includes an extra 20% of the typical total".to_string(),
        ],
    }
}

/// Estimate the VRAM needed to run `config` under `workload`
pub fn calculate_vram(config: &ModelConfig, workload: &Workload) -> VramBreakdown {
    let [parameters, optimizer, gradients, activations, kv_cache, framework_overhead] =
        MemoryComponent::ALL.map(|component| component.estimate(config, workload));

    let total = total_memory(&[
        parameters.clone(),
        optimizer.clone(),
        gradients.clone(),
        activations.clone(),
        kv_cache.clone(),
        framework_overhead.clone(),
    ]);

    tracing::debug!(
        "{} ({} {}, batch {}, seq {}): typical {:.2} GB",
        config.model_id,
        workload.precision,
        workload.operation,
        workload.batch_size,
        workload.sequence_length,
        total.typical_gb
    );

    VramBreakdown {
        parameters,
        optimizer,
        gradients,
        activations,
        kv_cache,
        framework_overhead,
        total,
    }
}

/// Positional form of [`calculate_vram`]
pub fn calculate_vram_requirements(
    config: &ModelConfig,
    precision: Precision,
    operation: OperationMode,
    batch_size: usize,
    sequence_length: usize,
) -> VramBreakdown {
    calculate_vram(
        config,
        &Workload {
            precision,
            operation,
            batch_size,
            sequence_length,
        },
    )
}
