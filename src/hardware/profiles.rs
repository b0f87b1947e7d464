//! GPU tiers and hardware recommendations

use crate::estimation::MemoryEstimate;

/// A recommendation tier: estimates whose safe requirement is below
/// `below_gb` map to `name`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuTier {
    pub below_gb: f64,
    pub name: &'static str,
}

/// Ascending thresholds, half-open: `[previous, below_gb)`
pub const GPU_TIERS: &[GpuTier] = &[
    GpuTier {
        below_gb: 8.0,
        name: "RTX 3060 (12GB)",
    },
    GpuTier {
        below_gb: 16.0,
        name: "RTX 4080 (16GB)",
    },
    GpuTier {
        below_gb: 24.0,
        name: "RTX 4090 (24GB)",
    },
    GpuTier {
        below_gb: 48.0,
        name: "A6000 (48GB)",
    },
];

pub const MULTI_GPU: &str = "Multiple high-end GPUs";

/// Map a safe requirement in GB to a hardware recommendation
pub fn recommend_gpu_for_gb(safe_requirement_gb: f64) -> &'static str {
    GPU_TIERS
        .iter()
        .find(|tier| safe_requirement_gb < tier.below_gb)
        .map(|tier| tier.name)
        .unwrap_or(MULTI_GPU)
}

/// Recommend hardware for a total estimate, using `maximum_gb + safety_buffer_gb`
pub fn recommend_gpu(total: &MemoryEstimate) -> &'static str {
    recommend_gpu_for_gb(total.safe_requirement_gb())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(recommend_gpu_for_gb(0.0), "RTX 3060 (12GB)");
        assert_eq!(recommend_gpu_for_gb(7.9), "RTX 3060 (12GB)");
        assert_eq!(recommend_gpu_for_gb(8.0), "RTX 4080 (16GB)");
        assert_eq!(recommend_gpu_for_gb(16.0), "RTX 4090 (24GB)");
        assert_eq!(recommend_gpu_for_gb(24.0), "A6000 (48GB)");
        assert_eq!(recommend_gpu_for_gb(47.99), "A6000 (48GB)");
        assert_eq!(recommend_gpu_for_gb(48.0), MULTI_GPU);
        assert_eq!(recommend_gpu_for_gb(1000.0), MULTI_GPU);
    }

    #[test]
    fn test_tiers_ascending() {
        assert!(GPU_TIERS.windows(2).all(|w| w[0].below_gb < w[1].below_gb));
    }
}
