pub mod profiles;
pub mod scaling;

pub use profiles::{recommend_gpu, recommend_gpu_for_gb, GpuTier, GPU_TIERS, MULTI_GPU};
pub use scaling::{check_budget, BudgetCheck, MAX_SAFE_UTILIZATION_PCT};
