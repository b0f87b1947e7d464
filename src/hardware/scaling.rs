//! Checking estimates against an available memory budget

use crate::estimation::MemoryEstimate;
use serde::{Deserialize, Serialize};

/// Estimates using more than this share of the budget are considered unsafe
pub const MAX_SAFE_UTILIZATION_PCT: f64 = 85.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCheck {
    pub fits: bool,
    pub required_gb: f64,
    pub budget_gb: f64,
    pub utilization_pct: f64,
    pub message: String,
}

/// Validate that an estimate is safe to run within `budget_gb` of VRAM
pub fn check_budget(total: &MemoryEstimate, budget_gb: f64) -> BudgetCheck {
    let required_gb = total.safe_requirement_gb();

    if budget_gb.is_nan() || budget_gb <= 0.0 {
        return BudgetCheck {
            fits: false,
            required_gb,
            budget_gb,
            utilization_pct: f64::INFINITY,
            message: format!("Budget must be positive, got {}GB", budget_gb),
        };
    }

    let utilization_pct = required_gb / budget_gb * 100.0;

    let (fits, message) = if required_gb > budget_gb {
        (
            false,
            format!(
                "Exceeds budget by {:.1}GB ({:.1}GB > {:.1}GB)",
                required_gb - budget_gb,
                required_gb,
                budget_gb
            ),
        )
    } else if utilization_pct > MAX_SAFE_UTILIZATION_PCT {
        (
            false,
            format!(
                "Uses {:.1}% of budget (unsafe, recommend <{:.0}%)",
                utilization_pct, MAX_SAFE_UTILIZATION_PCT
            ),
        )
    } else {
        (
            true,
            format!(
                "Fits ({:.1}GB / {:.1}GB, {:.1}% utilization)",
                required_gb, budget_gb, utilization_pct
            ),
        )
    };

    BudgetCheck {
        fits,
        required_gb,
        budget_gb,
        utilization_pct,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimate_with_safe(safe: f64) -> MemoryEstimate {
        MemoryEstimate {
            minimum_gb: 0.0,
            typical_gb: safe,
            maximum_gb: safe,
            safety_buffer_gb: 0.0,
            confidence: crate::estimation::Confidence::Medium,
            notes: vec![],
        }
    }

    #[test]
    fn test_fits() {
        let check = check_budget(&estimate_with_safe(10.0), 24.0);
        assert!(check.fits);
        assert!(check.message.starts_with("Fits"));
    }

    #[test]
    fn test_over_budget() {
        let check = check_budget(&estimate_with_safe(30.0), 24.0);
        assert!(!check.fits);
        assert!(check.message.contains("Exceeds budget by 6.0GB"));
    }

    #[test]
    fn test_high_utilization_is_unsafe() {
        let check = check_budget(&estimate_with_safe(22.0), 24.0);
        assert!(!check.fits);
        assert!(check.utilization_pct > MAX_SAFE_UTILIZATION_PCT);
    }

    #[test]
    fn test_non_positive_budget() {
        assert!(!check_budget(&estimate_with_safe(1.0), 0.0).fits);
        assert!(!check_budget(&estimate_with_safe(1.0), f64::NAN).fits);
    }
}
