use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative reliability of an estimate, assigned per formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        })
    }
}

/// A bounded estimate of one memory component, in gigabytes (1e9 bytes).
///
/// Invariant: `minimum_gb <= typical_gb <= maximum_gb` and `safety_buffer_gb >= 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEstimate {
    pub minimum_gb: f64,
    pub typical_gb: f64,
    pub maximum_gb: f64,
    pub safety_buffer_gb: f64,
    pub confidence: Confidence,
    pub notes: Vec<String>,
}

impl MemoryEstimate {
    /// Scale a typical value into bounds. Factors must satisfy
    /// `min_factor <= 1 <= max_factor` and `buffer_factor >= 0`.
    pub(crate) fn from_typical(
        typical_gb: f64,
        min_factor: f64,
        max_factor: f64,
        buffer_factor: f64,
        confidence: Confidence,
        notes: Vec<String>,
    ) -> Self {
        Self {
            minimum_gb: typical_gb * min_factor,
            typical_gb,
            maximum_gb: typical_gb * max_factor,
            safety_buffer_gb: typical_gb * buffer_factor,
            confidence,
            notes,
        }
    }

    /// A component that does not apply to the workload
    pub fn zero(note: impl Into<String>) -> Self {
        Self {
            minimum_gb: 0.0,
            typical_gb: 0.0,
            maximum_gb: 0.0,
            safety_buffer_gb: 0.0,
            confidence: Confidence::High,
            notes: vec![note.into()],
        }
    }

    pub fn is_zero(&self) -> bool {
        self.typical_gb == 0.0 && self.maximum_gb == 0.0 && self.safety_buffer_gb == 0.0
    }

    /// Upper bound plus recommended margin
    pub fn safe_requirement_gb(&self) -> f64 {
        self.maximum_gb + self.safety_buffer_gb
    }

    pub fn is_well_ordered(&self) -> bool {
        self.minimum_gb <= self.typical_gb
            && self.typical_gb <= self.maximum_gb
            && self.safety_buffer_gb >= 0.0
    }
}
