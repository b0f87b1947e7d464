//! Workload knobs: numeric precision, operation mode, batch and sequence size

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_BATCH_SIZE: usize = 1;
pub const DEFAULT_SEQUENCE_LENGTH: usize = 2048;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseKnobError {
    #[error("unknown precision '{0}', expected one of: fp32, fp16, bf16, int8, int4")]
    UnknownPrecision(String),

    #[error("unknown operation '{0}', expected one of: inference, training, fine_tuning")]
    UnknownOperation(String),
}

/// Numeric format used for weights and activations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    Fp32,
    #[default]
    Fp16,
    Bf16,
    Int8,
    Int4,
}

impl Precision {
    pub const ALL: [Precision; 5] = [
        Precision::Fp32,
        Precision::Fp16,
        Precision::Bf16,
        Precision::Int8,
        Precision::Int4,
    ];

    /// Bytes needed to store a single parameter
    pub fn bytes_per_param(self) -> f64 {
        match self {
            Precision::Fp32 => 4.0,
            Precision::Fp16 | Precision::Bf16 => 2.0,
            Precision::Int8 => 1.0,
            Precision::Int4 => 0.5,
        }
    }

    /// Bytes per key/value cache entry. Quantized weights get an 8-bit cache,
    /// everything else a half-precision one.
    pub fn bytes_per_kv_entry(self) -> f64 {
        if self.is_quantized() {
            1.0
        } else {
            2.0
        }
    }

    pub fn is_quantized(self) -> bool {
        matches!(self, Precision::Int8 | Precision::Int4)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Fp32 => "fp32",
            Precision::Fp16 => "fp16",
            Precision::Bf16 => "bf16",
            Precision::Int8 => "int8",
            Precision::Int4 => "int4",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = ParseKnobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Precision::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseKnobError::UnknownPrecision(s.to_string()))
    }
}

/// What the model is being used for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationMode {
    #[default]
    Inference,
    Training,
    FineTuning,
}

impl OperationMode {
    pub const ALL: [OperationMode; 3] = [
        OperationMode::Inference,
        OperationMode::Training,
        OperationMode::FineTuning,
    ];

    /// Training and fine-tuning both keep optimizer state and gradients
    pub fn is_training(self) -> bool {
        !matches!(self, OperationMode::Inference)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperationMode::Inference => "inference",
            OperationMode::Training => "training",
            OperationMode::FineTuning => "fine_tuning",
        }
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationMode {
    type Err = ParseKnobError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "inference" => Ok(OperationMode::Inference),
            "training" => Ok(OperationMode::Training),
            "fine_tuning" | "finetuning" => Ok(OperationMode::FineTuning),
            _ => Err(ParseKnobError::UnknownOperation(s.to_string())),
        }
    }
}

/// Workload knobs for one calculation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workload {
    pub precision: Precision,
    pub operation: OperationMode,
    pub batch_size: usize,
    pub sequence_length: usize,
}

impl Default for Workload {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            operation: OperationMode::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
        }
    }
}

impl Workload {
    pub fn new(precision: Precision, operation: OperationMode) -> Self {
        Self {
            precision,
            operation,
            ..Default::default()
        }
    }

    /// Build a workload from raw, possibly invalid, sizes. Non-positive values
    /// fall back to the defaults (batch 1, sequence 2048).
    pub fn from_raw(
        precision: Precision,
        operation: OperationMode,
        batch_size: i64,
        sequence_length: i64,
    ) -> Self {
        let batch_size = clamp_positive(batch_size, DEFAULT_BATCH_SIZE, "batch_size");
        let sequence_length =
            clamp_positive(sequence_length, DEFAULT_SEQUENCE_LENGTH, "sequence_length");

        Self {
            precision,
            operation,
            batch_size,
            sequence_length,
        }
    }

    /// Replace zero sizes with the defaults
    pub fn sanitized(self) -> Self {
        Self {
            batch_size: nonzero_or_default(self.batch_size, DEFAULT_BATCH_SIZE, "batch_size"),
            sequence_length: nonzero_or_default(
                self.sequence_length,
                DEFAULT_SEQUENCE_LENGTH,
                "sequence_length",
            ),
            ..self
        }
    }
}

fn clamp_positive(value: i64, default: usize, name: &str) -> usize {
    if value > 0 {
        usize::try_from(value).unwrap_or(usize::MAX)
    } else {
        tracing::warn!("{} must be positive, got {}; using {}", name, value, default);
        default
    }
}

fn nonzero_or_default(value: usize, default: usize, name: &str) -> usize {
    if value == 0 {
        tracing::warn!("{} must be positive, got 0; using {}", name, default);
        default
    } else {
        value
    }
}
