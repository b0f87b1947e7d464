pub mod model;
pub mod workload;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub use model::{ModelConfig, ModelConfigError, KNOWN_MODELS};
pub use workload::{OperationMode, ParseKnobError, Precision, Workload};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Caller-side settings for the calculator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workload: Workload,
    /// Root of the Hugging Face hub cache; `$HOME/.cache/huggingface/hub` when unset
    pub cache_dir: Option<String>,
    /// Available VRAM in GB to check estimates against
    pub budget_gb: Option<f64>,
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Config = serde_json::from_str(&contents)?;
        Ok(Config {
            workload: config.workload.sanitized(),
            ..config
        })
    }

    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map.into_iter().collect(),
            _ => HashMap::new(),
        }
    }

    pub fn from_dict(data: HashMap<String, serde_json::Value>) -> anyhow::Result<Self> {
        let json = serde_json::to_string(&data)?;
        Ok(serde_json::from_str(&json)?)
    }
}
