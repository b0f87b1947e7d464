//! VRAM estimation for transformer models
//!
//! This crate estimates the GPU memory needed to run or train a transformer
//! model from its architecture, numeric precision, workload type, batch size
//! and sequence length. Results are approximate, bounded estimates.
//!
//! ## Overview
//!
//! Data flows one way:
//! - identifier (+ optional raw config document) → [`ModelConfig`]
//! - [`ModelConfig`] + [`Workload`] → [`VramBreakdown`]
//! - total estimate → GPU recommendation
//!
//! ## Main Components
//!
//! - `resolver`: Known-model table, config documents and name heuristics
//! - `estimation`: Per-component memory formulas and aggregation
//! - `hardware`: GPU tiers and memory budget checks
//! - `config`: Model description, workload knobs and caller settings
//! - `utils`: Locating model config files on disk

pub mod config;
pub mod estimation;
pub mod hardware;
pub mod resolver;
pub mod utils;

pub use config::{Config, ModelConfig, OperationMode, Precision, Workload};
pub use estimation::{
    calculate_vram, calculate_vram_requirements, Confidence, MemoryComponent, MemoryEstimate,
    VramBreakdown,
};
pub use hardware::{check_budget, recommend_gpu};
pub use resolver::{
    resolve_model_config, resolve_model_config_with_origin, resolve_with_source, ConfigOrigin,
    ConfigSource, ResolvedConfig,
};

/// Library errors
pub use anyhow::{Error, Result};
