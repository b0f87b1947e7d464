//! Utility functions for locating model configuration files on disk
//!
//! This module provides common functionality for:
//! - Resolving the HuggingFace hub cache root
//! - Finding cached model snapshots
//! - Locating a model's `config.json` from an identifier or local path

use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Gets the HuggingFace hub cache root
///
/// # Arguments
/// * `override_dir` - Explicit cache root, used as-is when provided
///
/// # Returns
/// * `Option<PathBuf>` - `override_dir`, or `$HOME/.cache/huggingface/hub`
pub fn hub_cache_root(override_dir: Option<&str>) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        return Some(PathBuf::from(dir));
    }

    let home = std::env::var("HOME").ok()?;
    Some(
        PathBuf::from(home)
            .join(".cache")
            .join("huggingface")
            .join("hub"),
    )
}

/// Gets the cache directory for a specific model
///
/// # Arguments
/// * `model_id` - HuggingFace model name (e.g., "NousResearch/Llama-2-7b")
/// * `cache_root` - Hub cache root
///
/// # Returns
/// * `Option<PathBuf>` - Cache directory path if it exists
pub fn get_model_cache_dir(model_id: &str, cache_root: &Path) -> Option<PathBuf> {
    if !model_id.contains('/') {
        return None;
    }

    let cache_dir = cache_root.join(format!("models--{}", model_id.replace('/', "--")));
    if cache_dir.is_dir() {
        Some(cache_dir)
    } else {
        None
    }
}

/// Lists all snapshot directories for a model, newest first
pub fn list_model_snapshots(model_id: &str, cache_root: &Path) -> Vec<PathBuf> {
    let Some(cache_dir) = get_model_cache_dir(model_id, cache_root) else {
        return Vec::new();
    };

    let Ok(entries) = std::fs::read_dir(cache_dir.join("snapshots")) else {
        return Vec::new();
    };

    let mut snapshots: Vec<PathBuf> = entries
        .flatten()
        .filter(|e| e.file_type().ok().is_some_and(|ft| ft.is_dir()))
        .map(|e| e.path())
        .collect();

    // Sort by modification time (newest first)
    snapshots.sort_by(|a, b| {
        let a_time = a.metadata().ok().and_then(|m| m.modified().ok());
        let b_time = b.metadata().ok().and_then(|m| m.modified().ok());
        b_time.cmp(&a_time)
    });

    snapshots
}

/// Locates the `config.json` for a model
///
/// This function checks:
/// 1. If the identifier is a path to a JSON file
/// 2. If the identifier is a directory containing `config.json`
/// 3. The newest hub cache snapshot that contains `config.json`
///
/// # Returns
/// * `Some(PathBuf)` - Path to the config file if found
/// * `None` - If no config file can be located
pub fn find_config_file(model_id: &str, cache_root: Option<&Path>) -> Option<PathBuf> {
    let direct = Path::new(model_id);
    if direct.is_file() && direct.extension().is_some_and(|ext| ext == "json") {
        return Some(direct.to_path_buf());
    }

    if direct.is_dir() {
        let candidate = direct.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
    }

    list_model_snapshots(model_id, cache_root?)
        .into_iter()
        .map(|snapshot| snapshot.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}
