use serde_json::json;
use std::fs;
use vram_calc_rs::resolver::{
    estimate_from_name, lookup_known, resolve_from_document, LocalConfigSource,
};
use vram_calc_rs::{
    resolve_model_config, resolve_model_config_with_origin, resolve_with_source, ConfigOrigin,
};

#[test]
fn test_known_bert() {
    let config = resolve_model_config("bert-base-uncased", None);
    assert_eq!(config.total_params, 110_000_000);
    assert_eq!(config.hidden_size, Some(768));
    assert_eq!(config.num_hidden_layers, Some(12));
    assert_eq!(config.vocab_size, Some(30522));
}

#[test]
fn test_name_heuristic_70b() {
    let config = resolve_model_config("some-org/foo-70b-chat", None);
    assert_eq!(config.total_params, 70_000_000_000);
    assert_eq!(config.hidden_size, Some(8192));
}

#[test]
fn test_known_lookup_is_case_sensitive() {
    assert!(lookup_known("google/flan-t5-large").is_some());

    // Same model, different casing, goes through heuristics instead
    let resolved = resolve_model_config_with_origin("Google/Flan-T5-Large", None);
    assert_eq!(resolved.origin, ConfigOrigin::NameHeuristic);
    assert_eq!(resolved.config.total_params, 350_000_000);
    assert_eq!(resolved.config.model_type.as_deref(), Some("t5"));
}

#[test]
fn test_document_resolution() {
    let document = json!({
        "hidden_size": 3072,
        "num_hidden_layers": 28,
        "num_attention_heads": 24,
        "num_key_value_heads": 8,
        "intermediate_size": 8192,
        "vocab_size": 128256,
        "model_type": "llama"
    });

    let resolved =
        resolve_model_config_with_origin("meta-llama/Llama-3.2-3B-Instruct", Some(&document));
    assert_eq!(resolved.origin, ConfigOrigin::Document);
    assert!(!resolved.is_estimated());

    let config = resolved.config;
    assert_eq!(config.total_params, 3_000_000_000);
    assert_eq!(config.hidden_size, Some(3072));
    assert_eq!(config.num_hidden_layers, Some(28));
    assert_eq!(config.num_key_value_heads, Some(8));
    assert_eq!(config.vocab_size, Some(128256));
    assert_eq!(config.model_type.as_deref(), Some("llama"));
}

#[test]
fn test_empty_document_matches_name_estimate_dimensions() {
    let from_document = resolve_from_document("acme/llama-13b", &json!({})).unwrap();
    let from_name = estimate_from_name("acme/llama-13b");

    assert_eq!(from_document.total_params, from_name.total_params);
    assert_eq!(from_document.hidden_size, from_name.hidden_size);
    assert_eq!(from_document.num_hidden_layers, from_name.num_hidden_layers);
    assert_eq!(from_document.num_attention_heads, from_name.num_attention_heads);
    assert_eq!(from_document.num_key_value_heads, from_name.num_key_value_heads);
    assert_eq!(from_document.intermediate_size, from_name.intermediate_size);
    assert_eq!(from_document.model_type, from_name.model_type);
}

#[test]
fn test_resolution_never_fails() {
    let long_id = "x".repeat(4096);
    for model_id in ["", "   ", "🙂", "a/b/c/d", "../../etc/passwd", long_id.as_str()] {
        let config = resolve_model_config(model_id, Some(&json!(null)));
        config.validate().unwrap();
    }
}

#[test]
fn test_local_source_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let snapshot = root
        .path()
        .join("models--acme--widget-7b")
        .join("snapshots")
        .join("0123abcd");
    fs::create_dir_all(&snapshot).unwrap();
    fs::write(
        snapshot.join("config.json"),
        r#"{"hidden_size": 3584, "num_hidden_layers": 28, "model_type": "qwen2"}"#,
    )
    .unwrap();

    let root_dir = root.path().to_string_lossy().to_string();
    let source = LocalConfigSource::new(Some(root_dir.as_str()));

    let resolved = resolve_with_source("acme/widget-7b", &source);
    assert_eq!(resolved.origin, ConfigOrigin::Document);
    assert_eq!(resolved.config.hidden_size, Some(3584));
    assert_eq!(resolved.config.num_hidden_layers, Some(28));
    assert_eq!(resolved.config.model_type.as_deref(), Some("qwen2"));
    assert_eq!(resolved.config.total_params, 7_000_000_000);
}

#[test]
fn test_local_source_malformed_file_degrades() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    let model_id = dir.path().to_string_lossy().to_string();
    let source = LocalConfigSource::new(None);
    let resolved = resolve_with_source(&model_id, &source);
    assert!(resolved.is_estimated());
}

#[test]
fn test_known_model_skips_source() {
    let root = tempfile::tempdir().unwrap();
    let root_dir = root.path().to_string_lossy().to_string();
    let source = LocalConfigSource::new(Some(root_dir.as_str()));

    let resolved = resolve_with_source("mistralai/Mistral-7B-v0.1", &source);
    assert_eq!(resolved.origin, ConfigOrigin::KnownModel);
    assert_eq!(resolved.config.intermediate_size, Some(14336));
}
