//! CLI command implementations

use super::EstimateArgs;
use anyhow::{Context, Result};
use serde::Serialize;
use vram_calc_rs::config::model::known_model_ids;
use vram_calc_rs::config::{Config, OperationMode, Precision, Workload, KNOWN_MODELS};
use vram_calc_rs::hardware::{check_budget, recommend_gpu, recommend_gpu_for_gb, BudgetCheck};
use vram_calc_rs::resolver::{
    parse_document, resolve_model_config_with_origin, resolve_with_source, LocalConfigSource,
    ResolvedConfig,
};
use vram_calc_rs::{calculate_vram, VramBreakdown};

#[derive(Serialize)]
struct EstimateReport<'a> {
    model: &'a ResolvedConfig,
    workload: &'a Workload,
    breakdown: &'a VramBreakdown,
    recommended_gpu: &'static str,
    budget: Option<BudgetCheck>,
}

fn load_settings(args: &EstimateArgs) -> Result<Config> {
    let mut settings = match &args.settings {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Config::default(),
    };

    if args.cache_dir.is_some() {
        settings.cache_dir = args.cache_dir.clone();
    }
    if args.budget.is_some() {
        settings.budget_gb = args.budget;
    }
    Ok(settings)
}

fn build_workload(args: &EstimateArgs, defaults: &Workload) -> Result<Workload> {
    let precision = match &args.precision {
        Some(p) => p.parse::<Precision>()?,
        None => defaults.precision,
    };
    let operation = match &args.operation {
        Some(o) => o.parse::<OperationMode>()?,
        None => defaults.operation,
    };

    Ok(Workload::from_raw(
        precision,
        operation,
        args.batch_size.unwrap_or(defaults.batch_size as i64),
        args.seq_len.unwrap_or(defaults.sequence_length as i64),
    ))
}

fn resolve(args: &EstimateArgs, settings: &Config) -> ResolvedConfig {
    match &args.config_json {
        Some(path) => {
            let document = std::fs::read_to_string(path)
                .map_err(|e| e.to_string())
                .and_then(|text| parse_document(&text).map_err(|e| e.to_string()));
            match document {
                Ok(document) => resolve_model_config_with_origin(&args.model, Some(&document)),
                Err(e) => {
                    tracing::warn!("ignoring {}: {}", path.display(), e);
                    resolve_model_config_with_origin(&args.model, None)
                }
            }
        }
        None => {
            let source = LocalConfigSource::new(settings.cache_dir.as_deref());
            resolve_with_source(&args.model, &source)
        }
    }
}

pub fn estimate(args: EstimateArgs) -> Result<()> {
    let settings = load_settings(&args)?;
    let workload = build_workload(&args, &settings.workload)?;

    let mut resolved = resolve(&args, &settings);
    if let Some(params) = args.params {
        resolved.config.total_params = params;
    }
    resolved
        .config
        .validate()
        .context("Invalid model configuration")?;

    let breakdown = calculate_vram(&resolved.config, &workload);
    let recommended_gpu = recommend_gpu(&breakdown.total);
    let budget = settings
        .budget_gb
        .map(|gb| check_budget(&breakdown.total, gb));

    if args.json {
        let report = EstimateReport {
            model: &resolved,
            workload: &workload,
            breakdown: &breakdown,
            recommended_gpu,
            budget,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&resolved, &workload, &breakdown, recommended_gpu, budget.as_ref());
    Ok(())
}

fn print_report(
    resolved: &ResolvedConfig,
    workload: &Workload,
    breakdown: &VramBreakdown,
    recommended_gpu: &str,
    budget: Option<&BudgetCheck>,
) {
    let config = &resolved.config;

    println!();
    println!("╔══════════════════════════════════════════════════════════════════════╗");
    println!("║  VRAM ESTIMATE: {}", config.model_id);
    println!("╚══════════════════════════════════════════════════════════════════════╝");
    println!();
    println!(
        "  Parameters: {:.2}B | Type: {} | Source: {}",
        config.params_billions(),
        config.model_type.as_deref().unwrap_or("unknown"),
        resolved.origin.description()
    );
    println!(
        "  Hidden: {} | Layers: {} | Heads: {} | KV heads: {}",
        display_opt(config.hidden_size),
        display_opt(config.num_hidden_layers),
        display_opt(config.num_attention_heads),
        display_opt(config.num_key_value_heads)
    );
    println!(
        "  Workload: {} {} | batch {} | sequence {}",
        workload.precision, workload.operation, workload.batch_size, workload.sequence_length
    );

    if resolved.is_estimated() {
        println!();
        println!("  ⚠️  Model configuration could not be loaded; values are estimated from the name.");
    }

    println!();
    println!(
        "  {:<20} {:>9} {:>9} {:>9} {:>9}  {}",
        "Component", "Min GB", "Typ GB", "Max GB", "Buffer", "Confidence"
    );
    println!("  {}", "─".repeat(68));
    for (component, estimate) in breakdown.components() {
        println!(
            "  {:<20} {:>9.2} {:>9.2} {:>9.2} {:>9.2}  {}",
            component.label(),
            estimate.minimum_gb,
            estimate.typical_gb,
            estimate.maximum_gb,
            estimate.safety_buffer_gb,
            estimate.confidence
        );
    }
    println!("  {}", "─".repeat(68));
    let total = &breakdown.total;
    println!(
        "  {:<20} {:>9.2} {:>9.2} {:>9.2} {:>9.2}  {}",
        "Total",
        total.minimum_gb,
        total.typical_gb,
        total.maximum_gb,
        total.safety_buffer_gb,
        total.confidence
    );

    println!();
    println!("  Safe requirement:  {:.2} GB", total.safe_requirement_gb());
    println!("  Recommended GPU:   {}", recommended_gpu);

    if let Some(check) = budget {
        let status = if check.fits { "✅" } else { "❌" };
        println!("  Budget:            {} {}", status, check.message);
    }
    println!();
}

fn display_opt(value: Option<usize>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

pub fn models() -> Result<()> {
    println!();
    println!("  Built-in model configurations:");
    println!();
    for id in known_model_ids() {
        let Some(config) = KNOWN_MODELS.get(id) else {
            continue;
        };
        println!(
            "  {:<30} {:>7.2}B  {:<8} hidden {:<5} layers {}",
            id,
            config.params_billions(),
            config.model_type.as_deref().unwrap_or("-"),
            display_opt(config.hidden_size),
            display_opt(config.num_hidden_layers)
        );
    }
    println!();
    Ok(())
}

pub fn recommend(gb: f64) -> Result<()> {
    if !gb.is_finite() || gb < 0.0 {
        anyhow::bail!("Memory requirement must be a non-negative number, got {}", gb);
    }
    println!("{}", recommend_gpu_for_gb(gb));
    Ok(())
}
