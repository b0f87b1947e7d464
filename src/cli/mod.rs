pub mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vram_calc")]
#[command(about = "Estimate GPU memory for transformer inference and training", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    /// Model identifier (e.g. "mistralai/Mistral-7B-v0.1") or local model directory
    #[arg(long)]
    pub model: String,
    /// Read architecture fields from this config.json instead of the local cache
    #[arg(long)]
    pub config_json: Option<PathBuf>,
    /// Numeric precision: fp32, fp16, bf16, int8, int4
    #[arg(long)]
    pub precision: Option<String>,
    /// Operation: inference, training, fine_tuning
    #[arg(long)]
    pub operation: Option<String>,
    /// Batch size (non-positive values fall back to 1)
    #[arg(long, allow_hyphen_values = true)]
    pub batch_size: Option<i64>,
    /// Sequence length in tokens (non-positive values fall back to 2048)
    #[arg(long, allow_hyphen_values = true)]
    pub seq_len: Option<i64>,
    /// Override the total parameter count
    #[arg(long)]
    pub params: Option<u64>,
    /// Available VRAM in GB to check the estimate against
    #[arg(long)]
    pub budget: Option<f64>,
    /// Settings file with default workload and cache location
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// HuggingFace hub cache root
    #[arg(long)]
    pub cache_dir: Option<String>,
    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate VRAM for a model and workload
    Estimate(EstimateArgs),
    /// List models with built-in configurations
    Models,
    /// Recommend a GPU for a memory requirement
    Recommend {
        /// Required memory in GB (upper bound plus safety buffer)
        #[arg(long)]
        gb: f64,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate(args) => commands::estimate(args),
        Commands::Models => commands::models(),
        Commands::Recommend { gb } => commands::recommend(gb),
    }
}
