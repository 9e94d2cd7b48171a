use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use tft_pipeline::{BoundaryPolicy, PipelineConfig, TTestVariant};

#[derive(Parser)]
#[command(name = "tft-pipeline")]
#[command(about = "Consolidate, pair, stratify and summarise thyroid function tests")]
#[command(version)]
struct Cli {
    /// Directory holding the per-sheet exports
    #[arg(long)]
    input: Option<PathBuf>,
    /// Directory receiving the output tables and report
    #[arg(long)]
    output: Option<PathBuf>,
    /// JSON configuration file; flags given here take precedence
    #[arg(long)]
    config: Option<PathBuf>,
    /// Upper TSH reference limit
    #[arg(long)]
    upper_threshold: Option<f64>,
    /// Lower TSH reference limit
    #[arg(long)]
    lower_threshold: Option<f64>,
    /// Treatment of TSH values lying exactly on a threshold
    #[arg(long, value_enum)]
    boundary_policy: Option<BoundaryPolicy>,
    /// Two-sample t-test used for the sex comparison
    #[arg(long, value_enum)]
    t_test: Option<TTestVariant>,
    /// Warn instead of failing when a request number repeats within a measurement
    #[arg(long)]
    allow_duplicate_requests: bool,
}

impl Cli {
    /// Defaults, then the configuration file, then command line flags
    fn into_config(self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        if let Some(input) = self.input {
            config.ingest.input_dir = input;
        }
        if let Some(output) = self.output {
            config.output.output_dir = output;
        }
        if let Some(upper) = self.upper_threshold {
            config.classification.upper_threshold = upper;
        }
        if let Some(lower) = self.lower_threshold {
            config.classification.lower_threshold = lower;
        }
        if let Some(policy) = self.boundary_policy {
            config.classification.boundary_policy = policy;
        }
        if let Some(variant) = self.t_test {
            config.statistics.t_test = variant;
        }
        if self.allow_duplicate_requests {
            config.validate_unique_requests = false;
        }

        config.validate().context("Invalid pipeline configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Cli::parse().into_config()?;
    info!(
        "Reading {} and writing to {}",
        config.ingest.input_dir.display(),
        config.output.output_dir.display()
    );

    let output = tft_pipeline::run(&config).context("Pipeline run failed")?;

    println!("{}", output.report.render());
    println!("Files written:");
    for path in &output.written {
        println!("  {}", path.display());
    }
    Ok(())
}
