use clap::Parser;
use common::config::Config;
use serde_json::Value;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::{
    error::GenericError,
    loader::{load_records, preview_records},
    table::IntoTables,
    writer::{CsvDirectorySink, TableWriter},
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "target/debug/config/total_config.yaml")]
    pub config: PathBuf,
}

/// Turns a batch of raw records into a set of accumulated views.
pub trait RecordNormalizer {
    type Output: IntoTables;

    fn normalize(&self, records: &[Value]) -> Self::Output;
}

pub fn initialize_executable() -> Result<Config, GenericError> {
    let args = Args::parse();
    println!("Loading config from: {:?}", args.config);
    let config = Config::load_or_default(&args.config)?;

    init_tracing(&config.common.log_level);
    tracing::debug!("Loaded config: {:#?}", config);

    Ok(config)
}

/// Installs the fmt subscriber; `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load, normalize, tabulate and write one batch. Returns the written file paths.
pub fn run_batch<N: RecordNormalizer>(
    config: &Config,
    normalizer: &N,
) -> Result<Vec<PathBuf>, GenericError> {
    tracing::info!(
        project = %config.common.project_name,
        "Starting batch for {:?}",
        config.common.input_path
    );
    let records = load_records(&config.common.input_path);
    let tables = normalizer.normalize(&records).into_tables();

    let sink = CsvDirectorySink::from_config(&config.writer)?;
    let mut writer = TableWriter::new(sink, config.writer.strict_optional_tables);
    let written = writer.write_all(&tables)?;

    Ok(written)
}

pub fn run_preview(config: &Config) -> Result<(), GenericError> {
    let records = load_records(&config.common.input_path);
    let preview = preview_records(&records, config.preview.sample_size)?;
    tracing::info!("Sample data: {}", preview);
    Ok(())
}
