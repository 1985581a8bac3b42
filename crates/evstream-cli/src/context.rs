use crate::args::Cli;
use anyhow::{Context, Result};
use evstream_runtime::{resolve_data_root, PipelineConfig};

/// Build the effective config for one invocation.
///
/// The config file supplies defaults; an explicit `--data-dir` flag or the
/// EVSTREAM_DATA variable wins over whatever data root the file names.
pub fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    let data_root = resolve_data_root(cli.data_dir.as_deref());

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PipelineConfig::load(&data_root).context("failed to load pipeline config")?,
    };

    if cli.data_dir.is_some() || std::env::var("EVSTREAM_DATA").is_ok() {
        config.data_root = data_root;
    }

    Ok(config)
}
