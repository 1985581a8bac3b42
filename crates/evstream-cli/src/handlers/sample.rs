use crate::output;
use anyhow::{Context, Result};
use evstream_ingest::sample_raw;
use evstream_runtime::PipelineConfig;
use std::fs;
use std::path::Path;

/// Sample the first N rows of a large capture into the pipeline's raw slot.
pub fn handle(config: &PipelineConfig, input: &Path, rows: usize) -> Result<()> {
    let target = config.raw_path();
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }

    let written = sample_raw(input, &target, rows)
        .with_context(|| format!("failed to sample {}", input.display()))?;

    output::success(&format!(
        "Sampled {} rows into {}",
        written,
        target.display()
    ));
    Ok(())
}
