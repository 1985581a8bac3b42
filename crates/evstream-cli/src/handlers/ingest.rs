use crate::args::OutputFormat;
use crate::output;
use anyhow::{Context, Result};
use evstream_runtime::{run_ingest, PipelineConfig};

pub fn handle(config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    println!("Reading raw events from {}", config.raw_path().display());

    let report = run_ingest(config).context("ingest stage failed")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => output::success(&format!(
            "Wrote {} rows across {} bronze partitions to {}",
            report.rows,
            report.partitions,
            config.bronze_dir().display()
        )),
    }
    Ok(())
}
