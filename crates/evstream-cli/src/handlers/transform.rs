use crate::args::OutputFormat;
use crate::output;
use anyhow::{Context, Result};
use evstream_runtime::{run_silver, PipelineConfig};

pub fn handle(
    config: &PipelineConfig,
    gap_minutes: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(gap) = gap_minutes {
        config.session_gap_minutes = gap;
    }

    println!(
        "Sessionizing bronze events (gap > {} minutes starts a new session)",
        config.session_gap_minutes
    );

    let report = run_silver(&config).context("transform stage failed")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => output::success(&format!(
            "Wrote {} events and {} sessions to {}",
            report.events,
            report.sessions,
            config.silver_dir().display()
        )),
    }
    Ok(())
}
