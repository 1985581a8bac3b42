use crate::args::OutputFormat;
use crate::output;
use anyhow::{Context, Result};
use evstream_runtime::{run_gold, PipelineConfig};

pub fn handle(config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    println!("Building gold tables from {}", config.silver_dir().display());

    let report = run_gold(config).context("aggregate stage failed")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => output::success(&format!(
            "Wrote events_by_minute ({} rows), events_by_type ({} rows), user_funnel ({} rows) to {}",
            report.minute_rows,
            report.type_rows,
            report.funnel_rows,
            config.gold_dir().display()
        )),
    }
    Ok(())
}
