use crate::args::OutputFormat;
use crate::output;
use anyhow::{Context, Result};
use evstream_runtime::{run_all, PipelineConfig};

pub fn handle(
    config: &PipelineConfig,
    gap_minutes: Option<i64>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = config.clone();
    if let Some(gap) = gap_minutes {
        config.session_gap_minutes = gap;
    }

    println!("Running full pipeline under {}", config.data_root.display());

    let report = run_all(&config).context("pipeline run failed")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => {
            println!(
                "  bronze: {} rows in {} partitions",
                report.ingest.rows, report.ingest.partitions
            );
            println!(
                "  silver: {} events, {} sessions",
                report.silver.events, report.silver.sessions
            );
            println!(
                "  gold:   {} minute rows, {} type rows, {} funnel rows",
                report.gold.minute_rows, report.gold.type_rows, report.gold.funnel_rows
            );
            output::success("Pipeline complete");
        }
    }
    Ok(())
}
