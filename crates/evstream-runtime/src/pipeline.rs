use crate::config::PipelineConfig;
use crate::Result;
use evstream_engine::{
    aggregate_by_minute, aggregate_by_type, aggregate_user_funnel, assign_sessions, normalize,
    summarize_sessions,
};
use evstream_ingest::{
    load_bronze_events, partition_to_bronze, read_silver_events, write_minute_counts,
    write_sessions, write_silver_events, write_type_counts, write_user_funnel,
};
use serde::Serialize;
use std::fs;

#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub partitions: usize,
    pub rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct SilverReport {
    pub events: usize,
    pub sessions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoldReport {
    pub minute_rows: usize,
    pub type_rows: usize,
    pub funnel_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub ingest: IngestReport,
    pub silver: SilverReport,
    pub gold: GoldReport,
}

/// Bronze stage: split the raw file into per-date partitions.
pub fn run_ingest(config: &PipelineConfig) -> Result<IngestReport> {
    let partitions = partition_to_bronze(&config.raw_path(), &config.bronze_dir())?;
    let rows = partitions.iter().map(|p| p.rows).sum();
    Ok(IngestReport {
        partitions: partitions.len(),
        rows,
    })
}

/// Silver stage: normalize, sessionize, and persist events + sessions.
pub fn run_silver(config: &PipelineConfig) -> Result<SilverReport> {
    let events = load_bronze_events(&config.bronze_dir())?;
    let events = normalize(events);
    let assigned = assign_sessions(events, config.session_gap_minutes)?;
    let sessions = summarize_sessions(&assigned)?;

    let silver_dir = config.silver_dir();
    fs::create_dir_all(&silver_dir)?;
    write_silver_events(&silver_dir.join("events_silver.csv"), &assigned)?;
    write_sessions(&silver_dir.join("sessions.csv"), &sessions)?;

    Ok(SilverReport {
        events: assigned.len(),
        sessions: sessions.len(),
    })
}

/// Gold stage: build the three aggregate tables from the silver events.
pub fn run_gold(config: &PipelineConfig) -> Result<GoldReport> {
    let events = read_silver_events(&config.silver_dir().join("events_silver.csv"))?;

    let by_minute = aggregate_by_minute(&events)?;
    let by_type = aggregate_by_type(&events)?;
    let funnel = aggregate_user_funnel(&events)?;

    let gold_dir = config.gold_dir();
    fs::create_dir_all(&gold_dir)?;
    write_minute_counts(&gold_dir.join("events_by_minute.csv"), &by_minute)?;
    write_type_counts(&gold_dir.join("events_by_type.csv"), &by_type)?;
    write_user_funnel(&gold_dir.join("user_funnel.csv"), &funnel)?;

    Ok(GoldReport {
        minute_rows: by_minute.len(),
        type_rows: by_type.len(),
        funnel_rows: funnel.rows.len(),
    })
}

/// Full pipeline: ingest, then silver, then gold.
pub fn run_all(config: &PipelineConfig) -> Result<RunReport> {
    let ingest = run_ingest(config)?;
    let silver = run_silver(config)?;
    let gold = run_gold(config)?;
    Ok(RunReport {
        ingest,
        silver,
        gold,
    })
}
