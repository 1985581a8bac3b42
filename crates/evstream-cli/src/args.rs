use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "evstream")]
#[command(about = "Partition, sessionize, and aggregate raw event streams", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base data directory (overrides EVSTREAM_DATA and the config file)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Config file path (default: <data-dir>/evstream.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Partition the raw events file into per-date bronze files")]
    Ingest,

    #[command(about = "Normalize and sessionize bronze events into the silver tables")]
    Transform {
        /// Inactivity gap in minutes that closes a session
        #[arg(long)]
        gap_minutes: Option<i64>,
    },

    #[command(about = "Build the gold aggregate tables from the silver events")]
    Aggregate,

    #[command(about = "Run ingest, transform, and aggregate in sequence")]
    Run {
        /// Inactivity gap in minutes that closes a session
        #[arg(long)]
        gap_minutes: Option<i64>,
    },

    #[command(about = "Cut a large raw capture down to its first N rows")]
    Sample {
        /// Source CSV to sample from
        input: PathBuf,

        /// Number of data rows to keep
        #[arg(long, default_value = "100000")]
        rows: usize,
    },
}
