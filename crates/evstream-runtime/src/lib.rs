pub mod config;
pub mod error;
pub mod pipeline;

pub use config::{resolve_data_root, PipelineConfig};
pub use error::{Error, Result};
pub use pipeline::{
    run_all, run_gold, run_ingest, run_silver, GoldReport, IngestReport, RunReport, SilverReport,
};
