pub mod bronze;
pub mod error;
pub mod reader;
pub mod sample;
pub mod tables;

pub use bronze::{load_bronze_events, partition_to_bronze, BronzePartition};
pub use error::{Error, Result};
pub use reader::{read_raw_events, EVENT_TIME_COL, EVENT_TYPE_COL, USER_COL};
pub use sample::sample_raw;
pub use tables::{
    read_silver_events, write_minute_counts, write_sessions, write_silver_events,
    write_type_counts, write_user_funnel,
};
