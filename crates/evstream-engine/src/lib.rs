// Engine module - core transform logic (normalization, sessionization, aggregation)
// This layer sits between raw ingestion (ingest) and stage orchestration (runtime)

pub mod aggregate;
pub mod normalize;
pub mod session;
pub mod summary;

pub use aggregate::{aggregate_by_minute, aggregate_by_type, aggregate_user_funnel};
pub use normalize::{canonical_label, normalize};
pub use session::{assign_sessions, DEFAULT_SESSION_GAP_MINUTES};
pub use summary::summarize_sessions;
