mod charts;
mod records;
mod stats;

pub use charts::{ChartSpec, PieSlice, Series, build_charts};
pub use records::{HealthRecord, ingest, synthetic_start_date};
pub use stats::{MetricSummary, VitalsSummary, summarize};
