mod catalog;
mod config;
mod error;
pub mod metrics;
mod sample_store;
mod session;
mod stats;

pub use catalog::{EvaluationReport, MetricId, compute, compute_named, evaluate};
pub use config::{CsvConfig, EngineConfig, ReportConfig};
pub use error::{ConfigError, GofError, Result};
pub use sample_store::{CsvSummary, LabeledSeries, SamplePair, SampleStore};
pub use session::{PendingEntry, Session};
