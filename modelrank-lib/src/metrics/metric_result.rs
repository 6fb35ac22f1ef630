use core::time::Duration;
use serde::{Deserialize, Serialize};

/// The outcome of running one metric during one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub name: String,
    pub score: f64,
    pub latency: Duration,
    pub notes: String,
}

impl MetricResult {
    /// Latency in whole milliseconds, as reported in NDJSON output.
    #[must_use]
    pub fn latency_ms(&self) -> u64 {
        u64::try_from(self.latency.as_millis()).unwrap_or(u64::MAX)
    }
}
