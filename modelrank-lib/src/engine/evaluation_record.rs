use crate::metrics::MetricResult;
use crate::reports;
use crate::resource::{CacheIdentity, Category};
use chrono::{DateTime, Utc};
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// The complete result of evaluating one resource; the unit that is cached and serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub identity: CacheIdentity,
    pub category: Category,

    /// One entry per registered metric, sorted by name.
    pub results: Vec<MetricResult>,

    pub net_score: f64,

    /// Wall time of the whole dispatch phase. Metrics run concurrently, so this is usually
    /// much less than the sum of the individual metric latencies.
    pub net_score_latency: Duration,

    pub created_at: DateTime<Utc>,
}

impl EvaluationRecord {
    /// The result recorded for the named metric.
    #[must_use]
    pub fn result(&self, name: &str) -> Option<&MetricResult> {
        self.results.iter().find(|r| r.name == name)
    }

    #[must_use]
    pub fn net_score_latency_ms(&self) -> u64 {
        u64::try_from(self.net_score_latency.as_millis()).unwrap_or(u64::MAX)
    }

    /// Render as a single NDJSON line, without the trailing newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        reports::to_line(self)
    }
}

/// Where an evaluation's record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// The record was found in the cache; no metric was run.
    Hit,

    /// The record was computed and offered to the cache.
    Miss,

    /// Caching was disabled for this evaluation.
    Disabled,
}

/// What [`Engine::evaluate`](super::Engine::evaluate) hands back.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub record: EvaluationRecord,
    pub cache_status: CacheStatus,

    /// Non-fatal problems encountered along the way, such as a failed cache write.
    pub warnings: Vec<String>,
}

impl Evaluation {
    #[must_use]
    pub fn to_line(&self) -> String {
        self.record.to_line()
    }
}
