use super::MetricError;
use crate::resource::ResourceSpec;
use futures::future::BoxFuture;
use std::sync::Arc;

/// Factory producing a fresh metric instance for each evaluation.
pub type MetricFactory = Arc<dyn Fn() -> Box<dyn Metric> + Send + Sync>;

/// What a metric reports after scoring a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricOutcome {
    pub score: f64,
    pub notes: String,
}

impl MetricOutcome {
    #[must_use]
    pub fn new(score: f64, notes: impl Into<String>) -> Self {
        Self { score, notes: notes.into() }
    }
}

/// A single dimension of trust.
///
/// Implementations must bound any external I/O they perform. The engine additionally applies
/// its configured per-metric timeout and treats expiry as a failure.
pub trait Metric: Send + Sync {
    /// Short human-readable explanation of what the metric measures.
    fn description(&self) -> &str {
        ""
    }

    /// Score the resource.
    ///
    /// Scores outside `[0, 1]` are clamped by the engine.
    fn score<'a>(&'a self, resource: &'a ResourceSpec) -> BoxFuture<'a, Result<MetricOutcome, MetricError>>;
}
