use crate::metrics::{Metric, MetricError, MetricRegistry, MetricResult};
use crate::resource::ResourceSpec;
use core::time::Duration;
use futures::future::join_all;
use std::any::Any;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

const LOG_TARGET: &str = "  dispatch";

/// Runs every registered metric against one resource, one tokio task per metric.
#[derive(Debug, Clone)]
pub(super) struct Dispatcher {
    limiter: Arc<Semaphore>,
    metric_timeout: Option<Duration>,
}

impl Dispatcher {
    pub(super) fn new(max_concurrent_metrics: usize, metric_timeout: Option<Duration>) -> Self {
        Self {
            limiter: Arc::new(Semaphore::new(max_concurrent_metrics.max(1))),
            metric_timeout,
        }
    }

    /// Dispatch all metrics and wait for every one of them.
    ///
    /// Returns the results sorted by metric name, and the wall time from the first dispatch
    /// to the last completion.
    pub(super) async fn dispatch(&self, registry: &MetricRegistry, resource: Arc<ResourceSpec>) -> (Vec<MetricResult>, Duration) {
        let started = Instant::now();

        let tasks: Vec<_> = registry
            .all_metrics()
            .map(|(name, factory)| {
                let factory = Arc::clone(factory);
                let resource = Arc::clone(&resource);
                let limiter = Arc::clone(&self.limiter);
                let timeout = self.metric_timeout;
                let task_name = name.to_string();

                let handle = tokio::spawn(async move {
                    // The semaphore is never closed, so a failed acquire can only mean shutdown.
                    let _permit = limiter.acquire_owned().await.ok();
                    let metric = factory();
                    run_metric(&task_name, metric.as_ref(), &resource, timeout).await
                });

                (name.to_string(), handle)
            })
            .collect();

        log::debug!(target: LOG_TARGET, "Dispatched {} metric(s) for '{resource}'", tasks.len());

        let mut results = join_all(tasks.into_iter().map(|(name, handle)| async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    let error = if e.is_panic() {
                        MetricError::Panicked(panic_message(e.into_panic().as_ref()))
                    } else {
                        MetricError::computation("metric task was cancelled")
                    };
                    failed(name, started.elapsed(), &error)
                }
            }
        }))
        .await;

        let elapsed = started.elapsed();
        results.sort_by(|a, b| a.name.cmp(&b.name));
        (results, elapsed)
    }
}

/// Run one metric, timing it and converting its outcome into a result.
async fn run_metric(name: &str, metric: &dyn Metric, resource: &ResourceSpec, timeout: Option<Duration>) -> MetricResult {
    let start = Instant::now();
    let outcome = match timeout {
        Some(limit) => tokio::time::timeout(limit, metric.score(resource))
            .await
            .unwrap_or_else(|_| Err(MetricError::Timeout(limit))),
        None => metric.score(resource).await,
    };
    let latency = start.elapsed();

    match outcome {
        Ok(outcome) => {
            log::debug!(target: LOG_TARGET, "Metric '{name}' scored {:.3} in {latency:?}", outcome.score);
            MetricResult {
                name: name.to_string(),
                score: clamp_score(name, outcome.score),
                latency,
                notes: outcome.notes,
            }
        }
        Err(e) => failed(name.to_string(), latency, &e),
    }
}

fn failed(name: String, latency: Duration, error: &MetricError) -> MetricResult {
    log::warn!(target: LOG_TARGET, "Metric '{name}' failed after {latency:?}: {error}");
    MetricResult {
        name,
        score: 0.0,
        latency,
        notes: format!("metric failed: {error}"),
    }
}

/// Force a producer's score into `[0, 1]`.
fn clamp_score(name: &str, score: f64) -> f64 {
    if score.is_nan() {
        log::warn!(target: LOG_TARGET, "Metric '{name}' produced NaN, recording 0.0");
        return 0.0;
    }

    if !(0.0..=1.0).contains(&score) {
        log::warn!(target: LOG_TARGET, "Metric '{name}' produced out-of-range score {score}, clamping");
    }

    score.clamp(0.0, 1.0)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string())
}
