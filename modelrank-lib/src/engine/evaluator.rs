use super::dispatcher::Dispatcher;
use super::{CacheStatus, EngineError, Evaluation, EvaluationRecord, WeightTable, aggregate};
use crate::cache::CacheStore;
use crate::metrics::MetricRegistry;
use crate::resource::{CacheIdentity, ResourceSpec};
use chrono::Utc;
use core::time::Duration;
use std::sync::Arc;

const LOG_TARGET: &str = "    engine";

/// Default upper bound on how long a single metric may run.
pub const DEFAULT_METRIC_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of metrics allowed to run at the same time for one evaluation.
pub const DEFAULT_MAX_CONCURRENT_METRICS: usize = 16;

/// Tuning knobs for an [`Engine`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Weights used when an evaluation does not supply its own. When this is `None` as well,
    /// every metric that produced a result is weighted equally.
    pub default_weights: Option<WeightTable>,

    /// Per-metric time limit. Expiry is recorded as a metric failure.
    pub metric_timeout: Option<Duration>,

    pub max_concurrent_metrics: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            default_weights: None,
            metric_timeout: Some(DEFAULT_METRIC_TIMEOUT),
            max_concurrent_metrics: DEFAULT_MAX_CONCURRENT_METRICS,
        }
    }
}

/// Evaluates resources against every registered metric, with caching.
///
/// An engine is cheap to share: wrap it in an `Arc` and call [`Engine::evaluate`] from as many
/// tasks as needed. The registry it was built with is never modified.
#[derive(Debug)]
pub struct Engine {
    registry: Arc<MetricRegistry>,
    cache: Arc<dyn CacheStore>,
    default_weights: Option<WeightTable>,
    dispatcher: Dispatcher,
}

impl Engine {
    #[must_use]
    pub fn new(registry: Arc<MetricRegistry>, cache: Arc<dyn CacheStore>, options: EngineOptions) -> Self {
        Self {
            registry,
            cache,
            dispatcher: Dispatcher::new(options.max_concurrent_metrics, options.metric_timeout),
            default_weights: options.default_weights,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Evaluate `resource`, consulting the cache first when `use_cache` is set.
    ///
    /// On a cache hit the stored record is returned as-is, even when `weights` differ from the
    /// ones it was computed with. On a miss every registered metric runs concurrently, the
    /// results are aggregated with `weights` (or the engine's default weights), and the record
    /// is offered to the cache.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::InvalidResource`] before any work is done if the resource is
    /// malformed. Metric failures and cache failures never surface as errors.
    pub async fn evaluate(&self, resource: &ResourceSpec, weights: Option<&WeightTable>, use_cache: bool) -> Result<Evaluation, EngineError> {
        resource.validate()?;

        let identity = resource.identity();
        let mut warnings = Vec::new();

        if use_cache && let Some(record) = self.cache_get(&identity).await {
            log::info!(target: LOG_TARGET, "Using cached evaluation for '{identity}'");
            return Ok(Evaluation {
                record,
                cache_status: CacheStatus::Hit,
                warnings,
            });
        }

        log::info!(target: LOG_TARGET, "Evaluating '{identity}' with {} metric(s)", self.registry.len());
        let (results, net_score_latency) = self.dispatcher.dispatch(&self.registry, Arc::new(resource.clone())).await;

        let net_score = match weights.or(self.default_weights.as_ref()) {
            Some(weights) => aggregate(&results, weights),
            None => aggregate(&results, &WeightTable::uniform(results.iter().map(|r| r.name.as_str()))),
        };

        let record = EvaluationRecord {
            identity,
            category: resource.category(),
            results,
            net_score,
            net_score_latency,
            created_at: Utc::now(),
        };

        let cache_status = if use_cache {
            if let Err(warning) = self.cache_put(&record).await {
                log::warn!(target: LOG_TARGET, "{warning}");
                warnings.push(warning);
            }
            CacheStatus::Miss
        } else {
            CacheStatus::Disabled
        };

        Ok(Evaluation {
            record,
            cache_status,
            warnings,
        })
    }

    /// Evaluate `resource` and render the outcome as a single NDJSON line.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`Engine::evaluate`].
    pub async fn evaluate_line(&self, resource: &ResourceSpec, weights: Option<&WeightTable>, use_cache: bool) -> Result<String, EngineError> {
        Ok(self.evaluate(resource, weights, use_cache).await?.to_line())
    }

    /// Look up the cached record for `resource` without running any metric.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::InvalidResource`] if the resource is malformed.
    pub async fn cached(&self, resource: &ResourceSpec) -> Result<Option<EvaluationRecord>, EngineError> {
        resource.validate()?;
        Ok(self.cache_get(&resource.identity()).await)
    }

    async fn cache_get(&self, identity: &CacheIdentity) -> Option<EvaluationRecord> {
        let cache = Arc::clone(&self.cache);
        let identity = identity.clone();

        match tokio::task::spawn_blocking(move || cache.get(&identity)).await {
            Ok(record) => record,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Cache lookup did not complete, treating as a miss: {e}");
                None
            }
        }
    }

    async fn cache_put(&self, record: &EvaluationRecord) -> Result<(), String> {
        let cache = Arc::clone(&self.cache);
        let record = record.clone();

        match tokio::task::spawn_blocking(move || cache.put(&record.identity, &record)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(format!("could not cache evaluation: {e}")),
            Err(e) => Err(format!("could not cache evaluation: {e}")),
        }
    }
}
