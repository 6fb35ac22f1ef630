use super::builtin;
use super::{Metric, MetricFactory};
use crate::engine::EngineError;
use crate::reports::{FIXED_KEYS, LATENCY_SUFFIX};
use std::collections::BTreeMap;
use std::sync::Arc;

const LOG_TARGET: &str = "  registry";

/// Maps unique metric names to the factories that create them.
///
/// Registration happens once at startup. After the registry has been handed to an engine
/// it is only ever read, so it can be shared freely between concurrent evaluations.
#[derive(Default)]
pub struct MetricRegistry {
    entries: BTreeMap<Arc<str>, MetricFactory>,
}

impl core::fmt::Debug for MetricRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MetricRegistry")
            .field("metrics", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl MetricRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in metric.
    pub fn with_builtin_metrics() -> Result<Self, EngineError> {
        let mut registry = Self::new();
        builtin::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Register a metric factory under a unique name.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::DuplicateMetric`] if the name is already registered, and with
    /// [`EngineError::InvalidMetricName`] if the name is empty or contains whitespace. Names
    /// that would clash with an output key, either one of the fixed keys or a name ending in
    /// `_latency`, fail with [`EngineError::ReservedMetricName`].
    pub fn register<F>(&mut self, name: &str, factory: F) -> Result<(), EngineError>
    where
        F: Fn() -> Box<dyn Metric> + Send + Sync + 'static,
    {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(EngineError::InvalidMetricName { name: name.to_string() });
        }

        if FIXED_KEYS.contains(&name) || name.ends_with(LATENCY_SUFFIX) {
            return Err(EngineError::ReservedMetricName { name: name.to_string() });
        }

        if self.entries.contains_key(name) {
            return Err(EngineError::DuplicateMetric { name: name.to_string() });
        }

        let _ = self.entries.insert(Arc::from(name), Arc::new(factory));
        log::debug!(target: LOG_TARGET, "Registered metric '{name}'");
        Ok(())
    }

    /// Look up the factory registered under `name`.
    pub fn get(&self, name: &str) -> Result<&MetricFactory, EngineError> {
        self.entries
            .get(name)
            .ok_or_else(|| EngineError::UnknownMetric { name: name.to_string() })
    }

    /// Every registered metric, in name order.
    pub fn all_metrics(&self) -> impl Iterator<Item = (&str, &MetricFactory)> {
        self.entries.iter().map(|(name, factory)| (name.as_ref(), factory))
    }

    /// Names of every registered metric, in name order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
