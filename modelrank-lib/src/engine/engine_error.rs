/// Errors raised by the metric registry and the evaluation engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("metric '{name}' is already registered")]
    DuplicateMetric { name: String },

    #[error("metric '{name}' is not registered")]
    UnknownMetric { name: String },

    #[error("invalid metric name '{name}': names must be non-empty and contain no whitespace")]
    InvalidMetricName { name: String },

    #[error("metric name '{name}' collides with an output key")]
    ReservedMetricName { name: String },

    #[error("invalid resource: {reason}")]
    InvalidResource { reason: String },

    #[error("weight for metric '{name}' must be a finite non-negative number, got {weight}")]
    InvalidWeight { name: String, weight: f64 },
}
