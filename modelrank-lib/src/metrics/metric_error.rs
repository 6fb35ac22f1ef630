use core::time::Duration;

/// Why a metric could not produce a score.
///
/// Metric errors never abort an evaluation: the engine records them as a zero score with
/// the error text as notes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricError {
    #[error("{0}")]
    Computation(String),

    #[error("required input is missing: {0}")]
    MissingInput(String),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("panicked: {0}")]
    Panicked(String),
}

impl MetricError {
    #[must_use]
    pub fn computation(message: impl Into<String>) -> Self {
        Self::Computation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(MetricError::computation("bad README").to_string(), "bad README");
        assert_eq!(MetricError::MissingInput("README".into()).to_string(), "required input is missing: README");
        assert_eq!(MetricError::Timeout(Duration::from_secs(2)).to_string(), "timed out after 2s");
        assert_eq!(MetricError::Panicked("boom".into()).to_string(), "panicked: boom");
    }
}
