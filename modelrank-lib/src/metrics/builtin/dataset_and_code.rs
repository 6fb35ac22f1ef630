use crate::metrics::{Metric, MetricError, MetricOutcome};
use crate::resource::ResourceSpec;
use futures::future::BoxFuture;

const DATASET_SHARE: f64 = 0.5;
const CODE_SHARE: f64 = 0.5;

/// Rewards models that link to the data they were trained on and the code that built them.
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetAndCodeMetric;

impl DatasetAndCodeMetric {
    fn evaluate(resource: &ResourceSpec) -> MetricOutcome {
        let datasets = resource.dataset_urls().len();
        let code = resource.code_urls().len();

        let mut score = 0.0;
        if datasets > 0 {
            score += DATASET_SHARE;
        }
        if code > 0 {
            score += CODE_SHARE;
        }

        MetricOutcome::new(score, format!("{datasets} dataset(s) and {code} code repository(ies) linked"))
    }
}

impl Metric for DatasetAndCodeMetric {
    fn description(&self) -> &str {
        "Whether training data and source code are linked to the model"
    }

    fn score<'a>(&'a self, resource: &'a ResourceSpec) -> BoxFuture<'a, Result<MetricOutcome, MetricError>> {
        Box::pin(core::future::ready(Ok(Self::evaluate(resource))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_linked() {
        let outcome = DatasetAndCodeMetric::evaluate(&ResourceSpec::from_url("https://huggingface.co/gpt2"));
        assert!(outcome.score.abs() < f64::EPSILON);
    }

    #[test]
    fn test_dataset_only() {
        let spec = ResourceSpec::from_url("https://huggingface.co/gpt2").with_dataset_urls(["https://huggingface.co/datasets/openwebtext"]);
        let outcome = DatasetAndCodeMetric::evaluate(&spec);
        assert!((outcome.score - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_both_linked() {
        let spec = ResourceSpec::from_url("https://huggingface.co/gpt2")
            .with_dataset_urls(["https://huggingface.co/datasets/openwebtext"])
            .with_code_urls(["https://github.com/openai/gpt-2"]);
        let outcome = DatasetAndCodeMetric::evaluate(&spec);
        assert!((outcome.score - 1.0).abs() < f64::EPSILON);
        assert_eq!(outcome.notes, "1 dataset(s) and 1 code repository(ies) linked");
    }
}
