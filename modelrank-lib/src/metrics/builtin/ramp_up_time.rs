use crate::metrics::{Metric, MetricError, MetricOutcome};
use crate::resource::ResourceSpec;
use futures::future::BoxFuture;

const BASELINE: f64 = 0.2;
const HAS_USAGE: f64 = 0.6;
const CODE_BLOCK_BONUS: f64 = 0.3;

/// Estimates how quickly a newcomer can start using a model from its README.
#[derive(Debug, Clone, Copy, Default)]
pub struct RampUpTimeMetric;

impl RampUpTimeMetric {
    fn evaluate(resource: &ResourceSpec) -> MetricOutcome {
        let Some(readme) = resource.readme() else {
            return MetricOutcome::new(BASELINE, "no README available");
        };

        let readme = readme.to_lowercase();
        if !readme.contains("usage") && !readme.contains("example") {
            return MetricOutcome::new(BASELINE, "README has no usage or example section");
        }

        if readme.contains("```") {
            MetricOutcome::new((HAS_USAGE + CODE_BLOCK_BONUS).min(1.0), "README documents usage with code samples")
        } else {
            MetricOutcome::new(HAS_USAGE, "README documents usage without code samples")
        }
    }
}

impl Metric for RampUpTimeMetric {
    fn description(&self) -> &str {
        "How easy it is to get started with the model, judged from its README"
    }

    fn score<'a>(&'a self, resource: &'a ResourceSpec) -> BoxFuture<'a, Result<MetricOutcome, MetricError>> {
        Box::pin(core::future::ready(Ok(Self::evaluate(resource))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Category, ResourceMetadata};

    fn with_readme(readme: &str) -> ResourceSpec {
        ResourceSpec::new("https://huggingface.co/gpt2", Category::Model).with_metadata(ResourceMetadata {
            readme: Some(readme.into()),
            license: None,
        })
    }

    #[test]
    fn test_no_readme() {
        let outcome = RampUpTimeMetric::evaluate(&ResourceSpec::from_url("https://huggingface.co/gpt2"));
        assert!((outcome.score - BASELINE).abs() < 1e-9);
    }

    #[test]
    fn test_readme_without_usage() {
        let outcome = RampUpTimeMetric::evaluate(&with_readme("# GPT-2\nA language model."));
        assert!((outcome.score - BASELINE).abs() < 1e-9);
    }

    #[test]
    fn test_usage_without_code() {
        let outcome = RampUpTimeMetric::evaluate(&with_readme("## Usage\nLoad it with transformers."));
        assert!((outcome.score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_usage_with_code() {
        let outcome = RampUpTimeMetric::evaluate(&with_readme("## Example\n```python\npipeline('text-generation')\n```"));
        assert!((outcome.score - 0.9).abs() < 1e-9);
        assert!(!outcome.notes.is_empty());
    }

    #[tokio::test]
    async fn test_score_through_trait() {
        let metric: Box<dyn Metric> = Box::new(RampUpTimeMetric);
        let outcome = metric.score(&with_readme("usage")).await.unwrap();
        assert!((outcome.score - 0.6).abs() < 1e-9);
    }
}
