use crate::metrics::{Metric, MetricError, MetricOutcome};
use crate::resource::ResourceSpec;
use futures::future::BoxFuture;

const BASELINE: f64 = 0.2;
const PER_EVAL_METRIC: f64 = 0.1;
const MAX_COUNTED_EVAL_METRICS: usize = 5;
const TABLE_BONUS: f64 = 0.2;
const CITATION_BONUS: f64 = 0.2;

const EVAL_METRICS: &[&str] = &["bleu", "f1", "accuracy", "rouge", "perplexity", "cer", "wer"];
const CITATION_SITES: &[&str] = &["arxiv.org", "paperswithcode.com", "huggingface.co/evaluate"];

/// Looks for evidence backing the performance claims made in a model's README.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerformanceClaimsMetric;

impl PerformanceClaimsMetric {
    fn evaluate(resource: &ResourceSpec) -> MetricOutcome {
        let Some(readme) = resource.readme() else {
            return MetricOutcome::new(BASELINE, "no README available");
        };

        let readme = readme.to_lowercase();
        let found = EVAL_METRICS.iter().filter(|m| readme.contains(*m)).count();
        let has_table = readme.contains(" | ") && readme.contains("---");
        let has_citation = CITATION_SITES.iter().any(|site| readme.contains(site));

        #[expect(clippy::cast_precision_loss, reason = "count is at most 5")]
        let counted = found.min(MAX_COUNTED_EVAL_METRICS) as f64;

        let mut score = BASELINE + PER_EVAL_METRIC * counted;
        if has_table {
            score += TABLE_BONUS;
        }
        if has_citation {
            score += CITATION_BONUS;
        }

        let notes = format!("{found} evaluation metric(s) mentioned, benchmark table: {has_table}, citation: {has_citation}");
        MetricOutcome::new(score.min(1.0), notes)
    }
}

impl Metric for PerformanceClaimsMetric {
    fn description(&self) -> &str {
        "Whether the README backs its performance claims with metrics, tables and citations"
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
        let outcome = PerformanceClaimsMetric::evaluate(&ResourceSpec::from_url("https://huggingface.co/gpt2"));
        assert!((outcome.score - BASELINE).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_table_and_citation() {
        let readme = "Results\n| task | accuracy | f1 |\n|---|---|---|\n| sst2 | 0.9 | 0.8 |\nSee https://arxiv.org/abs/1810.04805";
        let outcome = PerformanceClaimsMetric::evaluate(&with_readme(readme));
        // 0.2 base + 2 * 0.1 + 0.2 table + 0.2 citation
        assert!((outcome.score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_capped() {
        let readme = "bleu f1 accuracy rouge perplexity cer wer | --- arxiv.org";
        let outcome = PerformanceClaimsMetric::evaluate(&with_readme(readme));
        assert!((outcome.score - 1.0).abs() < 1e-9);
    }
}
