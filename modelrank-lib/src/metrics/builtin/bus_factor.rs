use crate::metrics::{Metric, MetricError, MetricOutcome};
use crate::resource::ResourceSpec;
use futures::future::BoxFuture;
use std::collections::BTreeSet;
use url::Url;

const NO_REPOSITORY: f64 = 0.6;
const UNPARSEABLE_REPOSITORY: f64 = 0.4;
const REPOSITORY_BASE: f64 = 0.2;
const SEVERAL_OWNERS_BONUS: f64 = 0.4;
const SHARED_OWNER_BONUS: f64 = 0.1;

/// Estimates how many independent parties keep a model's code alive.
///
/// Only the linked code URLs are consulted. A model whose code lives in repositories owned by
/// several accounts, or by the same organization that publishes the model, is less likely to
/// be stranded when a single maintainer walks away.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusFactorMetric;

/// Extract `(owner, repo)` from a GitHub repository URL.
fn github_repo(url: &str) -> Option<(String, String)> {
    let url = Url::parse(url).ok()?;
    if url.host_str()?.trim_start_matches("www.") != "github.com" {
        return None;
    }

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let repo = segments.next()?.trim_end_matches(".git");
    if repo.is_empty() {
        return None;
    }

    Some((owner.to_ascii_lowercase(), repo.to_ascii_lowercase()))
}

fn is_github(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.") == "github.com"))
        .unwrap_or(false)
}

impl BusFactorMetric {
    fn evaluate(resource: &ResourceSpec) -> MetricOutcome {
        let github_urls: Vec<_> = resource.code_urls().iter().filter(|u| is_github(u)).collect();
        if github_urls.is_empty() {
            return MetricOutcome::new(NO_REPOSITORY, "no linked GitHub repository");
        }

        let repos: Vec<_> = github_urls.iter().filter_map(|u| github_repo(u)).collect();
        if repos.is_empty() {
            return MetricOutcome::new(UNPARSEABLE_REPOSITORY, "linked GitHub URL does not name a repository");
        }

        let owners: BTreeSet<_> = repos.iter().map(|(owner, _)| owner.as_str()).collect();
        let mut score = REPOSITORY_BASE;
        if owners.len() > 1 {
            score += SEVERAL_OWNERS_BONUS;
        }

        let model_owner = resource
            .model_id()
            .and_then(|id| id.split_once('/').map(|(owner, _)| owner.to_ascii_lowercase()));
        let shared_owner = model_owner.is_some_and(|owner| owners.contains(owner.as_str()));
        if shared_owner {
            score += SHARED_OWNER_BONUS;
        }

        let owners: Vec<_> = owners.into_iter().collect();
        MetricOutcome::new(
            score,
            format!(
                "{} repository owner(s): {}{}",
                owners.len(),
                owners.join(", "),
                if shared_owner { " (also publishes the model)" } else { "" }
            ),
        )
    }
}

impl Metric for BusFactorMetric {
    fn description(&self) -> &str {
        "How many independent owners maintain the linked code"
    }

    fn score<'a>(&'a self, resource: &'a ResourceSpec) -> BoxFuture<'a, Result<MetricOutcome, MetricError>> {
        Box::pin(core::future::ready(Ok(Self::evaluate(resource))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(code_urls: &[&str]) -> ResourceSpec {
        ResourceSpec::from_url("https://huggingface.co/google/gemma-3-270m").with_code_urls(code_urls.iter().copied())
    }

    #[test]
    fn test_github_repo() {
        assert_eq!(
            github_repo("https://github.com/SkyworkAI/Matrix-Game.git"),
            Some(("skyworkai".into(), "matrix-game".into()))
        );
        assert_eq!(
            github_repo("https://www.github.com/openai/whisper/tree/main"),
            Some(("openai".into(), "whisper".into()))
        );
        assert_eq!(github_repo("https://github.com/openai"), None);
        assert_eq!(github_repo("https://gitlab.com/openai/whisper"), None);
        assert_eq!(github_repo("not a url"), None);
    }

    #[test]
    fn test_no_code_urls() {
        let outcome = BusFactorMetric::evaluate(&model(&[]));
        assert!((outcome.score - NO_REPOSITORY).abs() < f64::EPSILON);
        assert_eq!(outcome.notes, "no linked GitHub repository");
    }

    #[test]
    fn test_non_github_code_is_baseline() {
        let outcome = BusFactorMetric::evaluate(&model(&["https://gitlab.com/group/project"]));
        assert!((outcome.score - NO_REPOSITORY).abs() < f64::EPSILON);
    }

    #[test]
    fn test_github_url_without_repository() {
        let outcome = BusFactorMetric::evaluate(&model(&["https://github.com/google"]));
        assert!((outcome.score - UNPARSEABLE_REPOSITORY).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_owner() {
        let outcome = BusFactorMetric::evaluate(&model(&["https://github.com/someone/gemma-tools"]));
        assert!((outcome.score - REPOSITORY_BASE).abs() < f64::EPSILON);
        assert_eq!(outcome.notes, "1 repository owner(s): someone");
    }

    #[test]
    fn test_several_owners_and_shared_owner() {
        let outcome = BusFactorMetric::evaluate(&model(&[
            "https://github.com/google/gemma_pytorch",
            "https://github.com/someone/gemma-tools",
        ]));
        assert!((outcome.score - 0.7).abs() < 1e-9);
        assert!(outcome.notes.contains("google, someone"));
        assert!(outcome.notes.ends_with("(also publishes the model)"));
    }
}
