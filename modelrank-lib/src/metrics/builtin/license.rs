use crate::metrics::{Metric, MetricError, MetricOutcome};
use crate::resource::ResourceSpec;
use futures::future::BoxFuture;

/// Licenses compatible with redistribution under LGPL-2.1.
const PERMISSIVE: &[&str] = &[
    "mit",
    "apache-2.0",
    "bsd",
    "bsd-2-clause",
    "bsd-3-clause",
    "isc",
    "zlib",
    "unlicense",
    "cc0-1.0",
    "cc-by-4.0",
    "lgpl-2.1",
    "lgpl-3.0",
    "mpl-2.0",
    "bsl-1.0",
    "openrail",
    "bigscience-openrail-m",
    "creativeml-openrail-m",
];

/// Licenses that restrict commercial use or impose incompatible terms.
const RESTRICTIVE: &[&str] = &["gpl-2.0", "gpl-3.0", "agpl-3.0", "cc-by-nc-4.0", "cc-by-nc-sa-4.0", "cc-by-nc-nd-4.0", "llama2", "other"];

const UNKNOWN_LICENSE_SCORE: f64 = 0.5;

/// Judges whether a model's license permits reuse.
///
/// The license comes from attached metadata when present, otherwise from the `license:` key
/// of the README's YAML front matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LicenseMetric;

impl LicenseMetric {
    fn evaluate(resource: &ResourceSpec) -> MetricOutcome {
        let license = resource
            .license()
            .map(str::to_string)
            .or_else(|| resource.readme().and_then(front_matter_license));

        let Some(license) = license else {
            return MetricOutcome::new(0.0, "no license information found");
        };

        let normalized = license.trim().to_lowercase();
        if PERMISSIVE.contains(&normalized.as_str()) {
            MetricOutcome::new(1.0, format!("license '{normalized}' permits reuse"))
        } else if RESTRICTIVE.contains(&normalized.as_str()) {
            MetricOutcome::new(0.0, format!("license '{normalized}' restricts reuse"))
        } else {
            MetricOutcome::new(UNKNOWN_LICENSE_SCORE, format!("license '{normalized}' is not recognized"))
        }
    }
}

/// Extract the `license:` value from a README's YAML front matter.
///
/// Hugging Face model cards give either a single identifier or a list; the first entry of a
/// list is used.
fn front_matter_license(readme: &str) -> Option<String> {
    let rest = readme.trim_start().strip_prefix("---")?;
    let (yaml, _) = rest.split_once("\n---")?;
    let front_matter: serde_yaml::Value = serde_yaml::from_str(yaml).ok()?;

    let license = match front_matter.get("license")? {
        serde_yaml::Value::String(s) => s.as_str(),
        serde_yaml::Value::Sequence(items) => items.iter().find_map(serde_yaml::Value::as_str)?,
        _ => return None,
    };

    let license = license.trim();
    (!license.is_empty()).then(|| license.to_string())
}

impl Metric for LicenseMetric {
    fn description(&self) -> &str {
        "Whether the model's license permits reuse"
    }

    fn score<'a>(&'a self, resource: &'a ResourceSpec) -> BoxFuture<'a, Result<MetricOutcome, MetricError>> {
        Box::pin(core::future::ready(Ok(Self::evaluate(resource))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Category, ResourceMetadata};

    fn resource(readme: Option<&str>, license: Option<&str>) -> ResourceSpec {
        ResourceSpec::new("https://huggingface.co/gpt2", Category::Model).with_metadata(ResourceMetadata {
            readme: readme.map(Into::into),
            license: license.map(Into::into),
        })
    }

    #[test]
    fn test_front_matter_license() {
        assert_eq!(front_matter_license("---\nlanguage: en\nlicense: apache-2.0\n---\n# Model").as_deref(), Some("apache-2.0"));
        assert_eq!(front_matter_license("---\nlicense: \"mit\"\n---").as_deref(), Some("mit"));
        assert_eq!(front_matter_license("---\nlicense:\n  - bsd-3-clause\n  - mit\n---").as_deref(), Some("bsd-3-clause"));
    }

    #[test]
    fn test_front_matter_license_malformed_yaml() {
        assert_eq!(front_matter_license("---\nlicense: [unclosed\n---"), None);
        assert_eq!(front_matter_license("---\nlicense: 42\n---"), None);
    }

    #[test]
    fn test_front_matter_license_outside_front_matter_is_ignored() {
        assert_eq!(front_matter_license("# Model\nlicense: mit"), None);
        assert_eq!(front_matter_license("---\nlanguage: en\n---\nlicense: mit"), None);
        assert_eq!(front_matter_license(""), None);
    }

    #[test]
    fn test_metadata_license_wins() {
        let outcome = LicenseMetric::evaluate(&resource(Some("---\nlicense: gpl-3.0\n---"), Some("MIT")));
        assert!((outcome.score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_restrictive_license() {
        let outcome = LicenseMetric::evaluate(&resource(Some("---\nlicense: cc-by-nc-4.0\n---"), None));
        assert!(outcome.score.abs() < f64::EPSILON);
        assert!(outcome.notes.contains("restricts"));
    }

    #[test]
    fn test_unknown_license() {
        let outcome = LicenseMetric::evaluate(&resource(None, Some("weird-license")));
        assert!((outcome.score - UNKNOWN_LICENSE_SCORE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_license() {
        let outcome = LicenseMetric::evaluate(&resource(None, None));
        assert!(outcome.score.abs() < f64::EPSILON);
        assert!(!outcome.notes.is_empty());
    }
}
