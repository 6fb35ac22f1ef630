use super::{CacheIdentity, Category};
use crate::engine::EngineError;
use core::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use url::Url;

/// Path segments that end the model id portion of a Hugging Face URL.
const HF_PATH_TERMINATORS: &[&str] = &["tree", "blob", "resolve", "raw", "discussions", "commits"];

/// Metadata gathered about a resource by external fetchers.
///
/// Metadata is advisory input for metrics; it is not part of the resource's identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceMetadata {
    pub readme: Option<Arc<str>>,
    pub license: Option<Arc<str>>,
}

/// An immutable description of the resource being evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSpec {
    primary_url: Arc<str>,
    dataset_urls: Vec<Arc<str>>,
    code_urls: Vec<Arc<str>>,
    category: Category,
    metadata: ResourceMetadata,
}

impl ResourceSpec {
    #[must_use]
    pub fn new(primary_url: impl AsRef<str>, category: Category) -> Self {
        Self {
            primary_url: Arc::from(primary_url.as_ref().trim()),
            dataset_urls: Vec::new(),
            code_urls: Vec::new(),
            category,
            metadata: ResourceMetadata::default(),
        }
    }

    /// Create a resource whose category is inferred from the primary URL.
    #[must_use]
    pub fn from_url(primary_url: impl AsRef<str>) -> Self {
        let category = Category::from_url(primary_url.as_ref());
        Self::new(primary_url, category)
    }

    #[must_use]
    pub fn with_dataset_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.dataset_urls = collect_urls(urls);
        self
    }

    #[must_use]
    pub fn with_code_urls<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.code_urls = collect_urls(urls);
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: ResourceMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn primary_url(&self) -> &str {
        &self.primary_url
    }

    #[must_use]
    pub fn dataset_urls(&self) -> &[Arc<str>] {
        &self.dataset_urls
    }

    #[must_use]
    pub fn code_urls(&self) -> &[Arc<str>] {
        &self.code_urls
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub const fn metadata(&self) -> &ResourceMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn readme(&self) -> Option<&str> {
        self.metadata.readme.as_deref()
    }

    #[must_use]
    pub fn license(&self) -> Option<&str> {
        self.metadata.license.as_deref()
    }

    /// Check that the resource can be evaluated at all.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.primary_url.is_empty() {
            return Err(EngineError::InvalidResource {
                reason: "primary URL is empty".into(),
            });
        }

        Ok(())
    }

    /// The canonical identity of this resource, used as the cache key.
    #[must_use]
    pub fn identity(&self) -> CacheIdentity {
        CacheIdentity::new(&self.primary_url, &self.dataset_urls, &self.code_urls)
    }

    /// Derive the `owner/name` model id from a Hugging Face model URL.
    ///
    /// Returns `None` for URLs that are not Hugging Face model pages.
    #[must_use]
    pub fn model_id(&self) -> Option<String> {
        let url = Url::parse(&self.primary_url).ok()?;
        if url.host_str()?.trim_start_matches("www.") != "huggingface.co" {
            return None;
        }

        let segments: Vec<_> = url
            .path_segments()?
            .filter(|s| !s.is_empty())
            .take_while(|s| !HF_PATH_TERMINATORS.contains(s))
            .collect();

        match segments.as_slice() {
            [] | ["datasets" | "spaces", ..] => None,
            [name] => Some((*name).to_string()),
            [owner, name, ..] => Some(format!("{owner}/{name}")),
        }
    }
}

impl Display for ResourceSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.primary_url)
    }
}

fn collect_urls<I, S>(urls: I) -> Vec<Arc<str>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    urls.into_iter()
        .map(|url| url.as_ref().trim().to_string())
        .filter(|url| !url.is_empty())
        .map(Arc::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_primary_url() {
        let spec = ResourceSpec::new("  https://huggingface.co/gpt2  ", Category::Model);
        assert_eq!(spec.primary_url(), "https://huggingface.co/gpt2");
    }

    #[test]
    fn test_from_url_infers_category() {
        assert_eq!(ResourceSpec::from_url("https://github.com/openai/gpt-2").category(), Category::Code);
        assert_eq!(ResourceSpec::from_url("https://huggingface.co/gpt2").category(), Category::Model);
    }

    #[test]
    fn test_blank_linked_urls_are_dropped() {
        let spec = ResourceSpec::new("https://huggingface.co/gpt2", Category::Model)
            .with_dataset_urls(["", "  ", "https://huggingface.co/datasets/openwebtext"])
            .with_code_urls(["https://github.com/openai/gpt-2 "]);

        assert_eq!(spec.dataset_urls().len(), 1);
        assert_eq!(&*spec.code_urls()[0], "https://github.com/openai/gpt-2");
    }

    #[test]
    fn test_validate_rejects_empty_primary_url() {
        let spec = ResourceSpec::new("   ", Category::Model);
        let err = spec.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidResource { .. }));
    }

    #[test]
    fn test_validate_accepts_non_empty_url() {
        ResourceSpec::new("model-a", Category::Model).validate().unwrap();
    }

    #[test]
    fn test_model_id_owner_and_name() {
        let spec = ResourceSpec::from_url("https://huggingface.co/google-bert/bert-base-uncased/tree/main");
        assert_eq!(spec.model_id().as_deref(), Some("google-bert/bert-base-uncased"));
    }

    #[test]
    fn test_model_id_single_segment() {
        let spec = ResourceSpec::from_url("https://huggingface.co/gpt2");
        assert_eq!(spec.model_id().as_deref(), Some("gpt2"));
    }

    #[test]
    fn test_model_id_not_for_datasets_or_other_hosts() {
        assert_eq!(ResourceSpec::from_url("https://huggingface.co/datasets/squad").model_id(), None);
        assert_eq!(ResourceSpec::from_url("https://github.com/owner/repo").model_id(), None);
        assert_eq!(ResourceSpec::from_url("not a url").model_id(), None);
    }

    #[test]
    fn test_metadata_accessors() {
        let spec = ResourceSpec::new("https://huggingface.co/gpt2", Category::Model).with_metadata(ResourceMetadata {
            readme: Some("# GPT-2".into()),
            license: Some("mit".into()),
        });

        assert_eq!(spec.readme(), Some("# GPT-2"));
        assert_eq!(spec.license(), Some("mit"));
    }

    #[test]
    fn test_metadata_does_not_affect_identity() {
        let plain = ResourceSpec::new("https://huggingface.co/gpt2", Category::Model);
        let with_readme = plain.clone().with_metadata(ResourceMetadata {
            readme: Some("readme".into()),
            license: None,
        });

        assert_eq!(plain.identity(), with_readme.identity());
    }
}
