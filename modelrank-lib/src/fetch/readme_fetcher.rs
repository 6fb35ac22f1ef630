use crate::Result;
use crate::resource::{ResourceMetadata, ResourceSpec};
use core::time::Duration;
use ohno::IntoAppError;
use std::sync::Arc;

const LOG_TARGET: &str = "    readme";

pub const HUGGING_FACE_BASE_URL: &str = "https://huggingface.co";

/// Downloads model cards (`README.md`) for Hugging Face hosted models.
#[derive(Debug, Clone)]
pub struct ReadmeFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ReadmeFetcher {
    /// Create a fetcher talking to `base_url`, or to Hugging Face when `None`.
    ///
    /// Every request is abandoned after `timeout`.
    pub fn new(base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("modelrank")
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.unwrap_or(HUGGING_FACE_BASE_URL).trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the README for the model identified by `model_id` (`owner/name`).
    ///
    /// Returns `Ok(None)` when the model has no README.
    pub async fn fetch_readme(&self, model_id: &str) -> Result<Option<String>> {
        let url = format!("{}/{model_id}/raw/main/README.md", self.base_url);
        log::debug!(target: LOG_TARGET, "Fetching README for '{model_id}' from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .into_app_err_with(|| format!("sending HTTP request to {url}"))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            log::debug!(target: LOG_TARGET, "No README found for '{model_id}'");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ohno::app_err!("unexpected HTTP status {status} from {url}"));
        }

        let text = response.text().await.into_app_err_with(|| format!("reading README body from {url}"))?;
        log::debug!(target: LOG_TARGET, "README for '{model_id}' is {} bytes", text.len());
        Ok(Some(text))
    }

    /// Return `resource` with its README attached, keeping any metadata already present.
    ///
    /// Resources that are not Hugging Face models, or that already carry a README, are
    /// returned unchanged.
    pub async fn attach_readme(&self, resource: ResourceSpec) -> Result<ResourceSpec> {
        if resource.readme().is_some() {
            return Ok(resource);
        }

        let Some(model_id) = resource.model_id() else {
            log::debug!(target: LOG_TARGET, "'{resource}' is not a Hugging Face model, skipping README");
            return Ok(resource);
        };

        let readme = self.fetch_readme(&model_id).await?;
        let metadata = ResourceMetadata {
            readme: readme.map(Arc::from),
            license: resource.metadata().license.clone(),
        };

        Ok(resource.with_metadata(metadata))
    }
}
