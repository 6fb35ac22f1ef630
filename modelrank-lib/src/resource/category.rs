use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

/// The kind of artifact a resource's primary URL points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[default]
    Model,
    Dataset,
    Code,
}

/// Hosts that serve source code rather than models or datasets.
const CODE_HOSTS: &[&str] = &["github.com", "gitlab.com", "codeberg.org"];

impl Category {
    /// Infer the category of a URL from its host and path.
    ///
    /// Code hosting sites map to [`Category::Code`], Hugging Face dataset pages map to
    /// [`Category::Dataset`], and everything else is treated as a model.
    #[must_use]
    pub fn from_url(url: &str) -> Self {
        let Ok(parsed) = Url::parse(url.trim()) else {
            return Self::Model;
        };

        let host = parsed.host_str().unwrap_or_default().trim_start_matches("www.");
        if CODE_HOSTS.contains(&host) {
            return Self::Code;
        }

        let first_segment = parsed.path_segments().and_then(|mut segments| segments.next()).unwrap_or_default();
        if host == "huggingface.co" && first_segment == "datasets" {
            return Self::Dataset;
        }

        Self::Model
    }
}
