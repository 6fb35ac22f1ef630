use core::fmt::{Display, Formatter, Result as FmtResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// The canonical identity of a resource for caching purposes.
///
/// Dataset and code URLs are sorted and de-duplicated, so the identity does not depend on
/// the order in which linked resources were listed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheIdentity {
    primary_url: String,
    dataset_urls: Vec<String>,
    code_urls: Vec<String>,
}

impl CacheIdentity {
    #[must_use]
    pub fn new(primary_url: &str, dataset_urls: &[Arc<str>], code_urls: &[Arc<str>]) -> Self {
        Self {
            primary_url: primary_url.to_string(),
            dataset_urls: normalize(dataset_urls),
            code_urls: normalize(code_urls),
        }
    }

    #[must_use]
    pub fn primary_url(&self) -> &str {
        &self.primary_url
    }

    #[must_use]
    pub fn dataset_urls(&self) -> &[String] {
        &self.dataset_urls
    }

    #[must_use]
    pub fn code_urls(&self) -> &[String] {
        &self.code_urls
    }

    /// SHA-256 hex digest of the identity, suitable as a storage key.
    ///
    /// Every component is length-prefixed so distinct identities never hash the same input.
    #[must_use]
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        update_field(&mut hasher, &self.primary_url);

        for list in [&self.dataset_urls, &self.code_urls] {
            hasher.update((list.len() as u64).to_le_bytes());
            for url in list {
                update_field(&mut hasher, url);
            }
        }

        hex::encode(hasher.finalize())
    }
}

impl Display for CacheIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.primary_url)?;
        if !self.dataset_urls.is_empty() {
            write!(f, " datasets=[{}]", self.dataset_urls.join(", "))?;
        }
        if !self.code_urls.is_empty() {
            write!(f, " code=[{}]", self.code_urls.join(", "))?;
        }
        Ok(())
    }
}

fn normalize(urls: &[Arc<str>]) -> Vec<String> {
    let mut urls: Vec<String> = urls.iter().map(ToString::to_string).collect();
    urls.sort_unstable();
    urls.dedup();
    urls
}

fn update_field(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<Arc<str>> {
        items.iter().map(|s| Arc::from(*s)).collect()
    }

    #[test]
    fn test_dataset_order_is_normalized() {
        let a = CacheIdentity::new("m", &urls(&["a", "b"]), &[]);
        let b = CacheIdentity::new("m", &urls(&["b", "a"]), &[]);
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());
    }

    #[test]
    fn test_duplicates_are_removed() {
        let id = CacheIdentity::new("m", &urls(&["a", "a", "b"]), &urls(&["c", "c"]));
        assert_eq!(id.dataset_urls(), ["a".to_string(), "b".to_string()]);
        assert_eq!(id.code_urls(), ["c".to_string()]);
    }

    #[test]
    fn test_dataset_and_code_lists_are_distinct() {
        let as_dataset = CacheIdentity::new("m", &urls(&["x"]), &[]);
        let as_code = CacheIdentity::new("m", &[], &urls(&["x"]));
        assert_ne!(as_dataset, as_code);
        assert_ne!(as_dataset.digest(), as_code.digest());
    }

    #[test]
    fn test_digest_is_not_ambiguous_across_boundaries() {
        let a = CacheIdentity::new("ab", &urls(&["c"]), &[]);
        let b = CacheIdentity::new("a", &urls(&["bc"]), &[]);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = CacheIdentity::new("m", &[], &[]).digest();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_display() {
        let id = CacheIdentity::new("https://huggingface.co/gpt2", &urls(&["d"]), &urls(&["c"]));
        assert_eq!(id.to_string(), "https://huggingface.co/gpt2 datasets=[d] code=[c]");
    }
}
