//! Metadata retrieval for hosted models
//!
//! Metrics never perform their own I/O against model hosts. Instead, callers gather what the
//! metrics need ahead of time and attach it to the resource as
//! [`ResourceMetadata`](crate::resource::ResourceMetadata). The [`ReadmeFetcher`] downloads a
//! model card from Hugging Face for that purpose.

mod readme_fetcher;

pub use readme_fetcher::{HUGGING_FACE_BASE_URL, ReadmeFetcher};
