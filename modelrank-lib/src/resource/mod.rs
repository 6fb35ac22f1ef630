//! What gets evaluated
//!
//! A [`ResourceSpec`] names a model by its primary URL, along with any datasets and code
//! repositories linked to it. Metadata fetched by collaborators (README text, license) can be
//! attached to a resource, but does not participate in its identity.
//!
//! The [`CacheIdentity`] of a resource is the canonical key used to deduplicate evaluations.
//! Dataset and code URL lists are sorted and de-duplicated when the identity is built, so
//! equivalent resources listed in a different order share cached results.

mod cache_identity;
mod category;
mod resource_spec;

pub use cache_identity::CacheIdentity;
pub use category::Category;
pub use resource_spec::{ResourceMetadata, ResourceSpec};
