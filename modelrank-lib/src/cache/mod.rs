//! Storage for evaluation records
//!
//! A [`CacheStore`] maps a resource's [`CacheIdentity`](crate::resource::CacheIdentity) to
//! the most recent [`EvaluationRecord`](crate::engine::EvaluationRecord) computed for it.
//! There is at most one record per identity: storing a record replaces any earlier one.
//!
//! Stores fail open. Anything that prevents a record from being read back (a missing file,
//! corrupt JSON, an expired entry, a record stored under a different identity) is a miss,
//! and the engine simply recomputes.
//!
//! - [`FileCacheStore`] keeps one JSON file per identity and serializes writers per identity
//!   with an advisory file lock, so concurrent writers in one or several processes never
//!   produce a torn record.
//! - [`MemoryCacheStore`] keeps records in process memory.
//! - [`NoCacheStore`] never stores anything.

mod cache_lock;
mod cache_store;
mod file_store;
mod memory_store;

pub use cache_store::{CacheStore, NoCacheStore};
pub use file_store::FileCacheStore;
pub use memory_store::MemoryCacheStore;
