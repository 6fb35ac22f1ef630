use crate::Result;
use crate::engine::EvaluationRecord;
use crate::resource::CacheIdentity;

/// A store of evaluation records keyed by canonical resource identity.
///
/// Implementations must provide read-your-writes within a process, keep at most one record
/// per identity, and tolerate concurrent use from many evaluations at once.
pub trait CacheStore: Send + Sync + core::fmt::Debug {
    /// Fetch the record stored for `identity`.
    ///
    /// Unreadable or stale entries are reported as `None` rather than as errors.
    fn get(&self, identity: &CacheIdentity) -> Option<EvaluationRecord>;

    /// Store `record` for `identity`, replacing any previous record.
    fn put(&self, identity: &CacheIdentity, record: &EvaluationRecord) -> Result<()>;
}

/// A store that never remembers anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCacheStore;

impl CacheStore for NoCacheStore {
    fn get(&self, _identity: &CacheIdentity) -> Option<EvaluationRecord> {
        None
    }

    fn put(&self, _identity: &CacheIdentity, _record: &EvaluationRecord) -> Result<()> {
        Ok(())
    }
}
