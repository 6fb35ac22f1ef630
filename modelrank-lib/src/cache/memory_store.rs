use super::CacheStore;
use crate::Result;
use crate::engine::EvaluationRecord;
use crate::resource::CacheIdentity;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// An in-process cache, mostly useful for tests and for one-shot batch runs.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    records: RwLock<HashMap<CacheIdentity, EvaluationRecord>>,
}

impl MemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, identity: &CacheIdentity) -> Option<EvaluationRecord> {
        self.records.read().unwrap_or_else(PoisonError::into_inner).get(identity).cloned()
    }

    fn put(&self, identity: &CacheIdentity, record: &EvaluationRecord) -> Result<()> {
        let _ = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(identity.clone(), record.clone());
        Ok(())
    }
}
