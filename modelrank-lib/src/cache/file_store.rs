//! A durable cache backed by one JSON file per resource identity.
//!
//! Each entry is an envelope holding the write timestamp, the full identity, and the record.
//! The identity is stored so a lookup can verify it read back what it asked for.

use super::CacheStore;
use super::cache_lock::lock_entry;
use crate::Result;
use crate::engine::EvaluationRecord;
use crate::resource::CacheIdentity;
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

const LOG_TARGET: &str = "     cache";

/// On-disk representation of a cache entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct Envelope<R> {
    timestamp: DateTime<Utc>,
    identity: CacheIdentity,
    record: R,
}

/// A TTL-aware, directory-backed evaluation cache.
#[derive(Debug, Clone)]
pub struct FileCacheStore {
    dir: PathBuf,
    ttl: Option<Duration>,
    fixed_time: Option<DateTime<Utc>>,
}

impl FileCacheStore {
    /// Open a cache rooted at `cache_dir`, creating the directory if needed.
    ///
    /// Entries older than `ttl` at the time of a lookup are treated as misses; `None` keeps
    /// entries forever.
    pub fn new(cache_dir: impl Into<PathBuf>, ttl: Option<Duration>) -> Result<Self> {
        let dir = cache_dir.into();
        fs::create_dir_all(&dir).into_app_err_with(|| format!("creating cache directory '{}'", dir.display()))?;

        Ok(Self { dir, ttl, fixed_time: None })
    }

    /// Stamp and age entries against `now` instead of the system clock.
    #[must_use]
    pub fn with_fixed_time(mut self, now: DateTime<Utc>) -> Self {
        self.fixed_time = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.fixed_time.unwrap_or_else(Utc::now)
    }

    /// Returns the cache directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, digest: &str) -> PathBuf {
        self.dir.join(format!("{digest}.json"))
    }

    fn is_expired(&self, digest: &str, timestamp: DateTime<Utc>) -> bool {
        let Some(ttl) = self.ttl else {
            return false;
        };

        // Handle future timestamps (clock skew) by treating them as fresh
        let age = self.now().signed_duration_since(timestamp);
        if age.num_seconds() < 0 {
            log::debug!(target: LOG_TARGET, "Cache timestamp is in the future for {digest} (clock skew detected), treating as fresh");
            return false;
        }

        let age = age.to_std().unwrap_or(Duration::MAX);
        if age >= ttl {
            log::debug!(
                target: LOG_TARGET,
                "Cache expired for {digest} (age: {:.1} days, TTL: {:.1} days)",
                age.as_secs_f64() / 86400.0,
                ttl.as_secs_f64() / 86400.0
            );
            return true;
        }

        false
    }
}

impl CacheStore for FileCacheStore {
    fn get(&self, identity: &CacheIdentity) -> Option<EvaluationRecord> {
        let digest = identity.digest();
        let path = self.entry_path(&digest);

        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Cache miss for '{identity}': {e:#}");
                return None;
            }
        };

        let envelope: Envelope<EvaluationRecord> = match serde_json::from_reader(BufReader::new(file)) {
            Ok(envelope) => envelope,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Cache miss for '{identity}', unreadable entry '{}': {e:#}", path.display());
                return None;
            }
        };

        if envelope.identity != *identity || envelope.record.identity != *identity {
            log::warn!(target: LOG_TARGET, "Cache entry '{}' belongs to a different resource, ignoring it", path.display());
            return None;
        }

        if self.is_expired(&digest, envelope.timestamp) {
            return None;
        }

        log::debug!(target: LOG_TARGET, "Cache hit for '{identity}'");
        Some(envelope.record)
    }

    fn put(&self, identity: &CacheIdentity, record: &EvaluationRecord) -> Result<()> {
        let digest = identity.digest();
        let path = self.entry_path(&digest);
        let temp_path = self.dir.join(format!("{digest}.json.tmp"));

        // Writers to the same identity take turns; the rename makes each write land atomically
        let _guard = lock_entry(&self.dir.join(format!("{digest}.lock")))?;

        let envelope = Envelope {
            timestamp: self.now(),
            identity: identity.clone(),
            record,
        };

        let file = File::create(&temp_path).into_app_err_with(|| format!("creating cache file '{}'", temp_path.display()))?;
        let mut writer = BufWriter::new(file);

        #[cfg(debug_assertions)]
        let result = serde_json::to_writer_pretty(&mut writer, &envelope);
        #[cfg(not(debug_assertions))]
        let result = serde_json::to_writer(&mut writer, &envelope);

        result.into_app_err_with(|| format!("writing cache file '{}'", temp_path.display()))?;
        writer
            .flush()
            .into_app_err_with(|| format!("flushing cache file '{}'", temp_path.display()))?;
        drop(writer);

        fs::rename(&temp_path, &path).into_app_err_with(|| format!("replacing cache file '{}'", path.display()))?;
        log::debug!(target: LOG_TARGET, "Cached evaluation for '{identity}'");
        Ok(())
    }
}
