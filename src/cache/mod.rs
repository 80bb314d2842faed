//! Profile cache.
//!
//! [`ProfileCache`] maps a composite key (`"{uid}_{region}"`) to the last
//! successfully fetched [`ProfileRecord`] and the instant it was fetched.
//!
//! - Entries are written through by the gateway after every successful
//!   upstream fetch, overwriting whatever was there.
//! - Entries are never removed. An entry older than the TTL is *stale*:
//!   [`ProfileCache::get_fresh`] treats it as a miss, and it stays in place
//!   until the next successful fetch replaces it.
//! - There is no size bound; the store lives as long as the gateway.
//!
//! Freshness is decided here, against an injected [`Clock`], rather than by
//! moka's own expiry, so tests can drive time explicitly.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use std::time::{Duration, Instant};

use moka::future::Cache;
use tracing::debug;

use crate::telemetry;
use crate::types::ProfileRecord;

/// How long a fetched profile is served from cache: 5 minutes.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// A cached profile and the instant it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub record: ProfileRecord,
    pub fetched_at: Instant,
}

/// Composite cache key for a lookup: `"{uid}_{region}"`, case-sensitive.
pub fn cache_key(uid: &str, region: &str) -> String {
    format!("{uid}_{region}")
}

/// Profile cache shared by all requests through one gateway.
pub struct ProfileCache {
    entries: Cache<String, CacheEntry>,
    ttl: Duration,
}

impl ProfileCache {
    /// Create an empty cache with the default TTL (300 s).
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Create an empty cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder().build(),
            ttl,
        }
    }

    /// Configured freshness window.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Raw lookup, fresh or not.
    pub async fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).await
    }

    /// Insert (or overwrite) the entry for `key`, stamped with `now`.
    pub async fn put(&self, key: String, record: ProfileRecord, now: Instant) {
        self.entries
            .insert(
                key,
                CacheEntry {
                    record,
                    fetched_at: now,
                },
            )
            .await;
    }

    /// Whether `entry` is still within the TTL at `now`.
    pub fn is_fresh(&self, entry: &CacheEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.fetched_at) < self.ttl
    }

    /// Look up a record that is still fresh at `now`.
    ///
    /// Stale entries count as misses but are left in place. Emits cache
    /// hit/miss metrics.
    pub async fn get_fresh(&self, key: &str, now: Instant) -> Option<ProfileRecord> {
        match self.get(key).await {
            Some(entry) if self.is_fresh(&entry, now) => {
                metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
                debug!(key, "profile cache hit");
                Some(entry.record)
            }
            stale => {
                metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
                debug!(key, stale = stale.is_some(), "profile cache miss");
                None
            }
        }
    }

    /// Number of entries, stale ones included.
    ///
    /// moka applies writes lazily, so pending tasks are flushed first.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for ProfileCache {
    fn default() -> Self {
        Self::new()
    }
}
