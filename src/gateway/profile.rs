//! ProfileGateway - cache check, then the provider fallback chain

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, instrument};

use crate::cache::{Clock, ProfileCache, cache_key};
use crate::normalize::normalize;
use crate::providers::ProfileProvider;
use crate::telemetry;
use crate::types::ProfileRecord;
use crate::{RineError, Result};

/// Region used when the caller gives none.
pub const DEFAULT_REGION: &str = "ID";

/// The region a lookup actually uses: the requested one, or
/// [`DEFAULT_REGION`] when it is missing or empty.
pub fn effective_region(region: Option<&str>) -> &str {
    match region {
        Some(r) if !r.is_empty() => r,
        _ => DEFAULT_REGION,
    }
}

/// Fetches normalized profiles, serving fresh cache hits and otherwise
/// trying the public source, then the community source.
///
/// The order is fixed. The first provider to return a payload wins; its
/// normalized record is written to the cache before being returned. If both
/// fail the caller gets [`RineError::AllProvidersFailed`] and nothing else,
/// not even a stale cached record.
pub struct ProfileGateway {
    public: Arc<dyn ProfileProvider>,
    community: Arc<dyn ProfileProvider>,
    cache: ProfileCache,
    clock: Arc<dyn Clock>,
}

impl ProfileGateway {
    pub(crate) fn new(
        public: Arc<dyn ProfileProvider>,
        community: Arc<dyn ProfileProvider>,
        cache: ProfileCache,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            public,
            community,
            cache,
            clock,
        }
    }

    /// The gateway's cache.
    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    /// Look up the full profile for `uid`.
    ///
    /// `region` defaults to [`DEFAULT_REGION`]. The returned record always
    /// carries `uid` and the effective region.
    #[instrument(skip(self), fields(operation = "info_full"))]
    pub async fn info_full(&self, uid: &str, region: Option<&str>) -> Result<ProfileRecord> {
        let region = effective_region(region);
        let key = cache_key(uid, region);
        let now = self.clock.now();

        if let Some(record) = self.cache.get_fresh(&key, now).await {
            return Ok(record);
        }

        let chain = [&self.public, &self.community];
        for (idx, provider) in chain.iter().enumerate() {
            let name = provider.name();
            let start = Instant::now();
            match provider.fetch(uid, region).await {
                Ok(raw) => {
                    Self::record_request(name, start, true);
                    let record = normalize(uid, region, raw);
                    self.cache.put(key, record.clone(), now).await;
                    return Ok(record);
                }
                Err(e) if idx + 1 < chain.len() => {
                    Self::record_request(name, start, false);
                    metrics::counter!(telemetry::FALLBACKS_TOTAL, "from" => name.to_owned())
                        .increment(1);
                    info!(provider = name, error = %e, "provider failed, falling back");
                }
                Err(e) if e.is_not_configured() => {
                    Self::record_request(name, start, false);
                    metrics::counter!(telemetry::EXHAUSTED_TOTAL, "last" => "unconfigured")
                        .increment(1);
                    info!(provider = name, "provider not configured, skipped");
                    error!("all upstream providers failed");
                }
                Err(e) => {
                    Self::record_request(name, start, false);
                    metrics::counter!(telemetry::EXHAUSTED_TOTAL, "last" => "failed").increment(1);
                    error!(provider = name, error = %e, "all upstream providers failed");
                }
            }
        }

        Err(RineError::AllProvidersFailed)
    }

    fn record_request(provider: &str, start: Instant, ok: bool) {
        let status = if ok { "ok" } else { "error" };
        let elapsed = start.elapsed().as_secs_f64();
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "provider" => provider.to_owned(),
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "provider" => provider.to_owned(),
        )
        .record(elapsed);
    }
}
