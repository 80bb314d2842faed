//! Provider trait for upstream profile sources.
//!
//! A provider fetches one player's raw profile payload. It does not
//! normalize and does not cache; the gateway owns both.
//!
//! # Failure semantics
//!
//! Every error returned from [`ProfileProvider::fetch`] is a fallback
//! trigger: the gateway logs it and moves on to the next provider. Providers
//! that lack credentials return [`RineError::NotConfigured`](crate::RineError::NotConfigured)
//! without touching the network.

use async_trait::async_trait;

use crate::Result;
use crate::types::RawProfile;

/// Upstream source of raw player profiles.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Provider name for logging and metrics.
    fn name(&self) -> &str;

    /// Fetch the raw payload for `uid` in `region`.
    async fn fetch(&self, uid: &str, region: &str) -> Result<RawProfile>;
}
