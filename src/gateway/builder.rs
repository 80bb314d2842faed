//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use super::ProfileGateway;
use crate::Result;
use crate::cache::{Clock, DEFAULT_CACHE_TTL, ProfileCache, SystemClock};
use crate::providers::community::COMMUNITY_API_URL;
use crate::providers::public::DEFAULT_PUBLIC_ENDPOINTS;
use crate::providers::{CommunityClient, DEFAULT_TIMEOUT, ProfileProvider, PublicSourceClient};

/// Main entry point for creating gateway instances.
pub struct Rine;

impl Rine {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> RineBuilder {
        RineBuilder::new()
    }
}

/// Builder for configuring gateway instances.
///
/// The gateway always has exactly two provider slots, public then
/// community. By default both are the real HTTP clients; tests can swap
/// either slot for another [`ProfileProvider`].
pub struct RineBuilder {
    public_endpoints: Vec<String>,
    community_key: Option<String>,
    community_url: String,
    timeout: Duration,
    cache_ttl: Duration,
    clock: Arc<dyn Clock>,
    public_provider: Option<Arc<dyn ProfileProvider>>,
    community_provider: Option<Arc<dyn ProfileProvider>>,
}

impl RineBuilder {
    pub fn new() -> Self {
        Self {
            public_endpoints: DEFAULT_PUBLIC_ENDPOINTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            community_key: None,
            community_url: COMMUNITY_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            clock: Arc::new(SystemClock),
            public_provider: None,
            community_provider: None,
        }
    }

    /// Replace the public source mirror list (tried in the given order).
    pub fn public_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.public_endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    /// Set the community API key. Without one (or with an empty one) the
    /// community source is disabled.
    pub fn community_key(mut self, api_key: impl Into<String>) -> Self {
        self.community_key = Some(api_key.into());
        self
    }

    /// Override the community API endpoint URL.
    pub fn community_url(mut self, url: impl Into<String>) -> Self {
        self.community_url = url.into();
        self
    }

    /// Per-request timeout for both HTTP clients (default: 10 s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Cache freshness window (default: 300 s).
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Time source for cache timestamps.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use `provider` in the public slot instead of the HTTP client.
    pub fn public_provider(mut self, provider: Arc<dyn ProfileProvider>) -> Self {
        self.public_provider = Some(provider);
        self
    }

    /// Use `provider` in the community slot instead of the HTTP client.
    pub fn community_provider(mut self, provider: Arc<dyn ProfileProvider>) -> Self {
        self.community_provider = Some(provider);
        self
    }

    /// Build the gateway.
    ///
    /// Fails only if an HTTP client cannot be constructed.
    pub fn build(self) -> Result<ProfileGateway> {
        let public: Arc<dyn ProfileProvider> = match self.public_provider {
            Some(p) => p,
            None => Arc::new(PublicSourceClient::with_endpoints(
                self.public_endpoints,
                self.timeout,
            )?),
        };

        let community: Arc<dyn ProfileProvider> = match self.community_provider {
            Some(p) => p,
            None => Arc::new(CommunityClient::with_base_url(
                self.community_key,
                self.community_url,
                self.timeout,
            )?),
        };

        Ok(ProfileGateway::new(
            public,
            community,
            ProfileCache::with_ttl(self.cache_ttl),
            self.clock,
        ))
    }
}

impl Default for RineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
