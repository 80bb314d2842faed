//! Community profile API client.
//!
//! A single keyed endpoint: the key goes in the `x-api-key` header, `uid`
//! and `region` go in the query string. Without a key the client is inert
//! and every fetch fails with [`RineError::NotConfigured`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::traits::ProfileProvider;
use super::{DEFAULT_TIMEOUT, check_status, http_client};
use crate::types::RawProfile;
use crate::{RineError, Result};

/// Default community API endpoint.
pub const COMMUNITY_API_URL: &str = "https://developers.freefirecommunity.com/api/v1/info";

const NAME: &str = "community";

/// Client for the keyed community profile API.
#[derive(Clone)]
pub struct CommunityClient {
    api_key: Option<String>,
    http: Client,
    url: String,
}

impl CommunityClient {
    /// Client for the default endpoint.
    ///
    /// An empty key is treated the same as no key.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        Self::with_base_url(api_key, COMMUNITY_API_URL, DEFAULT_TIMEOUT)
    }

    /// Client with a custom endpoint URL (for testing with wiremock).
    pub fn with_base_url(
        api_key: Option<String>,
        url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        Ok(Self {
            api_key: api_key.filter(|k| !k.is_empty()),
            http: http_client(timeout)?,
            url: url.into(),
        })
    }

    /// Whether a usable key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch the profile for `uid` in `region`.
    ///
    /// Fails with [`RineError::NotConfigured`] when no key is set, and with
    /// [`RineError::Upstream`] wrapping the cause on any transport error,
    /// non-success status, or undecodable body.
    pub async fn fetch(&self, uid: &str, region: &str) -> Result<RawProfile> {
        let api_key = self.api_key.as_deref().ok_or(RineError::NotConfigured(NAME))?;

        self.request(api_key, uid, region)
            .await
            .map_err(|e| RineError::Upstream {
                provider: NAME.to_string(),
                source: Box::new(e),
            })
    }

    async fn request(&self, api_key: &str, uid: &str, region: &str) -> Result<RawProfile> {
        let response = self
            .http
            .get(&self.url)
            .header("x-api-key", api_key)
            .query(&[("uid", uid), ("region", region)])
            .send()
            .await?;

        check_status(&response, NAME)?;

        Ok(response.json::<RawProfile>().await?)
    }
}

#[async_trait]
impl ProfileProvider for CommunityClient {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch(&self, uid: &str, region: &str) -> Result<RawProfile> {
        CommunityClient::fetch(self, uid, region).await
    }
}
