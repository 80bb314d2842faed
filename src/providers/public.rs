//! Public profile source.
//!
//! An unauthenticated API served from one or more mirror endpoints. Each
//! endpoint takes `uid` and `region` as query parameters. Mirrors are tried
//! in order and the first one answering `200` with a JSON object wins.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::info;

use super::traits::ProfileProvider;
use super::{DEFAULT_TIMEOUT, http_client};
use crate::types::RawProfile;
use crate::{RineError, Result};

/// Default mirror list.
pub const DEFAULT_PUBLIC_ENDPOINTS: &[&str] =
    &["https://free-ff-api-src-5plp.onrender.com/api/v1/account"];

const NAME: &str = "public";

/// Client for the public multi-endpoint profile source.
#[derive(Clone)]
pub struct PublicSourceClient {
    endpoints: Vec<String>,
    http: Client,
}

impl PublicSourceClient {
    /// Client for the default mirror list.
    pub fn new() -> Result<Self> {
        Self::with_endpoints(DEFAULT_PUBLIC_ENDPOINTS.iter().copied(), DEFAULT_TIMEOUT)
    }

    /// Client for a custom, ordered mirror list (also used with wiremock).
    pub fn with_endpoints<I, S>(endpoints: I, timeout: Duration) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            endpoints: endpoints.into_iter().map(Into::into).collect(),
            http: http_client(timeout)?,
        })
    }

    /// Configured mirrors, in try order.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Fetch from the first mirror that answers.
    ///
    /// Per-mirror failures are logged at `info` and the next mirror is
    /// tried. Fails with [`RineError::AllEndpointsFailed`] once every
    /// mirror has failed (or when none are configured).
    pub async fn fetch(&self, uid: &str, region: &str) -> Result<RawProfile> {
        for endpoint in &self.endpoints {
            match self.fetch_from(endpoint, uid, region).await {
                Ok(payload) => return Ok(payload),
                Err(e) => info!(%endpoint, error = %e, "public source endpoint failed"),
            }
        }
        Err(RineError::AllEndpointsFailed(NAME.to_string()))
    }

    async fn fetch_from(&self, endpoint: &str, uid: &str, region: &str) -> Result<RawProfile> {
        let response = self
            .http
            .get(endpoint)
            .query(&[("uid", uid), ("region", region)])
            .send()
            .await?;

        // Only a plain 200 counts; other 2xx codes are failures too.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(RineError::Api {
                status: status.as_u16(),
                message: format!("{NAME} source returned {status}"),
            });
        }

        Ok(response.json::<RawProfile>().await?)
    }
}

#[async_trait]
impl ProfileProvider for PublicSourceClient {
    fn name(&self) -> &str {
        NAME
    }

    async fn fetch(&self, uid: &str, region: &str) -> Result<RawProfile> {
        PublicSourceClient::fetch(self, uid, region).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints() {
        let client = PublicSourceClient::new().unwrap();
        assert_eq!(client.endpoints(), DEFAULT_PUBLIC_ENDPOINTS);
        assert_eq!(ProfileProvider::name(&client), "public");
    }

    #[tokio::test]
    async fn no_endpoints_fails_immediately() {
        let client =
            PublicSourceClient::with_endpoints(Vec::<String>::new(), DEFAULT_TIMEOUT).unwrap();
        let err = client.fetch("1", "ID").await.unwrap_err();
        assert!(matches!(err, RineError::AllEndpointsFailed(ref p) if p == "public"));
    }
}
