//! Upstream profile providers.
//!
//! Two sources, always tried in this order by the gateway:
//!
//! 1. [`PublicSourceClient`]: unauthenticated, one or more mirror endpoints.
//! 2. [`CommunityClient`]: keyed API, disabled when no key is configured.

pub mod community;
pub mod public;
pub mod traits;

pub use community::CommunityClient;
pub use public::PublicSourceClient;
pub use traits::ProfileProvider;

use std::time::Duration;

use reqwest::{Client, Response};

use crate::{RineError, Result};

/// Bound on every outbound request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the HTTP client shared by a provider's requests.
pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RineError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// Map a non-success status to [`RineError::Api`].
pub(crate) fn check_status(response: &Response, provider: &str) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    Err(RineError::Api {
        status: status.as_u16(),
        message: format!("{provider} source returned {status}"),
    })
}
