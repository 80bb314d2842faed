//! Rine - player profile gateway with provider fallback and caching
//!
//! This crate fetches a player profile from one of several upstream
//! game-statistics providers, normalizes the heterogeneous JSON into one
//! [`ProfileRecord`] shape, and caches results for five minutes.
//!
//! Lookups go through [`ProfileGateway::info_full`]: a fresh cache hit is
//! returned as-is; otherwise the public source is tried, then the community
//! source, and the first success is normalized, cached and returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use rine::Rine;
//!
//! #[tokio::main]
//! async fn main() -> rine::Result<()> {
//!     let gateway = Rine::builder()
//!         .community_key("ffc-your-key")
//!         .build()?;
//!
//!     let profile = gateway.info_full("1234567890", Some("SG")).await?;
//!     println!("{:?} (level {:?})", profile.nickname, profile.level);
//!     Ok(())
//! }
//! ```
//!
//! With the `server` feature the same gateway is served over HTTP by the
//! `rined` binary (see [`server`]).

pub mod cache;
pub mod error;
pub mod gateway;
pub mod normalize;
pub mod providers;
#[cfg(feature = "server")]
pub mod server;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use cache::{CacheEntry, Clock, ManualClock, ProfileCache, SystemClock};
pub use error::{Result, RineError};
pub use gateway::{DEFAULT_REGION, ProfileGateway, Rine, RineBuilder};
pub use normalize::normalize;
pub use providers::{CommunityClient, ProfileProvider, PublicSourceClient};
pub use types::{KadStats, ProfileRecord, RawProfile};

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
