//! HTTP service.
//!
//! This module provides:
//! - The axum router exposing the gateway (`routes`)
//! - Configuration and secrets loading for `rined` (`config`)

pub mod config;
pub mod routes;

pub use routes::{UPSTREAM_FAILED_DETAIL, router};
