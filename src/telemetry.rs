//! Telemetry metric name constants.
//!
//! Centralised metric names for rine operations. Consumers install their
//! own `metrics` recorder (e.g. prometheus, statsd); without a recorder
//! installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `rine_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `provider`: provider name ("public" or "community")
//! - `status`: "ok" or "error"

/// Total provider fetches attempted by the gateway.
///
/// Labels: `provider`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "rine_requests_total";

/// Provider fetch duration in seconds.
///
/// Labels: `provider`.
pub const REQUEST_DURATION_SECONDS: &str = "rine_request_duration_seconds";

/// Times the gateway moved past a failed provider to the next one.
///
/// Labels: `from` (the provider that failed).
pub const FALLBACKS_TOTAL: &str = "rine_fallbacks_total";

/// Lookups where every provider failed.
///
/// Labels: `last` ("failed" | "unconfigured"), how the final provider ended.
pub const EXHAUSTED_TOTAL: &str = "rine_exhausted_total";

/// Total profile cache hits.
pub const CACHE_HITS_TOTAL: &str = "rine_cache_hits_total";

/// Total profile cache misses, stale entries included.
pub const CACHE_MISSES_TOTAL: &str = "rine_cache_misses_total";
