//! HTTP routes.
//!
//! - `GET /info_full?uid=..&region=..`: full normalized profile
//! - `GET /health`: liveness probe

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use crate::gateway::ProfileGateway;
use crate::types::ProfileRecord;
use crate::{PKG_VERSION, RineError};

/// Detail returned with every 502. Upstream error text is never exposed.
pub const UPSTREAM_FAILED_DETAIL: &str = "All upstream providers failed";

/// Query string of `/info_full`.
#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    pub uid: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// Error response: status plus a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: &'static str,
}

impl From<RineError> for ApiError {
    fn from(_: RineError) -> Self {
        // The gateway only surfaces AllProvidersFailed; anything else is
        // mapped the same way so no upstream detail leaks.
        Self {
            status: StatusCode::BAD_GATEWAY,
            detail: UPSTREAM_FAILED_DETAIL,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(serde_json::json!({ "detail": self.detail })),
        )
            .into_response()
    }
}

/// Build the router around a shared gateway.
pub fn router(gateway: Arc<ProfileGateway>) -> Router {
    Router::new()
        .route("/info_full", get(info_full))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(gateway)
}

async fn info_full(
    State(gateway): State<Arc<ProfileGateway>>,
    Query(query): Query<InfoQuery>,
) -> Result<Json<ProfileRecord>, ApiError> {
    let record = gateway
        .info_full(&query.uid, query.region.as_deref())
        .await?;
    Ok(Json(record))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "rine",
        "version": PKG_VERSION,
    }))
}
