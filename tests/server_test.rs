//! HTTP-level tests for the axum router.
//!
//! Upstreams are mocked with wiremock so the full stack runs: router →
//! gateway → HTTP clients → normalization → JSON response.
#![cfg(feature = "server")]

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rine::Rine;
use rine::server::{UPSTREAM_FAILED_DETAIL, router};

const PUBLIC_PATH: &str = "/api/v1/account";
const COMMUNITY_PATH: &str = "/api/v1/info";

fn upstream_payload() -> Value {
    json!({
        "basicInfo": {
            "nickname": "Rine",
            "level": 70,
            "accountId": "1122334455",
            "likes": 321,
            "vip": 4,
            "bio": "hello"
        },
        "stats": {
            "survival": { "rank": "Grandmaster", "kad": { "team1": 3.2, "team2": 2.8, "team4": 4.1 } },
            "clash": { "rank": "Master", "kad": 2.2 },
            "totalDiamondSpent": 12000
        }
    })
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn app(public: &MockServer, community: &MockServer, key: Option<&str>) -> axum::Router {
    let mut builder = Rine::builder()
        .public_endpoints([format!("{}{}", public.uri(), PUBLIC_PATH)])
        .community_url(format!("{}{}", community.uri(), COMMUNITY_PATH));
    if let Some(key) = key {
        builder = builder.community_key(key);
    }
    router(Arc::new(builder.build().unwrap()))
}

#[tokio::test]
async fn info_full_returns_normalized_profile() {
    let public = MockServer::start().await;
    let community = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PUBLIC_PATH))
        .and(query_param("uid", "1122334455"))
        .and(query_param("region", "ID"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_payload()))
        .expect(1)
        .mount(&public)
        .await;

    let (status, body) = get(
        app(&public, &community, None),
        "/info_full?uid=1122334455",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uid"], "1122334455");
    assert_eq!(body["region"], "ID");
    assert_eq!(body["nickname"], "Rine");
    assert_eq!(body["level"], 70);
    assert_eq!(body["accountId"], "1122334455");
    assert_eq!(body["likes"], 321);
    assert_eq!(body["vip_level"], 4);
    assert_eq!(body["bio"], "hello");
    assert_eq!(body["survival_rank"], "Grandmaster");
    assert_eq!(body["clash_rank"], "Master");
    assert_eq!(body["survival_kad"], json!({"team1": 3.2, "team2": 2.8, "team4": 4.1}));
    assert_eq!(body["clash_kad"], 2.2);
    assert_eq!(body["diamonds_spent"], 12000);
    assert_eq!(body["raw"], upstream_payload());
}

#[tokio::test]
async fn raw_payload_is_returned_in_upstream_key_order() {
    let public = MockServer::start().await;
    let community = MockServer::start().await;

    let upstream = r#"{"stats":{"totalDiamondSpent":1},"basicInfo":{"nickname":"z"},"zeta":1,"alpha":2}"#;
    Mock::given(method("GET"))
        .and(path(PUBLIC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(upstream, "application/json"))
        .mount(&public)
        .await;

    let response = app(&public, &community, None)
        .oneshot(Request::builder().uri("/info_full?uid=1").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(
        text.contains(&format!(r#""raw":{upstream}"#)),
        "raw payload reordered: {text}"
    );
}

#[tokio::test]
async fn repeated_request_is_served_from_cache() {
    let public = MockServer::start().await;
    let community = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PUBLIC_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_payload()))
        .expect(1)
        .mount(&public)
        .await;

    let app = app(&public, &community, None);
    let (_, first) = get(app.clone(), "/info_full?uid=1&region=SG").await;
    let (status, second) = get(app, "/info_full?uid=1&region=SG").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
}

#[tokio::test]
async fn falls_back_to_community_source() {
    let public = MockServer::start().await;
    let community = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(PUBLIC_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&public)
        .await;

    Mock::given(method("GET"))
        .and(path(COMMUNITY_PATH))
        .and(header("x-api-key", "ffc-key"))
        .and(query_param("uid", "42"))
        .and(query_param("region", "SG"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "basicInfo": { "nickname": "from-community" }
        })))
        .expect(1)
        .mount(&community)
        .await;

    let (status, body) = get(
        app(&public, &community, Some("ffc-key")),
        "/info_full?uid=42&region=SG",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nickname"], "from-community");
    assert_eq!(body["region"], "SG");
    assert_eq!(body["survival_kad"], json!({"team1": null, "team2": null, "team4": null}));
}

#[tokio::test]
async fn all_upstreams_failing_returns_502() {
    let public = MockServer::start().await;
    let community = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("secret upstream detail"))
        .mount(&public)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("secret upstream detail"))
        .mount(&community)
        .await;

    let (status, body) = get(
        app(&public, &community, Some("ffc-key")),
        "/info_full?uid=1",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({ "detail": UPSTREAM_FAILED_DETAIL }));
    assert_eq!(body["detail"], "All upstream providers failed");
}

#[tokio::test]
async fn unconfigured_community_source_returns_502() {
    let public = MockServer::start().await;
    let community = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&public)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream_payload()))
        .expect(0)
        .mount(&community)
        .await;

    let (status, body) = get(app(&public, &community, None), "/info_full?uid=1").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["detail"], UPSTREAM_FAILED_DETAIL);
}

#[tokio::test]
async fn missing_uid_is_rejected() {
    let public = MockServer::start().await;
    let community = MockServer::start().await;

    let (status, _) = get(app(&public, &community, None), "/info_full?region=ID").await;

    assert!(status.is_client_error(), "got {status}");
}

#[tokio::test]
async fn health_reports_version() {
    let public = MockServer::start().await;
    let community = MockServer::start().await;

    let (status, body) = get(app(&public, &community, None), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], rine::PKG_VERSION);
}
