//! Ingest endpoint tests driven through the full router, so the `/api`
//! nesting, status mapping, and `Set-Cookie` header are all exercised the
//! way a real client sees them.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::ServiceExt;

use consentsync_core::{ConsentRecord, ConsentSyncConfig};
use consentsync_protocol::ConsentCodec;
use consentsync_server::{routes, AppState};

const KEY: [u8; 32] = [42u8; 32];

fn router() -> axum::Router {
    let config = ConsentSyncConfig {
        port: 0,
        secret_key: KEY,
        cookie_domain: "consent.test".to_string(),
        api_endpoint: String::new(),
        submit_timeout_secs: 1,
        measurement_id: None,
        cookie_jar_path: std::path::PathBuf::new(),
    };
    routes::build_router(Arc::new(AppState::new(&config)))
}

fn post_consent(token: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/consent")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({ "consent": token }).to_string(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_accepts_and_reissues_valid_token() {
    let record = ConsentRecord {
        necessary: true,
        preferences: true,
        statistics: false,
        marketing: false,
    };
    let token = ConsentCodec::new(KEY).encode(&record).unwrap();

    let resp = router().oneshot(post_consent(&token)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let set_cookie = resp
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie present")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(
        set_cookie,
        format!(
            "cookie_consent={}; Secure; SameSite=Strict; Path=/; Domain=consent.test; Max-Age=31536000",
            token
        )
    );

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn test_rejects_garbage_token() {
    let resp = router().oneshot(post_consent("????")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_rejects_token_under_rotated_key() {
    let token = ConsentCodec::new([43u8; 32])
        .encode(&ConsentRecord::default())
        .unwrap();
    let resp = router().oneshot(post_consent(&token)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rejects_invariant_violation() {
    let record = ConsentRecord {
        necessary: false,
        preferences: false,
        statistics: false,
        marketing: false,
    };
    let token = ConsentCodec::new(KEY).encode(&record).unwrap();
    let resp = router().oneshot(post_consent(&token)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_rejects_plaintext_record_body() {
    // The endpoint never accepts an unsealed record in place of a token.
    let req = Request::builder()
        .method("POST")
        .uri("/api/consent")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({
                "necessary": true,
                "preferences": true,
                "statistics": true,
                "marketing": true
            })
            .to_string(),
        ))
        .unwrap();
    let resp = router().oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error());
}
