//! Consent-token ingest route.
//!
//! The endpoint only ever accepts the already-sealed token, never a
//! plaintext record: it re-verifies server-side what the client claims to
//! have encoded, then re-issues the same token as the persistence cookie.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use tracing::{info, warn};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/consent", post(set_consent))
}

#[derive(serde::Deserialize)]
pub struct SetConsentBody {
    pub consent: String,
}

/// `POST /api/consent` — decode, validate, and re-issue the token.
///
/// 200 sets the `cookie_consent` cookie to the submitted token unchanged.
/// A token that fails verification is 400; one that verifies but violates
/// the `necessary` invariant is 422. Neither sets a cookie.
pub async fn set_consent(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SetConsentBody>,
) -> Response {
    let record = match state.codec.decode(&body.consent) {
        Ok(record) => record,
        Err(e) => {
            warn!("Rejected consent token: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "invalid consent token" })),
            )
                .into_response();
        }
    };

    if !record.is_valid() {
        warn!("Rejected consent record with necessary=false");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": "invalid consent record" })),
        )
            .into_response();
    }

    info!(
        "Consent accepted: preferences={} statistics={} marketing={}",
        record.preferences, record.statistics, record.marketing
    );

    let cookie = state.cookie_attributes.set_cookie_header(&body.consent);
    (
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "success": true })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use consentsync_core::{ConsentRecord, ConsentSyncConfig};
    use consentsync_protocol::ConsentCodec;

    use super::*;

    const KEY: [u8; 32] = [5u8; 32];

    fn state() -> Arc<AppState> {
        let config = ConsentSyncConfig {
            port: 0,
            secret_key: KEY,
            cookie_domain: "example.com".to_string(),
            api_endpoint: String::new(),
            submit_timeout_secs: 1,
            measurement_id: None,
            cookie_jar_path: std::path::PathBuf::new(),
        };
        Arc::new(AppState::new(&config))
    }

    fn post_body(token: &str) -> Json<SetConsentBody> {
        Json(SetConsentBody {
            consent: token.to_string(),
        })
    }

    #[tokio::test]
    async fn test_valid_token_reissues_cookie() {
        let record = ConsentRecord {
            necessary: true,
            preferences: false,
            statistics: true,
            marketing: true,
        };
        let token = ConsentCodec::new(KEY).encode(&record).unwrap();

        let resp = set_consent(State(state()), post_body(&token)).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .expect("Set-Cookie present")
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with(&format!("cookie_consent={}", token)));
        assert!(set_cookie.contains("SameSite=Strict"));
        assert!(set_cookie.contains("Domain=example.com"));
        assert!(set_cookie.contains("Max-Age=31536000"));
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected_without_cookie() {
        let resp = set_consent(State(state()), post_body("not a token")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_wrong_key_token_is_rejected() {
        let token = ConsentCodec::new([6u8; 32])
            .encode(&ConsentRecord::default())
            .unwrap();
        let resp = set_consent(State(state()), post_body(&token)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_necessary_false_is_rejected() {
        let record = ConsentRecord {
            necessary: false,
            preferences: true,
            statistics: true,
            marketing: true,
        };
        let token = ConsentCodec::new(KEY).encode(&record).unwrap();
        let resp = set_consent(State(state()), post_body(&token)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
    }
}
