//! Shared application state.

use consentsync_core::ConsentSyncConfig;
use consentsync_protocol::{ConsentCodec, CookieAttributes};

/// Shared state for the ingest handlers. The endpoint is stateless beyond
/// these two immutable values; every request is independent.
pub struct AppState {
    pub codec: ConsentCodec,
    pub cookie_attributes: CookieAttributes,
}

impl AppState {
    pub fn new(config: &ConsentSyncConfig) -> Self {
        Self {
            codec: ConsentCodec::new(config.secret_key),
            cookie_attributes: CookieAttributes::new(config.cookie_domain.clone()),
        }
    }
}
