//! ConsentSync Client — the prompt state machine and its capabilities.

pub mod analytics;
pub mod controller;
pub mod store;
pub mod submit;

pub use analytics::{AnalyticsGate, TagLogger};
pub use controller::{ConsentController, ControllerState};
pub use store::{ConsentStore, FileStore, MemoryStore};
pub use submit::{ConsentSubmit, HttpSubmitter, SubmitError};

use consentsync_core::ConsentSyncConfig;
use consentsync_protocol::{ConsentCodec, CookieAttributes};

/// Controller wired with the shipped capability implementations.
pub type HttpConsentController = ConsentController<FileStore, TagLogger, HttpSubmitter>;

/// Assemble a controller from configuration: file-backed cookie jar, HTTP
/// submission against the configured endpoint, logging analytics gate.
pub fn controller_from_config(config: &ConsentSyncConfig) -> HttpConsentController {
    ConsentController::new(
        ConsentCodec::new(config.secret_key),
        CookieAttributes::new(config.cookie_domain.clone()),
        FileStore::new(&config.cookie_jar_path),
        TagLogger::new(config.measurement_id.clone()),
        HttpSubmitter::new(config.api_endpoint.clone(), config.submit_timeout_secs),
    )
}
