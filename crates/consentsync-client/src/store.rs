//! Where the opaque token lives between sessions.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use consentsync_protocol::CookieAttributes;

/// Persisted slot for the consent cookie.
///
/// `read` yields the stored token, if any; `write` overwrites it whole with
/// the fixed attribute set. Absence is only ever the initial state — there
/// is no delete.
pub trait ConsentStore {
    fn read(&self) -> Option<String>;
    fn write(&self, token: &str, attributes: &CookieAttributes) -> consentsync_core::Result<()>;
}

impl<S: ConsentStore + ?Sized> ConsentStore for std::sync::Arc<S> {
    fn read(&self) -> Option<String> {
        (**self).read()
    }

    fn write(&self, token: &str, attributes: &CookieAttributes) -> consentsync_core::Result<()> {
        (**self).write(token, attributes)
    }
}

/// In-memory store, mainly for tests.
#[derive(Default)]
pub struct MemoryStore {
    slot: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a token, as if a prior session had written it.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(token.into())),
        }
    }
}

impl ConsentStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.slot.read().clone()
    }

    fn write(&self, token: &str, _attributes: &CookieAttributes) -> consentsync_core::Result<()> {
        *self.slot.write() = Some(token.to_string());
        Ok(())
    }
}

/// On-disk cookie jar entry (`{value, attributes}` as JSON).
#[derive(Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    attributes: CookieAttributes,
}

/// File-backed store. A missing or unreadable file reads as absent.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConsentStore for FileStore {
    fn read(&self) -> Option<String> {
        let cookie: StoredCookie = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())?;
        Some(cookie.value)
    }

    fn write(&self, token: &str, attributes: &CookieAttributes) -> consentsync_core::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let cookie = StoredCookie {
            value: token.to_string(),
            attributes: attributes.clone(),
        };
        let json = serde_json::to_string_pretty(&cookie)?;
        if let Err(e) = std::fs::write(&self.path, &json) {
            warn!("Failed to persist consent cookie: {}", e);
            return Err(e.into());
        }
        info!("Persisted consent cookie to {}", self.path.display());
        Ok(())
    }
}
