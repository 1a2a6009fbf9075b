//! Configuration loaded from the environment.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// Length of the shared token key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Top-level ConsentSync configuration.
///
/// The shared secret is an explicit value injected into the codec and the
/// ingest handler at construction time; nothing reads the environment after
/// startup.
#[derive(Debug, Clone)]
pub struct ConsentSyncConfig {
    /// HTTP server port.
    pub port: u16,
    /// Shared secret for the token envelope.
    pub secret_key: [u8; KEY_LEN],
    /// Domain attribute stamped on the persistence cookie.
    pub cookie_domain: String,
    /// Ingest endpoint URL the client submits to.
    pub api_endpoint: String,
    /// Bound on a single submission attempt, in seconds.
    pub submit_timeout_secs: u64,
    /// Analytics measurement id handed to the analytics gate, if any.
    pub measurement_id: Option<String>,
    /// Where the client persists the consent cookie between sessions.
    pub cookie_jar_path: PathBuf,
}

impl ConsentSyncConfig {
    /// Create configuration from environment and defaults.
    ///
    /// `CONSENT_SECRET_KEY` is required and must be 64 hex characters.
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4020);

        let key_hex = std::env::var("CONSENT_SECRET_KEY")
            .map_err(|_| Error::Config("CONSENT_SECRET_KEY is not set".to_string()))?;
        let secret_key = parse_secret_key(&key_hex)?;

        let cookie_domain =
            std::env::var("CONSENT_COOKIE_DOMAIN").unwrap_or_else(|_| "localhost".to_string());

        let api_endpoint = std::env::var("CONSENT_API_ENDPOINT")
            .unwrap_or_else(|_| format!("http://localhost:{}/api/consent", port));

        let submit_timeout_secs = std::env::var("CONSENT_SUBMIT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let measurement_id = std::env::var("CONSENT_MEASUREMENT_ID").ok();

        let cookie_jar_path = std::env::var("CONSENT_COOKIE_JAR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/cookie_consent.json"));

        Ok(Self {
            port,
            secret_key,
            cookie_domain,
            api_endpoint,
            submit_timeout_secs,
            measurement_id,
            cookie_jar_path,
        })
    }
}

/// Decode a 64-hex-char shared secret into key bytes.
pub fn parse_secret_key(key_hex: &str) -> Result<[u8; KEY_LEN]> {
    let bytes = hex::decode(key_hex.trim())
        .map_err(|e| Error::Config(format!("CONSENT_SECRET_KEY is not valid hex: {}", e)))?;
    let key: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
        Error::Config(format!(
            "CONSENT_SECRET_KEY must be {} hex characters",
            KEY_LEN * 2
        ))
    })?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secret_key() {
        let key = parse_secret_key(&"ab".repeat(32)).unwrap();
        assert_eq!(key, [0xab; 32]);
    }

    #[test]
    fn test_parse_secret_key_wrong_length() {
        assert!(parse_secret_key("abcd").is_err());
    }

    #[test]
    fn test_parse_secret_key_not_hex() {
        assert!(parse_secret_key(&"zz".repeat(32)).is_err());
    }
}
