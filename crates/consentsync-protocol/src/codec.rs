//! Symmetric codec between a [`ConsentRecord`] and an opaque cookie token.
//!
//! Token layout: `base64(nonce || ciphertext)` where the ciphertext is the
//! AES-256-GCM sealing of the record's canonical JSON bytes. The same key
//! is held by both the encode and decode call sites, so the envelope is a
//! tamper-evidence mechanism, not confidentiality against the token's own
//! holder: anyone with the key can mint a token. What it does guarantee is
//! that a token altered in transit, truncated, or produced under a rotated
//! key fails closed as [`DecodeError`].

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use consentsync_core::config::KEY_LEN;
use consentsync_core::{ConsentRecord, Error};

const NONCE_LEN: usize = 12;

/// Any condition under which a token cannot be verified and deserialized
/// back into a valid record. Callers treat every variant the same way:
/// there is no consent on record.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("token too short to carry a nonce")]
    Truncated,

    #[error("token failed authentication")]
    Authentication,

    #[error("decrypted payload is not a consent record: {0}")]
    Shape(#[from] serde_json::Error),
}

/// Encodes consent records to opaque tokens and back.
#[derive(Clone)]
pub struct ConsentCodec {
    key: [u8; KEY_LEN],
}

impl ConsentCodec {
    /// Create a codec over an explicit shared key.
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Seal a record into a text-safe opaque token.
    ///
    /// A fresh random nonce is drawn per call, so two encodings of the same
    /// record differ byte-for-byte; only the decoded value is comparable.
    pub fn encode(&self, record: &ConsentRecord) -> consentsync_core::Result<String> {
        let plaintext = serde_json::to_vec(record)?;

        let cipher = Aes256Gcm::new_from_slice(&self.key).expect("32-byte AES-256-GCM key");
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let ciphertext = cipher
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_slice())
            .map_err(|_| Error::Internal("consent token encryption failed".to_string()))?;

        let mut envelope = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        envelope.extend_from_slice(&nonce_bytes);
        envelope.extend_from_slice(&ciphertext);
        Ok(BASE64.encode(envelope))
    }

    /// Open a token back into the record it was sealed from.
    pub fn decode(&self, token: &str) -> Result<ConsentRecord, DecodeError> {
        let envelope = BASE64.decode(token.trim())?;
        if envelope.len() <= NONCE_LEN {
            return Err(DecodeError::Truncated);
        }
        let (nonce_bytes, ciphertext) = envelope.split_at(NONCE_LEN);

        let cipher = Aes256Gcm::new_from_slice(&self.key).expect("32-byte AES-256-GCM key");
        let plaintext = cipher
            .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
            .map_err(|_| DecodeError::Authentication)?;

        Ok(serde_json::from_slice(&plaintext)?)
    }
}
