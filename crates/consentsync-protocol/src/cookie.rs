//! The persistence cookie: fixed name and security attributes.

use serde::{Deserialize, Serialize};

/// Cookie name the opaque token is stored under.
pub const CONSENT_COOKIE_NAME: &str = "cookie_consent";

/// One year, the fixed cookie lifetime.
pub const CONSENT_COOKIE_MAX_AGE_SECS: u64 = 365 * 24 * 60 * 60;

/// The fixed attribute set stamped on every consent cookie.
///
/// Everything but the domain is constant: `Secure`, `SameSite=Strict`,
/// `Path=/`, one-year `Max-Age`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieAttributes {
    pub domain: String,
}

impl CookieAttributes {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }

    /// Render the full `Set-Cookie` header value for a token.
    pub fn set_cookie_header(&self, token: &str) -> String {
        format!(
            "{}={}; Secure; SameSite=Strict; Path=/; Domain={}; Max-Age={}",
            CONSENT_COOKIE_NAME, token, self.domain, CONSENT_COOKIE_MAX_AGE_SECS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cookie_header() {
        let attrs = CookieAttributes::new("example.com");
        assert_eq!(
            attrs.set_cookie_header("abc123"),
            "cookie_consent=abc123; Secure; SameSite=Strict; Path=/; Domain=example.com; Max-Age=31536000"
        );
    }
}
