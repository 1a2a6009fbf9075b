//! ConsentSync Protocol — the token envelope and the persistence cookie.

pub mod codec;
pub mod cookie;

pub use codec::{ConsentCodec, DecodeError};
pub use cookie::{CookieAttributes, CONSENT_COOKIE_NAME};
