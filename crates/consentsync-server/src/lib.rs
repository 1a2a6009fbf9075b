//! ConsentSync Server — the consent-token ingest endpoint.

pub mod routes;
pub mod state;

pub use state::AppState;
