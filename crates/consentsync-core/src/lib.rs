//! ConsentSync Core — consent record model, configuration, error taxonomy.

pub mod config;
pub mod error;
pub mod record;

pub use config::ConsentSyncConfig;
pub use error::{Error, Result};
pub use record::{ConsentCategory, ConsentRecord};
