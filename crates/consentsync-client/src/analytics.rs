//! The analytics gate — a capability the controller holds, not logic it owns.

use tracing::info;

/// Invoked at most once per resolved session, and only when the visitor
/// granted `statistics` consent. Implementations do whatever "enable
/// analytics" means for the embedding application (tag injection, SDK
/// init, nothing).
pub trait AnalyticsGate {
    fn enable(&self, statistics: bool);
}

/// Gate that records the decision against a measurement id.
///
/// Actual tag loading belongs to the embedding application; this keeps the
/// audit trail.
pub struct TagLogger {
    measurement_id: Option<String>,
}

impl TagLogger {
    pub fn new(measurement_id: Option<String>) -> Self {
        Self { measurement_id }
    }
}

impl AnalyticsGate for TagLogger {
    fn enable(&self, statistics: bool) {
        if !statistics {
            return;
        }
        match &self.measurement_id {
            Some(id) => info!("Analytics enabled (measurement id: {})", id),
            None => info!("Analytics enabled (no measurement id configured)"),
        }
    }
}
