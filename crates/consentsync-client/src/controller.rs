//! The consent prompt state machine.
//!
//! One controller per client session. It decides whether a stored token can
//! be trusted (skip the prompt) or not (show it), and runs the accept flow:
//! seal the selection, submit it, and only persist + enable analytics once
//! the server has acknowledged.

use tracing::{info, warn};

use consentsync_core::{ConsentCategory, ConsentRecord};
use consentsync_protocol::{ConsentCodec, CookieAttributes};

use crate::analytics::AnalyticsGate;
use crate::store::ConsentStore;
use crate::submit::{ConsentSubmit, SubmitError};

/// Externally observable controller states.
///
/// `Init` is transient: `start` always leaves the controller in
/// `PromptVisible` or `Resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Init,
    PromptVisible,
    Resolved,
}

pub struct ConsentController<S, G, T> {
    codec: ConsentCodec,
    attributes: CookieAttributes,
    store: S,
    gate: G,
    submitter: T,
    record: ConsentRecord,
    state: ControllerState,
    // Accept is disabled while a submission is outstanding. Cleared by a
    // drop guard even when the accept future is cancelled mid-flight; the
    // cancelled request may still reach the server, in which case a later
    // accept simply supersedes it.
    in_flight: bool,
}

/// Marks a submission as outstanding for as long as it lives.
struct InFlightGuard<'a> {
    flag: &'a mut bool,
}

impl<'a> InFlightGuard<'a> {
    fn set(flag: &'a mut bool) -> Self {
        *flag = true;
        Self { flag }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.flag = false;
    }
}

impl<S, G, T> ConsentController<S, G, T>
where
    S: ConsentStore,
    G: AnalyticsGate,
    T: ConsentSubmit,
{
    pub fn new(
        codec: ConsentCodec,
        attributes: CookieAttributes,
        store: S,
        gate: G,
        submitter: T,
    ) -> Self {
        Self {
            codec,
            attributes,
            store,
            gate,
            submitter,
            record: ConsentRecord::default(),
            state: ControllerState::Init,
            in_flight: false,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn record(&self) -> &ConsentRecord {
        &self.record
    }

    /// Resolve `Init` against the store: adopt a stored record that still
    /// verifies, otherwise fall back to the prompt with defaults. A token
    /// that fails to decode is treated as no consent on record — it is not
    /// rewritten or deleted here.
    pub fn start(&mut self) {
        match self.store.read() {
            None => {
                self.state = ControllerState::PromptVisible;
            }
            Some(token) => match self.codec.decode(&token) {
                Ok(record) => {
                    info!("Adopting stored consent record");
                    self.record = record;
                    if record.statistics {
                        self.gate.enable(true);
                    }
                    self.state = ControllerState::Resolved;
                }
                Err(e) => {
                    warn!("Stored consent token rejected: {}", e);
                    self.record = ConsentRecord::default();
                    self.state = ControllerState::PromptVisible;
                }
            },
        }
    }

    /// Flip one category of the pending selection. Only meaningful while
    /// the prompt is visible; `Necessary` never changes.
    pub fn toggle(&mut self, category: ConsentCategory) {
        if self.state != ControllerState::PromptVisible {
            return;
        }
        self.record.toggle(category);
    }

    /// The accept flow: encode, submit, and on server acknowledgement
    /// persist the token and fire the analytics gate. Any submission
    /// failure keeps the prompt open with nothing written.
    pub async fn accept(&mut self) -> Result<(), SubmitError> {
        if self.state != ControllerState::PromptVisible {
            return Ok(());
        }
        if self.in_flight {
            return Err(SubmitError::InFlight);
        }

        let token = self
            .codec
            .encode(&self.record)
            .map_err(|e| SubmitError::Internal(e.to_string()))?;

        let guard = InFlightGuard::set(&mut self.in_flight);
        let outcome = self.submitter.submit(&token).await;
        drop(guard);

        match outcome {
            Ok(()) => {
                if let Err(e) = self.store.write(&token, &self.attributes) {
                    // The server acknowledged; this session is resolved even
                    // if persistence failed and the next one prompts again.
                    warn!("Consent acknowledged but not persisted: {}", e);
                }
                if self.record.statistics {
                    self.gate.enable(true);
                }
                self.state = ControllerState::Resolved;
                info!("Consent resolved and persisted");
                Ok(())
            }
            Err(e) => {
                warn!("Consent submission failed: {}", e);
                Err(e)
            }
        }
    }
}
