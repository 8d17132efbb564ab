//! Session-gated mutation protocol.
//!
//! Every gated operation runs the same state machine:
//!
//! ```text
//! Idle → gate check ─ unlocked ──────────────────────────→ Applied
//!                   └ locked → Authenticating ─ true ────→ Applied  (+ unlock)
//!                                              └ false ──→ Rejected
//! ```
//!
//! One process-wide flag guards all mutation kinds. Once any gated operation
//! is applied, later ones never prompt again until the process restarts.
//!
//! The store lock is held only to read the flag and to apply the mutation,
//! never across the authentication await. Overlapping gated calls therefore
//! apply in the order their prompts resolve; no mutation interleaves with another.

use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use crate::auth::Authenticator;
use crate::store::TodoStore;

/// Reason reported for every rejected gated operation.
pub const AUTH_FAILED_REASON: &str = "Authentication failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session already unlocked; apply immediately.
    Proceed,
    /// Session locked; the authenticator must pass first.
    Authenticate,
}

/// Pure gate check over the session flag.
pub fn gate_decision(session_unlocked: bool) -> GateDecision {
    if session_unlocked {
        GateDecision::Proceed
    } else {
        GateDecision::Authenticate
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome<T> {
    Applied(T),
    Rejected(String),
}

impl<T> GateOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> GateOutcome<U> {
        match self {
            GateOutcome::Applied(value) => GateOutcome::Applied(f(value)),
            GateOutcome::Rejected(reason) => GateOutcome::Rejected(reason),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, GateOutcome::Applied(_))
    }
}

pub struct SessionGate {
    authenticator: Arc<dyn Authenticator>,
}

impl SessionGate {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }

    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Gate-then-apply: authenticates if the session is locked, then unlocks
    /// the session and runs `apply` under the same write lock.
    ///
    /// On a failed authentication neither the items nor the flag change.
    pub async fn run<T, F>(&self, store: &RwLock<TodoStore>, op: &str, apply: F) -> GateOutcome<T>
    where
        F: FnOnce(&mut TodoStore) -> T,
    {
        let unlocked = store
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .session_unlocked();

        match gate_decision(unlocked) {
            GateDecision::Proceed => {
                debug!(op, "Session unlocked, skipping authentication");
            }
            GateDecision::Authenticate => {
                debug!(op, "Session locked, requesting device authentication");
                if !self.authenticator.device_authenticate().await {
                    warn!(op, "Gated operation rejected");
                    return GateOutcome::Rejected(AUTH_FAILED_REASON.to_string());
                }
            }
        }

        // Lock poisoning is non-fatal; the store holds no partial writes.
        let mut guard = store
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // Unlock first so `apply` observes the post-mutation flag.
        if !guard.session_unlocked() {
            guard.unlock_session();
            info!(op, "Session unlocked");
        }
        GateOutcome::Applied(apply(&mut guard))
    }
}
