//! # todo-core
//!
//! Core library for the todo app, providing the item store and the
//! session-gated mutation protocol shared by all clients (iOS, Android).
//!
//! ## Design Principles
//!
//! - **In-memory only**: The store lives for the process lifetime. Nothing is persisted.
//! - **One gate**: Create, modify and remove all pass through the same
//!   gate-then-apply path; the session unlocks at most once per process.
//! - **Never throws across the gate**: Authentication failures surface as
//!   [`MutationOutcome::Rejected`], not errors.
//! - **Platform at the edge**: Alerts, prompts and settings deep links live behind
//!   the async [`PlatformAuth`] foreign trait so the gate can be tested with fakes.
//! - **FFI-ready**: UniFFI annotations enable Swift and Kotlin bindings.
//!   Prefer additive public API changes; removing or renaming breaks FFI clients.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use todo_core::{AuthConfig, TodoEngine};
//!
//! let engine = TodoEngine::new(Arc::new(platform), AuthConfig::default());
//! let outcome = engine.gated_create("Milk".into(), "2 litres".into()).await;
//! let snapshot = engine.snapshot();
//! ```

// UniFFI scaffolding for Swift/Kotlin bindings
uniffi::setup_scaffolding!();

// Public modules
pub mod auth;
pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod logging;
pub mod store;
pub mod types;

// Re-export commonly used items at crate root
pub use auth::{
    AuthFailure, Authenticator, DeviceAuthenticator, EnrollmentAction, PlatformAuth,
    PlatformAuthError, PlatformAuthResult,
};
pub use config::*;
pub use engine::{StoreObserver, TodoEngine};
pub use error::{Result, TodoError, TodoFfiError};
pub use gate::{gate_decision, GateDecision, GateOutcome, SessionGate, AUTH_FAILED_REASON};
pub use logging::init_logging;
pub use store::TodoStore;
pub use types::*;
