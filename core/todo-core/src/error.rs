//! Error types for todo-core operations.
//! Keep TodoFfiError minimal and stable to avoid breaking FFI clients.
//!
//! Authentication failures are deliberately absent here: the gate absorbs them
//! and reports `MutationOutcome::Rejected` instead.

use std::path::PathBuf;

// ═══════════════════════════════════════════════════════════════════════════════
// FFI-Compatible Error (for Swift/Kotlin)
// ═══════════════════════════════════════════════════════════════════════════════

/// FFI-safe error type for use across language boundaries.
///
/// This simplified error type contains just an error message string,
/// making it compatible with UniFFI's error handling.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum TodoFfiError {
    #[error("{message}")]
    General { message: String },
}

impl From<TodoError> for TodoFfiError {
    fn from(err: TodoError) -> Self {
        TodoFfiError::General {
            message: err.to_string(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Internal Error (for Rust-only use)
// ═══════════════════════════════════════════════════════════════════════════════

/// All errors that can occur in todo-core operations.
///
/// For FFI boundaries, use `TodoFfiError` instead.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience type alias for Results using TodoError.
pub type Result<T> = std::result::Result<T, TodoError>;
