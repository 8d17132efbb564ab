//! Core types shared across all todo app clients.
//!
//! The iOS and Android shells render from these exact types, so they are the
//! single description of what an item is and what a mutation reports back.
//!
//! **FFI Support:** All types are annotated with UniFFI macros for Swift/Kotlin bindings.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════════
// Items
// ═══════════════════════════════════════════════════════════════════════════════

/// A single todo entry.
///
/// `id` is an opaque ULID assigned at creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Read-only view of the store handed to the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct TodoSnapshot {
    pub items: Vec<TodoItem>,
    pub session_unlocked: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Mutations
// ═══════════════════════════════════════════════════════════════════════════════

/// The payload of one mutating operation, before it is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TodoMutation {
    Create {
        title: String,
        description: String,
    },
    Modify {
        id: String,
        title: String,
        description: String,
    },
    Remove {
        id: String,
    },
}

impl TodoMutation {
    pub fn kind(&self) -> &'static str {
        match self {
            TodoMutation::Create { .. } => "create",
            TodoMutation::Modify { .. } => "modify",
            TodoMutation::Remove { .. } => "remove",
        }
    }
}

/// What an applied mutation reports back.
///
/// `found` is false when a modify/remove targeted an id that is no longer in
/// the store. That is a no-op, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationPayload {
    Created {
        item: TodoItem,
    },
    Modified {
        id: String,
        title: String,
        description: String,
        found: bool,
    },
    Removed {
        id: String,
        found: bool,
    },
}

/// Tagged result of a gated operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MutationOutcome {
    Applied { payload: MutationPayload },
    Rejected { reason: String },
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, MutationOutcome::Rejected { .. })
    }

    /// The created item, if this outcome applied a create.
    pub fn created_item(&self) -> Option<&TodoItem> {
        match self {
            MutationOutcome::Applied {
                payload: MutationPayload::Created { item },
            } => Some(item),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_kind() {
        let create = TodoMutation::Create {
            title: "a".to_string(),
            description: "b".to_string(),
        };
        let remove = TodoMutation::Remove {
            id: "x".to_string(),
        };
        assert_eq!(create.kind(), "create");
        assert_eq!(remove.kind(), "remove");
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = MutationOutcome::Rejected {
            reason: "Authentication failed".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "Authentication failed");
        assert!(outcome.is_rejected());
        assert!(!outcome.is_applied());
    }
}
