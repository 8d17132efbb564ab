//! In-memory item store and its reducers.
//!
//! Holds the ordered item list and the process-wide session flag. The
//! reducers here are ungated: they never authenticate and never touch the
//! flag. The gate in [`crate::gate`] is the only caller of [`TodoStore::unlock_session`].
//!
//! # Invariants
//!
//! - Item ids are unique. New ids are ULIDs, so `create` never collides.
//! - Insertion order is preserved; there is no reorder operation.
//! - `session_unlocked` starts false and only ever moves to true.

use tracing::debug;
use ulid::Ulid;

use crate::types::{MutationPayload, TodoItem, TodoMutation, TodoSnapshot};

#[derive(Debug, Default)]
pub struct TodoStore {
    items: Vec<TodoItem>,
    session_unlocked: bool,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&TodoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn session_unlocked(&self) -> bool {
        self.session_unlocked
    }

    pub fn snapshot(&self) -> TodoSnapshot {
        TodoSnapshot {
            items: self.items.clone(),
            session_unlocked: self.session_unlocked,
        }
    }

    /// Appends a new item with a fresh id and returns a copy of it.
    pub fn create(&mut self, title: String, description: String) -> TodoItem {
        let item = TodoItem {
            id: Ulid::new().to_string(),
            title,
            description,
        };
        self.items.push(item.clone());
        debug!(id = %item.id, count = self.items.len(), "Created todo");
        item
    }

    /// Replaces title and description in place. Returns false if `id` is absent.
    pub fn modify(&mut self, id: &str, title: String, description: String) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.title = title;
                item.description = description;
                debug!(id, "Modified todo");
                true
            }
            None => {
                debug!(id, "Modify skipped, todo not found");
                false
            }
        }
    }

    /// Removes the item with `id`. Returns false if it was absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        debug!(id, removed, "Remove todo");
        removed
    }

    /// Dispatches a mutation to the matching reducer.
    pub fn apply(&mut self, mutation: TodoMutation) -> MutationPayload {
        match mutation {
            TodoMutation::Create { title, description } => MutationPayload::Created {
                item: self.create(title, description),
            },
            TodoMutation::Modify {
                id,
                title,
                description,
            } => {
                let found = self.modify(&id, title.clone(), description.clone());
                MutationPayload::Modified {
                    id,
                    title,
                    description,
                    found,
                }
            }
            TodoMutation::Remove { id } => {
                let found = self.remove(&id);
                MutationPayload::Removed { id, found }
            }
        }
    }

    /// Marks the session as authenticated. Idempotent; there is no inverse.
    pub fn unlock_session(&mut self) {
        self.session_unlocked = true;
    }
}
