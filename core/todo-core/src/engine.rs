//! TodoEngine - The main entry point for todo app clients.
//!
//! Wraps the item store and the session gate behind one FFI object:
//! - **Read access**: `snapshot`, `items`, `get_item`, `session_unlocked`
//! - **Ungated reducers**: `create`, `modify`, `remove` (no authentication, never unlock)
//! - **Gated operations**: `gated_create`, `gated_modify`, `gated_remove`, `gated_apply`,
//!   all async and all resolving to a [`MutationOutcome`]
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use todo_core::{AuthConfig, MutationOutcome, TodoEngine};
//!
//! let engine = TodoEngine::new(Arc::new(platform), AuthConfig::default());
//! match engine.gated_create("Title".into(), "Body".into()).await {
//!     MutationOutcome::Applied { .. } => close_form(),
//!     MutationOutcome::Rejected { .. } => keep_form_open(),
//! }
//! ```

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::auth::{Authenticator, DeviceAuthenticator, PlatformAuth};
use crate::config::AuthConfig;
use crate::gate::{GateOutcome, SessionGate};
use crate::store::TodoStore;
use crate::types::{MutationOutcome, TodoItem, TodoMutation, TodoSnapshot};

/// Callback interface for store change notifications to Swift/Kotlin.
///
/// Called after every applied mutation with the snapshot taken under the same
/// write lock as that mutation. Invoked on the thread that applied it, with no
/// engine lock held, so the observer may call back into the engine.
///
/// Concurrent mutations from different threads may deliver their snapshots
/// out of order; each snapshot is still consistent with its own mutation.
#[uniffi::export(callback_interface)]
pub trait StoreObserver: Send + Sync {
    fn on_store_changed(&self, snapshot: TodoSnapshot);
}

/// The main engine for todo operations.
///
/// Created once at process start. The session flag lives inside the store and
/// dies with the engine, so a restart always begins locked.
#[derive(uniffi::Object)]
pub struct TodoEngine {
    store: RwLock<TodoStore>,
    gate: SessionGate,
    observer: RwLock<Option<Arc<dyn StoreObserver>>>,
}

impl TodoEngine {
    /// Creates an engine around any [`Authenticator`].
    ///
    /// Used for testing with fakes and by Rust hosts.
    /// Not exposed to FFI - use `new()` for external clients.
    pub fn with_authenticator(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            store: RwLock::new(TodoStore::new()),
            gate: SessionGate::new(authenticator),
            observer: RwLock::new(None),
        }
    }

    fn read_store(&self) -> RwLockReadGuard<'_, TodoStore> {
        // Recover from poisoning - reducers never leave partial writes
        self.store
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, TodoStore> {
        self.store
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn notify(&self, snapshot: TodoSnapshot) {
        let observer = self
            .observer
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        if let Some(observer) = observer {
            observer.on_store_changed(snapshot);
        }
    }
}

#[uniffi::export]
impl TodoEngine {
    /// Creates a new engine that authenticates through the host platform.
    #[uniffi::constructor]
    pub fn new(platform: Arc<dyn PlatformAuth>, config: AuthConfig) -> Self {
        Self::with_authenticator(Arc::new(DeviceAuthenticator::new(platform, config)))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Read API
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> TodoSnapshot {
        self.read_store().snapshot()
    }

    pub fn items(&self) -> Vec<TodoItem> {
        self.read_store().items().to_vec()
    }

    /// Looks up one item, e.g. to prefill the edit form.
    pub fn get_item(&self, id: String) -> Option<TodoItem> {
        self.read_store().get(&id).cloned()
    }

    pub fn session_unlocked(&self) -> bool {
        self.read_store().session_unlocked()
    }

    /// Pre-flight availability check for the view layer. Never prompts.
    pub async fn hardware_available(&self) -> bool {
        self.gate.authenticator().hardware_available().await
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Ungated API
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn create(&self, title: String, description: String) -> TodoItem {
        let (item, snapshot) = {
            let mut store = self.write_store();
            let item = store.create(title, description);
            (item, store.snapshot())
        };
        self.notify(snapshot);
        item
    }

    /// Returns false when `id` is absent (a no-op, not an error).
    pub fn modify(&self, id: String, title: String, description: String) -> bool {
        let (found, snapshot) = {
            let mut store = self.write_store();
            let found = store.modify(&id, title, description);
            (found, store.snapshot())
        };
        if found {
            self.notify(snapshot);
        }
        found
    }

    /// Returns false when `id` is absent (a no-op, not an error).
    pub fn remove(&self, id: String) -> bool {
        let (found, snapshot) = {
            let mut store = self.write_store();
            let found = store.remove(&id);
            (found, store.snapshot())
        };
        if found {
            self.notify(snapshot);
        }
        found
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Gated API
    // ─────────────────────────────────────────────────────────────────────────────

    /// Runs any mutation through the session gate.
    pub async fn gated_apply(&self, mutation: TodoMutation) -> MutationOutcome {
        let op = mutation.kind();
        let outcome = self
            .gate
            .run(&self.store, op, move |store| {
                let payload = store.apply(mutation);
                (payload, store.snapshot())
            })
            .await;

        match outcome {
            GateOutcome::Applied((payload, snapshot)) => {
                self.notify(snapshot);
                MutationOutcome::Applied { payload }
            }
            GateOutcome::Rejected(reason) => MutationOutcome::Rejected { reason },
        }
    }

    pub async fn gated_create(&self, title: String, description: String) -> MutationOutcome {
        self.gated_apply(TodoMutation::Create { title, description })
            .await
    }

    pub async fn gated_modify(
        &self,
        id: String,
        title: String,
        description: String,
    ) -> MutationOutcome {
        self.gated_apply(TodoMutation::Modify {
            id,
            title,
            description,
        })
        .await
    }

    pub async fn gated_remove(&self, id: String) -> MutationOutcome {
        self.gated_apply(TodoMutation::Remove { id }).await
    }

    /// Submits the add/edit form: edits when `editing_id` is set, adds otherwise.
    pub async fn submit_form(
        &self,
        editing_id: Option<String>,
        title: String,
        description: String,
    ) -> MutationOutcome {
        match editing_id {
            Some(id) => self.gated_modify(id, title, description).await,
            None => self.gated_create(title, description).await,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Observer API
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn set_observer(&self, observer: Box<dyn StoreObserver>) {
        let mut slot = self
            .observer
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = Some(Arc::from(observer));
        debug!("Store observer registered");
    }

    pub fn clear_observer(&self) {
        let mut slot = self
            .observer
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_utils::FakeAuthenticator;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Mutex};
    use std::time::Duration;

    struct CountingObserver {
        calls: Arc<AtomicUsize>,
        last_len: Arc<AtomicUsize>,
    }

    impl StoreObserver for CountingObserver {
        fn on_store_changed(&self, snapshot: TodoSnapshot) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_len.store(snapshot.items.len(), Ordering::SeqCst);
        }
    }

    /// Clears itself from the engine it observes, from inside the callback.
    struct SelfClearingObserver {
        engine: Arc<TodoEngine>,
        calls: Arc<AtomicUsize>,
    }

    impl StoreObserver for SelfClearingObserver {
        fn on_store_changed(&self, _snapshot: TodoSnapshot) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.engine.clear_observer();
        }
    }

    /// Records whether each delivered snapshot was already unlocked.
    struct UnlockRecorder {
        seen: Arc<Mutex<Vec<bool>>>,
    }

    impl StoreObserver for UnlockRecorder {
        fn on_store_changed(&self, snapshot: TodoSnapshot) {
            self.seen.lock().unwrap().push(snapshot.session_unlocked);
        }
    }

    fn engine(auth: &Arc<FakeAuthenticator>) -> TodoEngine {
        TodoEngine::with_authenticator(auth.clone())
    }

    #[tokio::test]
    async fn test_gated_create_returns_created_item() {
        let auth = Arc::new(FakeAuthenticator::always(true));
        let engine = engine(&auth);

        let outcome = engine
            .gated_create("Test".to_string(), "Desc".to_string())
            .await;

        let item = outcome.created_item().unwrap();
        assert_eq!(item.title, "Test");
        assert_eq!(engine.get_item(item.id.clone()).as_ref(), Some(item));
    }

    #[tokio::test]
    async fn test_submit_form_routes_by_editing_id() {
        let auth = Arc::new(FakeAuthenticator::always(true));
        let engine = engine(&auth);

        let created = engine
            .submit_form(None, "Old".to_string(), "Old Desc".to_string())
            .await;
        let id = created.created_item().unwrap().id.clone();

        let updated = engine
            .submit_form(Some(id.clone()), "New".to_string(), "New Desc".to_string())
            .await;

        assert!(updated.is_applied());
        assert_eq!(engine.items().len(), 1);
        assert_eq!(engine.get_item(id).unwrap().title, "New");
    }

    #[tokio::test]
    async fn test_ungated_ops_do_not_authenticate_or_unlock() {
        let auth = Arc::new(FakeAuthenticator::always(true));
        let engine = engine(&auth);

        let item = engine.create("a".to_string(), "b".to_string());
        assert!(engine.modify(item.id.clone(), "c".to_string(), "d".to_string()));
        assert!(engine.remove(item.id.clone()));
        assert!(!engine.remove(item.id));

        assert_eq!(auth.call_count(), 0);
        assert!(!engine.session_unlocked());
    }

    #[tokio::test]
    async fn test_observer_notified_on_applied_only() {
        let auth = Arc::new(FakeAuthenticator::scripted(vec![false, true]));
        let engine = engine(&auth);
        let calls = Arc::new(AtomicUsize::new(0));
        let last_len = Arc::new(AtomicUsize::new(0));
        engine.set_observer(Box::new(CountingObserver {
            calls: calls.clone(),
            last_len: last_len.clone(),
        }));

        let rejected = engine.gated_create("a".to_string(), String::new()).await;
        assert!(rejected.is_rejected());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        engine.gated_create("a".to_string(), String::new()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(last_len.load(Ordering::SeqCst), 1);

        engine.clear_observer();
        engine.gated_create("b".to_string(), String::new()).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_hardware_available_passes_through() {
        let engine = engine(&Arc::new(FakeAuthenticator::unavailable()));
        assert!(!engine.hardware_available().await);
        assert!(!engine.session_unlocked());
    }

    #[test]
    fn test_observer_can_clear_itself_from_callback() {
        let engine = Arc::new(engine(&Arc::new(FakeAuthenticator::always(true))));
        let calls = Arc::new(AtomicUsize::new(0));
        engine.set_observer(Box::new(SelfClearingObserver {
            engine: engine.clone(),
            calls: calls.clone(),
        }));

        let (tx, rx) = mpsc::channel();
        let worker = engine.clone();
        std::thread::spawn(move || {
            worker.create("a".to_string(), String::new());
            worker.create("b".to_string(), String::new());
            let _ = tx.send(());
        });

        rx.recv_timeout(Duration::from_secs(5))
            .expect("create deadlocked inside the observer callback");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.items().len(), 2);
    }

    #[tokio::test]
    async fn test_first_gated_snapshot_reports_unlocked() {
        let auth = Arc::new(FakeAuthenticator::always(true));
        let engine = engine(&auth);
        let seen = Arc::new(Mutex::new(vec![]));
        engine.set_observer(Box::new(UnlockRecorder { seen: seen.clone() }));

        engine.create("ungated".to_string(), String::new());
        engine.gated_create("gated".to_string(), String::new()).await;

        assert_eq!(*seen.lock().unwrap(), vec![false, true]);
    }
}
