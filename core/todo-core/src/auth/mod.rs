//! Device authentication: the contract the gate consumes and its platform-backed implementation.
//! Host apps implement [`PlatformAuth`]; everything above it is shared.

mod device;
mod platform;
mod types;

pub use device::DeviceAuthenticator;
pub use platform::PlatformAuth;
pub use types::{AuthFailure, EnrollmentAction, PlatformAuthError, PlatformAuthResult};

/// Biometric capability consumed by the session gate.
///
/// Implementors should:
/// - Never panic or propagate errors; any fault is `false`
/// - Own every user-facing side effect (alerts, settings deep links)
/// - Resolve `device_authenticate` to `true` only when a credential was verified
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    /// True iff the sensor exists AND credentials are enrolled.
    /// Pre-flight query for the view layer; the gate never calls it.
    async fn hardware_available(&self) -> bool;

    /// Runs the full authenticate flow and reports whether it succeeded.
    async fn device_authenticate(&self) -> bool;
}

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted authenticator for unit testing the gate
    pub struct FakeAuthenticator {
        results: Mutex<VecDeque<bool>>,
        fallback: bool,
        available: bool,
        pub calls: AtomicUsize,
    }

    impl FakeAuthenticator {
        /// Every call resolves to `result`.
        pub fn always(result: bool) -> Self {
            Self {
                results: Mutex::new(VecDeque::new()),
                fallback: result,
                available: true,
                calls: AtomicUsize::new(0),
            }
        }

        /// Calls resolve to `results` in order, then to `false`.
        pub fn scripted(results: Vec<bool>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                fallback: false,
                available: true,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn unavailable() -> Self {
            Self {
                available: false,
                ..Self::always(false)
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl Authenticator for FakeAuthenticator {
        async fn hardware_available(&self) -> bool {
            self.available
        }

        async fn device_authenticate(&self) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Suspend once so callers really await a pending prompt.
            tokio::task::yield_now().await;
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(self.fallback)
        }
    }
}
