//! Trait implemented by the host app over the OS authentication facility.

use super::types::{EnrollmentAction, PlatformAuthError, PlatformAuthResult};
use crate::config::{AuthPromptOptions, SettingsLink};

/// Platform primitives for device authentication.
///
/// Implement this in Swift (LocalAuthentication) or Kotlin (BiometricPrompt).
///
/// # Suspension
/// Every method is async. Prompt-bearing calls (`authenticate`,
/// `choose_enrollment_action`, `show_alert`) resolve when the user answers;
/// the gated operation awaiting them is suspended, never blocked, so the
/// polling thread (often the UI thread) stays free to present the prompt.
#[uniffi::export(with_foreign)]
#[async_trait::async_trait]
pub trait PlatformAuth: Send + Sync {
    /// Whether the device has a biometric sensor.
    async fn has_hardware(&self) -> Result<bool, PlatformAuthError>;

    /// Whether the user has enrolled at least one credential.
    async fn is_enrolled(&self) -> Result<bool, PlatformAuthError>;

    /// Shows an informational alert with a single dismiss button.
    async fn show_alert(&self, title: String, message: String) -> Result<(), PlatformAuthError>;

    /// Asks the user to cancel or jump to security settings.
    async fn choose_enrollment_action(
        &self,
        title: String,
        message: String,
    ) -> Result<EnrollmentAction, PlatformAuthError>;

    /// Deep-links to the OS security settings.
    async fn open_settings(&self, link: SettingsLink) -> Result<(), PlatformAuthError>;

    /// Presents the system prompt and resolves with its outcome.
    async fn authenticate(
        &self,
        options: AuthPromptOptions,
    ) -> Result<PlatformAuthResult, PlatformAuthError>;
}
