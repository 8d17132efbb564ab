//! Authentication DTOs for the platform callback boundary and internal failure reporting.

use std::fmt;

/// User's answer to the "Biometrics Not Enrolled" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum EnrollmentAction {
    Cancel,
    OpenSettings,
}

/// Raw result of the platform prompt.
///
/// `error` carries the platform's reason code when `success` is false
/// (e.g. `user_cancel`, `lockout`).
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct PlatformAuthResult {
    pub success: bool,
    pub error: Option<String>,
}

impl PlatformAuthResult {
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Error raised by a host's [`PlatformAuth`](super::PlatformAuth) implementation.
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PlatformAuthError {
    #[error("{message}")]
    Fault { message: String },
}

// Foreign exceptions that don't map to PlatformAuthError land here instead of panicking.
impl From<uniffi::UnexpectedUniFFICallbackError> for PlatformAuthError {
    fn from(err: uniffi::UnexpectedUniFFICallbackError) -> Self {
        PlatformAuthError::Fault {
            message: err.reason,
        }
    }
}

/// Why a device authentication attempt did not verify a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    HardwareUnavailable,
    NotEnrolled { opened_settings: bool },
    UserCancelled,
    Denied { reason: Option<String> },
    PlatformFault { message: String },
}

impl AuthFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthFailure::HardwareUnavailable => "hardware_unavailable",
            AuthFailure::NotEnrolled { .. } => "not_enrolled",
            AuthFailure::UserCancelled => "user_cancelled",
            AuthFailure::Denied { .. } => "denied",
            AuthFailure::PlatformFault { .. } => "platform_fault",
        }
    }

    /// Classifies a prompt that came back without success.
    pub fn from_prompt_error(error: Option<String>) -> Self {
        match error.as_deref() {
            Some("user_cancel") | Some("system_cancel") | Some("app_cancel") => {
                AuthFailure::UserCancelled
            }
            _ => AuthFailure::Denied { reason: error },
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::HardwareUnavailable => write!(f, "No biometric hardware available"),
            AuthFailure::NotEnrolled { opened_settings } => {
                write!(f, "No credentials enrolled (opened settings: {})", opened_settings)
            }
            AuthFailure::UserCancelled => write!(f, "Authentication cancelled by user"),
            AuthFailure::Denied { reason: Some(reason) } => {
                write!(f, "Authentication denied: {}", reason)
            }
            AuthFailure::Denied { reason: None } => write!(f, "Authentication denied"),
            AuthFailure::PlatformFault { message } => write!(f, "Platform fault: {}", message),
        }
    }
}

impl std::error::Error for AuthFailure {}

impl From<PlatformAuthError> for AuthFailure {
    fn from(err: PlatformAuthError) -> Self {
        AuthFailure::PlatformFault {
            message: err.to_string(),
        }
    }
}
