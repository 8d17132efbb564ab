//! Authentication prompt configuration.
//!
//! Defaults match the strings the app ships with. Hosts may override them
//! from a JSON file (missing file means defaults) or pass a record over FFI.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, TodoError};

pub const ANDROID_SECURITY_SETTINGS_INTENT: &str = "android.settings.SECURITY_SETTINGS";
pub const IOS_SECURITY_SETTINGS_URL: &str = "App-Prefs:root=TOUCHID_PASSCODE";

/// Host operating system. Selects enrollment wording and the settings deep link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlatform {
    #[default]
    Android,
    Ios,
}

/// Where "Open Settings" sends the user.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum SettingsLink {
    /// Android: fire an intent with this action.
    Intent { action: String },
    /// iOS: open this URL.
    Url { url: String },
}

/// Options forwarded verbatim to the platform prompt.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct AuthPromptOptions {
    pub prompt_message: String,
    pub fallback_label: String,
    pub cancel_label: String,
    pub disable_device_fallback: bool,
}

/// Strings and switches used by the device authentication flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct AuthConfig {
    pub platform: DevicePlatform,
    pub prompt_message: String,
    pub fallback_label: String,
    pub cancel_label: String,
    pub disable_device_fallback: bool,
    pub no_hardware_title: String,
    pub no_hardware_message: String,
    pub not_enrolled_title: String,
    /// Overrides the platform-specific enrollment message when set.
    pub not_enrolled_message: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            platform: DevicePlatform::default(),
            prompt_message: "Authenticate to proceed".to_string(),
            fallback_label: "Use passcode".to_string(),
            cancel_label: "Cancel".to_string(),
            disable_device_fallback: false,
            no_hardware_title: "Error".to_string(),
            no_hardware_message: "No biometric hardware available".to_string(),
            not_enrolled_title: "Biometrics Not Enrolled".to_string(),
            not_enrolled_message: None,
        }
    }
}

impl AuthConfig {
    pub fn for_platform(platform: DevicePlatform) -> Self {
        Self {
            platform,
            ..Self::default()
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(TodoError::ConfigParse)
    }

    pub fn prompt_options(&self) -> AuthPromptOptions {
        AuthPromptOptions {
            prompt_message: self.prompt_message.clone(),
            fallback_label: self.fallback_label.clone(),
            cancel_label: self.cancel_label.clone(),
            disable_device_fallback: self.disable_device_fallback,
        }
    }

    pub fn enrollment_message(&self) -> String {
        if let Some(message) = &self.not_enrolled_message {
            return message.clone();
        }
        match self.platform {
            DevicePlatform::Android => "Please enroll fingerprint to continue".to_string(),
            DevicePlatform::Ios => "Please enroll Face ID/Touch ID to continue".to_string(),
        }
    }

    pub fn settings_link(&self) -> SettingsLink {
        match self.platform {
            DevicePlatform::Android => SettingsLink::Intent {
                action: ANDROID_SECURITY_SETTINGS_INTENT.to_string(),
            },
            DevicePlatform::Ios => SettingsLink::Url {
                url: IOS_SECURITY_SETTINGS_URL.to_string(),
            },
        }
    }
}

/// Loads the auth configuration, returning defaults if the file doesn't exist.
pub fn load_auth_config(path: &Path) -> Result<AuthConfig> {
    if !path.exists() {
        return Ok(AuthConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|source| TodoError::Io {
        context: format!("reading {}", path.display()),
        source,
    })?;

    serde_json::from_str(&content).map_err(|e| TodoError::ConfigMalformed {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

/// FFI wrapper around [`load_auth_config`].
#[uniffi::export]
pub fn load_auth_config_from_path(
    path: String,
) -> std::result::Result<AuthConfig, crate::TodoFfiError> {
    load_auth_config(Path::new(&path)).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_prompt_options() {
        let options = AuthConfig::default().prompt_options();
        assert_eq!(
            options,
            AuthPromptOptions {
                prompt_message: "Authenticate to proceed".to_string(),
                fallback_label: "Use passcode".to_string(),
                cancel_label: "Cancel".to_string(),
                disable_device_fallback: false,
            }
        );
    }

    #[test]
    fn test_default_platform_is_android() {
        assert_eq!(DevicePlatform::default(), DevicePlatform::Android);
        assert_eq!(AuthConfig::default().platform, DevicePlatform::Android);
    }

    #[test]
    fn test_platform_specific_enrollment_and_settings() {
        let android = AuthConfig::for_platform(DevicePlatform::Android);
        assert_eq!(
            android.enrollment_message(),
            "Please enroll fingerprint to continue"
        );
        assert_eq!(
            android.settings_link(),
            SettingsLink::Intent {
                action: "android.settings.SECURITY_SETTINGS".to_string()
            }
        );

        let ios = AuthConfig::for_platform(DevicePlatform::Ios);
        assert_eq!(
            ios.enrollment_message(),
            "Please enroll Face ID/Touch ID to continue"
        );
        assert_eq!(
            ios.settings_link(),
            SettingsLink::Url {
                url: "App-Prefs:root=TOUCHID_PASSCODE".to_string()
            }
        );
    }

    #[test]
    fn test_enrollment_message_override() {
        let config = AuthConfig {
            not_enrolled_message: Some("Enroll first".to_string()),
            ..AuthConfig::default()
        };
        assert_eq!(config.enrollment_message(), "Enroll first");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            AuthConfig::from_json_str(r#"{"platform":"ios","prompt_message":"Unlock"}"#).unwrap();
        assert_eq!(config.platform, DevicePlatform::Ios);
        assert_eq!(config.prompt_message, "Unlock");
        assert_eq!(config.cancel_label, "Cancel");
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = load_auth_config(&dir.path().join("auth.json")).unwrap();
        assert_eq!(config, AuthConfig::default());
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("auth.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_auth_config(&path).unwrap_err();
        assert!(matches!(err, TodoError::ConfigMalformed { .. }));
    }
}
