//! [`Authenticator`] backed by the host's [`PlatformAuth`] implementation.
//!
//! Flow for `device_authenticate`:
//! 1. No sensor: alert, fail.
//! 2. Sensor but nothing enrolled: offer Cancel / Open Settings, fail either way
//!    (opening settings verifies nothing, and there is no re-check afterwards).
//! 3. Otherwise: system prompt with the configured labels; pass iff it reports success.
//!
//! Every platform call is awaited, so a pending prompt suspends the gated
//! operation instead of blocking the thread that polls it.
//!
//! Any [`PlatformAuthError`] along the way is logged and counts as a failure.

use tracing::{debug, info, warn};

use super::platform::PlatformAuth;
use super::types::{AuthFailure, EnrollmentAction};
use super::Authenticator;
use crate::config::AuthConfig;
use std::sync::Arc;

pub struct DeviceAuthenticator {
    platform: Arc<dyn PlatformAuth>,
    config: AuthConfig,
}

impl DeviceAuthenticator {
    pub fn new(platform: Arc<dyn PlatformAuth>, config: AuthConfig) -> Self {
        Self { platform, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Runs the authenticate flow, naming the failure when it doesn't pass.
    pub async fn verify(&self) -> Result<(), AuthFailure> {
        if !self.platform.has_hardware().await? {
            self.platform
                .show_alert(
                    self.config.no_hardware_title.clone(),
                    self.config.no_hardware_message.clone(),
                )
                .await?;
            return Err(AuthFailure::HardwareUnavailable);
        }

        if !self.platform.is_enrolled().await? {
            let action = self
                .platform
                .choose_enrollment_action(
                    self.config.not_enrolled_title.clone(),
                    self.config.enrollment_message(),
                )
                .await?;
            let opened_settings = action == EnrollmentAction::OpenSettings;
            if opened_settings {
                self.platform.open_settings(self.config.settings_link()).await?;
            }
            return Err(AuthFailure::NotEnrolled { opened_settings });
        }

        let result = self
            .platform
            .authenticate(self.config.prompt_options())
            .await?;
        if result.success {
            Ok(())
        } else {
            Err(AuthFailure::from_prompt_error(result.error))
        }
    }

    async fn check_available(&self) -> Result<bool, AuthFailure> {
        Ok(self.platform.has_hardware().await? && self.platform.is_enrolled().await?)
    }
}

#[async_trait::async_trait]
impl Authenticator for DeviceAuthenticator {
    async fn hardware_available(&self) -> bool {
        match self.check_available().await {
            Ok(available) => {
                debug!(available, "Biometric availability checked");
                available
            }
            Err(failure) => {
                warn!(failure = %failure, "Biometric availability check failed");
                false
            }
        }
    }

    async fn device_authenticate(&self) -> bool {
        match self.verify().await {
            Ok(()) => {
                info!("Device authentication succeeded");
                true
            }
            Err(failure) => {
                warn!(kind = failure.kind(), failure = %failure, "Device authentication failed");
                false
            }
        }
    }
}
