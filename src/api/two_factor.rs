//! Two-factor authentication enrollment. Code verification itself happens on
//! the backend.

use crate::client::ApiClient;
use crate::config;
use crate::error::{FinboardError, Result};
use crate::models::{TwoFactorSetup, TwoFactorToggle, User};

pub struct TwoFactorApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TwoFactorApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Fetch the secret and QR code for enrolling an authenticator app.
    pub fn setup(&self) -> Result<TwoFactorSetup> {
        let token = self
            .client
            .session
            .borrow()
            .token()
            .map(str::to_string)
            .ok_or_else(|| FinboardError::Unauthorized("not signed in".into()))?;
        let path = format!("{}/{}", config::TWO_FACTOR_SETUP_PATH, token);
        self.client.get_json(&path, &[])
    }

    /// Turn 2FA on or off for a user. Enabling requires the current code
    /// from the authenticator app.
    pub fn set_enabled(&self, user_id: i64, enable: bool, code: Option<&str>) -> Result<()> {
        if enable && code.map_or(true, |c| c.trim().is_empty()) {
            return Err(FinboardError::Validation(
                "a verification code is required to enable 2FA".into(),
            ));
        }
        let path = format!("{}/{}", config::TWO_FACTOR_TOGGLE_PATH, user_id);
        let body = TwoFactorToggle {
            enable,
            code: code.map(str::trim),
        };
        let _: serde_json::Value = self.client.post_json(&path, &body)?;

        // Keep the cached current user in step.
        let mut session = self.client.session.borrow_mut();
        let updated: Option<User> = session
            .current_user()
            .filter(|u| u.id == user_id)
            .map(|u| User {
                two_factor_enabled: enable,
                ..u.clone()
            });
        if let Some(user) = updated {
            session.set_current_user(user)?;
        }
        Ok(())
    }
}
