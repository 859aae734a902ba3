//! Login, logout and password reset.

use reqwest::Method;

use crate::client::ApiClient;
use crate::config;
use crate::error::{FinboardError, Result};
use crate::models::{LoginOutcome, LoginRequest, LoginResponse, ResetPasswordRequest, User};

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Sign in with email and password.
    ///
    /// On success the access token (and the user, if the backend sent one) is
    /// stored in the session. Accounts flagged for a password reset get a reset
    /// token instead, which is kept for [`reset_password`](Self::reset_password).
    pub fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        if email.trim().is_empty() {
            return Err(FinboardError::Validation("email is required".into()));
        }
        if password.is_empty() {
            return Err(FinboardError::Validation("password is required".into()));
        }

        let builder = self
            .client
            .request(Method::POST, config::LOGIN_PATH)
            .json(&LoginRequest {
                email: email.trim(),
                password,
            });
        let resp: LoginResponse = self.client.send(builder)?;

        let mut session = self.client.session.borrow_mut();
        match (resp.access_token, resp.password_reset_token) {
            (Some(token), _) => {
                session.sign_in(token, resp.user.clone())?;
                log::info!("Signed in as {}", email.trim());
                Ok(LoginOutcome::Authenticated { user: resp.user })
            }
            (None, Some(reset_token)) => {
                session.set_reset_token(&reset_token)?;
                log::info!("Password reset required for {}", email.trim());
                Ok(LoginOutcome::PasswordResetRequired { reset_token })
            }
            (None, None) => Err(FinboardError::Unauthorized(
                "login response carried no token".into(),
            )),
        }
    }

    /// Set a new password using the reset token from the last login attempt.
    pub fn reset_password(&self, new_password: &str) -> Result<()> {
        if new_password.is_empty() {
            return Err(FinboardError::Validation("new password is required".into()));
        }
        let token = self
            .client
            .session
            .borrow()
            .reset_token()?
            .ok_or_else(|| FinboardError::InvalidArgument("no password reset is pending".into()))?;

        let builder = self
            .client
            .request(Method::POST, config::RESET_PASSWORD_PATH)
            .json(&ResetPasswordRequest {
                token: &token,
                new_password,
            });
        let _: serde_json::Value = self.client.send(builder)?;
        self.client.session.borrow().clear_reset_token()
    }

    /// Sign out, clearing the stored token and user.
    pub fn logout(&self) -> Result<()> {
        self.client.session.borrow_mut().sign_out()?;
        log::info!("Signed out");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session.borrow().is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.client.session.borrow().current_user().cloned()
    }
}
