use serde::{Deserialize, Serialize};

use super::user::User;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Raw login response. Exactly one of the two tokens is expected.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: Option<String>,
    pub password_reset_token: Option<String>,
    pub user: Option<User>,
}

/// What a successful login call resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The session now holds an access token.
    Authenticated { user: Option<User> },
    /// The account must set a new password before it can sign in.
    PasswordResetRequired { reset_token: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}

// ---------------------------------------------------------------------------
// Two-factor authentication
// ---------------------------------------------------------------------------

/// Enrollment material returned by the 2FA setup endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoFactorSetup {
    pub secret: String,
    pub qr_code: Option<String>,
    pub otpauth_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TwoFactorToggle<'a> {
    pub enable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
}
