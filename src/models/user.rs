use serde::{Deserialize, Serialize};

use crate::error::{FinboardError, Result};

// ---------------------------------------------------------------------------
// Role — Access level of a company user
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Accountant,
    Viewer,
    #[serde(other)]
    Other,
}

// ---------------------------------------------------------------------------
// User — A member of the company account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub two_factor_enabled: bool,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// NewUser — Payload for the add-user form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl NewUser {
    /// Check required form fields before anything is sent to the backend.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(FinboardError::Validation("name is required".into()));
        }
        validate_email(&self.email)
    }
}

// ---------------------------------------------------------------------------
// UserUpdate — Partial update for the update-user form
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl UserUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.name.is_none() && self.email.is_none() && self.role.is_none() {
            return Err(FinboardError::Validation("nothing to update".into()));
        }
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err(FinboardError::Validation("name must not be empty".into()));
            }
        }
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FinboardError::Validation("email is required".into()));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(FinboardError::Validation(format!(
            "'{}' is not a valid email address",
            email
        ))),
    }
}
