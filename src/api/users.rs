//! Company user management.

use crate::client::ApiClient;
use crate::config;
use crate::error::Result;
use crate::models::{NewUser, User, UserUpdate};

use serde::Serialize;

#[derive(Serialize)]
struct ActivationRequest {
    is_active: bool,
}

pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn path(endpoint: &str) -> String {
        format!("{}/{}", config::USERS_BASE_PATH, endpoint)
    }

    /// All users of the signed-in company.
    pub fn list(&self) -> Result<Vec<User>> {
        self.client.get_json(&Self::path("company-users"), &[])
    }

    /// Users whose name or email contains `query` (case-insensitive).
    pub fn search(&self, query: &str) -> Result<Vec<User>> {
        let needle = query.trim().to_lowercase();
        let users = self.list()?;
        Ok(users
            .into_iter()
            .filter(|u| {
                needle.is_empty()
                    || u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub fn add(&self, user: &NewUser) -> Result<User> {
        user.validate()?;
        let created: User = self.client.post_json(&Self::path("add-user"), user)?;
        log::info!("Added user {} ({})", created.email, created.id);
        Ok(created)
    }

    pub fn update(&self, id: i64, update: &UserUpdate) -> Result<User> {
        update.validate()?;
        let updated: User = self
            .client
            .put_json(&Self::path(&format!("update-user/{}", id)), update)?;

        let mut session = self.client.session.borrow_mut();
        if session.current_user().map(|u| u.id) == Some(id) {
            session.set_current_user(updated.clone())?;
        }
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        let _: serde_json::Value = self
            .client
            .delete_json(&Self::path(&format!("delete-user/{}", id)))?;
        log::info!("Deleted user {}", id);
        Ok(())
    }

    /// Activate or deactivate a user account.
    pub fn set_active(&self, id: i64, active: bool) -> Result<()> {
        let _: serde_json::Value = self.client.post_json(
            &Self::path(&format!("activate-deactivate/{}", id)),
            &ActivationRequest { is_active: active },
        )?;
        Ok(())
    }
}
