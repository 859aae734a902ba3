//! Authenticated session state.
//!
//! A [`Session`] is created once when the SDK is built, restoring the access
//! token and current user from the [`LocalStore`]. Login writes both through
//! to the store; logout clears them. Every request reads the token from here.

use crate::config::keys;
use crate::error::Result;
use crate::models::User;
use crate::storage::LocalStore;

/// Token and user of the signed-in account, mirrored to the state store.
#[derive(Debug)]
pub struct Session {
    store: LocalStore,
    token: Option<String>,
    current_user: Option<User>,
}

impl Session {
    /// Restore a session from whatever the store currently holds.
    pub fn restore(store: LocalStore) -> Result<Self> {
        let token: Option<String> = store.get(keys::TOKEN)?;
        let current_user: Option<User> = store.get(keys::CURRENT_USER)?;
        if token.is_some() {
            log::debug!("Restored session from {}", store.state_dir.display());
        }
        Ok(Self {
            store,
            token,
            current_user,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The underlying store, for reading other persisted keys.
    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Record a successful login and persist it.
    pub fn sign_in(&mut self, token: String, user: Option<User>) -> Result<()> {
        self.store.set(keys::TOKEN, &token)?;
        match user {
            Some(ref u) => self.store.set(keys::CURRENT_USER, u)?,
            None => self.store.remove(keys::CURRENT_USER)?,
        }
        self.store.remove(keys::RESET_TOKEN)?;
        self.token = Some(token);
        self.current_user = user;
        Ok(())
    }

    /// Replace the cached current user (e.g. after the user edits their profile).
    pub fn set_current_user(&mut self, user: User) -> Result<()> {
        self.store.set(keys::CURRENT_USER, &user)?;
        self.current_user = Some(user);
        Ok(())
    }

    pub fn reset_token(&self) -> Result<Option<String>> {
        self.store.get(keys::RESET_TOKEN)
    }

    pub fn set_reset_token(&self, token: &str) -> Result<()> {
        self.store.set(keys::RESET_TOKEN, token)
    }

    pub fn clear_reset_token(&self) -> Result<()> {
        self.store.remove(keys::RESET_TOKEN)
    }

    /// Forget the token and user, in memory and on disk.
    ///
    /// UI preferences such as `sidebar-open` are left alone.
    pub fn sign_out(&mut self) -> Result<()> {
        self.store.remove(keys::TOKEN)?;
        self.store.remove(keys::CURRENT_USER)?;
        self.store.remove(keys::RESET_TOKEN)?;
        self.token = None;
        self.current_user = None;
        Ok(())
    }
}
