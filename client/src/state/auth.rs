//! Signed-in identity for the current browser.
//!
//! SYSTEM CONTEXT
//! ==============
//! There is no credential check. The name entered on the login page only
//! namespaces the user's chat history in local storage. The current name is
//! itself persisted so a reload keeps the user signed in.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::util::storage::KeyValueStore;

pub const CURRENT_USER_KEY: &str = "agri_current_user";
pub const MAX_USERNAME_CHARS: usize = 32;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<String>,
}

/// Trimmed, non-empty, length-capped login name.
pub fn normalize_username(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_USERNAME_CHARS).collect())
}

impl AuthState {
    /// Pick up the name saved by a previous [`AuthState::sign_in`].
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        Self { user: store.get(CURRENT_USER_KEY).as_deref().and_then(normalize_username) }
    }

    /// Returns the accepted name, or `None` for a blank entry.
    pub fn sign_in(&mut self, store: &dyn KeyValueStore, raw: &str) -> Option<String> {
        let name = normalize_username(raw)?;
        if let Err(e) = store.set(CURRENT_USER_KEY, &name) {
            log::warn!("signed-in name not saved: {e}");
        }
        self.user = Some(name.clone());
        Some(name)
    }

    /// Forget the current name. Chat history stays in storage.
    pub fn sign_out(&mut self, store: &dyn KeyValueStore) {
        store.remove(CURRENT_USER_KEY);
        self.user = None;
    }
}
