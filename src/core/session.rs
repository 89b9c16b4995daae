//! Local sign-in stub.
//!
//! Accepts any non-empty username with a password of at least six
//! characters. Nothing is verified remotely; the profile only personalises
//! the session and survives restarts through the `user` slot.

use crate::core::persistence::Persistence;
use crate::models::UserProfile;
use crate::{Error, Result};
use chrono::Utc;

/// Minimum password length accepted by the stub.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Signed-in user, persisted across restarts.
pub struct SessionManager {
    persistence: Persistence,
    current: Option<UserProfile>,
}

impl SessionManager {
    /// Create a manager, restoring any stored user.
    pub fn new(persistence: Persistence) -> Self {
        let current = persistence.load_user();
        Self {
            persistence,
            current,
        }
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// Sign in, replacing any current user.
    pub fn login(&mut self, username: &str, password: &str) -> Result<UserProfile> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(Error::LoginRejected(
                "Username and password are required".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::LoginRejected(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        let user = UserProfile {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            name: capitalize(username),
            email: format!("{}@example.com", username),
            signed_in_at: Utc::now(),
        };

        self.persistence.save_user(&user)?;
        tracing::info!("Signed in as {}", user.username);
        self.current = Some(user.clone());
        Ok(user)
    }

    /// Sign out and forget the stored user.
    pub fn logout(&mut self) -> Result<()> {
        self.persistence.clear_user()?;
        if let Some(user) = self.current.take() {
            tracing::info!("Signed out {}", user.username);
        }
        Ok(())
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::persistence::{MemoryStore, USER_KEY};
    use std::sync::Arc;

    fn manager(store: &MemoryStore) -> SessionManager {
        SessionManager::new(Persistence::new(Arc::new(store.clone())))
    }

    #[test]
    fn test_login_requires_credentials() {
        let mut session = manager(&MemoryStore::new());
        let err = session.login("  ", "secret1").unwrap_err();
        assert!(err.to_string().contains("required"));
        assert!(session.login("neo", "   ").is_err());
        assert!(!session.is_signed_in());
    }

    #[test]
    fn test_login_rejects_short_password() {
        let mut session = manager(&MemoryStore::new());
        let err = session.login("neo", "12345").unwrap_err();
        assert!(err.to_string().contains("at least 6"));
    }

    #[test]
    fn test_login_builds_profile_and_persists() {
        let store = MemoryStore::new();
        let mut session = manager(&store);
        let user = session.login("trinity", "redpill").unwrap();
        assert_eq!(user.name, "Trinity");
        assert_eq!(user.email, "trinity@example.com");
        assert!(store.get(USER_KEY).is_some());

        let restored = manager(&store);
        assert_eq!(restored.current_user(), Some(&user));
    }

    #[test]
    fn test_logout_removes_slot() {
        let store = MemoryStore::new();
        let mut session = manager(&store);
        session.login("morpheus", "zion-01").unwrap();
        session.logout().unwrap();
        assert!(!session.is_signed_in());
        assert!(store.get(USER_KEY).is_none());
        assert!(manager(&store).current_user().is_none());
    }
}
