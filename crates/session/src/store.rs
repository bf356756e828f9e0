//! The current-identity store.

use gestion_auth::Identity;
use thiserror::Error;

use crate::storage::SessionStorage;

/// Durable key holding the serialized identity (full grant tree included).
pub const IDENTITY_KEY: &str = "usuarioActual";

/// Durable key holding the "is authenticated" flag.
///
/// This is a **separate** key from the identity record and the two can
/// desynchronize (e.g. the record removed by hand while the flag stays
/// `"true"`). The store reads its own truth from the in-memory identity;
/// [`SessionStore::authenticated_flag`] exposes the raw flag so callers
/// can observe the divergence instead of silently merging the keys.
pub const AUTH_FLAG_KEY: &str = "autenticado";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("user '{0}' is disabled")]
    Disabled(String),

    #[error("session storage failed: {0}")]
    Storage(String),
}

/// Owns the single current identity for the process lifetime.
pub struct SessionStore<S: SessionStorage> {
    storage: S,
    current: Option<Identity>,
}

impl<S: SessionStorage> SessionStore<S> {
    /// Build the store, hydrating the current identity from storage.
    ///
    /// Defensive deserialization: a missing record starts logged out, and
    /// so does anything malformed: unparseable JSON or a grant tree that
    /// does not match the schema shape. Malformed state is logged, never
    /// propagated.
    pub fn hydrate(storage: S) -> Self {
        let current = storage.get(IDENTITY_KEY).and_then(|raw| {
            match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => match identity.permissions.validate_shape() {
                    Ok(()) => Some(identity),
                    Err(err) => {
                        tracing::warn!(
                            "session record has a malformed grant tree, starting logged out: {err}"
                        );
                        None
                    }
                },
                Err(err) => {
                    tracing::warn!("malformed session record, starting logged out: {err}");
                    None
                }
            }
        });

        Self { storage, current }
    }

    /// Authenticate against the seeded users collection.
    ///
    /// Credentials are matched verbatim (mock data, no hashing); inactive
    /// identities are rejected even with correct credentials.
    pub fn login(
        &mut self,
        email: &str,
        password: &str,
        users: &[Identity],
    ) -> Result<(), SessionError> {
        let email = email.trim().to_lowercase();
        let identity = users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .ok_or(SessionError::InvalidCredentials)?;

        if !identity.can_login() {
            return Err(SessionError::Disabled(identity.email.clone()));
        }

        tracing::info!(user = %identity.email, role = %identity.role, "login");
        self.set_identity(identity.clone())
    }

    /// Set the current identity and mirror it into storage.
    ///
    /// In-memory state is set first; if a storage write then fails, the
    /// error is logged and returned but the in-memory identity stands.
    /// Durable and in-memory state are allowed to diverge here rather
    /// than roll back.
    pub fn set_identity(&mut self, identity: Identity) -> Result<(), SessionError> {
        let record = serde_json::to_string(&identity)
            .map_err(|err| SessionError::Storage(err.to_string()))?;
        self.current = Some(identity);

        self.write(IDENTITY_KEY, &record)?;
        self.write(AUTH_FLAG_KEY, "true")
    }

    /// Clear the current identity and both durable keys.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        if let Some(identity) = self.current.take() {
            tracing::info!(user = %identity.email, "logout");
        }

        for key in [IDENTITY_KEY, AUTH_FLAG_KEY] {
            self.storage.remove(key).map_err(|err| {
                tracing::error!(key, "failed to clear session key: {err:?}");
                SessionError::Storage(format!("{err:#}"))
            })?;
        }
        Ok(())
    }

    pub fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    /// Whether someone is signed in, per in-memory state.
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The raw durable flag. May disagree with [`Self::is_authenticated`];
    /// see [`AUTH_FLAG_KEY`].
    pub fn authenticated_flag(&self) -> bool {
        self.storage.get(AUTH_FLAG_KEY).as_deref() == Some("true")
    }

    /// Evaluate a grant query against the current identity.
    ///
    /// Logged out means no tree at all, which denies everything.
    pub fn has_permission(
        &self,
        module: &str,
        submodule: Option<&str>,
        action: Option<&str>,
    ) -> bool {
        self.current
            .as_ref()
            .is_some_and(|identity| identity.allows(module, submodule, action))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.storage.set(key, value).map_err(|err| {
            tracing::error!(key, "failed to write session key: {err:?}");
            SessionError::Storage(format!("{err:#}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::Utc;
    use gestion_auth::{PermissionTree, Role};
    use gestion_core::{RoleId, UserId};

    fn admin_user() -> Identity {
        let role = Role::new(
            RoleId::new(1),
            "Administrador",
            "Acceso completo",
            PermissionTree::all(),
            Utc::now(),
        )
        .unwrap();
        Identity::provision(
            UserId::new(1),
            "admin@example.com",
            "admin123",
            "Admin",
            &role,
            vec![],
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn hydrate_from_empty_storage_starts_logged_out() {
        let store = SessionStore::hydrate(MemoryStorage::new());
        assert!(!store.is_authenticated());
        assert!(!store.has_permission("dashboard", None, None));
    }

    #[test]
    fn login_sets_memory_and_both_durable_keys() {
        let mut store = SessionStore::hydrate(MemoryStorage::new());
        store
            .login("Admin@Example.com", "admin123", &[admin_user()])
            .unwrap();

        assert!(store.is_authenticated());
        assert!(store.authenticated_flag());
        assert!(store.storage.get(IDENTITY_KEY).is_some());
        assert!(store.has_permission("ventas", Some("clientes"), Some("eliminar")));
    }

    #[test]
    fn login_rejects_bad_credentials_and_disabled_users() {
        let mut disabled = admin_user();
        disabled.toggle_status();
        let users = [disabled];

        let mut store = SessionStore::hydrate(MemoryStorage::new());

        let err = store
            .login("admin@example.com", "wrong", &users)
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidCredentials));

        let err = store
            .login("admin@example.com", "admin123", &users)
            .unwrap_err();
        assert!(matches!(err, SessionError::Disabled(_)));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn logout_clears_memory_and_both_durable_keys() {
        let mut store = SessionStore::hydrate(MemoryStorage::new());
        store
            .login("admin@example.com", "admin123", &[admin_user()])
            .unwrap();

        store.logout().unwrap();

        assert!(!store.is_authenticated());
        assert!(!store.authenticated_flag());
        assert_eq!(store.storage.get(IDENTITY_KEY), None);
        assert!(!store.has_permission("dashboard", None, None));
    }

    #[test]
    fn session_survives_rehydration() {
        let mut store = SessionStore::hydrate(MemoryStorage::new());
        store
            .login("admin@example.com", "admin123", &[admin_user()])
            .unwrap();
        let storage = store.storage;

        let rehydrated = SessionStore::hydrate(storage);
        assert!(rehydrated.is_authenticated());
        assert_eq!(
            rehydrated.current().map(|i| i.email.as_str()),
            Some("admin@example.com")
        );
    }

    #[test]
    fn malformed_record_is_treated_as_absent() {
        let mut storage = MemoryStorage::new();
        storage.set(IDENTITY_KEY, "{not json").unwrap();

        let store = SessionStore::hydrate(storage);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn record_with_malformed_grant_tree_is_treated_as_absent() {
        let mut record = serde_json::to_value(admin_user()).unwrap();
        record["permissions"]
            .as_object_mut()
            .unwrap()
            .remove("ventas");

        let mut storage = MemoryStorage::new();
        storage.set(IDENTITY_KEY, &record.to_string()).unwrap();

        let store = SessionStore::hydrate(storage);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn durable_flag_can_diverge_from_the_record() {
        // The two keys are independently settable; a stray flag with no
        // record must not fabricate a session.
        let mut storage = MemoryStorage::new();
        storage.set(AUTH_FLAG_KEY, "true").unwrap();

        let store = SessionStore::hydrate(storage);
        assert!(store.authenticated_flag());
        assert!(!store.is_authenticated());
    }
}
