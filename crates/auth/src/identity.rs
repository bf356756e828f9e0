//! Identity: an authenticated system user record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gestion_core::{DomainError, DomainResult, Entity, Estado, UserId, WarehouseId};

use crate::{PermissionTree, Role};

/// A system user.
///
/// # Invariants
/// - The email is non-empty, contains `@`, and is stored trimmed and
///   lowercased.
/// - `permissions` is a deep snapshot taken from a role at provisioning
///   time. Editing the role afterwards does **not** reach already
///   provisioned identities; re-provisioning is the only way to pick up
///   role changes.
/// - Inactive identities cannot log in but keep their record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    /// Mock credential checked verbatim at login; there is no real
    /// authentication service behind this console.
    pub password: String,
    pub name: String,
    /// Name of the role this identity was provisioned from.
    pub role: String,
    pub permissions: PermissionTree,
    pub status: Estado,
    /// Warehouses this user operates on.
    pub warehouse_ids: Vec<WarehouseId>,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Provision an identity from a role.
    ///
    /// The role's grant tree is cloned into the identity: snapshot
    /// semantics, not a live reference.
    pub fn provision(
        id: UserId,
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        role: &Role,
        warehouse_ids: Vec<WarehouseId>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let email = email.into();
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::validation("invalid email format"));
        }

        let password = password.into();
        if password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }

        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(Self {
            id,
            email,
            password,
            name: name.to_string(),
            role: role.name.clone(),
            permissions: role.permissions.clone(),
            status: Estado::Activo,
            warehouse_ids,
            created_at,
        })
    }

    /// Evaluate a grant query against this identity's snapshot tree.
    pub fn allows(&self, module: &str, submodule: Option<&str>, action: Option<&str>) -> bool {
        self.permissions.allows(module, submodule, action)
    }

    /// Inactive identities are rejected at login.
    pub fn can_login(&self) -> bool {
        self.status.is_activo()
    }

    /// The `inhabilitar` toggle.
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

impl Entity for Identity {
    type Id = UserId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gestion_core::RoleId;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn seller_role() -> Role {
        let mut permissions = PermissionTree::none();
        permissions
            .set_leaf("ventas", Some("clientes"), "crear", true)
            .unwrap();
        Role::new(RoleId::new(1), "Vendedor", "", permissions, now()).unwrap()
    }

    #[test]
    fn provision_normalizes_email_and_snapshots_the_tree() {
        let role = seller_role();
        let identity = Identity::provision(
            UserId::new(1),
            "  Ana.Lopez@Example.COM ",
            "secreto",
            "Ana López",
            &role,
            vec![WarehouseId::new(1)],
            now(),
        )
        .unwrap();

        assert_eq!(identity.email, "ana.lopez@example.com");
        assert_eq!(identity.role, "Vendedor");
        assert!(identity.allows("ventas", Some("clientes"), Some("crear")));
        assert!(!identity.allows("ventas", Some("clientes"), Some("eliminar")));
    }

    #[test]
    fn role_edits_do_not_reach_provisioned_identities() {
        let mut role = seller_role();
        let identity = Identity::provision(
            UserId::new(1),
            "ana@example.com",
            "secreto",
            "Ana",
            &role,
            vec![],
            now(),
        )
        .unwrap();

        role.permissions
            .set_leaf("ventas", Some("clientes"), "eliminar", true)
            .unwrap();

        // The role changed; the identity's snapshot did not.
        assert!(role.permissions.allows("ventas", Some("clientes"), Some("eliminar")));
        assert!(!identity.allows("ventas", Some("clientes"), Some("eliminar")));
    }

    #[test]
    fn provision_rejects_bad_credentials() {
        let role = seller_role();

        let err = Identity::provision(
            UserId::new(1),
            "sin-arroba",
            "secreto",
            "Ana",
            &role,
            vec![],
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = Identity::provision(
            UserId::new(1),
            "ana@example.com",
            "",
            "Ana",
            &role,
            vec![],
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn inactive_identity_cannot_login() {
        let role = seller_role();
        let mut identity = Identity::provision(
            UserId::new(1),
            "ana@example.com",
            "secreto",
            "Ana",
            &role,
            vec![],
            now(),
        )
        .unwrap();

        assert!(identity.can_login());
        identity.toggle_status();
        assert!(!identity.can_login());
    }
}
