//! Role definition: a named, reusable grant tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gestion_core::{DomainError, DomainResult, Entity, Estado, RoleId};

use crate::PermissionTree;

/// A role definition.
///
/// # Invariants
/// - The name is non-empty (trimmed at construction).
/// - `assigned_users` is a denormalized count maintained by callers when
///   identities are provisioned or retired; it is **not** recomputed from
///   the users collection.
/// - A role with assigned users can not be removed (see [`Role::removable`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub description: String,
    pub permissions: PermissionTree,
    pub assigned_users: u32,
    pub status: Estado,
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Create a role with the given grant tree.
    ///
    /// New roles created from the console default to
    /// [`PermissionTree::none`]; the administrator seed uses
    /// [`PermissionTree::all`].
    pub fn new(
        id: RoleId,
        name: impl Into<String>,
        description: impl Into<String>,
        permissions: PermissionTree,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("role name cannot be empty"));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            description: description.into().trim().to_string(),
            permissions,
            assigned_users: 0,
            status: Estado::Activo,
            created_at,
        })
    }

    /// Referential guard: a role stays in the collection while identities
    /// are still provisioned from it.
    pub fn removable(&self) -> DomainResult<()> {
        if self.assigned_users > 0 {
            return Err(DomainError::conflict(format!(
                "role '{}' has {} assigned users",
                self.name, self.assigned_users
            )));
        }
        Ok(())
    }

    /// The `inhabilitar` toggle.
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

impl Entity for Role {
    type Id = RoleId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
