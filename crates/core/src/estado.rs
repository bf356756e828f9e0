//! Shared entity status.

use serde::{Deserialize, Serialize};

/// Active/inactive lifecycle flag shared by roles, users and warehouses.
///
/// Inactive entities stay in their collection (nothing is archived or
/// deleted by a status change); they are only excluded from operational
/// flows such as login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Estado {
    #[default]
    Activo,
    Inactivo,
}

impl Estado {
    pub fn is_activo(&self) -> bool {
        matches!(self, Estado::Activo)
    }

    /// The opposite status (used by the `cambiarEstado`/`inhabilitar`
    /// toggle actions).
    pub fn toggled(&self) -> Estado {
        match self {
            Estado::Activo => Estado::Inactivo,
            Estado::Inactivo => Estado::Activo,
        }
    }
}

impl core::fmt::Display for Estado {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Estado::Activo => write!(f, "Activo"),
            Estado::Inactivo => write!(f, "Inactivo"),
        }
    }
}
