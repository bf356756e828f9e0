//! Authorization guard over a grant tree.
//!
//! - No IO
//! - No panics
//! - No business logic (pure policy check)

use gestion_core::DomainError;

use crate::PermissionTree;

/// Dotted label for a permission path, e.g. `"inventario.bodegas.crear"`.
///
/// Denials carry this label so presenters can surface *which* permission
/// was missing without rebuilding the path themselves.
pub fn permission_label(module: &str, submodule: Option<&str>, action: Option<&str>) -> String {
    let mut label = String::from(module);
    for segment in submodule.into_iter().chain(action) {
        label.push('.');
        label.push_str(segment);
    }
    label
}

/// Check a grant query against a tree, turning a denial into an error.
///
/// The boolean form ([`PermissionTree::allows`]) drives visibility
/// (disabled buttons, hidden menu entries); this form guards the actual
/// mutation path at the presenter boundary.
pub fn authorize(
    tree: &PermissionTree,
    module: &str,
    submodule: Option<&str>,
    action: Option<&str>,
) -> Result<(), DomainError> {
    if tree.allows(module, submodule, action) {
        Ok(())
    } else {
        let label = permission_label(module, submodule, action);
        tracing::debug!(permission = %label, "authorization denied");
        Err(DomainError::forbidden(label))
    }
}
