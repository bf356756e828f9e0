//! Scripted console walkthrough: seeds the mock collections, signs in,
//! and drives the roles page through the navigation contract.

use gestion_console::{ModalState, RolesPresenter, seed};
use gestion_core::RoleId;
use gestion_session::{MemoryStorage, SessionStore};

fn main() -> anyhow::Result<()> {
    gestion_observability::init();

    let data = seed()?;
    let mut session = SessionStore::hydrate(MemoryStorage::new());
    session.login("admin@gestion.co", "admin123", &data.users)?;

    let mut roles = RolesPresenter::new(data.roles);

    for path in [
        "/configuracion/roles",
        "/configuracion/roles/crear",
        "/configuracion/roles/2/editar",
        "/configuracion/roles/999/editar",
    ] {
        let state = roles.navigate(path);
        tracing::info!(path, ?state, "navigated");
    }
    roles.close();

    for action in ["crear", "editar", "eliminar", "inhabilitar"] {
        tracing::info!(action, enabled = roles.can(&session, action), "affordance");
    }

    // Vendedor still has provisioned users, so removal is rejected.
    match roles.remove(&session, RoleId::new(2)) {
        Err(err) => tracing::warn!(%err, "removal rejected"),
        Ok(()) => tracing::info!("role removed"),
    }

    roles.navigate("/configuracion/roles/3/ver");
    if let ModalState::Viewing(id) = *roles.state() {
        if let Some(role) = roles.get(id) {
            tracing::info!(
                role = %role.name,
                granted = role.permissions.granted_count(),
                "viewing role"
            );
        }
    }

    session.logout()?;
    tracing::info!(authenticated = session.is_authenticated(), "signed out");

    Ok(())
}
