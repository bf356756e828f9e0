//! Warehouses page: `inventario.bodegas`.

use gestion_inventory::Warehouse;

use crate::presenter::{Presenter, Resource};

impl Resource for Warehouse {
    const BASE_PATH: &'static str = "/inventario/bodegas";
    const MODULE: &'static str = "inventario";
    const SUBMODULE: Option<&'static str> = Some("bodegas");
    const TOGGLE_ACTION: &'static str = "cambiarEstado";

    fn toggle_status(&mut self) {
        self.toggle_status();
    }
}

pub type WarehousesPresenter = Presenter<Warehouse>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{ModalState, PresenterError};
    use chrono::Utc;
    use gestion_auth::{Identity, PermissionTree, Role};
    use gestion_core::{Estado, RoleId, UserId, WarehouseId};
    use gestion_session::{MemoryStorage, SessionStore};

    fn warehouse(id: u32, name: &str) -> Warehouse {
        Warehouse::new(WarehouseId::new(id), name, "Calle 10 #4-21", Utc::now()).unwrap()
    }

    fn keeper_session() -> SessionStore<MemoryStorage> {
        let mut permissions = PermissionTree::none();
        for action in ["crear", "editar", "cambiarEstado"] {
            permissions
                .set_leaf("inventario", Some("bodegas"), action, true)
                .unwrap();
        }
        let keeper = Role::new(RoleId::new(1), "Bodeguero", "", permissions, Utc::now()).unwrap();
        let identity = Identity::provision(
            UserId::new(1),
            "bodeguero@example.com",
            "bodega123",
            "Pedro",
            &keeper,
            vec![WarehouseId::new(1)],
            Utc::now(),
        )
        .unwrap();

        let mut session = SessionStore::hydrate(MemoryStorage::new());
        session.set_identity(identity).unwrap();
        session
    }

    #[test]
    fn navigation_drives_the_dialog() {
        let mut presenter = WarehousesPresenter::new(vec![warehouse(1, "Bodega Central")]);

        assert_eq!(
            presenter.navigate("/inventario/bodegas/1/ver"),
            &ModalState::Viewing(WarehouseId::new(1))
        );
        assert_eq!(
            presenter.navigate("/inventario/bodegas/2/ver"),
            &ModalState::List
        );
    }

    #[test]
    fn toggle_is_gated_by_cambiar_estado() {
        let session = keeper_session();
        let mut presenter = WarehousesPresenter::new(vec![warehouse(1, "Bodega Central")]);

        presenter
            .toggle_status(&session, WarehouseId::new(1))
            .unwrap();
        assert_eq!(
            presenter.get(WarehouseId::new(1)).map(|w| w.status),
            Some(Estado::Inactivo)
        );
    }

    #[test]
    fn missing_eliminar_grant_blocks_removal_but_not_edit() {
        let session = keeper_session();
        let mut presenter = WarehousesPresenter::new(vec![warehouse(1, "Bodega Central")]);

        presenter
            .update(&session, WarehouseId::new(1), |warehouse| {
                warehouse.update(Some("Bodega Principal".to_string()), None)
            })
            .unwrap();
        assert_eq!(
            presenter.get(WarehouseId::new(1)).map(|w| w.name.as_str()),
            Some("Bodega Principal")
        );

        let err = presenter
            .remove(&session, WarehouseId::new(1))
            .unwrap_err();
        assert_eq!(
            err,
            PresenterError::Denied("inventario.bodegas.eliminar".to_string())
        );
    }

    #[test]
    fn edit_validation_failures_leave_the_entity_unchanged() {
        let session = keeper_session();
        let mut presenter = WarehousesPresenter::new(vec![warehouse(1, "Bodega Central")]);
        presenter.navigate("/inventario/bodegas/1/editar");

        let err = presenter
            .update(&session, WarehouseId::new(1), |warehouse| {
                warehouse.update(Some("  ".to_string()), None)
            })
            .unwrap_err();
        assert!(matches!(err, PresenterError::Validation(_)));
        assert_eq!(
            presenter.get(WarehouseId::new(1)).map(|w| w.name.as_str()),
            Some("Bodega Central")
        );
    }
}
