//! Roles page: `configuracion.roles`.

use gestion_auth::Role;
use gestion_core::DomainResult;

use crate::presenter::{Presenter, Resource};

impl Resource for Role {
    const BASE_PATH: &'static str = "/configuracion/roles";
    const MODULE: &'static str = "configuracion";
    const SUBMODULE: Option<&'static str> = Some("roles");
    const TOGGLE_ACTION: &'static str = "inhabilitar";

    fn check_removable(&self) -> DomainResult<()> {
        self.removable()
    }

    fn toggle_status(&mut self) {
        self.toggle_status();
    }
}

pub type RolesPresenter = Presenter<Role>;
