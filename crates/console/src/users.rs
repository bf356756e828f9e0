//! Users page: the flat `usuarios` module.
//!
//! `usuarios` has no submodules (its actions hang directly off the
//! module), so this page exercises the evaluator's flat-module gating.

use gestion_auth::Identity;

use crate::presenter::{Presenter, Resource};

impl Resource for Identity {
    const BASE_PATH: &'static str = "/usuarios";
    const MODULE: &'static str = "usuarios";
    const SUBMODULE: Option<&'static str> = None;
    const TOGGLE_ACTION: &'static str = "inhabilitar";

    fn toggle_status(&mut self) {
        self.toggle_status();
    }
}

pub type UsersPresenter = Presenter<Identity>;
