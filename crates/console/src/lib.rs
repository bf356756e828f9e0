//! `gestion-console` — route-driven CRUD presentation layer.
//!
//! Every entity page in the console is the same pattern: one list surface
//! whose create/view/edit/delete dialog is selected by the trailing
//! segments of the current navigation path, with every mutating
//! affordance gated through the session's permission evaluator. This
//! crate implements that pattern once and binds it to roles, users and
//! warehouses.

pub mod presenter;
pub mod roles;
pub mod route;
pub mod seed;
pub mod users;
pub mod warehouses;

pub use presenter::{ModalState, Presenter, PresenterError, Resource};
pub use roles::RolesPresenter;
pub use route::{CrudRoute, parse_route, route_path};
pub use seed::{SeedData, seed};
pub use users::UsersPresenter;
pub use warehouses::WarehousesPresenter;
