//! `gestion-auth` — permission model and identity records.
//!
//! This crate is intentionally decoupled from presentation and storage: it
//! holds the declarative permission schema, the grant tree with its
//! evaluator, and the `Role`/`Identity` records that carry grant trees.

pub mod authorize;
pub mod identity;
pub mod permissions;
pub mod role;
pub mod schema;

pub use authorize::{authorize, permission_label};
pub use identity::Identity;
pub use permissions::{ModuleGrants, PermissionTree};
pub use role::Role;
