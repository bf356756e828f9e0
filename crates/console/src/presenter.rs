//! Generic route-driven CRUD presenter.
//!
//! One presenter instance owns one entity collection (the in-memory mock
//! table seeded at load time) and the modal state of its page. Dialog
//! selection is driven purely by navigation paths; every mutation is
//! authorized against the session before it validates or touches the
//! collection.

use core::fmt::Display;
use core::str::FromStr;

use thiserror::Error;

use gestion_auth::{authorize, permission_label};
use gestion_core::{DomainError, DomainResult, Entity};
use gestion_session::{SessionStorage, SessionStore};

use crate::route::{CrudRoute, parse_route};

/// Modal state of an entity page.
///
/// A single tagged union instead of per-dialog booleans: two dialogs at
/// once is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState<Id> {
    List,
    Creating,
    Viewing(Id),
    Editing(Id),
    Deleting(Id),
}

/// Presentation contract of an entity participating in the CRUD pattern.
pub trait Resource: Entity
where
    Self::Id: FromStr + Display,
{
    /// Base navigation path of the entity's list page.
    const BASE_PATH: &'static str;

    /// Gate coordinates in the permission schema. `SUBMODULE` is `None`
    /// for entities living under a flat module (`usuarios`).
    const MODULE: &'static str;
    const SUBMODULE: Option<&'static str>;

    /// Action name gating the status toggle (`inhabilitar` for roles and
    /// users, `cambiarEstado` for warehouses).
    const TOGGLE_ACTION: &'static str;

    /// Referential guard consulted before removal.
    fn check_removable(&self) -> DomainResult<()> {
        Ok(())
    }

    /// Flip the entity's active status.
    fn toggle_status(&mut self);
}

/// Presenter-boundary error taxonomy.
///
/// Everything here is user-visible and recoverable; nothing propagates
/// as a panic. Stale ids in navigation paths are deliberately *not* an
/// error; they redirect to the list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresenterError {
    /// A form field failed validation; surfaced inline next to the field.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The evaluator denied the action; surfaced as a blocking toast
    /// naming the missing permission.
    #[error("forbidden: missing permission '{0}'")]
    Denied(String),

    /// A referential guard rejected the change; the entity is unchanged.
    #[error("rejected: {0}")]
    Rejected(String),

    /// A mutation addressed an entity that no longer exists.
    #[error("not found")]
    NotFound,
}

impl From<DomainError> for PresenterError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Forbidden(permission) => PresenterError::Denied(permission),
            DomainError::Conflict(msg) => PresenterError::Rejected(msg),
            DomainError::NotFound => PresenterError::NotFound,
            DomainError::Validation(msg)
            | DomainError::InvariantViolation(msg)
            | DomainError::InvalidId(msg) => PresenterError::Validation(msg),
        }
    }
}

/// List page + path-driven dialog for one entity collection.
pub struct Presenter<R: Resource>
where
    R::Id: FromStr + Display,
{
    items: Vec<R>,
    state: ModalState<R::Id>,
}

impl<R: Resource> Presenter<R>
where
    R::Id: FromStr + Display,
{
    pub fn new(items: Vec<R>) -> Self {
        Self {
            items,
            state: ModalState::List,
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn state(&self) -> &ModalState<R::Id> {
        &self.state
    }

    fn exists(&self, id: R::Id) -> bool {
        self.get(id).is_some()
    }

    /// Navigate to a path within this entity's page.
    ///
    /// Ids that do not resolve against the collection redirect silently
    /// to the list (stale-URL guard).
    pub fn navigate(&mut self, path: &str) -> &ModalState<R::Id> {
        self.state = match parse_route::<R::Id>(R::BASE_PATH, path) {
            CrudRoute::List => ModalState::List,
            CrudRoute::Create => ModalState::Creating,
            CrudRoute::View(id) if self.exists(id) => ModalState::Viewing(id),
            CrudRoute::Edit(id) if self.exists(id) => ModalState::Editing(id),
            CrudRoute::Delete(id) if self.exists(id) => ModalState::Deleting(id),
            CrudRoute::View(_) | CrudRoute::Edit(_) | CrudRoute::Delete(_) => {
                tracing::debug!(base = R::BASE_PATH, path, "stale id in path, back to list");
                ModalState::List
            }
        };
        &self.state
    }

    /// Close the current dialog, discarding pending form state.
    ///
    /// Returns the bare list path the caller should navigate to.
    pub fn close(&mut self) -> String {
        self.state = ModalState::List;
        R::BASE_PATH.to_string()
    }

    /// Whether the affordance for `action` should be enabled for the
    /// signed-in identity. Presentation-layer gating only.
    pub fn can<S: SessionStorage>(&self, session: &SessionStore<S>, action: &str) -> bool {
        session.has_permission(R::MODULE, R::SUBMODULE, Some(action))
    }

    /// Insert a new, already-validated entity.
    pub fn create<S: SessionStorage>(
        &mut self,
        session: &SessionStore<S>,
        item: R,
    ) -> Result<(), PresenterError> {
        self.authorize_action(session, "crear")?;

        if self.exists(item.id()) {
            return Err(PresenterError::Rejected(format!(
                "id {} already exists",
                item.id()
            )));
        }

        self.items.push(item);
        self.state = ModalState::List;
        Ok(())
    }

    /// Apply an edit to an existing entity.
    ///
    /// The closure performs the field updates and reports validation
    /// failures; on failure the dialog stays open (state unchanged).
    pub fn update<S: SessionStorage>(
        &mut self,
        session: &SessionStore<S>,
        id: R::Id,
        apply: impl FnOnce(&mut R) -> DomainResult<()>,
    ) -> Result<(), PresenterError> {
        self.authorize_action(session, "editar")?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(PresenterError::NotFound)?;
        apply(item)?;

        self.state = ModalState::List;
        Ok(())
    }

    /// Remove an entity, subject to its referential guard.
    pub fn remove<S: SessionStorage>(
        &mut self,
        session: &SessionStore<S>,
        id: R::Id,
    ) -> Result<(), PresenterError> {
        self.authorize_action(session, "eliminar")?;

        let index = self
            .items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(PresenterError::NotFound)?;
        self.items[index].check_removable()?;

        self.items.remove(index);
        self.state = ModalState::List;
        Ok(())
    }

    /// Flip an entity's active status (list-level action, no dialog).
    pub fn toggle_status<S: SessionStorage>(
        &mut self,
        session: &SessionStore<S>,
        id: R::Id,
    ) -> Result<(), PresenterError> {
        self.authorize_action(session, R::TOGGLE_ACTION)?;

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(PresenterError::NotFound)?;
        item.toggle_status();
        Ok(())
    }

    fn authorize_action<S: SessionStorage>(
        &self,
        session: &SessionStore<S>,
        action: &str,
    ) -> Result<(), PresenterError> {
        match session.current() {
            Some(identity) => {
                authorize(&identity.permissions, R::MODULE, R::SUBMODULE, Some(action))
                    .map_err(PresenterError::from)
            }
            None => Err(PresenterError::Denied(permission_label(
                R::MODULE,
                R::SUBMODULE,
                Some(action),
            ))),
        }
    }
}
