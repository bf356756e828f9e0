//! Grant tree: factories, leaf access and the evaluator.
//!
//! A `PermissionTree` is a fully-populated instance of the schema: every
//! module, submodule and action declared in [`crate::schema`] is present
//! with a boolean leaf. Instances are only ever produced by the factories
//! and mutated through [`PermissionTree::set_leaf`], which flips existing
//! leaves and never extends the shape, so a well-formed tree stays
//! well-formed for its whole lifetime.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use gestion_core::{DomainError, DomainResult};

use crate::schema::{self, Grants};

/// Grant layout of one module inside a tree instance.
///
/// Serializes to the nested plain-object shape of the durable session
/// record: either `{"crear": true, ...}` or `{"bodegas": {"crear": true,
/// ...}, ...}`, with no variant tag in the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleGrants {
    /// Flat module: action name → granted.
    Actions(BTreeMap<String, bool>),
    /// Grouped module: submodule name → (action name → granted).
    Submodules(BTreeMap<String, BTreeMap<String, bool>>),
}

impl ModuleGrants {
    /// OR across every boolean leaf of the module.
    fn any_granted(&self) -> bool {
        match self {
            ModuleGrants::Actions(actions) => actions.values().any(|granted| *granted),
            ModuleGrants::Submodules(submodules) => submodules
                .values()
                .flat_map(BTreeMap::values)
                .any(|granted| *granted),
        }
    }
}

/// The full nested grant structure attached to roles and identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTree(BTreeMap<String, ModuleGrants>);

impl PermissionTree {
    /// Build a tree with every leaf set to `value`.
    ///
    /// Each call walks the schema and allocates a fresh instance; trees
    /// never share state, so flipping a leaf on one role can not leak
    /// into another.
    fn seeded(value: bool) -> Self {
        let mut modules = BTreeMap::new();
        for module in schema::MODULES {
            let grants = match module.grants {
                Grants::Flat(actions) => ModuleGrants::Actions(
                    actions.iter().map(|a| (a.to_string(), value)).collect(),
                ),
                Grants::Grouped(submodules) => ModuleGrants::Submodules(
                    submodules
                        .iter()
                        .map(|s| {
                            let actions =
                                s.actions.iter().map(|a| (a.to_string(), value)).collect();
                            (s.name.to_string(), actions)
                        })
                        .collect(),
                ),
            };
            modules.insert(module.name.to_string(), grants);
        }
        Self(modules)
    }

    /// All leaves denied; the default for newly created roles.
    pub fn none() -> Self {
        Self::seeded(false)
    }

    /// All leaves granted; the administrator default.
    pub fn all() -> Self {
        Self::seeded(true)
    }

    /// Evaluate a grant query.
    ///
    /// Fallback semantics:
    /// - unknown module, submodule or action → `false`, never a panic;
    /// - module only → `true` if **any** leaf anywhere under the module is
    ///   granted (an existence check, not a capability check: a tree with
    ///   only `inventario.bodegas.crear` still "has access to inventario");
    ///   for `dashboard` this collapses to its single `acceder` leaf;
    /// - module + submodule → `true` if any action of that submodule is
    ///   granted; for a flat module the second argument names the action
    ///   leaf directly;
    /// - full path → strict equality with `true` on the named leaf.
    pub fn allows(&self, module: &str, submodule: Option<&str>, action: Option<&str>) -> bool {
        let Some(grants) = self.0.get(module) else {
            return false;
        };

        let segments: Vec<&str> = submodule.into_iter().chain(action).collect();
        match grants {
            ModuleGrants::Actions(actions) => match segments.as_slice() {
                [] => grants.any_granted(),
                [action] => actions.get(*action) == Some(&true),
                _ => false,
            },
            ModuleGrants::Submodules(submodules) => match segments.as_slice() {
                [] => grants.any_granted(),
                [submodule] => submodules
                    .get(*submodule)
                    .is_some_and(|actions| actions.values().any(|granted| *granted)),
                [submodule, action] => {
                    submodules.get(*submodule).and_then(|a| a.get(*action)) == Some(&true)
                }
                _ => false,
            },
        }
    }

    /// Read a single leaf, `None` if the path does not exist.
    pub fn leaf(&self, module: &str, submodule: Option<&str>, action: &str) -> Option<bool> {
        match (self.0.get(module)?, submodule) {
            (ModuleGrants::Actions(actions), None) => actions.get(action).copied(),
            (ModuleGrants::Submodules(submodules), Some(submodule)) => {
                submodules.get(submodule)?.get(action).copied()
            }
            _ => None,
        }
    }

    /// Flip an existing leaf.
    ///
    /// Unknown paths are rejected: mutations may only change grant values,
    /// never introduce new keys.
    pub fn set_leaf(
        &mut self,
        module: &str,
        submodule: Option<&str>,
        action: &str,
        value: bool,
    ) -> DomainResult<()> {
        let slot = match (self.0.get_mut(module), submodule) {
            (Some(ModuleGrants::Actions(actions)), None) => actions.get_mut(action),
            (Some(ModuleGrants::Submodules(submodules)), Some(submodule)) => submodules
                .get_mut(submodule)
                .and_then(|actions| actions.get_mut(action)),
            _ => None,
        };

        match slot {
            Some(leaf) => {
                *leaf = value;
                Ok(())
            }
            None => Err(DomainError::validation(format!(
                "unknown permission leaf '{}'",
                crate::permission_label(module, submodule, Some(action)),
            ))),
        }
    }

    /// Number of granted leaves (summary affordance for toggle screens).
    pub fn granted_count(&self) -> usize {
        self.0
            .values()
            .map(|grants| match grants {
                ModuleGrants::Actions(actions) => {
                    actions.values().filter(|granted| **granted).count()
                }
                ModuleGrants::Submodules(submodules) => submodules
                    .values()
                    .flat_map(BTreeMap::values)
                    .filter(|granted| **granted)
                    .count(),
            })
            .sum()
    }

    /// Structural check against the schema: every declared leaf present,
    /// no extra keys, every module in its declared layout.
    ///
    /// Deserialized trees (e.g. the durable session record) must pass this
    /// before being trusted; anything else is treated as malformed.
    pub fn validate_shape(&self) -> DomainResult<()> {
        if self.0.len() != schema::MODULES.len() {
            return Err(DomainError::validation(format!(
                "expected {} modules, found {}",
                schema::MODULES.len(),
                self.0.len(),
            )));
        }

        for module in schema::MODULES {
            let Some(grants) = self.0.get(module.name) else {
                return Err(DomainError::validation(format!(
                    "missing module '{}'",
                    module.name
                )));
            };

            match (&module.grants, grants) {
                (Grants::Flat(expected), ModuleGrants::Actions(actual)) => {
                    check_actions(module.name, None, expected, actual)?;
                }
                (Grants::Grouped(expected), ModuleGrants::Submodules(actual)) => {
                    if actual.len() != expected.len() {
                        return Err(DomainError::validation(format!(
                            "module '{}' has {} submodules, expected {}",
                            module.name,
                            actual.len(),
                            expected.len(),
                        )));
                    }
                    for submodule in *expected {
                        let Some(actions) = actual.get(submodule.name) else {
                            return Err(DomainError::validation(format!(
                                "missing submodule '{}.{}'",
                                module.name, submodule.name
                            )));
                        };
                        check_actions(
                            module.name,
                            Some(submodule.name),
                            submodule.actions,
                            actions,
                        )?;
                    }
                }
                _ => {
                    return Err(DomainError::validation(format!(
                        "module '{}' has the wrong layout",
                        module.name
                    )));
                }
            }
        }

        Ok(())
    }
}

fn check_actions(
    module: &str,
    submodule: Option<&str>,
    expected: &[&str],
    actual: &BTreeMap<String, bool>,
) -> DomainResult<()> {
    let scope = match submodule {
        Some(submodule) => format!("{module}.{submodule}"),
        None => module.to_string(),
    };

    if actual.len() != expected.len() {
        return Err(DomainError::validation(format!(
            "'{}' has {} actions, expected {}",
            scope,
            actual.len(),
            expected.len(),
        )));
    }
    for action in expected {
        if !actual.contains_key(*action) {
            return Err(DomainError::validation(format!(
                "missing action '{scope}.{action}'"
            )));
        }
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
