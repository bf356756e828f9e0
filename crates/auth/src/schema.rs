//! Declarative permission schema.
//!
//! The module/submodule/action universe is declared **once** here; the
//! factories, the evaluator's subtree walk, shape validation and any UI
//! toggle enumeration are all derived from this table. Changing the
//! universe means editing exactly one constant.
//!
//! Module, submodule and action names are the externally visible
//! vocabulary (they appear in the durable session record and in every
//! gate check), so they are carried verbatim as data.

/// A submodule grouping a set of boolean actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submodule {
    pub name: &'static str,
    pub actions: &'static [&'static str],
}

/// The grant layout of one module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grants {
    /// Actions hang directly off the module (`usuarios`, `dashboard`).
    Flat(&'static [&'static str]),
    /// Actions are grouped under submodules (`inventario.bodegas`, ...).
    Grouped(&'static [Submodule]),
}

/// A top-level permission module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module {
    pub name: &'static str,
    pub grants: Grants,
}

const CRUD: &[&str] = &["crear", "editar", "eliminar"];
const CRUD_ESTADO: &[&str] = &["crear", "editar", "eliminar", "cambiarEstado"];
const CRUD_INHABILITAR: &[&str] = &["crear", "editar", "eliminar", "inhabilitar"];

/// The fixed permission universe.
pub const MODULES: &[Module] = &[
    Module {
        name: "dashboard",
        grants: Grants::Flat(&["acceder"]),
    },
    Module {
        name: "inventario",
        grants: Grants::Grouped(&[
            Submodule { name: "bodegas", actions: CRUD_ESTADO },
            Submodule { name: "productos", actions: CRUD_ESTADO },
            Submodule { name: "existencias", actions: CRUD },
        ]),
    },
    Module {
        name: "compras",
        grants: Grants::Grouped(&[
            Submodule { name: "proveedores", actions: CRUD_ESTADO },
            Submodule { name: "ordenes", actions: CRUD },
            Submodule { name: "remisiones", actions: CRUD },
        ]),
    },
    Module {
        name: "ventas",
        grants: Grants::Grouped(&[
            Submodule { name: "clientes", actions: CRUD_ESTADO },
            Submodule { name: "pedidos", actions: CRUD },
            Submodule { name: "abonos", actions: CRUD },
        ]),
    },
    Module {
        name: "configuracion",
        grants: Grants::Grouped(&[Submodule {
            name: "roles",
            actions: CRUD_INHABILITAR,
        }]),
    },
    Module {
        name: "usuarios",
        grants: Grants::Flat(CRUD_INHABILITAR),
    },
];

/// Look up a module descriptor by name.
pub fn module(name: &str) -> Option<&'static Module> {
    MODULES.iter().find(|m| m.name == name)
}

/// One addressable boolean leaf of the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeafPath {
    pub module: &'static str,
    pub submodule: Option<&'static str>,
    pub action: &'static str,
}

impl LeafPath {
    /// Dotted label, e.g. `"inventario.bodegas.crear"` or `"usuarios.crear"`.
    pub fn label(&self) -> String {
        match self.submodule {
            Some(submodule) => format!("{}.{}.{}", self.module, submodule, self.action),
            None => format!("{}.{}", self.module, self.action),
        }
    }
}

/// Every leaf of the schema, in declaration order.
pub fn leaf_paths() -> Vec<LeafPath> {
    let mut leaves = Vec::new();
    for module in MODULES {
        match module.grants {
            Grants::Flat(actions) => {
                for action in actions {
                    leaves.push(LeafPath {
                        module: module.name,
                        submodule: None,
                        action,
                    });
                }
            }
            Grants::Grouped(submodules) => {
                for submodule in submodules {
                    for action in submodule.actions {
                        leaves.push(LeafPath {
                            module: module.name,
                            submodule: Some(submodule.name),
                            action,
                        });
                    }
                }
            }
        }
    }
    leaves
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_lookup() {
        assert!(module("inventario").is_some());
        assert!(module("dashboard").is_some());
        assert!(module("nomina").is_none());
    }

    #[test]
    fn leaf_paths_cover_flat_and_grouped_modules() {
        let leaves = leaf_paths();

        assert!(leaves.iter().any(|l| {
            l.module == "dashboard" && l.submodule.is_none() && l.action == "acceder"
        }));
        assert!(leaves.iter().any(|l| {
            l.module == "inventario" && l.submodule == Some("bodegas") && l.action == "crear"
        }));
        assert!(leaves.iter().any(|l| {
            l.module == "usuarios" && l.submodule.is_none() && l.action == "inhabilitar"
        }));
    }

    #[test]
    fn leaf_labels_are_dotted_paths() {
        let leaves = leaf_paths();
        let labels: Vec<String> = leaves.iter().map(LeafPath::label).collect();

        assert!(labels.contains(&"dashboard.acceder".to_string()));
        assert!(labels.contains(&"configuracion.roles.inhabilitar".to_string()));
    }
}
