//! Load-time mock data.
//!
//! Every collection in the console starts from these in-memory tables;
//! there is no backend. Each process gets its own copy; two "tabs"
//! editing the same entity are last-write-wins with no coordination.

use chrono::Utc;

use gestion_auth::{Identity, PermissionTree, Role};
use gestion_core::{DomainResult, RoleId, UserId, WarehouseId};
use gestion_inventory::Warehouse;

/// The seeded collections.
#[derive(Debug, Clone)]
pub struct SeedData {
    pub roles: Vec<Role>,
    pub users: Vec<Identity>,
    pub warehouses: Vec<Warehouse>,
}

/// Build the seed collections.
pub fn seed() -> DomainResult<SeedData> {
    let now = Utc::now();

    let admin = Role::new(
        RoleId::new(1),
        "Administrador",
        "Acceso completo a todos los módulos",
        PermissionTree::all(),
        now,
    )?;

    let mut seller_permissions = PermissionTree::none();
    seller_permissions.set_leaf("dashboard", None, "acceder", true)?;
    for submodule in ["clientes", "pedidos", "abonos"] {
        for action in ["crear", "editar"] {
            seller_permissions.set_leaf("ventas", Some(submodule), action, true)?;
        }
    }
    seller_permissions.set_leaf("ventas", Some("clientes"), "cambiarEstado", true)?;
    let seller = Role::new(
        RoleId::new(2),
        "Vendedor",
        "Gestión de clientes, pedidos y abonos",
        seller_permissions,
        now,
    )?;

    let mut keeper_permissions = PermissionTree::none();
    keeper_permissions.set_leaf("dashboard", None, "acceder", true)?;
    for submodule in ["bodegas", "productos", "existencias"] {
        for action in ["crear", "editar"] {
            keeper_permissions.set_leaf("inventario", Some(submodule), action, true)?;
        }
    }
    let keeper = Role::new(
        RoleId::new(3),
        "Bodeguero",
        "Operación de bodegas y existencias",
        keeper_permissions,
        now,
    )?;

    let mut roles = vec![admin, seller, keeper];

    let users = vec![
        Identity::provision(
            UserId::new(1),
            "admin@gestion.co",
            "admin123",
            "Alicia Ramírez",
            &roles[0],
            vec![WarehouseId::new(1), WarehouseId::new(2)],
            now,
        )?,
        Identity::provision(
            UserId::new(2),
            "vendedor@gestion.co",
            "vendedor123",
            "Carlos Pérez",
            &roles[1],
            vec![WarehouseId::new(1)],
            now,
        )?,
        Identity::provision(
            UserId::new(3),
            "bodeguero@gestion.co",
            "bodega123",
            "Pedro Gómez",
            &roles[2],
            vec![WarehouseId::new(1), WarehouseId::new(2)],
            now,
        )?,
        {
            // Retained but disabled account; login must reject it.
            let mut inactive = Identity::provision(
                UserId::new(4),
                "consulta@gestion.co",
                "consulta123",
                "Marta Díaz",
                &roles[1],
                vec![],
                now,
            )?;
            inactive.toggle_status();
            inactive
        },
    ];

    // Denormalized counts, maintained here the same way the console
    // maintains them when provisioning users.
    roles[0].assigned_users = 1;
    roles[1].assigned_users = 2;
    roles[2].assigned_users = 1;

    let warehouses = vec![
        Warehouse::new(
            WarehouseId::new(1),
            "Bodega Central",
            "Calle 10 #4-21, Bogotá",
            now,
        )?,
        Warehouse::new(
            WarehouseId::new(2),
            "Bodega Norte",
            "Autopista Norte Km 21, Chía",
            now,
        )?,
    ];

    Ok(SeedData {
        roles,
        users,
        warehouses,
    })
}
