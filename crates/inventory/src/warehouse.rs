//! Warehouse (bodega) entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gestion_core::{DomainError, DomainResult, Entity, Estado, WarehouseId};

/// A physical warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub address: String,
    pub status: Estado,
    pub created_at: DateTime<Utc>,
}

impl Warehouse {
    pub fn new(
        id: WarehouseId,
        name: impl Into<String>,
        address: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("warehouse name cannot be empty"));
        }

        let address = address.into();
        let address = address.trim();
        if address.is_empty() {
            return Err(DomainError::validation("warehouse address cannot be empty"));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            address: address.to_string(),
            status: Estado::Activo,
            created_at,
        })
    }

    /// Update details; `None` keeps the existing value.
    pub fn update(&mut self, name: Option<String>, address: Option<String>) -> DomainResult<()> {
        let new_name = name.unwrap_or_else(|| self.name.clone());
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(DomainError::validation("warehouse name cannot be empty"));
        }

        let new_address = address.unwrap_or_else(|| self.address.clone());
        let new_address = new_address.trim();
        if new_address.is_empty() {
            return Err(DomainError::validation("warehouse address cannot be empty"));
        }

        self.name = new_name.to_string();
        self.address = new_address.to_string();
        Ok(())
    }

    /// The `cambiarEstado` toggle.
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn new_warehouse_trims_fields() {
        let warehouse = Warehouse::new(
            WarehouseId::new(1),
            " Bodega Central ",
            " Calle 10 #4-21 ",
            now(),
        )
        .unwrap();

        assert_eq!(warehouse.name, "Bodega Central");
        assert_eq!(warehouse.address, "Calle 10 #4-21");
        assert_eq!(warehouse.status, Estado::Activo);
    }

    #[test]
    fn rejects_blank_name_or_address() {
        assert!(Warehouse::new(WarehouseId::new(1), " ", "Calle 10", now()).is_err());
        assert!(Warehouse::new(WarehouseId::new(1), "Bodega Norte", "", now()).is_err());
    }

    #[test]
    fn update_keeps_unspecified_fields() {
        let mut warehouse =
            Warehouse::new(WarehouseId::new(1), "Bodega Central", "Calle 10", now()).unwrap();

        warehouse
            .update(Some("Bodega Principal".to_string()), None)
            .unwrap();
        assert_eq!(warehouse.name, "Bodega Principal");
        assert_eq!(warehouse.address, "Calle 10");

        let err = warehouse.update(Some("  ".to_string()), None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(warehouse.name, "Bodega Principal");
    }
}
