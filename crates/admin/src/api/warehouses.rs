//! Warehouse list for the movement form's selector.

use serde::{Deserialize, Serialize};

use bodega_core::WarehouseId;

use super::{ApiError, InventoryClient};

/// A warehouse as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl InventoryClient {
    /// List all warehouses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network failure or a non-2xx response.
    pub async fn list_warehouses(&self) -> Result<Vec<Warehouse>, ApiError> {
        self.get_json("warehouses/", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warehouse_defaults_to_active() {
        let warehouse: Warehouse =
            serde_json::from_str(r#"{"id": 1, "name": "Central"}"#).expect("deserialize");
        assert_eq!(warehouse.id, WarehouseId::new(1));
        assert!(warehouse.is_active);
    }
}
