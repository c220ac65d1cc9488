//! Movement resource: wire types and client operations.
//!
//! Paths and body shapes follow the backend's REST contract
//! (`/inventory-movements/` collection plus `authorize/` and
//! `cancel_movement/` actions).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use bodega_core::{
    MovementDetailId, MovementId, MovementStatus, MovementType, ProductId, Quantity, WarehouseId,
};

use super::{ApiError, InventoryClient};

/// A stock movement as the backend returns it.
///
/// The capability flags (`can_authorize`, `can_delete`, `can_cancel`) are
/// computed by the backend's policy engine from the caller's permissions and
/// the movement's state. They are authoritative: the admin panel gates its
/// affordances on them and never recomputes them from role heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub warehouse_id: WarehouseId,
    /// Warehouse display name, denormalized by the backend for list views.
    #[serde(default)]
    pub warehouse_name: Option<String>,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: String,

    pub authorized: bool,
    #[serde(default)]
    pub authorized_by: Option<String>,
    #[serde(default)]
    pub authorized_at: Option<DateTime<Utc>>,

    pub is_cancelled: bool,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
    #[serde(default)]
    pub cancelled_by: Option<String>,
    #[serde(default)]
    pub cancelled_at: Option<DateTime<Utc>>,

    pub can_authorize: bool,
    pub can_delete: bool,
    pub can_cancel: bool,

    /// Detail lines; the list endpoint may omit them.
    #[serde(default)]
    pub details: Vec<MovementDetail>,
}

impl Movement {
    /// Lifecycle state derived from the two backend booleans.
    #[must_use]
    pub const fn status(&self) -> MovementStatus {
        MovementStatus::from_flags(self.authorized, self.is_cancelled)
    }
}

/// One product/quantity line within a movement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovementDetail {
    pub id: MovementDetailId,
    pub product_id: ProductId,
    /// Product display name, denormalized by the backend.
    #[serde(default)]
    pub product_name: Option<String>,
    pub quantity: Quantity,
    /// Lot code; the backend's wire name is Spanish.
    #[serde(default, rename = "lote")]
    pub lot: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for creating or replacing a movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMovement {
    pub warehouse_id: WarehouseId,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub details: Vec<NewMovementDetail>,
}

/// One detail line of a [`NewMovement`] body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMovementDetail {
    pub product_id: ProductId,
    pub quantity: Quantity,
    #[serde(rename = "lote", skip_serializing_if = "Option::is_none")]
    pub lot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for the cancel action.
#[derive(Serialize)]
struct CancelRequest<'a> {
    reason: &'a str,
}

impl InventoryClient {
    /// List all movements, optionally restricted to one product.
    ///
    /// Ordering is whatever the backend returns; the list is not re-sorted
    /// client-side.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network failure or a non-2xx response.
    pub async fn list_movements(
        &self,
        product: Option<ProductId>,
    ) -> Result<Vec<Movement>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(product) = product {
            query.push(("product", product.to_string()));
        }
        self.get_json("inventory-movements/", &query).await
    }

    /// Fetch a single movement with its nested detail lines.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the id is unknown.
    pub async fn movement(&self, id: MovementId) -> Result<Movement, ApiError> {
        self.get_json(&format!("inventory-movements/{id}/"), &[])
            .await
    }

    /// Create a movement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with flattened field errors if the backend
    /// rejects the body.
    pub async fn create_movement(&self, new: &NewMovement) -> Result<Movement, ApiError> {
        self.post_json("inventory-movements/", new).await
    }

    /// Replace a movement. Only permitted by the backend while pending.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on rejection; the local copy is left untouched.
    pub async fn update_movement(
        &self,
        id: MovementId,
        new: &NewMovement,
    ) -> Result<Movement, ApiError> {
        self.put_json(&format!("inventory-movements/{id}/"), new)
            .await
    }

    /// Delete a pending, non-authorized movement.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend refuses the removal.
    pub async fn delete_movement(&self, id: MovementId) -> Result<(), ApiError> {
        self.delete(&format!("inventory-movements/{id}/")).await
    }

    /// Authorize a movement, committing its stock effect.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend refuses the transition.
    pub async fn authorize_movement(&self, id: MovementId) -> Result<(), ApiError> {
        self.post_action(
            &format!("inventory-movements/{id}/authorize/"),
            &serde_json::json!({}),
        )
        .await
    }

    /// Cancel a movement with a reason. Terminal.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend refuses the transition.
    pub async fn cancel_movement(&self, id: MovementId, reason: &str) -> Result<(), ApiError> {
        self.post_action(
            &format!("inventory-movements/{id}/cancel_movement/"),
            &CancelRequest { reason },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movement_json() -> serde_json::Value {
        json!({
            "id": 12,
            "warehouse_id": 1,
            "warehouse_name": "Central",
            "type": "IN",
            "notes": null,
            "created_at": "2026-03-01T10:00:00Z",
            "created_by": "ops@bodega.example",
            "authorized": false,
            "is_cancelled": false,
            "can_authorize": true,
            "can_delete": true,
            "can_cancel": true,
            "details": [
                {
                    "id": 90,
                    "product_id": 7,
                    "product_name": "Olive oil 1L",
                    "quantity": "5",
                    "lote": "L-2026-03",
                    "expiration_date": "2027-03-01",
                    "notes": null
                }
            ]
        })
    }

    #[test]
    fn test_movement_deserializes_from_backend_shape() {
        let movement: Movement = serde_json::from_value(movement_json()).expect("deserialize");
        assert_eq!(movement.id, MovementId::new(12));
        assert_eq!(movement.movement_type, MovementType::In);
        assert_eq!(movement.status(), MovementStatus::Pending);
        assert_eq!(movement.details.len(), 1);

        let line = movement.details.first().expect("one line");
        assert_eq!(line.product_id, ProductId::new(7));
        assert_eq!(line.lot.as_deref(), Some("L-2026-03"));
    }

    #[test]
    fn test_list_shape_without_details() {
        // The list endpoint omits details; the field must default to empty.
        let mut value = movement_json();
        value
            .as_object_mut()
            .expect("object")
            .remove("details");
        let movement: Movement = serde_json::from_value(value).expect("deserialize");
        assert!(movement.details.is_empty());
    }

    #[test]
    fn test_new_movement_wire_shape() {
        let new = NewMovement {
            warehouse_id: WarehouseId::new(1),
            movement_type: MovementType::In,
            notes: None,
            details: vec![NewMovementDetail {
                product_id: ProductId::new(7),
                quantity: Quantity::parse("5").expect("positive"),
                lot: None,
                expiration_date: None,
                notes: None,
            }],
        };

        let body = serde_json::to_value(&new).expect("serialize");
        assert_eq!(body["warehouse_id"], json!(1));
        assert_eq!(body["type"], json!("IN"));
        assert_eq!(body["details"][0]["product_id"], json!(7));
        // Omitted optionals must not appear as nulls on the wire.
        assert!(body.get("notes").is_none());
        assert!(body["details"][0].get("lote").is_none());
        assert!(body["details"][0].get("expiration_date").is_none());
    }

    #[test]
    fn test_status_derivation_from_flags() {
        let mut movement: Movement =
            serde_json::from_value(movement_json()).expect("deserialize");
        movement.authorized = true;
        assert_eq!(movement.status(), MovementStatus::Authorized);
        movement.is_cancelled = true;
        assert_eq!(movement.status(), MovementStatus::Cancelled);
    }
}
