//! View types shared by the movement templates.

use chrono::{DateTime, Utc};

use crate::api::{Movement, MovementDetail};
use crate::movements::lifecycle::is_editable;

/// One row of the movement list table.
#[derive(Debug, Clone)]
pub struct MovementRowView {
    pub id: i32,
    pub type_label: String,
    pub warehouse: String,
    pub created_at: String,
    pub created_by: String,
    pub status_label: String,
    pub status_class: String,
    pub can_authorize: bool,
    pub can_cancel: bool,
    pub can_delete: bool,
}

impl From<&Movement> for MovementRowView {
    fn from(movement: &Movement) -> Self {
        Self {
            id: movement.id.as_i32(),
            type_label: movement.movement_type.label().to_string(),
            warehouse: movement
                .warehouse_name
                .clone()
                .unwrap_or_else(|| format!("Warehouse {}", movement.warehouse_id)),
            created_at: format_datetime(movement.created_at),
            created_by: movement.created_by.clone(),
            status_label: movement.status().label().to_string(),
            status_class: status_class(movement).to_string(),
            can_authorize: movement.can_authorize,
            can_cancel: movement.can_cancel,
            can_delete: movement.can_delete,
        }
    }
}

/// Full movement view for the read-only detail page.
#[derive(Debug, Clone)]
pub struct MovementDetailView {
    pub id: i32,
    pub type_label: String,
    pub warehouse: String,
    pub notes: String,
    pub created_at: String,
    pub created_by: String,
    pub status_label: String,
    pub status_class: String,
    pub authorized_by: Option<String>,
    pub authorized_at: Option<String>,
    pub cancellation_reason: Option<String>,
    pub cancelled_by: Option<String>,
    pub cancelled_at: Option<String>,
    pub can_authorize: bool,
    pub can_cancel: bool,
    pub can_delete: bool,
    pub editable: bool,
    pub lines: Vec<DetailLineView>,
}

impl From<&Movement> for MovementDetailView {
    fn from(movement: &Movement) -> Self {
        Self {
            id: movement.id.as_i32(),
            type_label: movement.movement_type.label().to_string(),
            warehouse: movement
                .warehouse_name
                .clone()
                .unwrap_or_else(|| format!("Warehouse {}", movement.warehouse_id)),
            notes: movement.notes.clone().unwrap_or_default(),
            created_at: format_datetime(movement.created_at),
            created_by: movement.created_by.clone(),
            status_label: movement.status().label().to_string(),
            status_class: status_class(movement).to_string(),
            authorized_by: movement.authorized_by.clone(),
            authorized_at: movement.authorized_at.map(format_datetime),
            cancellation_reason: movement.cancellation_reason.clone(),
            cancelled_by: movement.cancelled_by.clone(),
            cancelled_at: movement.cancelled_at.map(format_datetime),
            can_authorize: movement.can_authorize,
            can_cancel: movement.can_cancel,
            can_delete: movement.can_delete,
            editable: is_editable(movement),
            lines: movement.details.iter().map(DetailLineView::from).collect(),
        }
    }
}

/// One detail line of the read-only view.
#[derive(Debug, Clone)]
pub struct DetailLineView {
    pub product: String,
    pub quantity: String,
    pub lot: String,
    pub expiration_date: String,
    pub notes: String,
}

impl From<&MovementDetail> for DetailLineView {
    fn from(detail: &MovementDetail) -> Self {
        Self {
            product: detail
                .product_name
                .clone()
                .unwrap_or_else(|| format!("Product {}", detail.product_id)),
            quantity: detail.quantity.to_string(),
            lot: detail.lot.clone().unwrap_or_default(),
            expiration_date: detail
                .expiration_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            notes: detail.notes.clone().unwrap_or_default(),
        }
    }
}

/// CSS badge class for a movement's lifecycle state.
fn status_class(movement: &Movement) -> &'static str {
    use bodega_core::MovementStatus;
    match movement.status() {
        MovementStatus::Pending => "badge badge-pending",
        MovementStatus::Authorized => "badge badge-authorized",
        MovementStatus::Cancelled => "badge badge-cancelled",
    }
}

fn format_datetime(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodega_core::{MovementId, MovementType, WarehouseId};

    fn sample_movement() -> Movement {
        Movement {
            id: MovementId::new(7),
            warehouse_id: WarehouseId::new(2),
            warehouse_name: None,
            movement_type: MovementType::In,
            notes: None,
            created_at: "2026-03-14T09:30:00Z".parse().unwrap(),
            created_by: "ops@bodega.example".to_string(),
            authorized: false,
            authorized_by: None,
            authorized_at: None,
            is_cancelled: false,
            cancellation_reason: None,
            cancelled_by: None,
            cancelled_at: None,
            can_authorize: true,
            can_delete: true,
            can_cancel: false,
            details: vec![],
        }
    }

    #[test]
    fn test_row_view_falls_back_to_warehouse_id() {
        let view = MovementRowView::from(&sample_movement());
        assert_eq!(view.warehouse, "Warehouse 2");
        assert_eq!(view.status_label, "Pending");
        assert_eq!(view.created_at, "2026-03-14 09:30");
    }

    #[test]
    fn test_detail_view_editable_only_while_pending() {
        let mut movement = sample_movement();
        assert!(MovementDetailView::from(&movement).editable);

        movement.authorized = true;
        assert!(!MovementDetailView::from(&movement).editable);
    }
}
