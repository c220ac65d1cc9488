//! Inventory backend REST API client.
//!
//! The admin panel owns no data: every movement, product, and warehouse lives
//! in the remote inventory service and is accessed over JSON/HTTPS. This
//! module provides the typed client for that service.
//!
//! # Architecture
//!
//! - Bearer-token authentication: email/password → token → API
//! - Token expiry is checked locally before every dispatch; an expired token
//!   fails the call without touching the network and forces a logout upstream
//! - One resource module per backend collection (movements, products,
//!   warehouses), all funnelled through [`client::InventoryClient`]
//!
//! # Error contract
//!
//! The backend reports failures DRF-style: either `{"detail": "..."}` or a
//! map of field name to message list. Field errors are flattened into a
//! single display string; the form keeps its entered data so the user can
//! retry.

pub mod auth;
pub mod client;
pub mod movements;
pub mod products;
pub mod warehouses;

pub use auth::{ApiToken, ApiUser};
pub use client::{InventoryClient, build_http_client};
pub use movements::{Movement, MovementDetail, NewMovement, NewMovementDetail};
pub use products::Product;
pub use warehouses::Warehouse;

use thiserror::Error;

/// Errors that can occur when talking to the inventory backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (network, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-2xx response.
    #[error("inventory service error ({status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Flattened error message from the response body.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Authentication failed (invalid email/password).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Access token expired - the session must be terminated.
    #[error("access token expired")]
    TokenExpired,

    /// Request URL could not be constructed from the configured base.
    #[error("invalid endpoint path: {0}")]
    InvalidEndpoint(String),
}

impl ApiError {
    /// Whether this error must force a logout rather than an inline message.
    #[must_use]
    pub const fn is_auth_expiry(&self) -> bool {
        matches!(self, Self::TokenExpired)
    }
}

/// Flatten a backend error body into a single display string.
///
/// Handles both `{"detail": "msg"}` and field-error maps like
/// `{"quantity": ["must be positive"], "warehouse_id": ["required"]}`.
/// Returns `None` when the body is not one of those shapes.
#[must_use]
pub fn flatten_error_body(body: &serde_json::Value) -> Option<String> {
    let map = body.as_object()?;

    if let Some(detail) = map.get("detail").and_then(serde_json::Value::as_str) {
        return Some(detail.to_string());
    }

    let mut parts: Vec<String> = Vec::new();
    for (field, messages) in map {
        match messages {
            serde_json::Value::String(msg) => parts.push(format!("{field}: {msg}")),
            serde_json::Value::Array(msgs) => {
                let joined: Vec<&str> = msgs
                    .iter()
                    .filter_map(serde_json::Value::as_str)
                    .collect();
                if !joined.is_empty() {
                    parts.push(format!("{field}: {}", joined.join(", ")));
                }
            }
            _ => {}
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_detail_body() {
        let body = json!({"detail": "Movement already authorized"});
        assert_eq!(
            flatten_error_body(&body),
            Some("Movement already authorized".to_string())
        );
    }

    #[test]
    fn test_flatten_field_errors() {
        let body = json!({
            "quantity": ["must be greater than zero"],
            "warehouse_id": ["this field is required"]
        });
        let flat = flatten_error_body(&body).expect("flattened");
        // Order follows the JSON object iteration; both fields must appear.
        assert!(flat.contains("quantity: must be greater than zero"));
        assert!(flat.contains("warehouse_id: this field is required"));
        assert!(flat.contains("; "));
    }

    #[test]
    fn test_flatten_rejects_other_shapes() {
        assert_eq!(flatten_error_body(&json!("oops")), None);
        assert_eq!(flatten_error_body(&json!([1, 2])), None);
        assert_eq!(flatten_error_body(&json!({"count": 3})), None);
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 400,
            message: "quantity: must be greater than zero".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "inventory service error (400): quantity: must be greater than zero"
        );

        let err = ApiError::NotFound("inventory-movements/9/".to_string());
        assert_eq!(err.to_string(), "not found: inventory-movements/9/");
    }

    #[test]
    fn test_token_expired_forces_logout() {
        assert!(ApiError::TokenExpired.is_auth_expiry());
        assert!(
            !ApiError::Api {
                status: 500,
                message: "boom".to_string()
            }
            .is_auth_expiry()
        );
    }
}
