//! Product lookup for the movement form's autocomplete.

use serde::{Deserialize, Serialize};

use bodega_core::ProductId;

use super::{ApiError, InventoryClient};

/// Minimum search term length before a lookup request is issued.
///
/// The page debounces keystrokes; this gate lives here so that no upstream
/// request can be issued for a shorter term no matter what the page sends.
pub const MIN_SEARCH_LEN: usize = 2;

/// A product as returned by the lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl InventoryClient {
    /// Search products by name or SKU.
    ///
    /// Terms shorter than [`MIN_SEARCH_LEN`] characters (after trimming)
    /// return an empty list without contacting the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network failure or a non-2xx response.
    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, ApiError> {
        let term = term.trim();
        if term.chars().count() < MIN_SEARCH_LEN {
            return Ok(Vec::new());
        }
        self.get_json("products/", &[("search", term.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes() {
        let product: Product = serde_json::from_str(
            r#"{"id": 7, "name": "Olive oil 1L", "sku": "OIL-1L"}"#,
        )
        .expect("deserialize");
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.sku.as_deref(), Some("OIL-1L"));
        assert!(product.unit.is_none());
    }
}
