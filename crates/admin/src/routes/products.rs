//! Product search endpoint for the form's autocomplete.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{api::Product, error::AppError, middleware::RequireApiSession, state::AppState};

/// Autocomplete query.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub term: String,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/products/search", get(search))
}

/// Search products by name or SKU.
///
/// GET /api/products/search?term=
///
/// Terms shorter than two characters return an empty list without touching
/// the backend; the client method enforces that gate.
#[instrument(skip(token, state))]
pub async fn search(
    RequireApiSession { admin: _, token }: RequireApiSession,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let client = state.inventory(token);
    let products = client.search_products(&query.term).await?;
    Ok(Json(products))
}
