//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Health check
//!
//! # Dashboard
//! GET  /                           - Status overview
//!
//! # Auth (credentials are verified by the inventory backend)
//! GET  /auth/login                 - Login page
//! POST /auth/login                 - Submit credentials
//! POST /auth/logout                - Logout
//!
//! # Movements
//! GET  /movements                  - Movement list (optional ?product= filter)
//! GET  /movements/new              - New movement form
//! POST /movements                  - Create movement
//! GET  /movements/{id}             - Movement detail (read-only)
//! GET  /movements/{id}/edit        - Edit form (pending movements only)
//! POST /movements/{id}             - Replace movement
//! POST /movements/{id}/authorize   - Authorize
//! POST /movements/{id}/cancel      - Cancel with reason
//! POST /movements/{id}/delete      - Delete (pending only)
//!
//! # Drafts (stored locally, never sent to the backend)
//! POST /movements/drafts           - Save named draft
//! GET  /movements/drafts/{name}    - Load draft into the form
//! POST /movements/drafts/{name}/delete - Delete draft
//!
//! # JSON API (for the form's autocomplete)
//! GET  /api/products/search?term=  - Product search (min 2 chars)
//! ```

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod dashboard;
pub mod drafts;
pub mod movements;
pub mod products;

/// Build the application router (health endpoints are added in `main`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(movements::router())
        .merge(drafts::router())
        .merge(products::router())
}
