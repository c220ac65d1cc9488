//! Movement route handlers.
//!
//! List, read-only detail, create/edit forms and the lifecycle actions
//! (authorize, cancel, delete). Every mutating handler goes through
//! [`crate::movements::MovementWorkflow`], so local validation and the
//! transition guards run before any backend request, and the list is
//! re-fetched after every successful mutation.

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

mod actions;
mod detail;
pub(crate) mod form;
mod list;
pub mod types;

pub use types::{DetailLineView, MovementDetailView, MovementRowView};

/// Build the movements router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movements", get(list::index).post(form::create))
        .route("/movements/new", get(form::new_form))
        .route("/movements/{id}", get(detail::show).post(form::update))
        .route("/movements/{id}/edit", get(form::edit_form))
        .route("/movements/{id}/authorize", post(actions::authorize))
        .route("/movements/{id}/cancel", post(actions::cancel))
        .route("/movements/{id}/delete", post(actions::delete))
}
