//! Movement detail page handler.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use tracing::instrument;

use bodega_core::MovementId;

use crate::{
    api::ApiError,
    error::AppError,
    filters,
    middleware::RequireApiSession,
    state::AppState,
};

use super::super::dashboard::AdminUserView;
use super::types::MovementDetailView;

/// Query parameters for the detail page.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Movement detail page template.
///
/// `movement` is `None` when the fetch failed; the page then renders an
/// error state instead of field values.
#[derive(Template)]
#[template(path = "movements/detail.html")]
pub struct MovementShowTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub movement: Option<MovementDetailView>,
    pub movement_id: i32,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Movement detail page handler (read-only view with nested lines).
///
/// GET /movements/{id}
#[instrument(skip(admin, token, state))]
pub async fn show(
    RequireApiSession { admin, token }: RequireApiSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<DetailQuery>,
) -> Result<impl IntoResponse, AppError> {
    let workflow = state.workflow(token);
    let id = MovementId::new(id);

    // A failed fetch renders the page's error state rather than a bare 502;
    // an expired token still propagates so the forced logout happens.
    let (movement, error) = match workflow.fetch_details(id).await {
        Ok(movement) => (Some(MovementDetailView::from(&movement)), query.error),
        Err(e @ ApiError::TokenExpired) => return Err(AppError::from(e)),
        Err(ApiError::NotFound(_)) => {
            return Err(AppError::NotFound(format!("movement {id}")));
        }
        Err(e) => {
            tracing::error!(error = %e, movement_id = %id, "failed to fetch movement");
            (None, Some("Could not load this movement. Try again.".to_string()))
        }
    };

    let template = MovementShowTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/movements".to_string(),
        movement,
        movement_id: id.as_i32(),
        notice: query.notice,
        error,
    };

    Ok(Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    ))
}
