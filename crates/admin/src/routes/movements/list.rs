//! Movement list page handler.

use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use tracing::instrument;

use bodega_core::ProductId;

use crate::{
    error::AppError,
    filters,
    middleware::RequireApiSession,
    movements::MovementScreen,
    state::AppState,
};

use super::super::dashboard::AdminUserView;
use super::types::MovementRowView;

/// Query parameters for the list page.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict the list to movements containing this product.
    pub product: Option<i32>,
    /// One-shot success banner carried across the post-action redirect.
    pub notice: Option<String>,
    /// One-shot error banner.
    pub error: Option<String>,
}

/// Movement list page template.
#[derive(Template)]
#[template(path = "movements/index.html")]
pub struct MovementsIndexTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub movements: Vec<MovementRowView>,
    pub product_filter: Option<i32>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// Movement list page handler.
///
/// GET /movements
#[instrument(skip(admin, token, state))]
pub async fn index(
    RequireApiSession { admin, token }: RequireApiSession,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let workflow = state.workflow(token);
    let mut screen = MovementScreen::new(query.product.map(ProductId::new));
    workflow.refresh(&mut screen).await?;

    let movements: Vec<MovementRowView> =
        screen.movements.iter().map(MovementRowView::from).collect();

    let template = MovementsIndexTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/movements".to_string(),
        movements,
        product_filter: query.product,
        notice: query.notice,
        error: query.error,
    };

    Ok(Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    ))
}
