//! Dashboard route handler.

use askama::Template;
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
};
use tracing::instrument;

use bodega_core::MovementStatus;

use crate::{
    error::AppError,
    filters,
    middleware::RequireApiSession,
    models::CurrentAdmin,
    movements::MovementScreen,
    state::AppState,
};

use super::movements::MovementRowView;

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
        }
    }
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub pending: usize,
    pub authorized: usize,
    pub cancelled: usize,
    pub recent: Vec<MovementRowView>,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// Status overview: movement counts per state plus the most recent entries.
///
/// GET /
#[instrument(skip_all)]
pub async fn index(
    RequireApiSession { admin, token }: RequireApiSession,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let workflow = state.workflow(token);
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await?;

    let recent: Vec<MovementRowView> = screen
        .movements
        .iter()
        .take(5)
        .map(MovementRowView::from)
        .collect();

    let template = DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/".to_string(),
        pending: screen.count_in(MovementStatus::Pending),
        authorized: screen.count_in(MovementStatus::Authorized),
        cancelled: screen.count_in(MovementStatus::Cancelled),
        recent,
    };

    Ok(Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    ))
}
