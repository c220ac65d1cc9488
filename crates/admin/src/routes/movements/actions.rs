//! Lifecycle action handlers (authorize, cancel, delete).
//!
//! Each action redirects back to the detail page with a one-shot banner.
//! Guard denials never reach the backend; they come back as the `error`
//! banner with the guard's own message.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use bodega_core::MovementId;

use crate::{
    error::AppError,
    middleware::RequireApiSession,
    movements::{MovementScreen, WorkflowError},
    state::AppState,
};

/// Cancel form body.
#[derive(Debug, Deserialize)]
pub struct CancelForm {
    #[serde(default)]
    pub reason: String,
}

/// Authorize a pending movement.
///
/// POST /movements/{id}/authorize
#[instrument(skip(token, state))]
pub async fn authorize(
    RequireApiSession { admin: _, token }: RequireApiSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = MovementId::new(id);
    let workflow = state.workflow(token);
    let mut screen = MovementScreen::new(None);

    match workflow.authorize(&mut screen, id).await {
        Ok(()) => Ok(redirect_notice(id, "Movement authorized")),
        Err(e) => failure_redirect(id, e),
    }
}

/// Cancel a movement with a mandatory reason.
///
/// POST /movements/{id}/cancel
#[instrument(skip(token, state, form))]
pub async fn cancel(
    RequireApiSession { admin: _, token }: RequireApiSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    axum::Form(form): axum::Form<CancelForm>,
) -> Result<Response, AppError> {
    let id = MovementId::new(id);
    let workflow = state.workflow(token);
    let mut screen = MovementScreen::new(None);

    match workflow.cancel(&mut screen, id, &form.reason).await {
        Ok(()) => Ok(redirect_notice(id, "Movement cancelled")),
        Err(e) => failure_redirect(id, e),
    }
}

/// Delete a pending movement.
///
/// POST /movements/{id}/delete
#[instrument(skip(token, state))]
pub async fn delete(
    RequireApiSession { admin: _, token }: RequireApiSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = MovementId::new(id);
    let workflow = state.workflow(token);
    let mut screen = MovementScreen::new(None);

    match workflow.delete(&mut screen, id).await {
        Ok(()) => Ok(Redirect::to("/movements?notice=Movement+deleted").into_response()),
        Err(e) => failure_redirect(id, e),
    }
}

fn redirect_notice(id: MovementId, message: &str) -> Response {
    Redirect::to(&format!(
        "/movements/{id}?notice={}",
        urlencoding::encode(message)
    ))
    .into_response()
}

/// Turn a workflow failure into an error banner on the detail page.
fn failure_redirect(id: MovementId, error: WorkflowError) -> Result<Response, AppError> {
    match error {
        WorkflowError::Api(api) if api.is_auth_expiry() => Err(AppError::from(api)),
        WorkflowError::Denied(denied) => Ok(Redirect::to(&format!(
            "/movements/{id}?error={}",
            urlencoding::encode(&denied.to_string())
        ))
        .into_response()),
        WorkflowError::Api(api) => Ok(Redirect::to(&format!(
            "/movements/{id}?error={}",
            urlencoding::encode(&api.to_string())
        ))
        .into_response()),
        // Validation never fires for flag-gated actions
        WorkflowError::Validation(errors) => Err(AppError::BadRequest(errors.to_string())),
    }
}
