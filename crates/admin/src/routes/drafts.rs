//! Named draft handlers.
//!
//! Drafts are a purely local convenience: the current form state saved under
//! a user-chosen name in the admin database. Nothing here talks to the
//! inventory backend except the warehouse lookup needed to re-render the
//! form when a draft is loaded.

use axum::{
    Router,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    db::{DraftRepository, RepositoryError},
    error::AppError,
    middleware::RequireApiSession,
    movements::MovementDraft,
    state::AppState,
};

use super::movements::form::render_form;

/// Extra field carried alongside the draft payload on save.
#[derive(Debug, Deserialize)]
struct SaveDraftForm {
    #[serde(default)]
    draft_name: String,
}

/// Build the drafts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/movements/drafts", post(save))
        .route("/movements/drafts/{name}", get(load))
        .route("/movements/drafts/{name}/delete", post(delete))
}

/// Save the submitted form state as a named draft.
///
/// POST /movements/drafts
///
/// The body is the movement form plus a `draft_name` field; it is stored
/// verbatim, without validation - a draft may be incomplete by design.
#[instrument(skip_all)]
async fn save(
    RequireApiSession { admin, token: _ }: RequireApiSession,
    State(state): State<AppState>,
    body: String,
) -> Result<Response, AppError> {
    let named: SaveDraftForm = serde_qs::from_str(&body)
        .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;
    let name = named.draft_name.trim();
    if name.is_empty() {
        return Ok(Redirect::to("/movements/new?error=A+draft+name+is+required").into_response());
    }

    let draft: MovementDraft = serde_qs::from_str(&body)
        .map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))?;

    let repo = DraftRepository::new(state.pool());
    repo.save(&admin.email, name, &draft).await?;
    tracing::info!(draft = %name, "draft saved");

    Ok(Redirect::to("/movements/new?notice=Draft+saved").into_response())
}

/// Load a named draft back into the movement form.
///
/// GET /movements/drafts/{name}
#[instrument(skip(admin, token, state))]
async fn load(
    RequireApiSession { admin, token }: RequireApiSession,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let repo = DraftRepository::new(state.pool());
    let saved = match repo.load(&admin.email, &name).await {
        Ok(saved) => saved,
        Err(RepositoryError::NotFound) => {
            return Err(AppError::NotFound(format!("draft {name}")));
        }
        Err(e) => return Err(AppError::from(e)),
    };

    let client = state.inventory(token);
    let page = render_form(
        &state,
        &admin,
        &client,
        "/movements".to_string(),
        format!("New movement (draft: {})", saved.name),
        saved.draft,
        Vec::new(),
        None,
        None,
        false,
    )
    .await?;
    Ok(page.into_response())
}

/// Delete a named draft.
///
/// POST /movements/drafts/{name}/delete
#[instrument(skip(admin, state))]
async fn delete(
    RequireApiSession { admin, token: _ }: RequireApiSession,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let repo = DraftRepository::new(state.pool());
    match repo.delete(&admin.email, &name).await {
        Ok(()) => {
            tracing::info!(draft = %name, "draft deleted");
            Ok(Redirect::to("/movements/new?notice=Draft+deleted").into_response())
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!("draft {name}"))),
        Err(e) => Err(AppError::from(e)),
    }
}
