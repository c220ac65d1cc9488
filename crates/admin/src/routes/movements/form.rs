//! Movement create and edit form handlers.
//!
//! The form body uses bracketed field names (`lines[0][product_id]`) so the
//! variable-length line items survive a plain urlencoded POST; `serde_qs`
//! parses that shape where `axum::Form` cannot.

use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::instrument;

use bodega_core::MovementId;

use crate::{
    db::DraftRepository,
    error::AppError,
    filters,
    middleware::RequireApiSession,
    models::CurrentAdmin,
    movements::{DraftLine, MovementDraft, MovementScreen, ValidationError, WorkflowError},
    state::AppState,
};

use super::super::dashboard::AdminUserView;

/// Warehouse choice for the form's selector.
#[derive(Debug, Clone)]
pub struct WarehouseOption {
    pub id: String,
    pub name: String,
    pub selected: bool,
}

/// Saved draft entry shown on the new-movement form.
#[derive(Debug, Clone)]
pub struct DraftOption {
    pub id: i32,
    pub name: String,
    pub updated_at: String,
}

/// Movement form template, shared by create and edit.
#[derive(Template)]
#[template(path = "movements/form.html")]
pub struct MovementFormTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    /// URL the form posts to.
    pub action: String,
    pub heading: String,
    pub warehouses: Vec<WarehouseOption>,
    pub draft: MovementDraft,
    pub errors: Vec<ValidationError>,
    pub error_banner: Option<String>,
    pub notice: Option<String>,
    /// Saved drafts; only offered when composing a new movement.
    pub saved_drafts: Vec<DraftOption>,
    pub is_edit: bool,
}

/// Query parameters for the new-movement form (one-shot banners from the
/// draft endpoints).
#[derive(Debug, serde::Deserialize)]
pub struct FormQuery {
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// New movement form.
///
/// GET /movements/new
#[instrument(skip_all)]
pub async fn new_form(
    RequireApiSession { admin, token }: RequireApiSession,
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<FormQuery>,
) -> Result<impl IntoResponse, AppError> {
    let client = state.inventory(token);
    let draft = MovementDraft::default();
    render_form(
        &state,
        &admin,
        &client,
        "/movements".to_string(),
        "New movement".to_string(),
        draft,
        Vec::new(),
        query.error,
        query.notice,
        false,
    )
    .await
}

/// Create a movement from the submitted form.
///
/// POST /movements
#[instrument(skip_all)]
pub async fn create(
    RequireApiSession { admin, token }: RequireApiSession,
    State(state): State<AppState>,
    body: String,
) -> Result<Response, AppError> {
    let draft = parse_form(&body)?;
    let workflow = state.workflow(token.clone());
    let mut screen = MovementScreen::new(None);

    match workflow.create(&mut screen, &draft).await {
        Ok(created) => Ok(Redirect::to(&format!(
            "/movements/{}?notice=Movement+created",
            created.id
        ))
        .into_response()),
        Err(e) => {
            let (errors, banner) = split_failure(e)?;
            let client = state.inventory(token);
            let page = render_form(
                &state,
                &admin,
                &client,
                "/movements".to_string(),
                "New movement".to_string(),
                draft,
                errors,
                banner,
                None,
                false,
            )
            .await?;
            Ok(page.into_response())
        }
    }
}

/// Edit form for a pending movement.
///
/// GET /movements/{id}/edit
#[instrument(skip(admin, token, state))]
pub async fn edit_form(
    RequireApiSession { admin, token }: RequireApiSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = MovementId::new(id);
    let workflow = state.workflow(token.clone());
    let movement = workflow.fetch_details(id).await?;

    if !crate::movements::lifecycle::is_editable(&movement) {
        // Only pending movements are editable; send the user back to the
        // read-only view instead of a dead form.
        return Ok(Redirect::to(&format!(
            "/movements/{id}?error=This+movement+can+no+longer+be+edited"
        ))
        .into_response());
    }

    let draft = draft_from_movement(&movement);
    let client = state.inventory(token);
    let page = render_form(
        &state,
        &admin,
        &client,
        format!("/movements/{id}"),
        format!("Edit movement #{id}"),
        draft,
        Vec::new(),
        None,
        None,
        true,
    )
    .await?;
    Ok(page.into_response())
}

/// Replace a pending movement with the submitted form.
///
/// POST /movements/{id}
#[instrument(skip(admin, token, state, body))]
pub async fn update(
    RequireApiSession { admin, token }: RequireApiSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: String,
) -> Result<Response, AppError> {
    let id = MovementId::new(id);
    let draft = parse_form(&body)?;
    let workflow = state.workflow(token.clone());
    let mut screen = MovementScreen::new(None);

    match workflow.update(&mut screen, id, &draft).await {
        Ok(_) => Ok(Redirect::to(&format!(
            "/movements/{id}?notice=Movement+updated"
        ))
        .into_response()),
        Err(WorkflowError::Denied(denied)) => Ok(Redirect::to(&format!(
            "/movements/{id}?error={}",
            urlencoding::encode(&denied.to_string())
        ))
        .into_response()),
        Err(e) => {
            let (errors, banner) = split_failure(e)?;
            let client = state.inventory(token);
            let page = render_form(
                &state,
                &admin,
                &client,
                format!("/movements/{id}"),
                format!("Edit movement #{id}"),
                draft,
                errors,
                banner,
                None,
                true,
            )
            .await?;
            Ok(page.into_response())
        }
    }
}

/// Parse the bracketed urlencoded form body into a draft.
fn parse_form(body: &str) -> Result<MovementDraft, AppError> {
    serde_qs::from_str(body).map_err(|e| AppError::BadRequest(format!("malformed form: {e}")))
}

/// Split a workflow failure into inline field errors vs. a banner.
///
/// Token expiry is re-raised so the response layer can force the logout.
fn split_failure(
    error: WorkflowError,
) -> Result<(Vec<ValidationError>, Option<String>), AppError> {
    match error {
        WorkflowError::Validation(errors) => Ok((errors.0, None)),
        WorkflowError::Api(api) if api.is_auth_expiry() => Err(AppError::from(api)),
        WorkflowError::Api(api) => Ok((Vec::new(), Some(api.to_string()))),
        WorkflowError::Denied(denied) => Ok((Vec::new(), Some(denied.to_string()))),
    }
}

/// Rebuild the form state from a fetched movement.
fn draft_from_movement(movement: &crate::api::Movement) -> MovementDraft {
    MovementDraft {
        warehouse_id: movement.warehouse_id.to_string(),
        movement_type: movement.movement_type.as_str().to_string(),
        notes: movement.notes.clone().unwrap_or_default(),
        lines: movement
            .details
            .iter()
            .map(|d| DraftLine {
                product_id: d.product_id.to_string(),
                product_name: d.product_name.clone().unwrap_or_default(),
                quantity: d.quantity.to_string(),
                lot: d.lot.clone().unwrap_or_default(),
                expiration_date: d
                    .expiration_date
                    .map(|date| date.to_string())
                    .unwrap_or_default(),
                notes: d.notes.clone().unwrap_or_default(),
            })
            .collect(),
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) async fn render_form(
    state: &AppState,
    admin: &CurrentAdmin,
    client: &crate::api::InventoryClient,
    action: String,
    heading: String,
    draft: MovementDraft,
    errors: Vec<ValidationError>,
    error_banner: Option<String>,
    notice: Option<String>,
    is_edit: bool,
) -> Result<Html<String>, AppError> {
    let warehouses = client
        .list_warehouses()
        .await?
        .into_iter()
        .filter(|w| w.is_active)
        .map(|w| WarehouseOption {
            selected: w.id.to_string() == draft.warehouse_id,
            id: w.id.to_string(),
            name: w.name,
        })
        .collect();

    // Saved drafts only make sense when composing from scratch
    let saved_drafts = if is_edit {
        Vec::new()
    } else {
        let repo = DraftRepository::new(state.pool());
        match repo.list(&admin.email).await {
            Ok(drafts) => drafts
                .into_iter()
                .map(|d| DraftOption {
                    id: d.id.as_i32(),
                    name: d.name,
                    updated_at: d.updated_at.to_rfc3339(),
                })
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to list saved drafts");
                Vec::new()
            }
        }
    };

    let template = MovementFormTemplate {
        admin_user: AdminUserView::from(admin),
        current_path: "/movements".to_string(),
        action,
        heading,
        warehouses,
        draft,
        errors,
        error_banner,
        notice,
        saved_drafts,
        is_edit,
    };

    Ok(Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_nested_lines() {
        let body = "warehouse_id=2&movement_type=IN&notes=&\
                    lines[0][product_id]=10&lines[0][product_name]=Rice&\
                    lines[0][quantity]=5&lines[0][lot]=L1&\
                    lines[0][expiration_date]=&lines[0][notes]=";
        let draft = parse_form(body).unwrap();
        assert_eq!(draft.warehouse_id, "2");
        assert_eq!(draft.movement_type, "IN");
        assert_eq!(draft.lines.len(), 1);
        assert_eq!(draft.lines[0].product_id, "10");
        assert_eq!(draft.lines[0].quantity, "5");
        assert_eq!(draft.lines[0].lot, "L1");
    }

    #[test]
    fn test_parse_form_missing_lines_defaults_empty() {
        let draft = parse_form("warehouse_id=1&movement_type=OUT").unwrap();
        assert!(draft.lines.is_empty());
        assert_eq!(draft.movement_type, "OUT");
    }

}
