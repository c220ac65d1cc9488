//! Authentication route handlers for admin.
//!
//! Credentials are never checked locally: the login form is forwarded to the
//! inventory backend's token endpoint, and the resulting bearer token lives
//! in the server-side session until it expires or the user logs out.

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
};
use bodega_core::Email;
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::{self, ApiError};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_session, establish_session};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login page template.
#[derive(Template)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    /// Error or notice banner, if any.
    message: Option<String>,
    /// Whether the banner is an error (red) or a notice (yellow).
    is_error: bool,
    /// Email to pre-fill after a failed attempt.
    email: String,
}

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// `expired` when a lapsed token forced the logout.
    reason: Option<String>,
}

/// Login form body.
#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login_submit))
        .route("/auth/logout", post(logout))
}

/// Render the login page.
///
/// GET /auth/login
///
/// Arriving with `?reason=expired` means a request found the session's token
/// lapsed; the stale session is cleared here so nothing half-authenticated
/// survives.
#[instrument(skip(session))]
async fn login_page(session: Session, Query(query): Query<LoginQuery>) -> impl IntoResponse {
    let message = match query.reason.as_deref() {
        Some("expired") => {
            let _ = clear_session(&session).await;
            clear_sentry_user();
            Some("Your session has expired. Please sign in again.".to_string())
        }
        _ => None,
    };

    render_login(message, false, String::new())
}

/// Submit credentials to the inventory backend.
///
/// POST /auth/login
#[instrument(skip_all)]
async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    axum::Form(form): axum::Form<LoginForm>,
) -> impl IntoResponse {
    // Obviously broken addresses never reach the network.
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(e) => {
            return render_login(Some(e.to_string()), true, form.email).into_response();
        }
    };
    let password = SecretString::from(form.password);

    match api::auth::authenticate(
        state.http(),
        &state.config().inventory_api_url,
        email.as_str(),
        &password,
    )
    .await
    {
        Ok((token, user)) => {
            let admin = CurrentAdmin::from(user);
            if let Err(e) = establish_session(&session, &admin, &token).await {
                tracing::error!(error = %e, "failed to persist session");
                return render_login(
                    Some("Could not start a session. Please try again.".to_string()),
                    true,
                    form.email,
                )
                .into_response();
            }
            set_sentry_user(&admin.email);
            tracing::info!(email = %admin.email, "admin logged in");
            Redirect::to("/").into_response()
        }
        Err(ApiError::AuthenticationFailed(message)) => {
            tracing::warn!(email = %form.email, "login rejected");
            render_login(Some(message), true, form.email).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "login request failed");
            render_login(
                Some("The inventory service is unreachable. Please try again.".to_string()),
                true,
                form.email,
            )
            .into_response()
        }
    }
}

/// Logout and clear session.
///
/// POST /auth/logout
#[instrument(skip(session))]
async fn logout(session: Session) -> impl IntoResponse {
    let _ = clear_session(&session).await;
    clear_sentry_user();
    Redirect::to("/auth/login")
}

fn render_login(message: Option<String>, is_error: bool, email: String) -> Html<String> {
    let template = LoginPageTemplate {
        message,
        is_error,
        email,
    };
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {e}")),
    )
}
