//! Authentication extractors for the admin panel.
//!
//! Identity and the backend bearer token are established at login and read
//! from the session by these extractors. If either is missing the request is
//! redirected to the login page (HTML) or rejected with 401 (API paths).

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::api::ApiToken;
use crate::models::{CurrentAdmin, SessionToken, session_keys};

/// Extractor that requires an authenticated admin.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Extractor that requires both an authenticated admin and a backend token.
///
/// Handlers that talk to the inventory backend use this; the token's expiry
/// is still checked by the client before every dispatch, so a token that
/// lapsed since login fails the call rather than the extraction.
pub struct RequireApiSession {
    pub admin: CurrentAdmin,
    pub token: ApiToken,
}

/// Error returned when authentication is required but missing.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

/// Pick the rejection appropriate for the request path.
fn rejection_for(parts: &Parts) -> AuthRejection {
    if parts.uri.path().starts_with("/api/") {
        AuthRejection::Unauthorized
    } else {
        AuthRejection::RedirectToLogin
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The session is placed in extensions by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| rejection_for(parts))?;

        Ok(Self(admin))
    }
}

impl<S> FromRequestParts<S> for RequireApiSession
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?
            .clone();

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| rejection_for(parts))?;

        let token: SessionToken = session
            .get(session_keys::API_TOKEN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| rejection_for(parts))?;

        Ok(Self {
            admin,
            token: token.into_token(),
        })
    }
}

/// Store identity and token in the session after a successful login.
///
/// # Errors
///
/// Returns the session store error if persistence fails.
pub async fn establish_session(
    session: &Session,
    admin: &CurrentAdmin,
    token: &ApiToken,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_ADMIN, admin.clone())
        .await?;
    session
        .insert(session_keys::API_TOKEN, SessionToken::from_token(token))
        .await?;
    Ok(())
}

/// Remove identity and token from the session (logout, forced or not).
///
/// # Errors
///
/// Returns the session store error if removal fails.
pub async fn clear_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentAdmin>(session_keys::CURRENT_ADMIN)
        .await?;
    session
        .remove::<SessionToken>(session_keys::API_TOKEN)
        .await?;
    Ok(())
}
