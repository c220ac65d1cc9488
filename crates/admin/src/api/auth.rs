//! Inventory backend authentication.
//!
//! Handles email/password authentication to obtain bearer tokens for API
//! access. Tokens are held in the admin session, never persisted to disk.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use super::ApiError;

/// Seconds of remaining validity below which a token counts as expired.
///
/// Keeps a request from being dispatched with a token that would lapse
/// mid-flight; an expired token aborts the call client-side and forces a
/// logout.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Bearer token obtained from the inventory backend.
#[derive(Debug, Clone)]
pub struct ApiToken {
    /// Opaque bearer token for API requests.
    pub access_token: SecretString,
    /// Unix timestamp when the token expires.
    pub expires_at: i64,
}

impl ApiToken {
    /// Check if the token has expired (with a safety buffer).
    #[must_use]
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        now >= self.expires_at - EXPIRY_BUFFER_SECS
    }
}

/// Identity of the authenticated backend user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUser {
    /// Email the user authenticated with.
    pub email: String,
    /// Display name reported by the backend.
    pub name: String,
}

/// Request body for token authentication.
#[derive(Serialize)]
struct AuthRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Response from the token endpoint.
#[derive(Deserialize)]
struct AuthResponse {
    access_token: String,
    /// Token lifetime in seconds.
    expires_in: i64,
    user: ApiUser,
}

/// Error response from the token endpoint.
#[derive(Deserialize)]
struct AuthErrorResponse {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Authenticate against the inventory backend with email and password.
///
/// Returns the bearer token and the identity the backend reports for it.
///
/// # Errors
///
/// Returns [`ApiError::AuthenticationFailed`] if credentials are rejected,
/// or [`ApiError::Http`] on network failure.
#[instrument(skip(client, password), fields(email = %email))]
pub async fn authenticate(
    client: &reqwest::Client,
    base_url: &Url,
    email: &str,
    password: &SecretString,
) -> Result<(ApiToken, ApiUser), ApiError> {
    let endpoint = base_url
        .join("auth/token/")
        .map_err(|e| ApiError::InvalidEndpoint(e.to_string()))?;

    let now = chrono::Utc::now().timestamp();

    let response = client
        .post(endpoint)
        .json(&AuthRequest {
            email,
            password: password.expose_secret(),
        })
        .send()
        .await?;

    let status = response.status();

    if status.is_success() {
        let auth: AuthResponse = response.json().await?;
        let token = ApiToken {
            access_token: SecretString::from(auth.access_token),
            expires_at: now + auth.expires_in,
        };
        Ok((token, auth.user))
    } else if status == reqwest::StatusCode::UNAUTHORIZED
        || status == reqwest::StatusCode::FORBIDDEN
        || status == reqwest::StatusCode::BAD_REQUEST
    {
        let error: AuthErrorResponse = response.json().await.unwrap_or(AuthErrorResponse {
            detail: None,
            error: None,
        });
        let message = error
            .detail
            .or(error.error)
            .unwrap_or_else(|| "Invalid credentials".to_string());
        Err(ApiError::AuthenticationFailed(message))
    } else {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::AuthenticationFailed(format!("HTTP {status}: {body}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_expired() {
        let now = chrono::Utc::now().timestamp();

        // Token that expired an hour ago
        let expired = ApiToken {
            access_token: SecretString::from("test"),
            expires_at: now - 3600,
        };
        assert!(expired.is_expired());

        // Token that expires in an hour
        let valid = ApiToken {
            access_token: SecretString::from("test"),
            expires_at: now + 3600,
        };
        assert!(!valid.is_expired());

        // Token inside the safety buffer counts as expired
        let almost = ApiToken {
            access_token: SecretString::from("test"),
            expires_at: now + 30,
        };
        assert!(almost.is_expired());
    }
}
