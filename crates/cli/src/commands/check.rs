//! Backend connectivity check command.
//!
//! Performs one real authentication against the inventory backend and
//! reports how long the issued token is valid. Useful when wiring up a new
//! environment before starting the server.
//!
//! # Environment Variables
//!
//! - `INVENTORY_API_URL` - Base URL of the inventory backend
//! - `INVENTORY_API_PASSWORD` - Password for the given email (read from the
//!   environment so it never lands in shell history)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use bodega_admin::api;
use bodega_core::{Email, EmailError};

/// Errors that can occur during the check.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid INVENTORY_API_URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Backend check failed: {0}")]
    Api(#[from] api::ApiError),
}

/// Authenticate once against the inventory backend.
///
/// # Errors
///
/// Returns [`CheckError`] if configuration is missing or the backend
/// rejects the credentials.
pub async fn run(email: &str) -> Result<(), CheckError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;

    let mut raw_url = std::env::var("INVENTORY_API_URL")
        .map_err(|_| CheckError::MissingEnvVar("INVENTORY_API_URL"))?;
    if !raw_url.ends_with('/') {
        raw_url.push('/');
    }
    let base_url = Url::parse(&raw_url)?;

    let password = std::env::var("INVENTORY_API_PASSWORD")
        .map(SecretString::from)
        .map_err(|_| CheckError::MissingEnvVar("INVENTORY_API_PASSWORD"))?;

    tracing::info!(%base_url, "Authenticating against inventory backend...");
    let client = api::build_http_client();
    let (token, user) =
        api::auth::authenticate(&client, &base_url, email.as_str(), &password).await?;

    let remaining = token.expires_at - chrono::Utc::now().timestamp();
    tracing::info!(
        user = %user.email,
        name = %user.name,
        token_valid_secs = remaining,
        "Backend check succeeded"
    );
    Ok(())
}
