//! HTTP plumbing for the inventory backend client.
//!
//! All resource modules go through [`InventoryClient`]: it attaches the
//! bearer token, refuses to dispatch with an expired token, and decodes the
//! backend's error bodies into [`ApiError`].

use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use super::auth::ApiToken;
use super::{ApiError, flatten_error_body};

/// Default per-request timeout for backend calls.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Typed client for the inventory backend, bound to one session's token.
///
/// Cheap to construct per request: the underlying `reqwest::Client` is shared
/// application-wide (connection pool), while the token comes from the admin
/// session. The token's expiry is checked locally before every dispatch; an
/// expired token fails with [`ApiError::TokenExpired`] without sending
/// anything, and the error layer turns that into a forced logout.
#[derive(Debug, Clone)]
pub struct InventoryClient {
    http: reqwest::Client,
    base_url: Url,
    token: ApiToken,
}

/// Build the shared HTTP client used for all backend traffic.
///
/// # Panics
///
/// Panics if the HTTP client cannot be created. This should never happen
/// under normal circumstances as we use standard TLS configuration.
#[must_use]
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

impl InventoryClient {
    /// Create a client for one authenticated session.
    #[must_use]
    pub const fn new(http: reqwest::Client, base_url: Url, token: ApiToken) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    /// Resolve a relative resource path against the configured base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::InvalidEndpoint(path.to_string()))
    }

    /// Get the bearer token, failing locally if it has expired.
    fn bearer(&self) -> Result<String, ApiError> {
        if self.token.is_expired() {
            return Err(ApiError::TokenExpired);
        }
        Ok(self.token.access_token.expose_secret().to_string())
    }

    /// GET a resource and decode the JSON body.
    #[instrument(skip(self, query), fields(path = %path))]
    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let bearer = self.bearer()?;
        let response = self
            .http
            .get(self.endpoint(path)?)
            .query(query)
            .bearer_auth(bearer)
            .send()
            .await?;
        Self::decode(path, response).await
    }

    /// POST a JSON body and decode the JSON response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub(super) async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let bearer = self.bearer()?;
        let response = self
            .http
            .post(self.endpoint(path)?)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;
        Self::decode(path, response).await
    }

    /// PUT a JSON body and decode the JSON response.
    #[instrument(skip(self, body), fields(path = %path))]
    pub(super) async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let bearer = self.bearer()?;
        let response = self
            .http
            .put(self.endpoint(path)?)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;
        Self::decode(path, response).await
    }

    /// POST an action endpoint, ignoring any response body.
    #[instrument(skip(self, body), fields(path = %path))]
    pub(super) async fn post_action<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let bearer = self.bearer()?;
        let response = self
            .http
            .post(self.endpoint(path)?)
            .bearer_auth(bearer)
            .json(body)
            .send()
            .await?;
        Self::check_status(path, response).await
    }

    /// DELETE a resource.
    #[instrument(skip(self), fields(path = %path))]
    pub(super) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let bearer = self.bearer()?;
        let response = self
            .http
            .delete(self.endpoint(path)?)
            .bearer_auth(bearer)
            .send()
            .await?;
        Self::check_status(path, response).await
    }

    /// Decode a response body as `T`, or map the failure status.
    async fn decode<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        Err(Self::error_from(path, status, response).await)
    }

    /// Check the status of a bodyless operation.
    async fn check_status(path: &str, response: reqwest::Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from(path, status, response).await)
    }

    /// Map a non-2xx response to an [`ApiError`].
    ///
    /// 401 means the backend no longer accepts the token, which forces a
    /// logout the same way a local expiry does. Structured field errors are
    /// flattened into one display string.
    async fn error_from(path: &str, status: StatusCode, response: reqwest::Response) -> ApiError {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::TokenExpired;
        }
        if status == StatusCode::NOT_FOUND {
            return ApiError::NotFound(path.to_string());
        }

        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => flatten_error_body(&body)
                .unwrap_or_else(|| format!("unexpected response: {body}")),
            Err(_) => "no error detail provided".to_string(),
        };

        ApiError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn client_with_expiry(expires_at: i64) -> InventoryClient {
        InventoryClient::new(
            build_http_client(),
            Url::parse("https://inventory.example/api/").expect("valid url"),
            ApiToken {
                access_token: SecretString::from("token"),
                expires_at,
            },
        )
    }

    #[test]
    fn test_expired_token_fails_before_dispatch() {
        let client = client_with_expiry(chrono::Utc::now().timestamp() - 10);
        assert!(matches!(client.bearer(), Err(ApiError::TokenExpired)));
    }

    #[test]
    fn test_valid_token_exposed_for_dispatch() {
        let client = client_with_expiry(chrono::Utc::now().timestamp() + 3600);
        assert_eq!(client.bearer().expect("valid"), "token");
    }

    #[test]
    fn test_endpoint_join() {
        let client = client_with_expiry(chrono::Utc::now().timestamp() + 3600);
        let url = client
            .endpoint("inventory-movements/7/authorize/")
            .expect("joined");
        assert_eq!(
            url.as_str(),
            "https://inventory.example/api/inventory-movements/7/authorize/"
        );
    }
}
