//! Token handling tests: local expiry checks, backend 401s, and the login
//! round trip.

use secrecy::SecretString;

use bodega_admin::api::{self, ApiError, ApiToken, InventoryClient, build_http_client};
use bodega_integration_tests::{MockBackend, TEST_EMAIL, TEST_PASSWORD, pending_movement};

#[tokio::test]
async fn expired_token_fails_before_any_request() {
    let backend = MockBackend::start().await;
    backend.seed(pending_movement(1)).await;

    let client = backend.expired_client();
    let err = client
        .list_movements(None)
        .await
        .expect_err("expired token rejected locally");

    assert!(matches!(err, ApiError::TokenExpired));
    assert!(err.is_auth_expiry());
    // The check happens before dispatch, so the backend saw nothing
    assert_eq!(backend.hits("list").await, 0);
}

#[tokio::test]
async fn backend_401_maps_to_token_expired() {
    let backend = MockBackend::start().await;
    backend.seed(pending_movement(1)).await;

    let client = InventoryClient::new(
        build_http_client(),
        backend.base_url.clone(),
        ApiToken {
            access_token: SecretString::from("revoked-token"),
            expires_at: chrono::Utc::now().timestamp() + 3600,
        },
    );

    let err = client
        .list_movements(None)
        .await
        .expect_err("revoked token rejected by backend");

    assert!(matches!(err, ApiError::TokenExpired));
    assert_eq!(backend.hits("list").await, 1);
}

#[tokio::test]
async fn login_returns_token_and_identity() {
    let backend = MockBackend::start().await;
    let http = build_http_client();

    let (token, user) = api::auth::authenticate(
        &http,
        &backend.base_url,
        TEST_EMAIL,
        &SecretString::from(TEST_PASSWORD),
    )
    .await
    .expect("valid credentials accepted");

    assert!(!token.is_expired());
    assert_eq!(user.email, TEST_EMAIL);
    assert_eq!(user.name, "Admin");
}

#[tokio::test]
async fn login_with_bad_password_is_rejected_with_detail() {
    let backend = MockBackend::start().await;
    let http = build_http_client();

    let err = api::auth::authenticate(
        &http,
        &backend.base_url,
        TEST_EMAIL,
        &SecretString::from("wrong"),
    )
    .await
    .expect_err("bad credentials rejected");

    match err {
        ApiError::AuthenticationFailed(message) => {
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("unexpected error: {other}"),
    }
}
