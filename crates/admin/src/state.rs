//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::api::{ApiToken, InventoryClient, build_http_client};
use crate::config::AdminConfig;
use crate::movements::MovementWorkflow;

/// Application state shared across all handlers.
///
/// Cheap to clone; the inner data lives behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    http: reqwest::Client,
}

impl AppState {
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                http: build_http_client(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Build an inventory backend client bound to one session's token.
    ///
    /// Tokens are per admin session, so clients are constructed per request
    /// on top of the shared connection pool in `http`.
    #[must_use]
    pub fn inventory(&self, token: ApiToken) -> InventoryClient {
        InventoryClient::new(
            self.inner.http.clone(),
            self.inner.config.inventory_api_url.clone(),
            token,
        )
    }

    /// Build a movement workflow bound to one session's token.
    #[must_use]
    pub fn workflow(&self, token: ApiToken) -> MovementWorkflow {
        MovementWorkflow::new(self.inventory(token))
    }
}
