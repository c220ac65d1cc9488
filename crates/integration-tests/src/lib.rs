//! Integration tests for Bodega Admin.
//!
//! The tests in `tests/` run the admin's API client and movement workflow
//! against [`MockBackend`], an in-process axum server that speaks the
//! inventory backend's REST contract. Every endpoint counts its hits, so the
//! tests can assert not only on outcomes but on *absence* of requests - the
//! local-validation and guard rules promise that invalid input never reaches
//! the network.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bodega-integration-tests
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use url::Url;

use bodega_admin::api::{ApiToken, InventoryClient, build_http_client};

/// Bearer token the mock accepts.
pub const TEST_TOKEN: &str = "test-token";
/// Credentials the mock's token endpoint accepts.
pub const TEST_EMAIL: &str = "admin@bodega.example";
pub const TEST_PASSWORD: &str = "s3cret-Bodega-9";

type SharedState = Arc<Mutex<BackendState>>;

#[derive(Default)]
struct BackendState {
    next_id: i32,
    movements: Vec<Value>,
    products: Vec<Value>,
    warehouses: Vec<Value>,
    hits: HashMap<&'static str, usize>,
}

impl BackendState {
    fn hit(&mut self, key: &'static str) {
        *self.hits.entry(key).or_insert(0) += 1;
    }

    fn find_mut(&mut self, id: i64) -> Option<&mut Value> {
        self.movements.iter_mut().find(|m| m["id"] == json!(id))
    }
}

/// In-process stand-in for the inventory backend.
pub struct MockBackend {
    /// Base URL the client should be pointed at (with trailing slash).
    pub base_url: Url,
    state: SharedState,
}

impl MockBackend {
    /// Bind an ephemeral port and start serving the backend contract.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound; tests cannot proceed then.
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(Mutex::new(BackendState {
            next_id: 1000,
            warehouses: vec![
                json!({"id": 1, "name": "Central", "is_active": true}),
                json!({"id": 2, "name": "North", "is_active": true}),
                json!({"id": 3, "name": "Closed", "is_active": false}),
            ],
            ..BackendState::default()
        }));

        let app = Router::new()
            .route("/auth/token/", post(auth_token))
            .route("/inventory-movements/", get(list_movements).post(create_movement))
            .route(
                "/inventory-movements/{id}/",
                get(get_movement).put(update_movement).delete(delete_movement),
            )
            .route("/inventory-movements/{id}/authorize/", post(authorize_movement))
            .route(
                "/inventory-movements/{id}/cancel_movement/",
                post(cancel_movement),
            )
            .route("/warehouses/", get(list_warehouses))
            .route("/products/", get(search_products))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        let base_url = Url::parse(&format!("http://{addr}/")).expect("mock url");
        Self { base_url, state }
    }

    /// Number of requests a given endpoint has served.
    ///
    /// Keys: `auth`, `list`, `get`, `create`, `update`, `delete`,
    /// `authorize`, `cancel`, `warehouses`, `products`.
    pub async fn hits(&self, key: &str) -> usize {
        self.state
            .lock()
            .await
            .hits
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Insert a movement verbatim (see [`pending_movement`] for a template).
    pub async fn seed(&self, movement: Value) {
        self.state.lock().await.movements.push(movement);
    }

    /// Insert a product available to the search endpoint.
    pub async fn seed_product(&self, id: i32, name: &str, sku: &str) {
        self.state.lock().await.products.push(json!({
            "id": id,
            "name": name,
            "sku": sku,
            "unit": "unit",
        }));
    }

    /// Snapshot of the stored movement list, as the backend would return it.
    pub async fn movements(&self) -> Vec<Value> {
        self.state.lock().await.movements.clone()
    }

    /// Client holding a token valid for one hour.
    pub fn client(&self) -> InventoryClient {
        self.client_with_expiry(chrono::Utc::now().timestamp() + 3600)
    }

    /// Client holding a token that already lapsed.
    pub fn expired_client(&self) -> InventoryClient {
        self.client_with_expiry(chrono::Utc::now().timestamp() - 10)
    }

    fn client_with_expiry(&self, expires_at: i64) -> InventoryClient {
        InventoryClient::new(
            build_http_client(),
            self.base_url.clone(),
            ApiToken {
                access_token: SecretString::from(TEST_TOKEN),
                expires_at,
            },
        )
    }
}

/// A pending movement with one detail line, in the backend's wire shape.
#[must_use]
pub fn pending_movement(id: i32) -> Value {
    json!({
        "id": id,
        "warehouse_id": 1,
        "warehouse_name": "Central",
        "type": "IN",
        "notes": null,
        "created_at": "2026-03-01T10:00:00Z",
        "created_by": TEST_EMAIL,
        "authorized": false,
        "is_cancelled": false,
        "can_authorize": true,
        "can_delete": true,
        "can_cancel": true,
        "details": [
            {
                "id": id * 10,
                "product_id": 7,
                "product_name": "Olive oil 1L",
                "quantity": "5",
                "lote": "L-2026-03",
                "expiration_date": "2027-03-01",
                "notes": null
            }
        ]
    })
}

/// An authorized movement: no longer deletable, still cancellable.
#[must_use]
pub fn authorized_movement(id: i32) -> Value {
    let mut movement = pending_movement(id);
    movement["authorized"] = json!(true);
    movement["authorized_by"] = json!("supervisor@bodega.example");
    movement["authorized_at"] = json!("2026-03-01T11:00:00Z");
    movement["can_authorize"] = json!(false);
    movement["can_delete"] = json!(false);
    movement["can_cancel"] = json!(true);
    movement
}

/// A cancelled movement: terminal, every capability off.
#[must_use]
pub fn cancelled_movement(id: i32) -> Value {
    let mut movement = pending_movement(id);
    movement["is_cancelled"] = json!(true);
    movement["cancellation_reason"] = json!("damaged stock");
    movement["cancelled_by"] = json!("supervisor@bodega.example");
    movement["cancelled_at"] = json!("2026-03-01T12:00:00Z");
    movement["can_authorize"] = json!(false);
    movement["can_delete"] = json!(false);
    movement["can_cancel"] = json!(false);
    movement
}

// ============================================================================
// Handlers
// ============================================================================

type Reply = (StatusCode, Json<Value>);

fn check_auth(headers: &HeaderMap) -> Result<(), Reply> {
    let expected = format!("Bearer {TEST_TOKEN}");
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid token"})),
        )),
    }
}

async fn auth_token(State(state): State<SharedState>, Json(body): Json<Value>) -> Reply {
    state.lock().await.hit("auth");
    if body["email"] == json!(TEST_EMAIL) && body["password"] == json!(TEST_PASSWORD) {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": TEST_TOKEN,
                "expires_in": 3600,
                "user": {"email": TEST_EMAIL, "name": "Admin"}
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid credentials"})),
        )
    }
}

async fn list_movements(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let mut state = state.lock().await;
    state.hit("list");
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }

    let movements: Vec<Value> = match query.get("product") {
        Some(product) => state
            .movements
            .iter()
            .filter(|m| {
                m["details"].as_array().is_some_and(|details| {
                    details.iter().any(|d| d["product_id"].to_string() == *product)
                })
            })
            .cloned()
            .collect(),
        None => state.movements.clone(),
    };

    // The list view omits nested details, like the real backend
    let without_details: Vec<Value> = movements
        .into_iter()
        .map(|mut m| {
            m.as_object_mut().expect("object").remove("details");
            m
        })
        .collect();

    (StatusCode::OK, Json(json!(without_details)))
}

async fn get_movement(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply {
    let mut state = state.lock().await;
    state.hit("get");
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }

    state.find_mut(id).map_or_else(
        || (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))),
        |m| (StatusCode::OK, Json(m.clone())),
    )
}

async fn create_movement(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = state.lock().await;
    state.hit("create");
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }

    // Field-level rejection in the backend's error shape
    if body["details"].as_array().is_none_or(Vec::is_empty) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"details": ["at least one line is required"]})),
        );
    }

    state.next_id += 1;
    let id = state.next_id;
    let movement = materialize(id, &body);
    state.movements.push(movement.clone());
    (StatusCode::CREATED, Json(movement))
}

async fn update_movement(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = state.lock().await;
    state.hit("update");
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }

    #[allow(clippy::cast_possible_truncation)]
    let replacement = materialize(id as i32, &body);
    match state.find_mut(id) {
        Some(movement) => {
            if movement["authorized"] == json!(true) || movement["is_cancelled"] == json!(true) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Only pending movements can be edited"})),
                );
            }
            *movement = replacement.clone();
            (StatusCode::OK, Json(replacement))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))),
    }
}

async fn delete_movement(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<StatusCode, Reply> {
    let mut state = state.lock().await;
    state.hit("delete");
    check_auth(&headers)?;

    let before = state.movements.len();
    state.movements.retain(|m| m["id"] != json!(id));
    if state.movements.len() == before {
        Err((StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))))
    } else {
        Ok(StatusCode::NO_CONTENT)
    }
}

async fn authorize_movement(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Reply {
    let mut state = state.lock().await;
    state.hit("authorize");
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }

    match state.find_mut(id) {
        Some(movement) => {
            if movement["can_authorize"] != json!(true) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Cannot authorize this movement"})),
                );
            }
            movement["authorized"] = json!(true);
            movement["authorized_by"] = json!(TEST_EMAIL);
            movement["authorized_at"] = json!("2026-03-02T08:00:00Z");
            movement["can_authorize"] = json!(false);
            movement["can_delete"] = json!(false);
            movement["can_cancel"] = json!(true);
            (StatusCode::OK, Json(movement.clone()))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))),
    }
}

async fn cancel_movement(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = state.lock().await;
    state.hit("cancel");
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }

    match state.find_mut(id) {
        Some(movement) => {
            if movement["can_cancel"] != json!(true) {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"detail": "Cannot cancel this movement"})),
                );
            }
            movement["is_cancelled"] = json!(true);
            movement["cancellation_reason"] = body["reason"].clone();
            movement["cancelled_by"] = json!(TEST_EMAIL);
            movement["cancelled_at"] = json!("2026-03-02T09:00:00Z");
            movement["can_authorize"] = json!(false);
            movement["can_delete"] = json!(false);
            movement["can_cancel"] = json!(false);
            (StatusCode::OK, Json(movement.clone()))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found"}))),
    }
}

async fn list_warehouses(State(state): State<SharedState>, headers: HeaderMap) -> Reply {
    let mut state = state.lock().await;
    state.hit("warehouses");
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }
    (StatusCode::OK, Json(json!(state.warehouses.clone())))
}

async fn search_products(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    let mut state = state.lock().await;
    state.hit("products");
    if let Err(denied) = check_auth(&headers) {
        return denied;
    }

    let term = query.get("search").cloned().unwrap_or_default().to_lowercase();
    let matches: Vec<Value> = state
        .products
        .iter()
        .filter(|p| {
            p["name"]
                .as_str()
                .is_some_and(|name| name.to_lowercase().contains(&term))
                || p["sku"]
                    .as_str()
                    .is_some_and(|sku| sku.to_lowercase().contains(&term))
        })
        .cloned()
        .collect();
    (StatusCode::OK, Json(json!(matches)))
}

/// Build a stored movement from a create/update body, computing the flags
/// the way the backend does for a fresh pending movement.
fn materialize(id: i32, body: &Value) -> Value {
    let details: Vec<Value> = body["details"]
        .as_array()
        .cloned()
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, mut d)| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let line_id = i64::from(id) * 10 + i as i64;
            d["id"] = json!(line_id);
            if d.get("product_name").is_none() {
                d["product_name"] = json!(null);
            }
            d
        })
        .collect();

    json!({
        "id": id,
        "warehouse_id": body["warehouse_id"],
        "warehouse_name": null,
        "type": body["type"],
        "notes": body.get("notes").cloned().unwrap_or(json!(null)),
        "created_at": "2026-03-02T07:00:00Z",
        "created_by": TEST_EMAIL,
        "authorized": false,
        "is_cancelled": false,
        "can_authorize": true,
        "can_delete": true,
        "can_cancel": true,
        "details": details
    })
}
