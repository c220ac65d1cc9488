//! List semantics: wholesale refresh, stable ordering, product filter.

use bodega_core::{MovementId, ProductId};
use bodega_integration_tests::{MockBackend, pending_movement};

use bodega_admin::movements::{MovementScreen, MovementWorkflow};

#[tokio::test]
async fn refresh_replaces_the_list_wholesale() {
    let backend = MockBackend::start().await;
    backend.seed(pending_movement(1)).await;

    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");
    assert_eq!(screen.movements.len(), 1);

    // The backend changes underneath; the next refresh reflects it fully
    backend.seed(pending_movement(2)).await;
    workflow.refresh(&mut screen).await.expect("refresh");
    assert_eq!(screen.movements.len(), 2);
    assert_eq!(backend.hits("list").await, 2);
}

#[tokio::test]
async fn list_preserves_backend_order() {
    let backend = MockBackend::start().await;
    for id in [31, 12, 25] {
        backend.seed(pending_movement(id)).await;
    }

    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");

    let ids: Vec<i32> = screen.movements.iter().map(|m| m.id.as_i32()).collect();
    assert_eq!(ids, vec![31, 12, 25]);
}

#[tokio::test]
async fn product_filter_restricts_every_fetch() {
    let backend = MockBackend::start().await;
    backend.seed(pending_movement(1)).await;

    let mut other = pending_movement(2);
    other["details"][0]["product_id"] = serde_json::json!(99);
    backend.seed(other).await;

    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(Some(ProductId::new(7)));
    workflow.refresh(&mut screen).await.expect("refresh");

    assert_eq!(screen.movements.len(), 1);
    assert!(screen.find(MovementId::new(1)).is_some());
    assert!(screen.find(MovementId::new(2)).is_none());
}

#[tokio::test]
async fn detail_fetch_includes_lines_the_list_omits() {
    let backend = MockBackend::start().await;
    backend.seed(pending_movement(1)).await;

    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");

    // List rows come without nested details
    let row = screen.find(MovementId::new(1)).expect("listed");
    assert!(row.details.is_empty());

    // The detail fetch carries them
    let full = workflow
        .fetch_details(MovementId::new(1))
        .await
        .expect("detail fetch");
    assert_eq!(full.details.len(), 1);
    assert_eq!(full.details[0].product_id, ProductId::new(7));
}

#[tokio::test]
async fn warehouses_load_for_the_form() {
    let backend = MockBackend::start().await;
    let client = backend.client();

    let warehouses = client.list_warehouses().await.expect("warehouses");
    assert_eq!(warehouses.len(), 3);
    assert!(warehouses.iter().any(|w| w.name == "Central" && w.is_active));
    assert!(warehouses.iter().any(|w| w.name == "Closed" && !w.is_active));
}
