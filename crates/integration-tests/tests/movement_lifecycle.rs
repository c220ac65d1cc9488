//! End-to-end movement lifecycle tests against the mock backend.
//!
//! Each mutation is checked from both sides: the outcome in the refreshed
//! list, and the request counters proving that guarded or invalid actions
//! never produced a network call.

use serde_json::json;

use bodega_admin::movements::{
    DraftLine, MovementDraft, MovementScreen, MovementWorkflow, TransitionDenied, WorkflowError,
};
use bodega_core::{MovementId, MovementStatus};
use bodega_integration_tests::{MockBackend, authorized_movement, cancelled_movement, pending_movement};

fn valid_draft() -> MovementDraft {
    MovementDraft {
        warehouse_id: "1".to_string(),
        movement_type: "IN".to_string(),
        notes: "weekly restock".to_string(),
        lines: vec![DraftLine {
            product_id: "7".to_string(),
            product_name: "Olive oil 1L".to_string(),
            quantity: "5".to_string(),
            lot: "L-2026-03".to_string(),
            expiration_date: "2027-03-01".to_string(),
            notes: String::new(),
        }],
    }
}

#[tokio::test]
async fn create_refreshes_list_with_backend_copy() {
    let backend = MockBackend::start().await;
    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);

    let created = workflow
        .create(&mut screen, &valid_draft())
        .await
        .expect("create succeeds");

    assert_eq!(created.status(), MovementStatus::Pending);
    assert_eq!(backend.hits("create").await, 1);
    // The list was re-fetched after the mutation, not patched locally
    assert_eq!(backend.hits("list").await, 1);
    assert!(screen.find(created.id).is_some());
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_network() {
    let backend = MockBackend::start().await;
    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);

    let mut draft = valid_draft();
    draft.warehouse_id = String::new();
    draft.lines[0].quantity = "-2".to_string();

    let err = workflow
        .create(&mut screen, &draft)
        .await
        .expect_err("validation fails");

    assert!(matches!(err, WorkflowError::Validation(_)));
    assert_eq!(backend.hits("create").await, 0);
    assert_eq!(backend.hits("list").await, 0);
}

#[tokio::test]
async fn authorize_transitions_pending_to_authorized() {
    let backend = MockBackend::start().await;
    backend.seed(pending_movement(1)).await;
    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");

    workflow
        .authorize(&mut screen, MovementId::new(1))
        .await
        .expect("authorize succeeds");

    let movement = screen.find(MovementId::new(1)).expect("still listed");
    assert_eq!(movement.status(), MovementStatus::Authorized);
    assert!(!movement.can_authorize);
    assert!(!movement.can_delete);
    assert!(movement.can_cancel);
}

#[tokio::test]
async fn authorize_denied_by_flag_sends_nothing() {
    let backend = MockBackend::start().await;
    let mut movement = pending_movement(2);
    movement["can_authorize"] = json!(false);
    backend.seed(movement).await;

    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");

    let err = workflow
        .authorize(&mut screen, MovementId::new(2))
        .await
        .expect_err("guard denies");

    assert!(matches!(
        err,
        WorkflowError::Denied(TransitionDenied::AuthorizeNotPermitted)
    ));
    assert_eq!(backend.hits("authorize").await, 0);
}

#[tokio::test]
async fn cancel_requires_a_reason() {
    let backend = MockBackend::start().await;
    backend.seed(authorized_movement(3)).await;
    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");

    let err = workflow
        .cancel(&mut screen, MovementId::new(3), "   ")
        .await
        .expect_err("blank reason rejected");

    assert!(matches!(
        err,
        WorkflowError::Denied(TransitionDenied::ReasonRequired)
    ));
    assert_eq!(backend.hits("cancel").await, 0);
}

#[tokio::test]
async fn blank_reason_cancel_sends_no_request_at_all() {
    let backend = MockBackend::start().await;
    backend.seed(authorized_movement(9)).await;
    let workflow = MovementWorkflow::new(backend.client());
    // Fresh screen, as the route handlers build one per request; the
    // movement is not in the local list, yet a blank reason must still be
    // rejected without even fetching it.
    let mut screen = MovementScreen::new(None);

    let err = workflow
        .cancel(&mut screen, MovementId::new(9), "   ")
        .await
        .expect_err("blank reason rejected");

    assert!(matches!(
        err,
        WorkflowError::Denied(TransitionDenied::ReasonRequired)
    ));
    assert_eq!(backend.hits("get").await, 0);
    assert_eq!(backend.hits("cancel").await, 0);
}

#[tokio::test]
async fn cancel_with_reason_is_terminal() {
    let backend = MockBackend::start().await;
    backend.seed(authorized_movement(4)).await;
    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");

    workflow
        .cancel(&mut screen, MovementId::new(4), "damaged in transit")
        .await
        .expect("cancel succeeds");

    let movement = screen.find(MovementId::new(4)).expect("still listed");
    assert_eq!(movement.status(), MovementStatus::Cancelled);
    assert!(!movement.can_authorize);
    assert!(!movement.can_cancel);
    assert!(!movement.can_delete);

    // Cancellation wins in the derived state even alongside authorization
    assert!(movement.authorized);
    assert!(movement.is_cancelled);
}

#[tokio::test]
async fn delete_blocked_for_authorized_movement() {
    let backend = MockBackend::start().await;
    // Even with a permissive flag, an authorized movement must not be deleted
    let mut movement = authorized_movement(5);
    movement["can_delete"] = json!(true);
    backend.seed(movement).await;

    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");

    let err = workflow
        .delete(&mut screen, MovementId::new(5))
        .await
        .expect_err("delete denied");

    assert!(matches!(
        err,
        WorkflowError::Denied(TransitionDenied::DeleteAuthorized)
    ));
    assert_eq!(backend.hits("delete").await, 0);
    assert_eq!(backend.movements().await.len(), 1);
}

#[tokio::test]
async fn delete_pending_removes_from_list() {
    let backend = MockBackend::start().await;
    backend.seed(pending_movement(6)).await;
    backend.seed(pending_movement(7)).await;

    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");

    workflow
        .delete(&mut screen, MovementId::new(6))
        .await
        .expect("delete succeeds");

    assert!(screen.find(MovementId::new(6)).is_none());
    assert!(screen.find(MovementId::new(7)).is_some());
    assert_eq!(backend.hits("delete").await, 1);
}

#[tokio::test]
async fn update_denied_once_no_longer_pending() {
    let backend = MockBackend::start().await;
    backend.seed(cancelled_movement(8)).await;
    let workflow = MovementWorkflow::new(backend.client());
    let mut screen = MovementScreen::new(None);
    workflow.refresh(&mut screen).await.expect("refresh");

    let err = workflow
        .update(&mut screen, MovementId::new(8), &valid_draft())
        .await
        .expect_err("edit denied");

    assert!(matches!(
        err,
        WorkflowError::Denied(TransitionDenied::NotEditable)
    ));
    assert_eq!(backend.hits("update").await, 0);
}
