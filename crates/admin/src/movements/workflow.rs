//! Request orchestration for the movement screens.
//!
//! Every mutating operation follows the same sequence: validate locally,
//! guard the transition against the movement's authoritative flags, call the
//! backend, then re-fetch the whole list. There is no optimistic patching -
//! the backend is the single source of truth and local derived state is
//! discarded after each mutation.

use tracing::instrument;

use bodega_core::{MovementId, MovementStatus, ProductId};

use crate::api::{ApiError, InventoryClient, Movement};

use super::draft::{MovementDraft, ValidationErrors};
use super::lifecycle::{
    TransitionDenied, ensure_can_authorize, ensure_can_cancel, ensure_can_delete, ensure_editable,
};

/// Why a screen operation failed.
///
/// The three layers stay distinct so the routes can render each one
/// appropriately: validation inline next to the fields, denials as a flash
/// message, backend errors as a retryable banner (with token expiry forcing
/// a logout further up).
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Local validation failed; no request was sent.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// A transition guard rejected the action; no mutating request was sent.
    #[error("{0}")]
    Denied(#[from] TransitionDenied),

    /// The backend rejected the call; local state is unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Per-screen copy of the movement list.
///
/// Each screen owns its own copy, fetched independently; there is no
/// cross-screen cache. The list order is whatever the backend returned.
#[derive(Debug, Clone, Default)]
pub struct MovementScreen {
    /// Optional product restriction applied to every fetch.
    pub filter: Option<ProductId>,
    /// Current list contents, replaced wholesale on every refresh.
    pub movements: Vec<Movement>,
}

impl MovementScreen {
    /// Create an empty screen, optionally filtered by product.
    #[must_use]
    pub const fn new(filter: Option<ProductId>) -> Self {
        Self {
            filter,
            movements: Vec::new(),
        }
    }

    /// Look up a movement in the current list.
    #[must_use]
    pub fn find(&self, id: MovementId) -> Option<&Movement> {
        self.movements.iter().find(|m| m.id == id)
    }

    /// Count movements currently in the given state.
    #[must_use]
    pub fn count_in(&self, status: MovementStatus) -> usize {
        self.movements
            .iter()
            .filter(|m| m.status() == status)
            .count()
    }
}

/// Orchestrates movement operations for one authenticated session.
#[derive(Debug, Clone)]
pub struct MovementWorkflow {
    client: InventoryClient,
}

impl MovementWorkflow {
    /// Create a workflow over an authenticated client.
    #[must_use]
    pub const fn new(client: InventoryClient) -> Self {
        Self { client }
    }

    /// Access the underlying client (warehouse and product lookups).
    #[must_use]
    pub const fn client(&self) -> &InventoryClient {
        &self.client
    }

    /// Replace the screen's list with a fresh fetch.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on fetch failure; the previous list is kept so a
    /// failed refresh degrades, not corrupts, the view.
    #[instrument(skip(self, screen), fields(filter = ?screen.filter))]
    pub async fn refresh(&self, screen: &mut MovementScreen) -> Result<(), ApiError> {
        screen.movements = self.client.list_movements(screen.filter).await?;
        Ok(())
    }

    /// Fetch one movement with nested details for the read-only view.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; a failure here renders an error state in the
    /// detail view without touching any list.
    pub async fn fetch_details(&self, id: MovementId) -> Result<Movement, ApiError> {
        self.client.movement(id).await
    }

    /// Validate and create a movement, then refresh the list.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Validation`] without any network call when
    /// the draft is invalid; otherwise propagates backend errors.
    #[instrument(skip(self, screen, draft))]
    pub async fn create(
        &self,
        screen: &mut MovementScreen,
        draft: &MovementDraft,
    ) -> Result<Movement, WorkflowError> {
        let body = draft.validate()?;
        let created = self.client.create_movement(&body).await?;
        tracing::info!(movement_id = %created.id, "movement created");
        self.refresh(screen).await?;
        Ok(created)
    }

    /// Validate and replace a pending movement, then refresh the list.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Validation`] for an invalid draft,
    /// [`WorkflowError::Denied`] when the movement is no longer editable,
    /// or the backend's rejection.
    #[instrument(skip(self, screen, draft), fields(movement_id = %id))]
    pub async fn update(
        &self,
        screen: &mut MovementScreen,
        id: MovementId,
        draft: &MovementDraft,
    ) -> Result<Movement, WorkflowError> {
        let body = draft.validate()?;
        let movement = self.current(screen, id).await?;
        ensure_editable(&movement)?;
        let updated = self.client.update_movement(id, &body).await?;
        tracing::info!(movement_id = %id, "movement updated");
        self.refresh(screen).await?;
        Ok(updated)
    }

    /// Authorize a movement, then refresh the list.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Denied`] without any mutating request when
    /// the backend's `can_authorize` flag is false.
    #[instrument(skip(self, screen), fields(movement_id = %id))]
    pub async fn authorize(
        &self,
        screen: &mut MovementScreen,
        id: MovementId,
    ) -> Result<(), WorkflowError> {
        let movement = self.current(screen, id).await?;
        ensure_can_authorize(&movement)?;
        self.client.authorize_movement(id).await?;
        tracing::info!(movement_id = %id, "movement authorized");
        self.refresh(screen).await?;
        Ok(())
    }

    /// Cancel a movement with a reason, then refresh the list.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Denied`] without any request at all for an
    /// empty reason, or without any mutating request when the backend's
    /// `can_cancel` flag is false.
    #[instrument(skip(self, screen, reason), fields(movement_id = %id))]
    pub async fn cancel(
        &self,
        screen: &mut MovementScreen,
        id: MovementId,
        reason: &str,
    ) -> Result<(), WorkflowError> {
        // A blank reason needs nothing from the backend, not even the
        // movement's flags, so it is rejected before any fetch.
        if reason.trim().is_empty() {
            return Err(TransitionDenied::ReasonRequired.into());
        }
        let movement = self.current(screen, id).await?;
        let reason = ensure_can_cancel(&movement, reason)?;
        self.client.cancel_movement(id, reason).await?;
        tracing::info!(movement_id = %id, "movement cancelled");
        self.refresh(screen).await?;
        Ok(())
    }

    /// Delete a pending movement, then refresh the list.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Denied`] without any mutating request when
    /// the movement is authorized (cancel instead) or `can_delete` is false.
    #[instrument(skip(self, screen), fields(movement_id = %id))]
    pub async fn delete(
        &self,
        screen: &mut MovementScreen,
        id: MovementId,
    ) -> Result<(), WorkflowError> {
        let movement = self.current(screen, id).await?;
        ensure_can_delete(&movement)?;
        self.client.delete_movement(id).await?;
        tracing::info!(movement_id = %id, "movement deleted");
        self.refresh(screen).await?;
        Ok(())
    }

    /// The movement the guards must inspect: the screen's copy when present,
    /// otherwise a fresh fetch (a read, never a mutation).
    async fn current(
        &self,
        screen: &MovementScreen,
        id: MovementId,
    ) -> Result<Movement, ApiError> {
        if let Some(movement) = screen.find(id) {
            return Ok(movement.clone());
        }
        self.client.movement(id).await
    }
}
