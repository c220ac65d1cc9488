//! Pure transition guards for the movement state machine.
//!
//! Every guard runs before any request is dispatched. The backend-computed
//! capability flags are treated as authoritative; the one rule enforced on
//! top of them is that an authorized movement can never be deleted, only
//! cancelled.

use bodega_core::MovementStatus;

use crate::api::Movement;

/// A transition rejected locally, before contacting the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionDenied {
    /// The backend did not grant authorize permission for this movement.
    #[error("you are not allowed to authorize this movement")]
    AuthorizeNotPermitted,

    /// The backend did not grant cancel permission for this movement.
    #[error("you are not allowed to cancel this movement")]
    CancelNotPermitted,

    /// Deleting an authorized movement is never allowed.
    #[error("an authorized movement cannot be deleted - cancel it instead")]
    DeleteAuthorized,

    /// The backend did not grant delete permission for this movement.
    #[error("you are not allowed to delete this movement")]
    DeleteNotPermitted,

    /// A cancellation must carry a non-empty reason.
    #[error("a cancellation reason is required")]
    ReasonRequired,

    /// Only pending, deletable movements may be edited.
    #[error("this movement can no longer be edited")]
    NotEditable,
}

/// Guard the authorize transition.
///
/// # Errors
///
/// Returns [`TransitionDenied::AuthorizeNotPermitted`] when the backend's
/// `can_authorize` flag is false.
pub const fn ensure_can_authorize(movement: &Movement) -> Result<(), TransitionDenied> {
    if movement.can_authorize {
        Ok(())
    } else {
        Err(TransitionDenied::AuthorizeNotPermitted)
    }
}

/// Guard the cancel transition and normalize the reason.
///
/// Returns the trimmed reason on success.
///
/// # Errors
///
/// Returns [`TransitionDenied::ReasonRequired`] for an empty or
/// whitespace-only reason, or [`TransitionDenied::CancelNotPermitted`] when
/// the backend's `can_cancel` flag is false.
pub fn ensure_can_cancel<'a>(
    movement: &Movement,
    reason: &'a str,
) -> Result<&'a str, TransitionDenied> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(TransitionDenied::ReasonRequired);
    }
    if !movement.can_cancel {
        return Err(TransitionDenied::CancelNotPermitted);
    }
    Ok(reason)
}

/// Guard the delete transition.
///
/// An authorized movement is rejected regardless of what `can_delete` says;
/// the stock effect is already committed and must be undone by cancellation.
///
/// # Errors
///
/// Returns [`TransitionDenied::DeleteAuthorized`] or
/// [`TransitionDenied::DeleteNotPermitted`].
pub const fn ensure_can_delete(movement: &Movement) -> Result<(), TransitionDenied> {
    if movement.authorized {
        return Err(TransitionDenied::DeleteAuthorized);
    }
    if !movement.can_delete {
        return Err(TransitionDenied::DeleteNotPermitted);
    }
    Ok(())
}

/// Whether the edit form may be opened for this movement.
///
/// Edit affordances mirror deletion: only a pending movement the caller
/// could also delete is editable.
#[must_use]
pub fn is_editable(movement: &Movement) -> bool {
    movement.status() == MovementStatus::Pending && movement.can_delete
}

/// Guard the update operation.
///
/// # Errors
///
/// Returns [`TransitionDenied::NotEditable`] when the movement has left the
/// pending state or the caller may not modify it.
pub fn ensure_editable(movement: &Movement) -> Result<(), TransitionDenied> {
    if is_editable(movement) {
        Ok(())
    } else {
        Err(TransitionDenied::NotEditable)
    }
}
