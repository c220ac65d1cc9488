//! Movement lifecycle controller.
//!
//! Mediates between the movement screens and the inventory backend:
//! - [`draft`] - form state for composing a movement and its local validation
//! - [`lifecycle`] - pure transition guards over the backend's state flags
//! - [`workflow`] - request orchestration with post-mutation list refresh
//!
//! The split keeps every transition rule testable without HTTP: validation
//! and guards are pure functions, and only [`workflow`] touches the client.
//!
//! # State machine
//!
//! ```text
//! Pending ──authorize──▶ Authorized ──cancel──▶ Cancelled (terminal)
//!    │ │
//!    │ └──────cancel─────────────────────────▶ Cancelled (terminal)
//!    └────────delete────▶ (removed)
//! ```
//!
//! Authorized movements may not be deleted - the user is pointed at
//! cancellation instead. All guards additionally honor the backend-computed
//! capability flags, which are never recomputed locally.

pub mod draft;
pub mod lifecycle;
pub mod workflow;

pub use draft::{DraftLine, MovementDraft, ValidationError, ValidationErrors};
pub use lifecycle::TransitionDenied;
pub use workflow::{MovementScreen, MovementWorkflow, WorkflowError};
