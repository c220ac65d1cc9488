//! Core types for Bodega.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod movement;
pub mod quantity;

pub use email::{Email, EmailError};
pub use id::*;
pub use movement::{MovementStatus, MovementType, MovementTypeParseError};
pub use quantity::{Quantity, QuantityError};
