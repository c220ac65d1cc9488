//! Domain models for the admin panel.

pub mod session;

pub use session::{CurrentAdmin, SessionToken, keys as session_keys};
