//! HTTP middleware stack for the admin panel.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//!
//! Authentication is enforced per-handler via the extractors in [`auth`].

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, RequireApiSession, clear_session, establish_session};
pub use session::create_session_layer;
