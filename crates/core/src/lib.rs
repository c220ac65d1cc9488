//! Bodega Core - Shared types library.
//!
//! This crate provides common types used across all Bodega components:
//! - `admin` - Administration panel for the inventory backend
//! - `cli` - Command-line tools for migrations and connectivity checks
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, quantities, and movement
//!   states

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
