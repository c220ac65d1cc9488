//! Bodega Admin library.
//!
//! This crate provides the admin panel functionality as a library,
//! allowing it to be tested and reused by the CLI and integration tests.
//!
//! The panel is a server-rendered front-end over the inventory backend
//! API: it authenticates against the backend, drives the movement
//! lifecycle (create, authorize, cancel, delete), and stores local-only
//! conveniences (named form drafts) in its own `PostgreSQL` schema.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod movements;
pub mod routes;
pub mod state;
