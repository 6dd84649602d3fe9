//! HTTP query API for the cafe finder.
//!
//! This crate provides an Axum HTTP server with a single endpoint:
//!
//! - `GET /cafe?city=<city>&count=<n>&search=<text>` -- venues of a city,
//!   optionally filtered by a case-insensitive name substring and limited
//!   to the first `n` matches, as a comma-separated plain-text body.
//!
//! # Architecture
//!
//! The handler reads from an immutable [`Catalog`] shared through
//! [`AppState`]. The catalog is built once by the caller and injected into
//! [`build_router`], so tests can serve any catalog they like. Nothing is
//! written after startup, so requests never take a lock.
//!
//! [`Catalog`]: cafe_core::Catalog

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{serve_listener, shutdown_signal, start_server, ServerConfig, ServerError};
pub use state::AppState;
