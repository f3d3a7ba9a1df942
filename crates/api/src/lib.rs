//! Galaxy SQL tour HTTP server library.
//!
//! Exposes the building blocks (config, state, routes, views) so the
//! integration tests and the binary entrypoint can both access them.

pub mod config;
pub mod routes;
pub mod state;
pub mod views;
