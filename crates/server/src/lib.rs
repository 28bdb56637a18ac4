//! Orchard store backend library.
//!
//! This crate provides the store backend as a library, allowing the HTTP
//! surface and repositories to be tested and reused (the CLI uses the
//! repositories directly for seeding).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
