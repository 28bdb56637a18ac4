//! Orchard Core - Shared types library.
//!
//! This crate provides common types used across all Orchard components:
//! - `server` - The store backend (catalog, cart, wishlist, checkout)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and status enums
//! - [`slug`] - URL slug derivation for catalog entities

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod slug;
pub mod types;

pub use slug::slugify;
pub use types::*;
