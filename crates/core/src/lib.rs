//! Survived Core - Shared types library.
//!
//! This crate provides common types used across all Survived components:
//! - `server` - Check-in API server (streak engine + leaderboard)
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, phone numbers, and streak counters

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
