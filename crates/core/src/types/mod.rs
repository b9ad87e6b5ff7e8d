//! Core types for Survived.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod counters;
pub mod id;
pub mod phone;

pub use counters::StreakCounters;
pub use id::*;
pub use phone::{Phone, PhoneError};
