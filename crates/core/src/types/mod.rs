//! Core types for Glowella.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod concern;
pub mod id;
pub mod money;

pub use concern::SkinConcern;
pub use id::*;
pub use money::Naira;
