//! Glowella Core - Shared types and pure storefront logic.
//!
//! This crate provides the domain types and computations used across all
//! Glowella components:
//! - `storefront` - Public-facing e-commerce site
//! - `admin` - Internal administration panel
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no sessions. Everything here operates on already-fetched
//! in-memory data; the remote Commerce API remains the authority for all of
//! it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, and skin concerns
//! - [`catalog`] - Product type plus concern/search/category filters
//! - [`pricing`] - Discount rules and the discount calculator
//! - [`bestsellers`] - Best-seller aggregation over daily sale records
//! - [`cart`] - Session cart state and arithmetic

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bestsellers;
pub mod cart;
pub mod catalog;
pub mod pricing;
pub mod types;

pub use types::*;
