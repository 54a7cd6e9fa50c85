//! Staybook Core - Shared types library.
//!
//! This crate provides common types used across all Staybook components:
//! - `backoffice` - Administrative back-office over the Stay API
//! - `cli` - Command-line tools for scripted administration
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
