//! Plumcot Core - Shared types library.
//!
//! This crate provides common types used across all Plumcot Market
//! components:
//! - `client` - Gateway client and session bootstrap for the shop backend
//! - `cli` - Command-line shopper and admin tooling
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, credentials,
//!   identities, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
