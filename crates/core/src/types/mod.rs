//! Core types for Plumcot Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod email;
pub mod id;
pub mod identity;
pub mod status;

pub use credential::AdminCredential;
pub use email::{Email, EmailError};
pub use id::*;
pub use identity::{DEFAULT_DISPLAY_NAME, ShopperIdentity};
pub use status::*;
