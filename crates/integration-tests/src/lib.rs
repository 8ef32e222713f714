//! Integration tests for Plumcot Market.
//!
//! These tests exercise the client crates together without a live backend:
//! the endpoint policy, the admin-credential lifecycle through the shared
//! session store, and the session bootstrap through a stub user directory.
//!
//! # Test Categories
//!
//! - `endpoint_policy` - Category table checks
//! - `admin_credential` - Credential derivation, persistence, restore
//! - `session_bootstrap` - Identity resolution and self-healing
//!
//! Shared fixtures live here.

use chrono::NaiveDateTime;
use plumcot_client::models::UserProfile;
use plumcot_core::{Email, UserId};

/// A minimal user record for directory stubs.
///
/// # Panics
///
/// Panics if the fixture email is rejected, which would be a bug in
/// `Email::parse`.
#[must_use]
pub fn user_profile(id: i64, username: &str) -> UserProfile {
    UserProfile {
        id: UserId::new(id),
        username: username.to_owned(),
        email: Email::parse(&format!("{username}@example.com")).expect("fixture email is valid"),
        full_name: None,
        phone: None,
        address: None,
        created_at: NaiveDateTime::default(),
        updated_at: NaiveDateTime::default(),
    }
}
