//! Plumcot Client - Gateway client and session bootstrap.
//!
//! This crate is the storefront's side of the wire: it builds and issues
//! every HTTP call against the shop backend and keeps the two client-side
//! credential lifecycles healthy.
//!
//! # Architecture
//!
//! - [`gateway::GatewayClient`] translates logical operations into transport
//!   calls: each call names one [`policy::CallCategory`], which fixes its
//!   base path, timeout, and whether the administrator credential is
//!   attached. Failures surface as [`error::GatewayError`]; nothing is
//!   retried internally.
//! - [`session::ShopperSession`] resolves "who is the current shopper" at
//!   startup, provisioning a fresh guest account when the remembered
//!   identity no longer exists server-side.
//! - [`storage`] holds the only persisted client state: a durable store for
//!   the remembered shopper and a session-scoped store for the admin
//!   credential.
//!
//! # Concurrency
//!
//! Calls are independent and may be in flight concurrently. The credential
//! and identity slots are guarded for memory safety only; concurrent
//! mutation is last-write-wins.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod policy;
pub mod session;
pub mod storage;

pub use config::{ConfigError, GatewayConfig};
pub use error::GatewayError;
pub use gateway::GatewayClient;
pub use gateway::multipart::{Attachment, ChatAttachments};
pub use policy::CallCategory;
pub use session::{SessionState, ShopperDirectory, ShopperSession};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
