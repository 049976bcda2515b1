//! td - team task desk
//!
//! This library provides the core functionality for the td CLI tool,
//! a small-team work tracker with file-backed storage.
//!
//! # Core Concepts
//!
//! - **Accounts**: User and admin identities with hashed credentials
//! - **Projects**: Admin-managed containers for work, owned by one account
//! - **Tasks**: Categorized work items with a pending/completed/closed lifecycle
//! - **Sessions**: Explicit login state passed into every gated operation
//! - **Repository**: Row-keyed storage contract with collision-free id allocation
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.td.toml`
//! - `error`: Error types and result aliases
//! - `account`: Account records and the admin directory
//! - `project`: Project records and ownership management
//! - `task`: Task records and the lifecycle engine
//! - `ident`: Task identifier scheme (`PPC-101` style)
//! - `auth`: Password hashing and credential verification
//! - `session`: Login state and authorization checks
//! - `view`: Read-only projections (filters, tables)
//! - `store`: Repository trait, JSON file backend, in-memory backend
//! - `lock`: File locking and atomic operations for concurrency safety
//! - `output`: Human and JSON output envelopes

pub mod account;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod ident;
pub mod lock;
pub mod output;
pub mod project;
pub mod session;
pub mod store;
pub mod task;
pub mod view;

pub use error::{Error, Result};
