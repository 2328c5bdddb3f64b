//! # queuebuild Core
//!
//! Domain types, traits, and error definitions for queuebuild.
//! This crate has **no transport dependencies** — it defines the domain model
//! that the launcher and the CLI implement against.
//!
//! ## Design Philosophy
//!
//! The build server is a trait here; the HTTP implementation lives in
//! `queuebuild-launcher`. This enables:
//! - Testing the watcher with stub servers
//! - Clean dependency graph (all crates depend inward on core)

pub mod context;
pub mod endpoint;
pub mod error;
pub mod mode;
pub mod request;
pub mod response;
pub mod server;
pub mod status;

// Re-export key types at crate root for ergonomics
pub use context::BuildContext;
pub use endpoint::{BuildTarget, Credentials, Protocol, ServerEndpoint};
pub use error::{Error, LaunchError, Result};
pub use mode::{ConnectionMode, LauncherConfig};
pub use request::{BuildRequest, QueueBuildBody};
pub use response::{BuildStatus, QueueResponse};
pub use server::BuildServer;
pub use status::describe_status;
