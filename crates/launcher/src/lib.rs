//! Build queueing for queuebuild.
//!
//! [`BuildLauncher`] implements the `queuebuild_core::BuildServer` trait over
//! HTTP; [`UriResolver`] turns its configuration into request URIs and
//! [`BuildWatcher`] polls queued builds until they complete.

pub mod launcher;
pub mod uri;
pub mod watch;

pub use launcher::BuildLauncher;
pub use uri::{PartialUri, Placeholder, UriResolver};
pub use watch::{BuildWatcher, PollSchedule};
