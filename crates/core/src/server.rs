//! BuildServer trait — the abstraction over a remote build server.
//!
//! A BuildServer knows how to queue a build definition and how to fetch the
//! current state of a queued build. The watcher polls through this trait so
//! it never depends on the HTTP transport directly.

use async_trait::async_trait;

use crate::error::LaunchError;
use crate::request::BuildRequest;
use crate::response::QueueResponse;

/// The core BuildServer trait.
#[async_trait]
pub trait BuildServer: Send + Sync {
    /// A human-readable name for this server (usually its base URL).
    fn name(&self) -> &str;

    /// Queue a build. `None` means the server accepted it with an empty body.
    async fn queue(&self, request: BuildRequest) -> Result<Option<QueueResponse>, LaunchError>;

    /// Fetch the current record of a queued build.
    async fn get_build(&self, build_id: u64) -> Result<Option<QueueResponse>, LaunchError>;

    /// Queue a build and fail if the server did not say which build it created.
    async fn queue_expecting_id(
        &self,
        request: BuildRequest,
    ) -> Result<(u64, QueueResponse), LaunchError> {
        let response = self.queue(request).await?.unwrap_or_default();
        match response.id {
            Some(id) => Ok((id, response)),
            None => Err(LaunchError::Deserialization {
                message: format!("{} did not return a build id", self.name()),
                body: String::new(),
            }),
        }
    }
}
