//! HTTP build launcher.
//!
//! Queues builds with `POST .../_apis/build/builds` and fetches single
//! builds with `GET .../_apis/build/builds/{id}`. One request per call,
//! no retries: every failure is handed back to the caller.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use queuebuild_core::error::LaunchError;
use queuebuild_core::{BuildContext, BuildRequest, Credentials, LauncherConfig, QueueResponse};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::uri::UriResolver;

/// Queues builds against one build server with one set of credentials.
///
/// Construct once per target and reuse: the launcher holds only immutable
/// configuration, so concurrent calls are independent.
pub struct BuildLauncher {
    name: String,
    resolver: UriResolver,
    credentials: Option<Credentials>,
    source_branch: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl BuildLauncher {
    /// Create a launcher from a validated configuration.
    pub fn new(config: LauncherConfig) -> Result<Self, LaunchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LaunchError::Network(format!("Failed to create HTTP client: {e}")))?;

        let source_branch = config.context_branch().map(String::from);
        let resolver = UriResolver::new(config.mode, config.api_version);
        let name = resolver
            .queue_request_uri()
            .unwrap_or_else(|_| resolver.base_uri().to_string())
            .split("/_apis/")
            .next()
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            name,
            resolver,
            credentials: config.credentials,
            source_branch,
            timeout: config.timeout,
            client,
        })
    }

    /// Create a launcher from the build agent's environment.
    pub fn from_context() -> Result<Self, LaunchError> {
        Self::new(LauncherConfig::from_context(BuildContext::from_env()))
    }

    pub fn resolver(&self) -> &UriResolver {
        &self.resolver
    }

    /// Resolve the queue URI for an explicit collection and project.
    pub fn resolve(&self, collection: &str, project: &str) -> Result<String, LaunchError> {
        self.resolver.resolve(collection, project)
    }

    /// Resolve the queue URI from the launcher's own configuration.
    pub fn queue_request_uri(&self) -> Result<String, LaunchError> {
        self.resolver.queue_request_uri()
    }

    /// Branch picked up from the build context, if any.
    pub fn source_branch(&self) -> Option<&str> {
        self.source_branch.as_deref()
    }

    /// The request `queue_build` sends for a definition id.
    pub fn request_for(&self, build_definition_id: &str) -> BuildRequest {
        BuildRequest::new(build_definition_id).with_source_branch(self.source_branch())
    }

    /// Queue a build definition, on the context branch if one was found.
    pub async fn queue_build(
        &self,
        build_definition_id: &str,
    ) -> Result<Option<QueueResponse>, LaunchError> {
        self.submit(self.request_for(build_definition_id)).await
    }

    /// Queue a build described by an explicit request.
    pub async fn submit(
        &self,
        request: BuildRequest,
    ) -> Result<Option<QueueResponse>, LaunchError> {
        let url = self.resolver.queue_request_uri()?;
        let body = request.to_body();

        debug!(
            url = %url,
            definition = %request.build_definition_id,
            source_branch = ?body.source_branch,
            "Queueing build"
        );

        let builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body);

        self.send(builder).await
    }

    /// Like [`submit`](Self::submit), but abandons the request when `cancel` fires.
    pub async fn submit_with_cancel(
        &self,
        request: BuildRequest,
        cancel: &CancellationToken,
    ) -> Result<Option<QueueResponse>, LaunchError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LaunchError::Cancelled),
            result = self.submit(request) => result,
        }
    }

    /// Fetch the current record of a build.
    pub async fn get_build(&self, build_id: u64) -> Result<Option<QueueResponse>, LaunchError> {
        let url = self.resolver.build_uri(build_id)?;
        debug!(url = %url, build_id, "Fetching build");
        self.send(self.client.get(&url)).await
    }

    /// `Basic base64(username:password)`, only when both are set.
    fn authorization(&self) -> Option<String> {
        self.credentials
            .as_ref()
            .filter(|c| c.is_complete())
            .map(|c| {
                let pair = format!("{}:{}", c.username, c.password);
                format!("Basic {}", STANDARD.encode(pair))
            })
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Option<QueueResponse>, LaunchError> {
        let mut builder = builder.header("Accept", "application/json");
        if let Some(auth) = self.authorization() {
            builder = builder.header("Authorization", auth);
        }

        let response = builder.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status().as_u16();
        let success = response.status().is_success();
        let text = response.text().await.map_err(|e| self.transport_error(e))?;

        info!(status, body = %text, "Build server response");

        if !success {
            warn!(status, server = %self.name, "Build server returned error");
            return Err(LaunchError::HttpRequest {
                status_code: status,
                body: text,
            });
        }

        if text.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| LaunchError::Deserialization {
                message: e.to_string(),
                body: text,
            })
    }

    fn transport_error(&self, error: reqwest::Error) -> LaunchError {
        if error.is_timeout() {
            LaunchError::Timeout(self.timeout)
        } else {
            LaunchError::Network(error.to_string())
        }
    }
}

#[async_trait]
impl queuebuild_core::BuildServer for BuildLauncher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn queue(&self, request: BuildRequest) -> Result<Option<QueueResponse>, LaunchError> {
        self.submit(request).await
    }

    async fn get_build(&self, build_id: u64) -> Result<Option<QueueResponse>, LaunchError> {
        BuildLauncher::get_build(self, build_id).await
    }
}
