//! How a launcher is pointed at its build server.

use crate::context::BuildContext;
use crate::endpoint::{BuildTarget, Credentials, ServerEndpoint};
use std::time::Duration;

/// REST API version sent as `api-version`.
pub const DEFAULT_API_VERSION: &str = "2.1";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the request URI comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Inferred from the build agent's environment.
    Context(BuildContext),

    /// Explicit server; the target may be supplied later per `resolve` call.
    Explicit {
        endpoint: ServerEndpoint,
        target: Option<BuildTarget>,
    },
}

/// Everything a launcher needs, fixed at construction time.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub mode: ConnectionMode,
    pub credentials: Option<Credentials>,
    pub api_version: String,
    pub timeout: Duration,
}

impl LauncherConfig {
    fn with_mode(mode: ConnectionMode) -> Self {
        Self {
            mode,
            credentials: None,
            api_version: DEFAULT_API_VERSION.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Context-inferred mode.
    pub fn from_context(context: BuildContext) -> Self {
        Self::with_mode(ConnectionMode::Context(context))
    }

    /// Server-only mode: collection and project are passed to `resolve`.
    pub fn server(host: impl Into<String>, port: impl Into<String>, use_https: bool) -> Self {
        Self::with_mode(ConnectionMode::Explicit {
            endpoint: ServerEndpoint::new(host, port, use_https),
            target: None,
        })
    }

    /// Fully explicit mode.
    pub fn explicit(endpoint: ServerEndpoint, target: BuildTarget) -> Self {
        Self::with_mode(ConnectionMode::Explicit {
            endpoint,
            target: Some(target),
        })
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Branch the build agent is building, if running in context mode.
    pub fn context_branch(&self) -> Option<&str> {
        match &self.mode {
            ConnectionMode::Context(ctx) => ctx.source_branch.as_deref(),
            ConnectionMode::Explicit { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_mode_defaults() {
        let config = LauncherConfig::server("localhost", "8080", false);
        assert_eq!(config.api_version, "2.1");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.credentials.is_none());
        assert!(matches!(
            config.mode,
            ConnectionMode::Explicit { target: None, .. }
        ));
    }

    #[test]
    fn context_branch_only_in_context_mode() {
        let ctx = BuildContext {
            source_branch: Some("refs/heads/dev".into()),
            ..BuildContext::default()
        };
        assert_eq!(
            LauncherConfig::from_context(ctx).context_branch(),
            Some("refs/heads/dev")
        );
        assert_eq!(
            LauncherConfig::server("h", "1", false).context_branch(),
            None
        );
    }

    #[test]
    fn builder_methods_chain() {
        let config = LauncherConfig::explicit(
            ServerEndpoint::new("localhost", "8080", true),
            BuildTarget::new("DefaultCollection", "Test"),
        )
        .with_credentials(Credentials::new("test", "pw"))
        .with_api_version("4.1")
        .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_version, "4.1");
        assert_eq!(config.timeout.as_secs(), 5);
        assert!(config.credentials.is_some());
    }
}
