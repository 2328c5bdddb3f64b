//! Configuration loading, validation, and management for queuebuild.
//!
//! Loads configuration from `~/.queuebuild/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use queuebuild_core::{
    BuildContext, BuildTarget, Credentials, LauncherConfig, ServerEndpoint,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The root configuration structure.
///
/// Maps directly to `~/.queuebuild/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where the request URI comes from
    #[serde(default)]
    pub mode: ModeKind,

    /// REST API version sent as `api-version`
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Build server (explicit mode)
    #[serde(default)]
    pub server: ServerConfig,

    /// Collection and team project (explicit mode)
    #[serde(default)]
    pub target: TargetConfig,

    /// Basic-auth credentials
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// Completion polling
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Which construction mode the launcher uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeKind {
    #[default]
    Explicit,
    Context,
}

impl std::str::FromStr for ModeKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explicit" => Ok(Self::Explicit),
            "context" => Ok(Self::Context),
            other => Err(ConfigError::ValidationError(format!(
                "unknown mode '{other}', expected 'explicit' or 'context'"
            ))),
        }
    }
}

fn default_api_version() -> String {
    queuebuild_core::mode::DEFAULT_API_VERSION.into()
}
fn default_timeout_secs() -> u64 {
    queuebuild_core::mode::DEFAULT_TIMEOUT.as_secs()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("mode", &self.mode)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("server", &self.server)
            .field("target", &self.target)
            .field("credentials", &self.credentials)
            .field("watch", &self.watch)
            .finish()
    }
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: String,

    #[serde(default)]
    pub https: bool,
}

fn default_host() -> String {
    "localhost".into()
}
fn default_port() -> String {
    "8080".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            https: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Empty = pass the project on the command line.
    #[serde(default)]
    pub team_project: String,
}

fn default_collection() -> String {
    "DefaultCollection".into()
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            team_project: String::new(),
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl CredentialsConfig {
    /// Credentials are only used when both halves are non-empty.
    pub fn to_credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => {
                Some(Credentials::new(u.clone(), p.clone()))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Delay before the first poll
    #[serde(default)]
    pub initial_delay_secs: u64,

    /// Delay between subsequent polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Give up after this many polls (0 = never)
    #[serde(default)]
    pub max_polls: u32,
}

fn default_poll_interval() -> u64 {
    60
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: 0,
            poll_interval_secs: default_poll_interval(),
            max_polls: 0,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.queuebuild/config.toml).
    ///
    /// Environment variables override the file:
    /// - `QUEUEBUILD_MODE`
    /// - `QUEUEBUILD_SERVER`, `QUEUEBUILD_PORT`
    /// - `QUEUEBUILD_USERNAME`, `QUEUEBUILD_PASSWORD`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(&Self::config_dir().join("config.toml"))
    }

    /// Load from a specific file, then apply process environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup (highest priority).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(mode) = read("QUEUEBUILD_MODE") {
            self.mode = mode.parse()?;
        }
        if let Some(host) = read("QUEUEBUILD_SERVER") {
            self.server.host = host;
        }
        if let Some(port) = read("QUEUEBUILD_PORT") {
            self.server.port = port;
        }
        if let Some(username) = read("QUEUEBUILD_USERNAME") {
            self.credentials.username = Some(username);
        }
        if let Some(password) = read("QUEUEBUILD_PASSWORD") {
            self.credentials.password = Some(password);
        }
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".queuebuild")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_version.trim().is_empty() {
            return Err(ConfigError::ValidationError("api_version must not be empty".into()));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError("timeout_secs must be > 0".into()));
        }

        if self.watch.poll_interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "watch.poll_interval_secs must be > 0".into(),
            ));
        }

        if self.mode == ModeKind::Explicit {
            if self.server.host.trim().is_empty() {
                return Err(ConfigError::ValidationError("server.host must not be empty".into()));
            }
            if self.server.port.parse::<u16>().is_err() {
                return Err(ConfigError::ValidationError(format!(
                    "server.port '{}' is not a valid port",
                    self.server.port
                )));
            }
        }

        Ok(())
    }

    /// Build the launcher configuration, reading the build context from the
    /// process environment when in context mode.
    pub fn launcher_config(&self) -> LauncherConfig {
        self.launcher_config_with(BuildContext::from_env)
    }

    /// Build the launcher configuration with an explicit context source.
    pub fn launcher_config_with<F>(&self, context: F) -> LauncherConfig
    where
        F: FnOnce() -> BuildContext,
    {
        let base = match self.mode {
            ModeKind::Context => LauncherConfig::from_context(context()),
            ModeKind::Explicit => {
                let endpoint = ServerEndpoint::new(
                    self.server.host.clone(),
                    self.server.port.clone(),
                    self.server.https,
                );
                if self.target.team_project.is_empty() || self.target.collection.is_empty() {
                    LauncherConfig::server(endpoint.host, endpoint.port, self.server.https)
                } else {
                    LauncherConfig::explicit(
                        endpoint,
                        BuildTarget::new(&self.target.collection, &self.target.team_project),
                    )
                }
            }
        };

        let config = base
            .with_api_version(self.api_version.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs));

        match self.credentials.to_credentials() {
            Some(credentials) => config.with_credentials(credentials),
            None => config,
        }
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: ModeKind::default(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            server: ServerConfig::default(),
            target: TargetConfig::default(),
            credentials: CredentialsConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for queuebuild_core::Error {
    fn from(err: ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}
