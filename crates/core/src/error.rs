//! Error types for the queuebuild domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use std::time::Duration;
use thiserror::Error;

/// The top-level error type for all queuebuild operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Launch errors ---
    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Build outcome ---
    #[error("Build {build_id} finished with result '{result}'")]
    BuildFailed { build_id: u64, result: String },

    // --- I/O ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures of a single call against the build server.
#[derive(Debug, Clone, Error)]
pub enum LaunchError {
    /// A URI field was absent; raised before any network I/O.
    #[error("Missing request parameter: {0}")]
    MissingParameter(String),

    #[error("Build server returned HTTP {status_code}: {body}")]
    HttpRequest { status_code: u16, body: String },

    #[error("Failed to parse build server response: {message}")]
    Deserialization { message: String, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Build {build_id} still not completed after {polls} polls")]
    WatchExhausted { build_id: u64, polls: u32 },
}

impl LaunchError {
    /// The HTTP status code, when the server answered with one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpRequest { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Whether the server rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }
}
