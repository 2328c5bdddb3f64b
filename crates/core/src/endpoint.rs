//! Where a build is queued: server endpoint, collection/project scope and
//! the credentials used to reach it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// URI scheme used to talk to the build server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    /// Pick the protocol from an https flag.
    pub fn from_https(use_https: bool) -> Self {
        if use_https { Self::Https } else { Self::Http }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An explicitly configured build server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerEndpoint {
    pub protocol: Protocol,
    pub host: String,
    pub port: String,
}

impl ServerEndpoint {
    pub fn new(host: impl Into<String>, port: impl Into<String>, use_https: bool) -> Self {
        Self {
            protocol: Protocol::from_https(use_https),
            host: host.into(),
            port: port.into(),
        }
    }

    /// The `{instance}` segment: `host:port/tfs`.
    ///
    /// Empty when the host is missing, so URI resolution can reject it.
    pub fn instance(&self) -> String {
        if self.host.is_empty() {
            return String::new();
        }
        format!("{}:{}/tfs", self.host, self.port)
    }
}

/// Collection and team project a build definition lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
    pub collection: String,
    pub team_project: String,
}

impl BuildTarget {
    pub fn new(collection: impl Into<String>, team_project: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            team_project: team_project.into(),
        }
    }
}

/// Basic-auth credentials for the build server.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both halves must be present for the request to be authenticated.
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
