//! Execution context supplied by the build agent through environment variables.
//!
//! When queuebuild runs inside a TFS build step, the agent exports the
//! collection URL, the team project and the branch being built. Any of them
//! may be missing; the launcher simply skips the matching substitution.

use serde::{Deserialize, Serialize};

/// `System.TeamFoundationCollectionUri`
pub const COLLECTION_URI_VAR: &str = "SYSTEM_TEAMFOUNDATIONCOLLECTIONURI";
/// `System.TeamProject`
pub const TEAM_PROJECT_VAR: &str = "SYSTEM_TEAMPROJECT";
/// `Build.SourceBranch`
pub const SOURCE_BRANCH_VAR: &str = "BUILD_SOURCEBRANCH";

/// Values read from the build agent's environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContext {
    /// e.g. `http://tfs:8080/tfs/DefaultCollection/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_project: Option<String>,

    /// e.g. `refs/heads/master`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_branch: Option<String>,
}

impl BuildContext {
    /// Read the context from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the context through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let context = Self {
            collection_uri: read(COLLECTION_URI_VAR),
            team_project: read(TEAM_PROJECT_VAR),
            source_branch: read(SOURCE_BRANCH_VAR),
        };

        tracing::debug!(
            collection_uri = ?context.collection_uri,
            team_project = ?context.team_project,
            source_branch = ?context.source_branch,
            "Read build context"
        );

        context
    }

    /// Whether nothing at all was found.
    pub fn is_empty(&self) -> bool {
        self.collection_uri.is_none() && self.team_project.is_none() && self.source_branch.is_none()
    }
}
