//! The "queue build" request and its wire body.

use serde::{Deserialize, Serialize};

/// A request to queue one build definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    pub build_definition_id: String,

    /// Branch to build, e.g. `refs/heads/master`. Empty means the definition's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_branch: Option<String>,
}

impl BuildRequest {
    pub fn new(build_definition_id: impl Into<String>) -> Self {
        Self {
            build_definition_id: build_definition_id.into(),
            source_branch: None,
        }
    }

    pub fn with_source_branch(mut self, branch: Option<impl Into<String>>) -> Self {
        self.source_branch = branch.map(Into::into);
        self
    }

    /// Convert into the JSON body the server expects.
    pub fn to_body(&self) -> QueueBuildBody {
        QueueBuildBody {
            definition: DefinitionRef {
                id: self.build_definition_id.clone(),
                kind: DefinitionKind::Build,
            },
            source_branch: self
                .source_branch
                .as_deref()
                .filter(|b| !b.is_empty())
                .map(String::from),
        }
    }
}

/// Body of `POST .../_apis/build/builds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueueBuildBody {
    pub definition: DefinitionRef,

    #[serde(rename = "sourceBranch", skip_serializing_if = "Option::is_none")]
    pub source_branch: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DefinitionKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionKind {
    Build,
}
