//! Build record returned by the server when a build is queued or fetched.
//!
//! Every field is optional and unknown fields are ignored: servers of
//! different versions return different subsets, and none of them is needed
//! for a call to count as successful.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildStatus {
    None,
    NotStarted,
    InProgress,
    Completed,
    Cancelling,
    Postponed,
    All,
    #[serde(other)]
    Unknown,
}

impl BuildStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// A build as reported by `_apis/build/builds`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueueResponse {
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<Definition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BuildStatus>,
    /// `succeeded`, `partiallySucceeded`, `failed`, `canceled` once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<Queue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_for: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_changed_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_changed_by: Option<Identity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchestration_plan: Option<OrchestrationPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logs: Option<Logs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_forever: Option<bool>,
}

impl QueueResponse {
    /// Parsed `queueTime`, if present and RFC 3339.
    pub fn queue_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.queue_time.as_deref())
    }

    /// Parsed `finishTime`, if present and RFC 3339.
    pub fn finish_time(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(self.finish_time.as_deref())
    }

    pub fn is_completed(&self) -> bool {
        self.status.is_some_and(|s| s.is_completed())
    }

    /// Link to the build's results page in the web UI.
    pub fn web_url(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|l| l.web.as_ref())
            .and_then(|w| w.href.as_deref())
    }

    /// Display name of whoever the build was requested for (or by).
    pub fn requester(&self) -> Option<&str> {
        self.requested_for
            .as_ref()
            .or(self.requested_by.as_ref())
            .and_then(|i| i.display_name.as_deref())
    }
}

fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
        .map(|t| t.with_timezone(&Utc))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Link>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub state: Option<String>,
    pub revision: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Definition {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub revision: Option<i64>,
    pub id: Option<u64>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub project: Option<Project>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pool {
    pub id: Option<u64>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Queue {
    pub pool: Option<Pool>,
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// A user reference (`requestedFor`, `requestedBy`, `lastChangedBy`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Identity {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub unique_name: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrchestrationPlan {
    pub plan_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logs {
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Repository {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Servers send a bool, a string or null here.
    pub clean: serde_json::Value,
    pub checkout_submodules: Option<bool>,
}
