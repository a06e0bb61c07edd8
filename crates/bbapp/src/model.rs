//! Serde model of the Bitbucket Cloud 2.0 API payloads used by the CLI.
//!
//! Only the fields the commands actually render are modeled; everything else
//! in the API responses is ignored during deserialization. PR states stay
//! plain strings (`OPEN`, `MERGED`, `DECLINED`, `SUPERSEDED`): the server
//! is the validator, and rendering has an explicit fallback for anything
//! unrecognized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workspace and repository slug pair addressing one Bitbucket repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub workspace: String,
    pub repo: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.workspace, self.repo)
    }
}

/// A Bitbucket user account as embedded in PRs, comments, and memberships.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl Account {
    /// Display name with nickname fallback.
    pub fn name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.nickname
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
}

/// The `{ "branch": { "name": ... } }` wrapper the API uses for PR endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchRef {
    pub branch: Branch,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub id: u64,
    pub title: String,
    pub state: String,
    pub author: Account,
    pub source: BranchRef,
    pub destination: BranchRef,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    /// Present on the single-PR endpoint, absent from list responses.
    #[serde(default)]
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Participant {
    pub user: Account,
    pub role: String,
    pub approved: bool,
}

impl Participant {
    pub fn is_reviewer(&self) -> bool {
        self.role == "REVIEWER"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub message: String,
}

impl Commit {
    /// Abbreviated hash, as shown by `bb pr view`.
    pub fn short_hash(&self) -> &str {
        let end = self.hash.len().min(7);
        &self.hash[..end]
    }

    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiffStat {
    #[serde(default)]
    pub lines_added: u64,
    #[serde(default)]
    pub lines_removed: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentContent {
    #[serde(default)]
    pub raw: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub user: Account,
    pub created_on: DateTime<Utc>,
    pub content: CommentContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    pub slug: String,
    pub name: String,
}

/// A workspace membership record; only the user is interesting here.
#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub user: Account,
}

/// One page of a paginated API response.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Paginated<T> {
    #[serde(default)]
    pub values: Vec<T>,
}
