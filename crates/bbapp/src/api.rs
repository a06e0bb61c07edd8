//! Pull request operations over an [`ApiClient`].

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::filters::PrFilter;
use crate::model::{
    Account, Comment, Commit, DiffStat, Member, Paginated, PullRequest, RepoId, Workspace,
};
use serde_json::{json, Value};

pub struct BitbucketApi {
    client: ApiClient,
}

impl BitbucketApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(ApiClient::from_config(config)?))
    }

    fn pr_path(repo: &RepoId, suffix: &str) -> String {
        format!(
            "/repositories/{}/{}/pullrequests{}",
            repo.workspace, repo.repo, suffix
        )
    }

    pub fn list_prs(&self, repo: &RepoId, filter: &PrFilter) -> Result<Vec<PullRequest>> {
        let page: Paginated<PullRequest> =
            self.client.get_json(&Self::pr_path(repo, ""), &filter.to_query())?;
        Ok(page.values)
    }

    pub fn get_pr(&self, repo: &RepoId, id: u64) -> Result<PullRequest> {
        self.client
            .get_json(&Self::pr_path(repo, &format!("/{}", id)), &[])
    }

    pub fn pr_commits(&self, repo: &RepoId, id: u64) -> Result<Vec<Commit>> {
        let page: Paginated<Commit> = self
            .client
            .get_json(&Self::pr_path(repo, &format!("/{}/commits", id)), &[])?;
        Ok(page.values)
    }

    pub fn pr_diffstat(&self, repo: &RepoId, id: u64) -> Result<Vec<DiffStat>> {
        let page: Paginated<DiffStat> = self
            .client
            .get_json(&Self::pr_path(repo, &format!("/{}/diffstat", id)), &[])?;
        Ok(page.values)
    }

    pub fn pr_comments(&self, repo: &RepoId, id: u64) -> Result<Vec<Comment>> {
        let page: Paginated<Comment> = self
            .client
            .get_json(&Self::pr_path(repo, &format!("/{}/comments", id)), &[])?;
        Ok(page.values)
    }

    pub fn add_comment(&self, repo: &RepoId, id: u64, body: &str) -> Result<()> {
        self.client.post(
            &Self::pr_path(repo, &format!("/{}/comments", id)),
            &json!({ "content": { "raw": body } }),
        )
    }

    pub fn create_pr(&self, repo: &RepoId, draft: &PrDraft) -> Result<PullRequest> {
        self.client
            .post_json(&Self::pr_path(repo, ""), &draft.to_payload())
    }

    pub fn update_pr(&self, repo: &RepoId, id: u64, update: &PrUpdate) -> Result<()> {
        self.client.put(
            &Self::pr_path(repo, &format!("/{}", id)),
            &update.to_payload(),
        )
    }

    pub fn merge_pr(&self, repo: &RepoId, id: u64, options: &MergeOptions) -> Result<()> {
        self.client.post(
            &Self::pr_path(repo, &format!("/{}/merge", id)),
            &options.to_payload(),
        )
    }

    pub fn approve_pr(&self, repo: &RepoId, id: u64) -> Result<()> {
        self.client
            .post_empty(&Self::pr_path(repo, &format!("/{}/approve", id)))
    }

    pub fn unapprove_pr(&self, repo: &RepoId, id: u64) -> Result<()> {
        self.client
            .delete(&Self::pr_path(repo, &format!("/{}/approve", id)))
    }

    /// The authenticated user. Doubles as the credential validation probe.
    pub fn current_user(&self) -> Result<Account> {
        self.client.get_json("/user", &[])
    }

    pub fn workspaces(&self) -> Result<Vec<Workspace>> {
        let page: Paginated<Workspace> = self.client.get_json("/workspaces", &[])?;
        Ok(page.values)
    }

    pub fn workspace_members(&self, workspace: &str) -> Result<Vec<Account>> {
        let page: Paginated<Member> = self
            .client
            .get_json(&format!("/workspaces/{}/members", workspace), &[])?;
        Ok(page.values.into_iter().map(|m| m.user).collect())
    }
}

/// Everything needed to open a pull request.
#[derive(Debug, Clone)]
pub struct PrDraft {
    pub title: String,
    pub description: String,
    pub source: String,
    pub destination: String,
    /// Reviewer account UUIDs.
    pub reviewers: Vec<String>,
}

impl PrDraft {
    fn to_payload(&self) -> Value {
        let mut payload = json!({
            "title": self.title,
            "description": self.description,
            "source": { "branch": { "name": self.source } },
            "destination": { "branch": { "name": self.destination } },
        });
        if !self.reviewers.is_empty() {
            let reviewers: Vec<Value> =
                self.reviewers.iter().map(|uuid| json!({ "uuid": uuid })).collect();
            payload["reviewers"] = Value::Array(reviewers);
        }
        payload
    }
}

/// Partial update for an existing pull request; unset fields are untouched.
#[derive(Debug, Clone, Default)]
pub struct PrUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub destination: Option<String>,
}

impl PrUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.destination.is_none()
    }

    fn to_payload(&self) -> Value {
        let mut payload = json!({});
        if let Some(title) = &self.title {
            payload["title"] = json!(title);
        }
        if let Some(description) = &self.description {
            payload["description"] = json!(description);
        }
        if let Some(destination) = &self.destination {
            payload["destination"] = json!({ "branch": { "name": destination } });
        }
        payload
    }
}

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// `merge_commit`, `squash`, or `fast_forward`.
    pub strategy: Option<String>,
    pub message: Option<String>,
    pub close_source_branch: Option<bool>,
}

impl MergeOptions {
    fn to_payload(&self) -> Value {
        let mut payload = json!({});
        if let Some(message) = &self.message {
            payload["message"] = json!(message);
        }
        if let Some(close) = self.close_source_branch {
            payload["close_source_branch"] = json!(close);
        }
        if let Some(strategy) = &self.strategy {
            payload["merge_strategy"] = json!(strategy);
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pr_path_builds_repository_urls() {
        let repo = RepoId {
            workspace: "acme".to_string(),
            repo: "rocket".to_string(),
        };
        assert_eq!(
            BitbucketApi::pr_path(&repo, "/7/merge"),
            "/repositories/acme/rocket/pullrequests/7/merge"
        );
    }

    #[test]
    fn draft_payload_nests_branches() {
        let draft = PrDraft {
            title: "Add retries".to_string(),
            description: "Body".to_string(),
            source: "feature/retries".to_string(),
            destination: "main".to_string(),
            reviewers: Vec::new(),
        };
        let payload = draft.to_payload();
        assert_eq!(payload["source"]["branch"]["name"], "feature/retries");
        assert_eq!(payload["destination"]["branch"]["name"], "main");
        assert!(payload.get("reviewers").is_none());
    }

    #[test]
    fn draft_payload_includes_reviewers_when_present() {
        let draft = PrDraft {
            title: "t".to_string(),
            description: String::new(),
            source: "a".to_string(),
            destination: "b".to_string(),
            reviewers: vec!["{uuid-1}".to_string()],
        };
        let payload = draft.to_payload();
        assert_eq!(payload["reviewers"][0]["uuid"], "{uuid-1}");
    }

    #[test]
    fn update_payload_contains_only_set_fields() {
        let update = PrUpdate {
            destination: Some("develop".to_string()),
            ..Default::default()
        };
        let payload = update.to_payload();
        assert!(payload.get("title").is_none());
        assert!(payload.get("description").is_none());
        assert_eq!(payload["destination"]["branch"]["name"], "develop");
    }

    #[test]
    fn update_is_empty_detects_no_changes() {
        assert!(PrUpdate::default().is_empty());
        assert!(!PrUpdate {
            title: Some("t".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn merge_payload_uses_api_field_names() {
        let options = MergeOptions {
            strategy: Some("squash".to_string()),
            message: Some("Release".to_string()),
            close_source_branch: Some(true),
        };
        let payload = options.to_payload();
        assert_eq!(payload["merge_strategy"], "squash");
        assert_eq!(payload["message"], "Release");
        assert_eq!(payload["close_source_branch"], true);
    }

    #[test]
    fn merge_payload_defaults_to_empty_object() {
        let payload = MergeOptions::default().to_payload();
        assert_eq!(payload, serde_json::json!({}));
    }
}
