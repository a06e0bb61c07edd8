//! Git introspection via the `git` binary.
//!
//! Used to infer the workspace/repository pair from the `origin` remote and
//! to pick up the current branch for `pr create`. Everything shells out; no
//! libgit2 binding is warranted for four read-only queries.

use crate::error::{BbError, Result};
use std::process::Command;
use tracing::debug;

/// Workspace and repository slugs parsed from a Bitbucket remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteInfo {
    pub workspace: String,
    pub repo: String,
}

fn git_output(args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .output()
        .map_err(|e| BbError::Git(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(BbError::Git(stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Name of the currently checked-out branch.
pub fn current_branch() -> Result<String> {
    git_output(&["rev-parse", "--abbrev-ref", "HEAD"])
}

pub fn is_git_repository() -> bool {
    git_output(&["rev-parse", "--is-inside-work-tree"]).is_ok()
}

pub fn has_uncommitted_changes() -> Result<bool> {
    let status = git_output(&["status", "--porcelain"])?;
    Ok(!status.is_empty())
}

/// Workspace/repo slugs for a named remote, if it points at bitbucket.org.
/// Any failure (not a repo, no such remote, foreign host) yields `None`.
pub fn remote_info(remote: &str) -> Option<RemoteInfo> {
    let url = git_output(&["remote", "get-url", remote]).ok()?;
    let info = parse_remote_url(&url);
    debug!(remote, %url, ?info, "resolved git remote");
    info
}

/// Parses `bitbucket.org[:/]<workspace>/<repo>` out of a remote URL, covering
/// both the SSH (`git@bitbucket.org:ws/repo.git`) and HTTPS
/// (`https://bitbucket.org/ws/repo.git`) forms. The repo slug ends at the
/// first `/` or `.`.
fn parse_remote_url(url: &str) -> Option<RemoteInfo> {
    let host_end = url.find("bitbucket.org")? + "bitbucket.org".len();
    let rest = &url[host_end..];
    let rest = rest
        .strip_prefix(':')
        .or_else(|| rest.strip_prefix('/'))?;

    let (workspace, remainder) = rest.split_once('/')?;
    let repo: String = remainder
        .chars()
        .take_while(|c| *c != '/' && *c != '.')
        .collect();

    if workspace.is_empty() || repo.is_empty() {
        return None;
    }

    Some(RemoteInfo {
        workspace: workspace.to_string(),
        repo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ssh_remote() {
        let info = parse_remote_url("git@bitbucket.org:acme/rocket.git").unwrap();
        assert_eq!(info.workspace, "acme");
        assert_eq!(info.repo, "rocket");
    }

    #[test]
    fn parses_https_remote() {
        let info = parse_remote_url("https://bitbucket.org/acme/rocket.git").unwrap();
        assert_eq!(info.workspace, "acme");
        assert_eq!(info.repo, "rocket");
    }

    #[test]
    fn parses_https_remote_without_git_suffix() {
        let info = parse_remote_url("https://jo@bitbucket.org/acme/rocket").unwrap();
        assert_eq!(info.workspace, "acme");
        assert_eq!(info.repo, "rocket");
    }

    #[test]
    fn repo_slug_stops_at_path_separator() {
        let info = parse_remote_url("https://bitbucket.org/acme/rocket/extra").unwrap();
        assert_eq!(info.repo, "rocket");
    }

    #[test]
    fn rejects_foreign_hosts() {
        assert!(parse_remote_url("git@github.com:acme/rocket.git").is_none());
    }

    #[test]
    fn rejects_urls_without_repo() {
        assert!(parse_remote_url("https://bitbucket.org/acme").is_none());
        assert!(parse_remote_url("https://bitbucket.org/").is_none());
    }
}
