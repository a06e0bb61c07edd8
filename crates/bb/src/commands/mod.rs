//! Command handlers. One module per subcommand; shared context resolution
//! and status-line helpers live here.

pub mod approve;
pub mod comment;
pub mod config;
pub mod create;
pub mod list;
pub mod login;
pub mod merge;
pub mod update;
pub mod view;

use crate::args::RepoArgs;
use anyhow::Result;
use bbapp::git;
use bbapp::model::RepoId;
use bbapp::{BbError, Config};
use colored::Colorize;

/// Resolves the target repository: explicit flags win, then configured
/// defaults, then the `origin` remote of the surrounding git repository.
pub fn resolve_repo(args: &RepoArgs, config: &Config) -> Result<RepoId> {
    let mut workspace = args.workspace.clone().or_else(|| config.workspace());
    let mut repo = args.repo.clone().or_else(|| config.default_repo());

    if (workspace.is_none() || repo.is_none()) && git::is_git_repository() {
        if let Some(remote) = git::remote_info("origin") {
            workspace = workspace.or(Some(remote.workspace));
            repo = repo.or(Some(remote.repo));
        }
    }

    match (workspace, repo) {
        (Some(workspace), Some(repo)) => Ok(RepoId { workspace, repo }),
        _ => Err(BbError::RepoNotResolved.into()),
    }
}

/// Web URL for a pull request.
pub fn pr_url(repo: &RepoId, id: u64) -> String {
    format!(
        "https://bitbucket.org/{}/{}/pull-requests/{}",
        repo.workspace, repo.repo, id
    )
}

pub fn success(message: &str) {
    println!("{}", format!("✓ {}", message).green());
}

pub fn warning(message: &str) {
    println!("{}", format!("⚠ {}", message).yellow());
}

pub fn info(message: &str) {
    println!("{}", format!("ℹ {}", message).cyan());
}
