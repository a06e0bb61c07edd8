//! `bb pr merge`.

use super::{resolve_repo, success};
use crate::args::MergeArgs;
use anyhow::Result;
use bbapp::api::{BitbucketApi, MergeOptions};
use bbapp::Config;

pub fn run(args: MergeArgs) -> Result<()> {
    let config = Config::load()?;
    let repo = resolve_repo(&args.repo, &config)?;
    let api = BitbucketApi::from_config(&config)?;

    let options = MergeOptions {
        strategy: args.strategy,
        message: args.message,
        close_source_branch: args.close_source_branch.then_some(true),
    };
    api.merge_pr(&repo, args.pr_id, &options)?;
    success(&format!("PR #{} merged successfully", args.pr_id));

    Ok(())
}
