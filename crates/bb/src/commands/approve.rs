//! `bb pr approve`: approve or withdraw approval.

use super::{resolve_repo, success};
use crate::args::ApproveArgs;
use anyhow::Result;
use bbapp::api::BitbucketApi;
use bbapp::Config;

pub fn run(args: ApproveArgs) -> Result<()> {
    let config = Config::load()?;
    let repo = resolve_repo(&args.repo, &config)?;
    let api = BitbucketApi::from_config(&config)?;

    if args.unapprove {
        api.unapprove_pr(&repo, args.pr_id)?;
        success(&format!("PR #{} unapproved", args.pr_id));
    } else {
        api.approve_pr(&repo, args.pr_id)?;
        success(&format!("PR #{} approved", args.pr_id));
    }

    Ok(())
}
