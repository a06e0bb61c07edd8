//! `bb pr update`: edit title, description, or destination of a PR.

use super::{resolve_repo, success};
use crate::args::UpdateArgs;
use anyhow::{bail, Result};
use bbapp::api::{BitbucketApi, PrUpdate};
use bbapp::Config;

pub fn run(args: UpdateArgs) -> Result<()> {
    let update = PrUpdate {
        title: args.title,
        description: args.description,
        destination: args.destination,
    };
    if update.is_empty() {
        bail!("Nothing to update. Please specify --title, --description, or --destination.");
    }

    let config = Config::load()?;
    let repo = resolve_repo(&args.repo, &config)?;
    let api = BitbucketApi::from_config(&config)?;

    api.update_pr(&repo, args.pr_id, &update)?;
    success(&format!("PR #{} updated successfully", args.pr_id));

    Ok(())
}
