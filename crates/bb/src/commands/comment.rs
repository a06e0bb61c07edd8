//! `bb pr comment`: list comments or add one.

use super::{resolve_repo, success};
use crate::args::CommentArgs;
use crate::cli::render::format_relative_time;
use anyhow::Result;
use bbapp::api::BitbucketApi;
use bbapp::Config;
use colored::Colorize;

pub fn run(args: CommentArgs) -> Result<()> {
    let config = Config::load()?;
    let repo = resolve_repo(&args.repo, &config)?;
    let api = BitbucketApi::from_config(&config)?;

    match args.body {
        Some(body) if !args.list => {
            api.add_comment(&repo, args.pr_id, &body)?;
            success(&format!("Comment added to PR #{}", args.pr_id));
            return Ok(());
        }
        _ => {}
    }

    let comments = api.pr_comments(&repo, args.pr_id)?;
    if comments.is_empty() {
        println!("No comments found");
        return Ok(());
    }

    println!("{}", format!("Comments on PR #{}:", args.pr_id).bold());
    println!();

    for comment in &comments {
        let header = format!(
            "{} • {}",
            comment.user.name(),
            format_relative_time(comment.created_on)
        );
        println!("{}", header.cyan());
        println!("{}", comment.content.raw);
        println!();
    }

    Ok(())
}
