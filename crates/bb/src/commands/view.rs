//! `bb pr view`: detail view for one pull request.

use super::{pr_url, resolve_repo};
use crate::args::ViewArgs;
use crate::cli::color::{badge, state_color};
use crate::cli::render::{format_datetime, key_value, section};
use anyhow::Result;
use bbapp::api::BitbucketApi;
use bbapp::Config;
use colored::Colorize;

pub fn run(args: ViewArgs) -> Result<()> {
    let config = Config::load()?;
    let repo = resolve_repo(&args.repo, &config)?;
    let api = BitbucketApi::from_config(&config)?;

    let pr = api.get_pr(&repo, args.pr_id)?;

    println!("{}", section(&format!("PR #{}: {}", pr.id, pr.title)));
    println!(
        "{}",
        key_value("State", &badge(&pr.state, Some(state_color(&pr.state))))
    );
    println!("{}", key_value("Author", pr.author.name()));
    println!("{}", key_value("Source", &pr.source.branch.name));
    println!("{}", key_value("Destination", &pr.destination.branch.name));
    println!("{}", key_value("Created", &format_datetime(pr.created_on)));
    println!("{}", key_value("Updated", &format_datetime(pr.updated_on)));

    if !pr.description.is_empty() {
        println!();
        println!("{}", "Description:".bold());
        println!("{}", pr.description);
    }

    let commits = api.pr_commits(&repo, args.pr_id)?;
    if !commits.is_empty() {
        println!();
        println!("{}", format!("Commits ({}):", commits.len()).bold());
        for commit in &commits {
            println!("  {} {}", commit.short_hash().cyan(), commit.summary());
        }
    }

    // Diffstat is best-effort; its absence is not worth failing the view.
    if let Ok(diffstat) = api.pr_diffstat(&repo, args.pr_id) {
        if !diffstat.is_empty() {
            let added: u64 = diffstat.iter().map(|f| f.lines_added).sum();
            let removed: u64 = diffstat.iter().map(|f| f.lines_removed).sum();
            println!();
            println!("{}", key_value("Files changed", &diffstat.len().to_string()));
            println!(
                "{}",
                key_value("Lines added", &format!("+{}", added).green().to_string())
            );
            println!(
                "{}",
                key_value("Lines removed", &format!("-{}", removed).red().to_string())
            );
        }
    }

    let reviewers: Vec<_> = pr.participants.iter().filter(|p| p.is_reviewer()).collect();
    if !reviewers.is_empty() {
        println!();
        println!("{}", "Reviewers:".bold());
        for participant in reviewers {
            let status = if participant.approved {
                "✓ Approved".green().to_string()
            } else {
                "Pending".bright_black().to_string()
            };
            println!("  {}: {}", participant.user.name(), status);
        }
    }

    println!();
    println!("{}", key_value("URL", &pr_url(&repo, pr.id)));

    Ok(())
}
