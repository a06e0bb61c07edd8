//! `bb pr create`: open a pull request, optionally interactively.

use super::{info, pr_url, resolve_repo, success, warning};
use crate::args::CreateArgs;
use anyhow::{bail, Result};
use bbapp::api::{BitbucketApi, PrDraft};
use bbapp::{git, templates, Config};
use colored::Colorize;
use dialoguer::{Editor, Input, MultiSelect};

pub fn run(args: CreateArgs) -> Result<()> {
    let config = Config::load()?;
    let repo = resolve_repo(&args.repo, &config)?;
    let api = BitbucketApi::from_config(&config)?;

    let source = match args.source {
        Some(source) => source,
        None => git::current_branch()?,
    };
    let mut destination = args.destination;
    let mut title = args.title;
    let mut description = args.description;
    let mut reviewers = Vec::new();

    if args.interactive || title.is_none() {
        info("Creating pull request interactively");
        println!();

        if git::has_uncommitted_changes().unwrap_or(false) {
            warning("You have uncommitted changes on this branch");
        }

        let template = templates::get_template(args.template.as_deref())?;
        let prefilled = templates::apply_variables(
            &template,
            &[
                ("branch", source.as_str()),
                ("workspace", repo.workspace.as_str()),
                ("repo", repo.repo.as_str()),
            ],
        );

        title = Some(
            Input::new()
                .with_prompt("Pull request title")
                .with_initial_text(title.unwrap_or_default())
                .validate_with(|input: &String| {
                    if input.trim().is_empty() {
                        Err("Title is required")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?,
        );
        destination = Input::new()
            .with_prompt("Destination branch")
            .default(destination)
            .interact_text()?;

        let seed = description.unwrap_or(prefilled);
        description = Some(Editor::new().edit(&seed)?.unwrap_or(seed));

        // Reviewer selection is best-effort; member listing needs extra
        // permissions on some workspaces.
        let members = api.workspace_members(&repo.workspace).unwrap_or_default();
        if !members.is_empty() {
            let labels: Vec<&str> = members.iter().map(|m| m.name()).collect();
            let picked = MultiSelect::new()
                .with_prompt("Select reviewers (optional)")
                .items(&labels)
                .interact()?;
            reviewers = picked
                .into_iter()
                .filter_map(|i| members[i].uuid.clone())
                .collect();
        }
    }

    let Some(title) = title else {
        bail!("Title is required. Use --title or --interactive.");
    };

    let draft = PrDraft {
        title,
        description: description.unwrap_or_default(),
        source,
        destination,
        reviewers,
    };
    let pr = api.create_pr(&repo, &draft)?;

    println!();
    success(&format!("Pull request created: PR #{}", pr.id));
    println!("{}: {}", "URL".cyan(), pr_url(&repo, pr.id));

    Ok(())
}
