//! `bb pr list`: tabular pull request listing.

use super::resolve_repo;
use crate::args::ListArgs;
use crate::cli::color::{badge, state_color};
use crate::cli::render::{format_relative_time, render_table, Align, Column};
use anyhow::Result;
use bbapp::api::BitbucketApi;
use bbapp::filters::PrFilter;
use bbapp::Config;

pub fn run(args: ListArgs) -> Result<()> {
    let config = Config::load()?;
    let repo = resolve_repo(&args.repo, &config)?;
    let api = BitbucketApi::from_config(&config)?;

    let filter = PrFilter {
        state: args.state,
        author: args.author,
        limit: Some(args.limit),
    };
    let prs = api.list_prs(&repo, &filter)?;

    if prs.is_empty() {
        println!("No pull requests found");
        return Ok(());
    }

    let columns = [
        Column::new("ID", 6).align(Align::Right),
        Column::new("Title", 50),
        Column::new("State", 12),
        Column::new("Author", 20),
        Column::new("Branch", 25),
        Column::new("Updated", 15),
    ];

    let rows: Vec<Vec<String>> = prs
        .iter()
        .map(|pr| {
            vec![
                format!("#{}", pr.id),
                pr.title.clone(),
                badge(&pr.state, Some(state_color(&pr.state))),
                pr.author.name().to_string(),
                format!(
                    "{} → {}",
                    pr.source.branch.name, pr.destination.branch.name
                ),
                format_relative_time(pr.updated_on),
            ]
        })
        .collect();

    for line in render_table(&columns, &rows) {
        println!("{}", line);
    }

    Ok(())
}
