//! `bb auth login`: prompt for credentials, validate, persist.

use super::{info, success};
use anyhow::{bail, Context, Result};
use bbapp::api::BitbucketApi;
use bbapp::client::ApiClient;
use bbapp::Config;
use colored::Colorize;
use dialoguer::{Input, Password};

pub fn run() -> Result<()> {
    println!();
    info("Bitbucket API authentication");
    println!();
    println!("To obtain an API token:");
    println!(
        "1. Go to {}",
        "https://id.atlassian.com/manage-profile/security/api-tokens".cyan()
    );
    println!("2. Click \"Create API token\"");
    println!("3. Give it a label and copy the generated token");
    println!();

    let username: String = Input::new()
        .with_prompt("Atlassian account email")
        .interact_text()?;
    if username.trim().is_empty() {
        bail!("Email cannot be empty");
    }

    let token = Password::new()
        .with_prompt("Atlassian API token")
        .interact()?;
    if token.trim().is_empty() {
        bail!("API token cannot be empty");
    }

    info("Validating credentials...");

    // A fresh handle built from the candidate credentials; nothing global
    // to invalidate when they change.
    let api = BitbucketApi::new(ApiClient::new(username.trim(), token.trim())?);
    api.current_user()
        .context("Invalid credentials. Please check your email and API token.")?;

    let mut config = Config::load()?;
    config.username = Some(username.trim().to_string());
    config.api_token = Some(token.trim().to_string());
    config.save()?;
    success("Credentials saved successfully");

    info("Fetching workspaces...");
    let workspaces = api.workspaces().unwrap_or_default();
    if !workspaces.is_empty() {
        println!();
        println!("{}", "Available workspaces:".bold());
        for (i, workspace) in workspaces.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, workspace.name, workspace.slug.cyan());
        }
        println!();

        let slug: String = Input::new()
            .with_prompt("Default workspace slug (press Enter to skip)")
            .allow_empty(true)
            .interact_text()?;
        if !slug.trim().is_empty() {
            config.workspace = Some(slug.trim().to_string());
            config.save()?;
            success(&format!("Default workspace set to: {}", slug.trim()));
        }
    }

    println!();
    success("Authentication configured successfully!");

    Ok(())
}
