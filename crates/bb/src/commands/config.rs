//! `bb config`: show the resolved configuration.

use crate::cli::render::key_value;
use anyhow::Result;
use bbapp::Config;

pub fn run() -> Result<()> {
    let config = Config::load()?;

    println!(
        "{}",
        key_value("Username", &display(config.username().as_deref()))
    );
    println!(
        "{}",
        key_value(
            "API token",
            &config
                .api_token()
                .map(|t| mask_token(&t))
                .unwrap_or_else(|| "(not set)".to_string())
        )
    );
    println!(
        "{}",
        key_value("Workspace", &display(config.workspace().as_deref()))
    );
    println!(
        "{}",
        key_value("Default repo", &display(config.default_repo().as_deref()))
    );
    println!(
        "{}",
        key_value("Config file", &Config::config_path()?.display().to_string())
    );

    Ok(())
}

fn display(value: Option<&str>) -> String {
    value.unwrap_or("(not set)").to_string()
}

/// Shows only the last four characters of a token.
fn mask_token(token: &str) -> String {
    let visible: String = token
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", visible)
}
