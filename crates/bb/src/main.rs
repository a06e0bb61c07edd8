use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod args;
mod cli;
mod commands;

use args::{AuthCommands, Cli, Commands, PrCommands};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Auth {
            command: AuthCommands::Login,
        } => commands::login::run(),
        Commands::Pr { command } => match command {
            PrCommands::List(args) => commands::list::run(args),
            PrCommands::View(args) => commands::view::run(args),
            PrCommands::Create(args) => commands::create::run(args),
            PrCommands::Update(args) => commands::update::run(args),
            PrCommands::Comment(args) => commands::comment::run(args),
            PrCommands::Approve(args) => commands::approve::run(args),
            PrCommands::Merge(args) => commands::merge::run(args),
        },
        Commands::Config => commands::config::run(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "bb", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Debug logging goes to stderr, gated by `BB_LOG` (e.g. `BB_LOG=debug`).
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("BB_LOG"))
        .with_writer(std::io::stderr)
        .init();
}
