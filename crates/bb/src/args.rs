use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "bb", version)]
#[command(about = "Command-line interface for Bitbucket pull requests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage authentication
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },

    /// Manage pull requests
    Pr {
        #[command(subcommand)]
        command: PrCommands,
    },

    /// Show the resolved configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Authenticate with the Bitbucket API
    Login,
}

/// Workspace/repository override flags shared by every pr subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct RepoArgs {
    /// Workspace slug
    #[arg(long)]
    pub workspace: Option<String>,

    /// Repository slug
    #[arg(long)]
    pub repo: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PrCommands {
    /// List pull requests
    #[command(alias = "ls")]
    List(ListArgs),

    /// View pull request details
    View(ViewArgs),

    /// Create a new pull request
    Create(CreateArgs),

    /// Update an existing pull request
    Update(UpdateArgs),

    /// Manage pull request comments
    Comment(CommentArgs),

    /// Approve or unapprove a pull request
    Approve(ApproveArgs),

    /// Merge a pull request
    Merge(MergeArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter by state: OPEN, MERGED, DECLINED, SUPERSEDED
    #[arg(long)]
    pub state: Option<String>,

    /// Filter by author username
    #[arg(long)]
    pub author: Option<String>,

    /// Limit number of results
    #[arg(long, default_value_t = 50)]
    pub limit: u32,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Pull request ID
    pub pr_id: u64,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Pull request title
    #[arg(long)]
    pub title: Option<String>,

    /// Pull request description
    #[arg(long)]
    pub description: Option<String>,

    /// Source branch (defaults to the current branch)
    #[arg(long)]
    pub source: Option<String>,

    /// Destination branch
    #[arg(long, default_value = "main")]
    pub destination: String,

    /// Template name to use
    #[arg(long)]
    pub template: Option<String>,

    /// Create the PR interactively
    #[arg(short, long)]
    pub interactive: bool,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Pull request ID
    pub pr_id: u64,

    /// New pull request title
    #[arg(long)]
    pub title: Option<String>,

    /// New pull request description
    #[arg(long)]
    pub description: Option<String>,

    /// New destination branch
    #[arg(long)]
    pub destination: Option<String>,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Pull request ID
    pub pr_id: u64,

    /// Comment body (creates a new comment)
    #[arg(long)]
    pub body: Option<String>,

    /// List comments
    #[arg(long)]
    pub list: bool,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Args, Debug)]
pub struct ApproveArgs {
    /// Pull request ID
    pub pr_id: u64,

    /// Unapprove the pull request
    #[arg(long)]
    pub unapprove: bool,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Pull request ID
    pub pr_id: u64,

    /// Merge strategy: merge_commit, squash, fast_forward
    #[arg(long)]
    pub strategy: Option<String>,

    /// Merge commit message
    #[arg(long)]
    pub message: Option<String>,

    /// Close the source branch after merging
    #[arg(long)]
    pub close_source_branch: bool,

    #[command(flatten)]
    pub repo: RepoArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn pr_list_parses_filters() {
        let cli = Cli::parse_from([
            "bb", "pr", "list", "--state", "open", "--author", "jodev", "--limit", "5",
        ]);
        match cli.command {
            Commands::Pr {
                command: PrCommands::List(args),
            } => {
                assert_eq!(args.state.as_deref(), Some("open"));
                assert_eq!(args.author.as_deref(), Some("jodev"));
                assert_eq!(args.limit, 5);
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn repo_flags_are_available_on_subcommands() {
        let cli = Cli::parse_from([
            "bb",
            "pr",
            "view",
            "7",
            "--workspace",
            "acme",
            "--repo",
            "rocket",
        ]);
        match cli.command {
            Commands::Pr {
                command: PrCommands::View(args),
            } => {
                assert_eq!(args.pr_id, 7);
                assert_eq!(args.repo.workspace.as_deref(), Some("acme"));
                assert_eq!(args.repo.repo.as_deref(), Some("rocket"));
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }
}
