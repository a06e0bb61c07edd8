use thiserror::Error;

#[derive(Error, Debug)]
pub enum BbError {
    #[error("Authentication failed. Please check your API token.")]
    AuthFailed,

    #[error("Access denied. You do not have permission to perform this action.")]
    AccessDenied,

    #[error("Resource not found.")]
    NotFound,

    #[error("API error: {0}")]
    Api(String),

    #[error("No response from Bitbucket API. Please check your connection.")]
    Connection(#[source] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("No API credentials found. Run \"bb auth login\" to configure authentication.")]
    MissingCredentials,

    #[error("Could not determine workspace and repository. Please specify --workspace and --repo or run from a git repository with a Bitbucket remote.")]
    RepoNotResolved,

    #[error("Could not determine the configuration directory")]
    NoConfigDir,

    #[error("Git error: {0}")]
    Git(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BbError>;
