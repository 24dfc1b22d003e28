use thiserror::Error;

pub type GitReleaseResult<T> = Result<T, GitReleaseError>;

#[derive(Error, Debug)]
pub enum GitReleaseError {
    /// Request construction, network failure or timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("{0}")]
    InvalidRepository(String),

    /// HTTP 404. `what` names the resource that was looked up
    /// ("repository", "repository or release", ...).
    #[error("{provider} {what} not found: {repo}")]
    NotFound {
        provider: &'static str,
        what: &'static str,
        repo: String,
    },

    /// Provider signalled quota exhaustion. `detail` carries the retry
    /// timing sentence, already punctuated, or is empty.
    #[error("{provider} rate limit exceeded{detail}")]
    RateLimited {
        provider: &'static str,
        detail: String,
    },

    /// Any other non-success status; `status` is the full status line.
    #[error("{provider} API error: {status}")]
    Api {
        provider: &'static str,
        status: String,
    },

    #[error("failed to parse {provider} JSON: {source}")]
    Parse {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("no releases found for {provider} repository: {repo}")]
    NoReleases { provider: &'static str, repo: String },

    #[error("no tags found for {provider} repository: {repo}")]
    NoTags { provider: &'static str, repo: String },

    #[error("no tags found for version prefix: {0}")]
    NoTagsForPrefix(String),

    #[error("no semver-compatible tags found")]
    NoSemverTags,
}

impl GitReleaseError {
    /// Name of the provider the error came from, if any.
    pub fn provider(&self) -> Option<&'static str> {
        match self {
            GitReleaseError::NotFound { provider, .. }
            | GitReleaseError::RateLimited { provider, .. }
            | GitReleaseError::Api { provider, .. }
            | GitReleaseError::Parse { provider, .. }
            | GitReleaseError::NoReleases { provider, .. }
            | GitReleaseError::NoTags { provider, .. } => Some(*provider),
            _ => None,
        }
    }
}
