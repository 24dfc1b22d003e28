//! Error rendering with actionable suggestions

use crate::core::error::GitReleaseError;

/// Environment variable holding the access token for a provider.
pub fn token_env_var(provider: &str) -> Option<&'static str> {
    match provider {
        "GitHub" => Some("GITHUB_TOKEN"),
        "GitLab" => Some("GITLAB_TOKEN"),
        "Bitbucket" => Some("BITBUCKET_TOKEN"),
        _ => None,
    }
}

/// Suggestion for how to recover from an error, if there is one.
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for GitReleaseError {
    fn help(&self) -> Option<String> {
        match self {
            GitReleaseError::RateLimited { provider, .. } => token_env_var(provider).map(|var| {
                format!(
                    "Authenticated requests get a higher quota. Set {} or pass --{}-token.",
                    var,
                    provider.to_lowercase()
                )
            }),
            GitReleaseError::NotFound { .. } => Some(
                "Check the repository identifier and the --provider flag. Private repositories need a token."
                    .to_string(),
            ),
            GitReleaseError::NoTagsForPrefix(_) => Some(
                "Tags are matched as <tag prefix><version prefix>. Use --tag-prefix if the project does not use the default."
                    .to_string(),
            ),
            GitReleaseError::Http(e) if e.is_timeout() => {
                Some("The request timed out. Raise it with --timeout.".to_string())
            }
            _ => None,
        }
    }
}

/// Format an error for the terminal, followed by a hint when one applies.
pub fn format_error_with_help(error: &GitReleaseError) -> String {
    match error.help() {
        Some(help) => format!("Error fetching latest release/tag: {}\n  hint: {}", error, help),
        None => format!("Error fetching latest release/tag: {}", error),
    }
}
