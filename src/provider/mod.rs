//! Hosting providers and their wire conventions
//!
//! Every provider is served by the same [`ProviderClient`]; this module
//! holds what differs between them: URL layout, auth header, pagination
//! style and how a rate-limit response looks.

pub mod client;
pub mod types;

pub use client::ProviderClient;

use crate::core::{GitReleaseError, GitReleaseResult};
use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderName, AUTHORIZATION, RETRY_AFTER};
use reqwest::StatusCode;
use std::fmt;
use std::str::FromStr;

/// Supported hosting providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    GitHub,
    GitLab,
    Bitbucket,
}

/// How a tag listing is walked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// `page` / page-size query parameters; a short or empty page ends it.
    PageNumber,
    /// Server-provided `next` URL; an absent link ends it.
    NextLink,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::GitHub, Provider::GitLab, Provider::Bitbucket];

    /// Display name used in messages
    pub fn name(self) -> &'static str {
        match self {
            Provider::GitHub => "GitHub",
            Provider::GitLab => "GitLab",
            Provider::Bitbucket => "Bitbucket",
        }
    }

    /// Value accepted by `--provider`
    pub fn id(self) -> &'static str {
        match self {
            Provider::GitHub => "github",
            Provider::GitLab => "gitlab",
            Provider::Bitbucket => "bitbucket",
        }
    }

    pub fn default_api_url(self) -> &'static str {
        match self {
            Provider::GitHub => "https://api.github.com",
            Provider::GitLab => "https://gitlab.com/api/v4",
            Provider::Bitbucket => "https://api.bitbucket.org/2.0",
        }
    }

    /// Environment variable consulted when no token flag is given
    pub fn token_env_var(self) -> &'static str {
        match self {
            Provider::GitHub => "GITHUB_TOKEN",
            Provider::GitLab => "GITLAB_TOKEN",
            Provider::Bitbucket => "BITBUCKET_TOKEN",
        }
    }

    pub fn pagination(self) -> Pagination {
        match self {
            Provider::GitHub | Provider::GitLab => Pagination::PageNumber,
            Provider::Bitbucket => Pagination::NextLink,
        }
    }

    /// Header name and value carrying `token`
    pub fn auth_header(self, token: &str) -> (HeaderName, String) {
        match self {
            Provider::GitHub => (AUTHORIZATION, format!("token {}", token)),
            Provider::GitLab => (HeaderName::from_static("private-token"), token.to_string()),
            Provider::Bitbucket => (AUTHORIZATION, format!("Bearer {}", token)),
        }
    }

    /// User-Agent the provider insists on, if any
    pub fn user_agent(self) -> Option<&'static str> {
        match self {
            Provider::GitHub => Some("gitrelease-cli"),
            Provider::GitLab | Provider::Bitbucket => None,
        }
    }

    /// Path of the repository resource relative to the API root.
    pub fn repo_path(self, repo: &str) -> GitReleaseResult<String> {
        match self {
            Provider::GitHub => Ok(format!("repos/{}", repo)),
            Provider::GitLab => Ok(format!("projects/{}", urlencoding::encode(repo))),
            Provider::Bitbucket => {
                let (owner, name) = split_owner_repo(repo).ok_or_else(|| {
                    GitReleaseError::InvalidRepository(
                        "invalid Bitbucket repository format. Expected 'owner/repo'".to_string(),
                    )
                })?;
                Ok(format!("repositories/{}/{}", owner, name))
            }
        }
    }

    /// Endpoint (below the repository path) answering "which release is latest"
    pub fn latest_endpoint(self) -> &'static str {
        match self {
            Provider::GitHub => "releases/latest",
            Provider::GitLab => "releases",
            Provider::Bitbucket => "refs/tags",
        }
    }

    /// Tag listing endpoint (below the repository path)
    pub fn tags_endpoint(self) -> &'static str {
        match self {
            Provider::GitHub => "tags",
            Provider::GitLab => "repository/tags",
            Provider::Bitbucket => "refs/tags",
        }
    }

    /// Query string for page `page` of a tag listing. Next-link providers
    /// only use it for the first request.
    pub fn page_query(self, page_size: u32, page: u32) -> String {
        match self.pagination() {
            Pagination::PageNumber => format!("per_page={}&page={}", page_size, page),
            Pagination::NextLink => format!("pagelen={}", page_size),
        }
    }

    /// What a 404 on the latest-release endpoint means
    pub fn latest_not_found_subject(self) -> &'static str {
        match self {
            Provider::GitHub => "repository or release",
            Provider::GitLab => "repository or releases",
            Provider::Bitbucket => "repository",
        }
    }

    /// Translate a rate-limit response into an error.
    ///
    /// GitHub answers 403 with `X-RateLimit-Remaining: 0`; a 403 without that
    /// header is an ordinary permission error. GitLab and Bitbucket answer
    /// 429, optionally with `Retry-After`.
    pub fn rate_limit_error(
        self,
        status: StatusCode,
        headers: &HeaderMap,
    ) -> Option<GitReleaseError> {
        let detail = match self {
            Provider::GitHub => {
                if status != StatusCode::FORBIDDEN
                    || header_str(headers, "x-ratelimit-remaining") != Some("0")
                {
                    return None;
                }
                header_str(headers, "x-ratelimit-reset")
                    .and_then(|v| v.parse::<i64>().ok())
                    .and_then(format_reset_time)
                    .map(|at| format!(". Try again at {}", at))
                    .unwrap_or_default()
            }
            Provider::GitLab | Provider::Bitbucket => {
                if status != StatusCode::TOO_MANY_REQUESTS {
                    return None;
                }
                headers
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .map(|v| format!(". Retry after {} seconds", v.trim()))
                    .unwrap_or_default()
            }
        };

        Some(GitReleaseError::RateLimited {
            provider: self.name(),
            detail,
        })
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Provider {
    type Err = GitReleaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                GitReleaseError::Config(format!(
                    "Unsupported provider: {}. Supported providers are github, gitlab, bitbucket.",
                    s
                ))
            })
    }
}

/// Render a Unix timestamp as a UTC wall-clock time.
pub fn format_reset_time(unix: i64) -> Option<String> {
    DateTime::from_timestamp(unix, 0).map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok()).map(str::trim)
}

fn split_owner_repo(repo: &str) -> Option<(&str, &str)> {
    let mut parts = repo.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
            Some((owner, name))
        }
        _ => None,
    }
}
