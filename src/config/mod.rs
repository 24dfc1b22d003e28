use crate::core::path::config_file;
use crate::core::resolver::DEFAULT_TAG_PREFIX;
use crate::core::{GitReleaseError, GitReleaseResult};
use crate::provider::Provider;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Optional on-disk configuration.
///
/// Every field has a default, so an absent file and an empty file behave
/// the same. The file is only ever read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API root (GitHub Enterprise: `https://<host>/api/v3`)
    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,

    /// GitLab API root (self-managed: `https://<host>/api/v4`)
    #[serde(default = "default_gitlab_api_url")]
    pub gitlab_api_url: String,

    #[serde(default = "default_bitbucket_api_url")]
    pub bitbucket_api_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Tags requested per page when listing tags
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Literal prefix every release tag starts with
    #[serde(default = "default_tag_prefix")]
    pub tag_prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gitlab_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitbucket_token: Option<String>,
}

fn default_github_api_url() -> String {
    Provider::GitHub.default_api_url().to_string()
}

fn default_gitlab_api_url() -> String {
    Provider::GitLab.default_api_url().to_string()
}

fn default_bitbucket_api_url() -> String {
    Provider::Bitbucket.default_api_url().to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> u32 {
    100
}

fn default_tag_prefix() -> String {
    DEFAULT_TAG_PREFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api_url: default_github_api_url(),
            gitlab_api_url: default_gitlab_api_url(),
            bitbucket_api_url: default_bitbucket_api_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            tag_prefix: default_tag_prefix(),
            github_token: None,
            gitlab_token: None,
            bitbucket_token: None,
        }
    }
}

impl Config {
    /// Load config from the platform-specific config directory, falling back
    /// to defaults when there is no file
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\gitrelease\config.yaml
    /// - Linux: ~/.config/gitrelease/config.yaml
    /// - macOS: ~/Library/Application Support/gitrelease/config.yaml
    pub fn load() -> GitReleaseResult<Self> {
        let config_path = match config_file() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("no config directory, using defaults: {}", e);
                return Ok(Self::default());
            }
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load config from an explicit path, which must exist
    pub fn load_from(path: &Path) -> GitReleaseResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            GitReleaseError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        tracing::debug!("loaded config from {}", path.display());
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> GitReleaseResult<Self> {
        // An empty document deserializes as unit, not as a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| GitReleaseError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GitReleaseResult<()> {
        if self.page_size == 0 {
            return Err(GitReleaseError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(GitReleaseError::Config(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn api_url(&self, provider: Provider) -> &str {
        match provider {
            Provider::GitHub => &self.github_api_url,
            Provider::GitLab => &self.gitlab_api_url,
            Provider::Bitbucket => &self.bitbucket_api_url,
        }
    }

    pub fn token(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::GitHub => self.github_token.as_deref(),
            Provider::GitLab => self.gitlab_token.as_deref(),
            Provider::Bitbucket => self.bitbucket_token.as_deref(),
        }
    }
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub token: Option<String>,
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub tag_prefix: Option<String>,
}

/// Everything one resolution needs, resolved once up front.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub provider: Provider,
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub page_size: u32,
    pub tag_prefix: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .field("tag_prefix", &self.tag_prefix)
            .finish()
    }
}

impl Settings {
    /// Merge command line, environment and config file.
    ///
    /// Token order is flag, then the provider's environment variable, then
    /// the config file. Empty values count as unset at every level. `env`
    /// looks up an environment variable by name.
    pub fn resolve<F>(
        provider: Provider,
        config: &Config,
        overrides: Overrides,
        env: F,
    ) -> GitReleaseResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = non_empty(overrides.token)
            .or_else(|| non_empty(env(provider.token_env_var())))
            .or_else(|| non_empty(config.token(provider).map(str::to_string)));

        let api_url = non_empty(overrides.api_url)
            .unwrap_or_else(|| config.api_url(provider).to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = overrides.timeout_secs.unwrap_or(config.timeout_secs);
        if timeout_secs == 0 {
            return Err(GitReleaseError::Config(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        let tag_prefix = overrides
            .tag_prefix
            .unwrap_or_else(|| config.tag_prefix.clone());

        Ok(Self {
            provider,
            api_url,
            token,
            timeout: Duration::from_secs(timeout_secs),
            page_size: config.page_size,
            tag_prefix,
        })
    }

    /// Settings with defaults for `provider`, ignoring the environment
    pub fn defaults(provider: Provider) -> Self {
        Self {
            provider,
            api_url: provider.default_api_url().to_string(),
            token: None,
            timeout: Duration::from_secs(default_timeout_secs()),
            page_size: default_page_size(),
            tag_prefix: default_tag_prefix(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
