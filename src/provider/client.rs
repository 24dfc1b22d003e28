//! HTTP tag source shared by all providers

use crate::config::Settings;
use crate::core::{GitReleaseError, GitReleaseResult};
use crate::di::TagSource;
use crate::provider::types::{BitbucketTagPage, Release, Tag};
use crate::provider::{Pagination, Provider};
use async_trait::async_trait;
use reqwest::{header, Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

/// Provider API client
///
/// One client serves one provider for one invocation. Requests are issued
/// strictly one after another; any failure aborts the whole operation.
pub struct ProviderClient {
    http_client: HttpClient,
    provider: Provider,
    api_url: String,
    page_size: u32,
}

impl ProviderClient {
    /// Create a client from resolved settings
    pub fn new(settings: &Settings) -> GitReleaseResult<Self> {
        let provider = settings.provider;

        let mut headers = header::HeaderMap::new();
        if let Some(agent) = provider.user_agent() {
            headers.insert(header::USER_AGENT, header::HeaderValue::from_static(agent));
        }

        if let Some(ref token) = settings.token {
            let (name, value) = provider.auth_header(token);
            let mut value = header::HeaderValue::from_str(&value).map_err(|e| {
                GitReleaseError::Config(format!("Invalid {} token: {}", provider.name(), e))
            })?;
            value.set_sensitive(true);
            headers.insert(name, value);
        }

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            http_client,
            provider,
            api_url: settings.api_url.clone(),
            page_size: settings.page_size.max(1),
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Tag of the provider's latest release (first listed tag on Bitbucket)
    pub async fn latest_release(&self, repo: &str) -> GitReleaseResult<String> {
        let url = format!(
            "{}/{}",
            self.repo_url(repo)?,
            self.provider.latest_endpoint()
        );
        let body = self
            .get(&url, repo, self.provider.latest_not_found_subject())
            .await?;

        let tag = match self.provider {
            Provider::GitHub => self.decode::<Release>(&body)?.tag_name,
            Provider::GitLab => self
                .decode::<Vec<Release>>(&body)?
                .into_iter()
                .next()
                .map(|r| r.tag_name)
                .unwrap_or_default(),
            Provider::Bitbucket => self
                .decode::<BitbucketTagPage>(&body)?
                .values
                .into_iter()
                .next()
                .map(|t| t.name)
                .unwrap_or_default(),
        };

        if tag.is_empty() {
            let repo = repo.to_string();
            let provider = self.provider.name();
            return Err(match self.provider {
                Provider::Bitbucket => GitReleaseError::NoTags { provider, repo },
                Provider::GitHub | Provider::GitLab => {
                    GitReleaseError::NoReleases { provider, repo }
                }
            });
        }

        tracing::debug!(provider = self.provider.name(), %tag, "latest release");
        Ok(tag)
    }

    /// Every tag of the repository, following the provider's pagination
    pub async fn all_tags(&self, repo: &str) -> GitReleaseResult<Vec<String>> {
        let base = format!("{}/{}", self.repo_url(repo)?, self.provider.tags_endpoint());

        let tags = match self.provider.pagination() {
            Pagination::PageNumber => self.collect_numbered_pages(&base, repo).await?,
            Pagination::NextLink => self.collect_linked_pages(&base, repo).await?,
        };

        tracing::debug!(
            provider = self.provider.name(),
            count = tags.len(),
            "collected tags"
        );
        Ok(tags)
    }

    async fn collect_numbered_pages(
        &self,
        base: &str,
        repo: &str,
    ) -> GitReleaseResult<Vec<String>> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let url = format!("{}?{}", base, self.provider.page_query(self.page_size, page));
            let body = self.get(&url, repo, "repository").await?;
            let tags: Vec<Tag> = self.decode(&body)?;
            let count = tags.len();
            tracing::debug!(page, count, "fetched tag page");

            if count == 0 {
                break;
            }
            all.extend(tags.into_iter().map(|t| t.name));

            if count < self.page_size as usize {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    async fn collect_linked_pages(&self, base: &str, repo: &str) -> GitReleaseResult<Vec<String>> {
        let mut all = Vec::new();
        let mut url = format!("{}?{}", base, self.provider.page_query(self.page_size, 1));

        loop {
            let body = self.get(&url, repo, "repository").await?;
            let page: BitbucketTagPage = self.decode(&body)?;
            tracing::debug!(%url, count = page.values.len(), "fetched tag page");

            if page.values.is_empty() {
                break;
            }

            let next = page.next_link().map(str::to_string);
            all.extend(page.values.into_iter().map(|t| t.name));

            match next {
                Some(link) => url = link,
                None => break,
            }
        }

        Ok(all)
    }

    fn repo_url(&self, repo: &str) -> GitReleaseResult<String> {
        Ok(format!("{}/{}", self.api_url, self.provider.repo_path(repo)?))
    }

    /// GET `url` and return the body, mapping failure statuses to errors.
    ///
    /// `subject` names what a 404 means ("repository", "repository or release").
    async fn get(&self, url: &str, repo: &str, subject: &'static str) -> GitReleaseResult<String> {
        tracing::debug!(provider = self.provider.name(), %url, "GET");

        let response = self.http_client.get(url).send().await?;
        let status = response.status();

        if let Some(err) = self.provider.rate_limit_error(status, response.headers()) {
            return Err(err);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(GitReleaseError::NotFound {
                provider: self.provider.name(),
                what: subject,
                repo: repo.to_string(),
            });
        }

        if !status.is_success() {
            return Err(GitReleaseError::Api {
                provider: self.provider.name(),
                status: status.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    fn decode<T: DeserializeOwned>(&self, body: &str) -> GitReleaseResult<T> {
        serde_json::from_str(body).map_err(|source| GitReleaseError::Parse {
            provider: self.provider.name(),
            source,
        })
    }
}

// Implement TagSource trait
#[async_trait]
impl TagSource for ProviderClient {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn latest_release(&self, repo: &str) -> GitReleaseResult<String> {
        Self::latest_release(self, repo).await
    }

    async fn all_tags(&self, repo: &str) -> GitReleaseResult<Vec<String>> {
        Self::all_tags(self, repo).await
    }
}
