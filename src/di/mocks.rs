//! Mock implementations of service traits for testing

use super::traits::TagSource;
use crate::core::{GitReleaseError, GitReleaseResult};
use crate::provider::Provider;
use async_trait::async_trait;
use std::sync::Mutex;

/// In-memory tag source for testing
///
/// # Example
///
/// ```
/// use gitrelease::di::mocks::MockTagSource;
/// use gitrelease::di::TagSource;
/// use gitrelease::provider::Provider;
///
/// let source = MockTagSource::new(Provider::GitHub)
///     .with_tags(["php-8.2.1", "php-8.2.26"])
///     .with_latest("php-8.3.0");
///
/// assert_eq!(source.provider(), Provider::GitHub);
/// ```
pub struct MockTagSource {
    pub provider: Provider,
    pub latest: Option<String>,
    pub tags: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl MockTagSource {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            latest: None,
            tags: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latest(mut self, tag: impl Into<String>) -> Self {
        self.latest = Some(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Methods called so far, as `"<method> <repo>"`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl TagSource for MockTagSource {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn latest_release(&self, repo: &str) -> GitReleaseResult<String> {
        self.record(format!("latest_release {}", repo));
        self.latest
            .clone()
            .ok_or_else(|| GitReleaseError::NoReleases {
                provider: self.provider.name(),
                repo: repo.to_string(),
            })
    }

    async fn all_tags(&self, repo: &str) -> GitReleaseResult<Vec<String>> {
        self.record(format!("all_tags {}", repo));
        Ok(self.tags.clone())
    }
}
