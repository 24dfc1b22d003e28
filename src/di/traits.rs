//! Trait definitions for dependency injection

use crate::core::GitReleaseResult;
use crate::provider::Provider;
use async_trait::async_trait;

/// Source of release and tag names for one hosting provider
///
/// Implementations only fetch; filtering and ordering happen in the
/// resolver so that every provider shares them.
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Provider this source talks to
    fn provider(&self) -> Provider;

    /// Tag of the release the provider itself reports as latest.
    ///
    /// No ordering is applied: the answer is whatever the provider's
    /// latest-release endpoint (or first listed tag) says.
    async fn latest_release(&self, repo: &str) -> GitReleaseResult<String>;

    /// Every tag name of the repository, across all pages, in provider order
    async fn all_tags(&self, repo: &str) -> GitReleaseResult<Vec<String>>;
}
