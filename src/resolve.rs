//! One resolution: pick the release tag to report for a repository

use crate::core::resolver::TagMatcher;
use crate::core::GitReleaseResult;
use crate::di::TagSource;

/// Resolve the tag to report for `repo`.
///
/// With a version prefix, every tag is fetched and the highest version
/// matching `<tag_prefix><version_prefix>` wins. Without one, the provider's
/// own notion of "latest" is trusted as-is.
pub async fn resolve_tag(
    source: &dyn TagSource,
    repo: &str,
    version_prefix: Option<&str>,
    tag_prefix: &str,
) -> GitReleaseResult<String> {
    let provider = source.provider().name();

    match version_prefix.filter(|p| !p.is_empty()) {
        Some(prefix) => {
            let matcher = TagMatcher::new(tag_prefix, prefix);
            tracing::info!(
                provider,
                repo,
                prefix = %matcher.match_prefix(),
                "resolving latest matching tag"
            );

            let tags = source.all_tags(repo).await?;
            let tag = matcher.latest(&tags)?;
            tracing::info!(%tag, candidates = tags.len(), "resolved");
            Ok(tag)
        }
        None => {
            tracing::info!(provider, repo, "resolving latest release");
            source.latest_release(repo).await
        }
    }
}
