//! Version-aware tag resolution
//!
//! Tags are selected by a literal `<tag prefix><version prefix>` match, the
//! remainder after the tag prefix is parsed as a semantic version, and the
//! highest version wins. Tags whose remainder does not parse are dropped
//! without a diagnostic; an empty result at either stage is an error.

use crate::core::error::{GitReleaseError, GitReleaseResult};
use crate::core::version::Version;

/// Literal prefix the tracked project puts in front of every release tag.
pub const DEFAULT_TAG_PREFIX: &str = "php-";

/// Tag selection rules for one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatcher {
    tag_prefix: String,
    version_prefix: String,
}

impl TagMatcher {
    pub fn new(tag_prefix: impl Into<String>, version_prefix: impl Into<String>) -> Self {
        Self {
            tag_prefix: tag_prefix.into(),
            version_prefix: version_prefix.into(),
        }
    }

    /// The full literal a tag has to start with, e.g. `php-8.2`.
    pub fn match_prefix(&self) -> String {
        format!("{}{}", self.tag_prefix, self.version_prefix)
    }

    /// Keep the tags starting with the match prefix, in input order.
    pub fn filter<'a>(&self, tags: &'a [String]) -> Vec<&'a str> {
        let prefix = self.match_prefix();
        tags.iter()
            .map(String::as_str)
            .filter(|tag| tag.starts_with(&prefix))
            .collect()
    }

    /// Parse the version carried by `tag`, if any.
    pub fn version_of(&self, tag: &str) -> Option<Version> {
        let remainder = tag.strip_prefix(&self.tag_prefix)?;
        Version::parse(remainder).ok()
    }

    /// Sort tags highest version first, dropping the ones that don't parse.
    ///
    /// Tags with equal versions keep no particular relative order.
    pub fn sort_descending(&self, tags: &[&str]) -> GitReleaseResult<Vec<String>> {
        let mut versioned: Vec<(Version, &str)> = tags
            .iter()
            .filter_map(|tag| self.version_of(tag).map(|v| (v, *tag)))
            .collect();

        if versioned.is_empty() {
            return Err(GitReleaseError::NoSemverTags);
        }

        versioned.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        Ok(versioned.into_iter().map(|(_, tag)| tag.to_string()).collect())
    }

    /// Pick the highest-versioned tag matching the prefix.
    pub fn latest(&self, tags: &[String]) -> GitReleaseResult<String> {
        let filtered = self.filter(tags);
        if filtered.is_empty() {
            return Err(GitReleaseError::NoTagsForPrefix(self.version_prefix.clone()));
        }

        let sorted = self.sort_descending(&filtered)?;
        sorted
            .into_iter()
            .next()
            .ok_or(GitReleaseError::NoSemverTags)
    }
}
