//! Provider API payloads
//!
//! Only the tag name is consumed; everything else in the responses is
//! ignored by serde.

use serde::Deserialize;

/// GitHub `releases/latest` object, also one entry of GitLab's release list
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag_name: String,
}

/// One entry of a GitHub or GitLab tag listing, or of Bitbucket's `values`
#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// Bitbucket paginated ref listing
#[derive(Debug, Clone, Deserialize)]
pub struct BitbucketTagPage {
    #[serde(default)]
    pub values: Vec<Tag>,
    #[serde(default)]
    pub next: Option<String>,
}

impl BitbucketTagPage {
    /// Link to the following page, treating an empty string as absent.
    pub fn next_link(&self) -> Option<&str> {
        self.next.as_deref().filter(|link| !link.is_empty())
    }
}
