//! Dependency injection seams
//!
//! Resolution code talks to providers through [`TagSource`], so it can be
//! exercised against [`mocks::MockTagSource`] without a network.
//!
//! # Example (Testing)
//! ```
//! use gitrelease::di::mocks::MockTagSource;
//! use gitrelease::provider::Provider;
//! use gitrelease::resolve::resolve_tag;
//!
//! # async fn example() -> gitrelease::core::GitReleaseResult<()> {
//! let source = MockTagSource::new(Provider::GitLab).with_tags(["php-8.2.1", "php-8.2.26"]);
//! let tag = resolve_tag(&source, "php/php-src", Some("8.2"), "php-").await?;
//! assert_eq!(tag, "php-8.2.26");
//! # Ok(())
//! # }
//! ```

pub mod mocks;
pub mod traits;

pub use traits::TagSource;
