//! GitRelease: print the latest release tag of a hosted repository
//!
//! This crate wires the provider clients to the tag resolution pipeline
//! from `gitrelease-core` and re-exports the core types.

pub use gitrelease_core::resolver::{TagMatcher, DEFAULT_TAG_PREFIX};
pub use gitrelease_core::{format_error_with_help, GitReleaseError, GitReleaseResult, Version};

/// Core module re-exported from gitrelease-core.
pub mod core {
    pub use gitrelease_core::core::*;
    pub use gitrelease_core::*;
}

/// Configuration (flags, environment, config file).
pub mod config;

/// Hosting providers and the HTTP client that talks to them.
pub mod provider;

/// Dependency injection seams.
pub mod di;

/// Tag resolution entry point.
pub mod resolve;
