//! Core of GitRelease: error types, version parsing and the tag
//! resolution pipeline shared by every hosting provider.

pub mod core;
pub mod resolver;

pub use crate::core::error_help::{format_error_with_help, ErrorHelp};
pub use crate::core::{GitReleaseError, GitReleaseResult, Version};
