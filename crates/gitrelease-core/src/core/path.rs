use crate::core::error::{GitReleaseError, GitReleaseResult};
use std::path::PathBuf;

/// Get the GitRelease configuration directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\gitrelease
/// - Linux: ~/.config/gitrelease
/// - macOS: ~/Library/Application Support/gitrelease
pub fn gitrelease_home() -> GitReleaseResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| GitReleaseError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("gitrelease"))
}

/// Get the default config file path (`<gitrelease_home>/config.yaml`)
pub fn config_file() -> GitReleaseResult<PathBuf> {
    Ok(gitrelease_home()?.join("config.yaml"))
}
