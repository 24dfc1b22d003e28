use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use predicates::prelude::*;
use std::path::PathBuf;

pub mod config;
pub mod resolution;

/// Test context that provides isolated environment for each test
pub struct TestContext {
    pub temp: TempDir,
    pub config_home: PathBuf,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Create a new test context with isolated environment
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let config_home = temp.child("config").to_path_buf();
        std::fs::create_dir_all(&config_home).unwrap();

        Self { temp, config_home }
    }

    /// Create a Command for running gitrelease with proper environment
    ///
    /// Token variables from the developer's shell are removed so tests never
    /// depend on them.
    pub fn gitrelease(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("gitrelease").unwrap();
        cmd.current_dir(&self.temp);

        for var in ["GITHUB_TOKEN", "GITLAB_TOKEN", "BITBUCKET_TOKEN", "RUST_LOG"] {
            cmd.env_remove(var);
        }

        // Point the dirs crate at the temp dir so no real config.yaml is read
        if cfg!(target_os = "windows") {
            cmd.env("APPDATA", &self.config_home);
            cmd.env("USERPROFILE", self.temp.path());
        } else if cfg!(target_os = "linux") {
            cmd.env("XDG_CONFIG_HOME", &self.config_home);
            cmd.env("HOME", self.temp.path());
        } else {
            cmd.env("HOME", self.temp.path());
        }

        cmd
    }

    /// gitrelease pointed at `api_url`
    pub fn against(&self, api_url: &str) -> Command {
        let mut cmd = self.gitrelease();
        cmd.arg("--api-url").arg(api_url);
        cmd
    }

    /// Write a config file into the temp dir and return its path
    pub fn write_config(&self, content: &str) -> PathBuf {
        let file = self.temp.child("gitrelease.yaml");
        file.write_str(content).unwrap();
        file.to_path_buf()
    }
}

/// Predicate matching exactly one line of stdout
pub fn single_line(expected: &str) -> impl Predicate<str> {
    predicate::eq(format!("{}\n", expected))
}
