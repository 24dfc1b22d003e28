use clap::{CommandFactory, Parser};
use gitrelease::config::{Config, Overrides, Settings};
use gitrelease::core::{format_error_with_help, GitReleaseResult};
use gitrelease::provider::{Provider, ProviderClient};
use gitrelease::resolve::resolve_tag;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gitrelease")]
#[command(about = "Print the latest release tag of a GitHub, GitLab or Bitbucket repository")]
#[command(version)]
struct Cli {
    /// Repository in the format 'owner/repo' or 'namespace/project' for GitLab
    #[arg(long)]
    repo: Option<String>,

    /// Provider: github, gitlab, bitbucket
    #[arg(long, default_value = "github")]
    provider: String,

    /// Version prefix (e.g. '8.2') to fetch the latest tag matching that version
    #[arg(long = "version-prefix", visible_alias = "prefix")]
    version_prefix: Option<String>,

    /// GitHub personal access token (falls back to GITHUB_TOKEN)
    #[arg(long)]
    github_token: Option<String>,

    /// GitLab personal access token (falls back to GITLAB_TOKEN)
    #[arg(long)]
    gitlab_token: Option<String>,

    /// Bitbucket access token (falls back to BITBUCKET_TOKEN)
    #[arg(long)]
    bitbucket_token: Option<String>,

    /// Literal prefix of release tags [default: php-]
    #[arg(long)]
    tag_prefix: Option<String>,

    /// Override the provider API base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds [default: 10]
    #[arg(long)]
    timeout: Option<u64>,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn token_for(&self, provider: Provider) -> Option<String> {
        match provider {
            Provider::GitHub => self.github_token.clone(),
            Provider::GitLab => self.gitlab_token.clone(),
            Provider::Bitbucket => self.bitbucket_token.clone(),
        }
    }
}

fn print_usage() {
    println!("GitRelease {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("{}", Cli::command().render_help());
}

async fn run(cli: &Cli, repo: &str) -> GitReleaseResult<String> {
    let provider: Provider = cli.provider.parse()?;

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let settings = Settings::resolve(
        provider,
        &config,
        Overrides {
            token: cli.token_for(provider),
            api_url: cli.api_url.clone(),
            timeout_secs: cli.timeout,
            tag_prefix: cli.tag_prefix.clone(),
        },
        |name| std::env::var(name).ok(),
    )?;
    tracing::debug!(?settings, "resolved settings");

    let client = ProviderClient::new(&settings)?;
    resolve_tag(
        &client,
        repo,
        cli.version_prefix.as_deref(),
        &settings.tag_prefix,
    )
    .await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the tag
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(repo) = cli.repo.as_deref().filter(|r| !r.is_empty()) else {
        print_usage();
        return ExitCode::FAILURE;
    };

    match run(&cli, repo).await {
        Ok(tag) => {
            println!("{}", tag);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
