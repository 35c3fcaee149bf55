//! Explicit configuration. Everything is read once in [crate::cli] and passed down by reference.

use std::{
    fmt::{Debug, Display},
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use reqwest::Url;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where to look for activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// GraphQL contribution calendar. Counts anything GitHub shows on the profile graph.
    Calendar,
    /// Any public event of the user.
    Events,
    /// Only public push events of the user.
    Pushes,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Calendar => write!(f, "calendar"),
            Strategy::Events => write!(f, "events"),
            Strategy::Pushes => write!(f, "pushes"),
        }
    }
}

/// Scheme used in the `Authorization` header. GitHub accepts both for personal access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthScheme {
    Bearer,
    Token,
}

impl AuthScheme {
    pub fn header_value(self, token: &str) -> String {
        match self {
            AuthScheme::Bearer => format!("Bearer {token}"),
            AuthScheme::Token => format!("token {token}"),
        }
    }
}

impl Display for AuthScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthScheme::Bearer => write!(f, "bearer"),
            AuthScheme::Token => write!(f, "token"),
        }
    }
}

/// Locations of the ledger and the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ledger_dir: PathBuf,
    pub report_path: PathBuf,
}

impl Config {
    pub fn new(base_dir: &Path, shame_dir: &Path, readme: &Path) -> Self {
        Self {
            ledger_dir: base_dir.join(shame_dir),
            report_path: base_dir.join(readme),
        }
    }
}

/// Everything needed to talk to GitHub.
#[derive(Clone)]
pub struct GithubConfig {
    pub user: String,
    pub token: String,
    pub auth_scheme: AuthScheme,
    pub api_url: Url,
    pub timeout: Duration,
}

impl GithubConfig {
    pub fn new(
        user: &str,
        token: &str,
        auth_scheme: AuthScheme,
        api_url: &str,
        timeout_secs: u64,
    ) -> Result<Self> {
        let user = user.trim();
        if user.is_empty() {
            bail!("GitHub username is missing. Set GITHUB_USERNAME or pass --user");
        }
        let token = token.trim();
        if token.is_empty() {
            bail!("GitHub token is missing. Set GITHUB_TOKEN or pass --token");
        }
        if timeout_secs == 0 {
            bail!("Request timeout must be at least one second");
        }

        let api_url = Url::parse(api_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid GitHub API url {api_url}"))?;
        if !matches!(api_url.scheme(), "http" | "https") {
            bail!("GitHub API url must be http(s), got {api_url}");
        }

        Ok(Self {
            user: user.to_string(),
            token: token.to_string(),
            auth_scheme,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Joins `path` onto the API base, keeping any path prefix of an enterprise install.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn authorization(&self) -> String {
        self.auth_scheme.header_value(&self.token)
    }
}

impl Debug for GithubConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubConfig")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .field("auth_scheme", &self.auth_scheme)
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Configuration of the `check` command.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub github: GithubConfig,
    pub strategy: Strategy,
}
