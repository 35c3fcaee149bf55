use anyhow::{bail, Context, Result};
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::GithubConfig;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const REST_ACCEPT: &str = "application/vnd.github+json";

/// Client shared by all strategies. The timeout covers the whole request so that a hanging
/// GitHub can't hang the scheduled job.
pub fn github_client(config: &GithubConfig) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(config.timeout)
        .build()
        .context("Failed to build http client")
}

/// Turns non-success statuses into errors, keeping the body for diagnostics.
pub async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        debug!("GitHub responded with {status}");
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    bail!("GitHub API error: HTTP {status}: {body}")
}
