use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header::AUTHORIZATION, Client};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::GithubConfig;

use super::{client::ensure_success, ActivityChecker};

const CONTRIBUTIONS_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// Reads the contribution calendar that GitHub shows on the profile page.
pub struct CalendarChecker {
    client: Client,
    config: GithubConfig,
}

impl CalendarChecker {
    pub fn new(client: Client, config: GithubConfig) -> Self {
        Self { client, config }
    }

    async fn fetch_calendar(&self) -> Result<ContributionCalendar> {
        let url = self.config.endpoint("graphql");
        debug!("Requesting contribution calendar of {} from {url}", self.config.user);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.config.authorization())
            .json(&json!({
                "query": CONTRIBUTIONS_QUERY,
                "variables": { "login": self.config.user },
            }))
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        let response: GraphQlResponse = ensure_success(response)
            .await?
            .json()
            .await
            .context("Malformed GraphQL response")?;

        if let Some(errors) = response.errors.filter(|v| !v.is_empty()) {
            let messages = errors
                .into_iter()
                .map(|v| v.message)
                .collect::<Vec<_>>()
                .join("; ");
            bail!("GraphQL query failed: {messages}");
        }

        let user = response
            .data
            .and_then(|v| v.user)
            .ok_or_else(|| anyhow!("GitHub user {} not found", self.config.user))?;
        Ok(user.contributions_collection.contribution_calendar)
    }
}

#[async_trait]
impl ActivityChecker for CalendarChecker {
    async fn has_activity_on(&self, date: NaiveDate) -> Result<bool> {
        let calendar = self.fetch_calendar().await?;
        Ok(calendar.contributions_on(date) > 0)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<GraphQlData>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GraphQlData {
    user: Option<CalendarUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CalendarUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
pub struct ContributionCalendar {
    pub weeks: Vec<ContributionWeek>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<ContributionDay>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContributionDay {
    pub date: NaiveDate,
    pub contribution_count: u32,
}

impl ContributionCalendar {
    /// Sum of contributions on `date`. GitHub lists every day once, but summing keeps this
    /// correct if it ever doesn't.
    pub fn contributions_on(&self, date: NaiveDate) -> u32 {
        self.weeks
            .iter()
            .flat_map(|week| &week.contribution_days)
            .filter(|day| day.date == date)
            .map(|day| day.contribution_count)
            .sum()
    }
}
