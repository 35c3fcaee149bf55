use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{
    header::{ACCEPT, AUTHORIZATION},
    Client,
};
use serde::Deserialize;
use tracing::debug;

use crate::config::GithubConfig;

use super::{
    client::{ensure_success, REST_ACCEPT},
    ActivityChecker,
};

/// Biggest page GitHub serves. Only the first page is read, more than a hundred events on a
/// single day is not something we need to see to know the day wasn't wasted.
const EVENTS_PAGE_SIZE: &str = "100";

const PUSH_EVENT: &str = "PushEvent";

/// Reads the public event feed of the user.
pub struct EventFeedChecker {
    client: Client,
    config: GithubConfig,
    pushes_only: bool,
}

#[derive(Debug, Deserialize)]
pub struct PublicEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

impl PublicEvent {
    fn qualifies(&self, date: NaiveDate, pushes_only: bool) -> bool {
        self.created_at.date_naive() == date && (!pushes_only || self.kind == PUSH_EVENT)
    }
}

impl EventFeedChecker {
    pub fn new(client: Client, config: GithubConfig, pushes_only: bool) -> Self {
        Self {
            client,
            config,
            pushes_only,
        }
    }

    async fn fetch_events(&self) -> Result<Vec<PublicEvent>> {
        let url = self
            .config
            .endpoint(&format!("users/{}/events/public", self.config.user));
        debug!("Requesting public events from {url}");

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", EVENTS_PAGE_SIZE)])
            .header(AUTHORIZATION, self.config.authorization())
            .header(ACCEPT, REST_ACCEPT)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        ensure_success(response)
            .await?
            .json()
            .await
            .context("Malformed events response")
    }
}

#[async_trait]
impl ActivityChecker for EventFeedChecker {
    async fn has_activity_on(&self, date: NaiveDate) -> Result<bool> {
        let events = self.fetch_events().await?;
        debug!("Received {} events", events.len());
        Ok(events
            .iter()
            .any(|event| event.qualifies(date, self.pushes_only)))
    }
}
