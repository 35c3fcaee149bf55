//! Contains logic for asking GitHub whether the tracked user did anything on a given day.
//! [GenericActivityChecker] is the main artifact of this module that abstracts
//! the strategies.

pub mod calendar;
pub mod client;
pub mod events;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};

#[cfg(test)]
use mockall::automock;

use crate::config::{CheckConfig, Strategy};

use self::{calendar::CalendarChecker, events::EventFeedChecker};

/// Intended to serve as a contract every source of activity must implement.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ActivityChecker: Send + Sync {
    /// Whether the user has a qualifying activity on the UTC `date`. Errors are reported as is,
    /// see [activity_found] for the fail-closed variant.
    async fn has_activity_on(&self, date: NaiveDate) -> Result<bool>;
}

/// Serves as a strategy-independent ActivityChecker implementation.
pub struct GenericActivityChecker {
    inner: Box<dyn ActivityChecker>,
}

impl GenericActivityChecker {
    pub fn new(config: &CheckConfig) -> Result<Self> {
        let client = client::github_client(&config.github)?;
        let inner: Box<dyn ActivityChecker> = match config.strategy {
            Strategy::Calendar => Box::new(CalendarChecker::new(client, config.github.clone())),
            Strategy::Events => {
                Box::new(EventFeedChecker::new(client, config.github.clone(), false))
            }
            Strategy::Pushes => {
                Box::new(EventFeedChecker::new(client, config.github.clone(), true))
            }
        };
        Ok(Self { inner })
    }
}

#[async_trait]
impl ActivityChecker for GenericActivityChecker {
    async fn has_activity_on(&self, date: NaiveDate) -> Result<bool> {
        self.inner.has_activity_on(date).await
    }
}

/// Fail-closed check. Any failure of the checker counts as no activity, so an outage of GitHub
/// looks exactly like a lazy day.
pub async fn activity_found(checker: &dyn ActivityChecker, date: NaiveDate) -> bool {
    match checker.has_activity_on(date).await {
        Ok(found) => {
            info!(%date, found, "Activity check finished");
            found
        }
        Err(e) => {
            warn!("Failed to check activity for {date}, counting it as no activity: {e:?}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use mockito::{Matcher, Mock, Server, ServerGuard};
    use serde_json::json;

    use super::{activity_found, MockActivityChecker};
    use crate::{
        config::{AuthScheme, CheckConfig, GithubConfig, Strategy},
        utils::logging::TEST_LOGGING,
    };

    use super::{ActivityChecker, GenericActivityChecker};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
    }

    #[tokio::test]
    async fn test_found_activity_is_passed_through() {
        *TEST_LOGGING;
        let mut checker = MockActivityChecker::new();
        checker
            .expect_has_activity_on()
            .with(eq(day()))
            .times(1)
            .returning(|_| Ok(true));

        assert!(activity_found(&checker, day()).await);
    }

    #[tokio::test]
    async fn test_errors_count_as_no_activity() {
        *TEST_LOGGING;
        let mut checker = MockActivityChecker::new();
        checker
            .expect_has_activity_on()
            .times(1)
            .returning(|_| Err(anyhow!("GitHub API error: HTTP 502")));

        assert!(!activity_found(&checker, day()).await);
    }

    /// Serves both endpoints. Today the calendar has contributions while the only public event is
    /// a star, so every strategy answers differently from the endpoint it should not call.
    async fn selection_server(graphql_hits: usize, events_hits: usize) -> (ServerGuard, Vec<Mock>) {
        let mut server = Server::new_async().await;
        let graphql = server
            .mock("POST", "/graphql")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "data": { "user": { "contributionsCollection": { "contributionCalendar": {
                        "weeks": [{ "contributionDays": [
                            { "date": "2024-01-10", "contributionCount": 3 }
                        ] }]
                    } } } }
                })
                .to_string(),
            )
            .expect(graphql_hits)
            .create_async()
            .await;
        let events = server
            .mock("GET", "/users/octocat/events/public")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([{ "type": "WatchEvent", "created_at": "2024-01-10T12:00:00Z" }]).to_string(),
            )
            .expect(events_hits)
            .create_async()
            .await;
        (server, vec![graphql, events])
    }

    #[tokio::test]
    async fn test_strategy_selects_endpoint_and_filter() -> anyhow::Result<()> {
        let cases = [
            (Strategy::Calendar, 1, 0, true),
            (Strategy::Events, 0, 1, true),
            (Strategy::Pushes, 0, 1, false),
        ];
        for (strategy, graphql_hits, events_hits, expected) in cases {
            let (server, mocks) = selection_server(graphql_hits, events_hits).await;
            let config = CheckConfig {
                github: GithubConfig::new(
                    "octocat",
                    "secret",
                    AuthScheme::Bearer,
                    &server.url(),
                    5,
                )?,
                strategy,
            };

            let found = GenericActivityChecker::new(&config)?
                .has_activity_on(day())
                .await?;

            assert_eq!(found, expected, "{strategy}");
            for mock in mocks {
                mock.assert_async().await;
            }
        }
        Ok(())
    }

    #[test]
    fn test_every_strategy_builds() -> anyhow::Result<()> {
        for strategy in [Strategy::Calendar, Strategy::Events, Strategy::Pushes] {
            let config = CheckConfig {
                github: GithubConfig::new(
                    "octocat",
                    "secret",
                    AuthScheme::Bearer,
                    "https://api.github.com",
                    5,
                )?,
                strategy,
            };
            GenericActivityChecker::new(&config)?;
        }
        Ok(())
    }
}
