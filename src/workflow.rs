//! Represents a single run of the application: check, maybe mark, summarize, report.

use anyhow::Result;
use tracing::{info, info_span, Instrument};

use crate::{
    activity::{activity_found, ActivityChecker},
    config::Config,
    ledger::{entities::MarkerWrite, ShameLedger},
    report::write_report,
    stats::SummaryStats,
    utils::clock::Clock,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub activity_found: bool,
    /// Set only when no activity was found.
    pub marker: Option<MarkerWrite>,
    pub stats: SummaryStats,
}

/// Checks today's activity, records a marker if there was none and regenerates the report.
/// Not finding activity is a normal outcome. Only ledger and report failures are errors.
pub async fn run_check(
    config: &Config,
    checker: &dyn ActivityChecker,
    ledger: &impl ShameLedger,
    clock: &dyn Clock,
) -> Result<CheckOutcome> {
    let today = clock.today();

    let found = activity_found(checker, today)
        .instrument(info_span!("Checking activity", %today))
        .await;

    let marker = if found {
        None
    } else {
        info!("No activity on {today}, writing a marker");
        Some(ledger.write_marker(today).await?)
    };

    let stats = refresh_status(config, ledger, clock).await?;

    Ok(CheckOutcome {
        activity_found: found,
        marker,
        stats,
    })
}

/// Recomputes statistics from the ledger and rewrites the report. No network involved.
pub async fn refresh_status(
    config: &Config,
    ledger: &impl ShameLedger,
    clock: &dyn Clock,
) -> Result<SummaryStats> {
    let markers = ledger.list_markers().await?;
    let stats = SummaryStats::compute(&markers, clock.today());
    info!(
        total = stats.total,
        last_shame = %stats.last_shame,
        streak = %stats.streak,
        "Computed statistics"
    );
    write_report(&config.report_path, &stats).await?;
    Ok(stats)
}
