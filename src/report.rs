//! The status README regenerated on every run.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::stats::SummaryStats;

/// Renders the status document. Every value comes from `stats`, nothing is carried over from a
/// previous report.
pub fn render_report(stats: &SummaryStats) -> String {
    format!(
        "# 🧱 Wall of Shame

A repository that holds me accountable when I fail to push code daily.

---

## 😔 Total Shameful Days: **{total}**
## 🗓️ Last Shame: **{last_shame}**
## 🔥 Current Discipline Streak: **{streak}**

---

If you're reading this, I either:
- Coded and pushed today 💪
- Or... this repo is calling me out 😤
",
        total = stats.total,
        last_shame = stats.last_shame,
        streak = stats.streak,
    )
}

/// Replaces the report at `path`. The document is written next to it first and renamed over, so
/// the report is never left half written.
pub async fn write_report(path: &Path, stats: &SummaryStats) -> Result<()> {
    let mut temporary = path.as_os_str().to_owned();
    temporary.push(".tmp");
    let temporary = Path::new(&temporary);

    debug!("Writing report {path:?}");
    tokio::fs::write(temporary, render_report(stats))
        .await
        .with_context(|| format!("Failed to write {temporary:?}"))?;
    if let Err(e) = tokio::fs::rename(temporary, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(temporary).await {
            warn!("Failed to remove {temporary:?}: {cleanup}");
        }
        return Err(e).with_context(|| format!("Failed to replace report {path:?}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::stats::{LastShame, Streak, SummaryStats};

    use super::{render_report, write_report};

    #[test]
    fn test_render_with_markers() {
        let report = render_report(&SummaryStats {
            total: 2,
            last_shame: LastShame::On(NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()),
            streak: Streak::Days(7),
        });
        assert!(report.starts_with("# 🧱 Wall of Shame\n"));
        assert!(report.contains("## 😔 Total Shameful Days: **2**\n"));
        assert!(report.contains("## 🗓️ Last Shame: **2024-01-03**\n"));
        assert!(report.contains("## 🔥 Current Discipline Streak: **7 days**\n"));

        let report = render_report(&SummaryStats {
            total: 2,
            last_shame: LastShame::On(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()),
            streak: Streak::Days(1),
        });
        assert!(report.contains("## 🔥 Current Discipline Streak: **1 days**\n"));
    }

    #[test]
    fn test_render_without_markers() {
        let report = render_report(&SummaryStats {
            total: 0,
            last_shame: LastShame::Never,
            streak: Streak::PerfectDiscipline,
        });
        assert!(report.contains("**0**"));
        assert!(report.contains("## 🗓️ Last Shame: **Never**\n"));
        assert!(
            report.contains("## 🔥 Current Discipline Streak: **🔥 Perfect Discipline!**\n")
        );
    }

    #[tokio::test]
    async fn test_report_is_fully_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("README.md");
        fs::write(&path, "stale content ".repeat(1000))?;

        let stats = SummaryStats {
            total: 1,
            last_shame: LastShame::On(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()),
            streak: Streak::Days(0),
        };
        write_report(&path, &stats).await?;

        assert_eq!(fs::read_to_string(&path)?, render_report(&stats));
        assert!(!dir.path().join("README.md.tmp").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_replace_leaves_no_temporary_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("README.md");
        fs::create_dir(&path)?;
        fs::write(path.join("occupied"), "")?;

        let stats = SummaryStats {
            total: 1,
            last_shame: LastShame::On(NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()),
            streak: Streak::Days(1),
        };
        let error = write_report(&path, &stats).await.unwrap_err();

        assert!(error.to_string().contains("Failed to replace report"));
        assert!(!dir.path().join("README.md.tmp").exists());
        assert!(path.join("occupied").exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("missing").join("README.md");
        let stats = SummaryStats {
            total: 0,
            last_shame: LastShame::Never,
            streak: Streak::PerfectDiscipline,
        };
        assert!(write_report(&path, &stats).await.is_err());
        Ok(())
    }
}
