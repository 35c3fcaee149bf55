//!  The ledger is organized through [DirectoryLedger].
//!  The basic idea is:
//!   - There is a flat directory with all the markers.
//!   - Every UTC day without activity gets one `shame_<date>.txt` file.
//!   - Markers are only ever added, never removed.

pub mod entities;

use std::{future::Future, io::ErrorKind, path::PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use self::entities::{MarkerFile, MarkerWrite};

/// Interface for abstracting storage of markers.
pub trait ShameLedger {
    /// All markers, in chronological order.
    fn list_markers(&self) -> impl Future<Output = Result<Vec<MarkerFile>>>;

    /// Records a day without activity. Writing the same date twice leaves a single marker.
    fn write_marker(&self, date: NaiveDate) -> impl Future<Output = Result<MarkerWrite>>;
}

/// The main realization of [ShameLedger].
pub struct DirectoryLedger {
    ledger_dir: PathBuf,
    initialized: OnceCell<()>,
}

impl DirectoryLedger {
    pub fn new(ledger_dir: PathBuf) -> Self {
        Self {
            ledger_dir,
            initialized: OnceCell::new(),
        }
    }

    /// Creates the directory on first use.
    async fn ensure_dir(&self) -> Result<()> {
        self.initialized
            .get_or_try_init(|| async {
                debug!("Creating ledger directory {:?}", self.ledger_dir);
                tokio::fs::create_dir_all(&self.ledger_dir)
                    .await
                    .with_context(|| {
                        format!("Failed to create ledger directory {:?}", self.ledger_dir)
                    })
            })
            .await?;
        Ok(())
    }
}

impl ShameLedger for DirectoryLedger {
    async fn list_markers(&self) -> Result<Vec<MarkerFile>> {
        self.ensure_dir().await?;

        let mut entries = tokio::fs::read_dir(&self.ledger_dir)
            .await
            .with_context(|| format!("Failed to read ledger directory {:?}", self.ledger_dir))?;

        let mut names = vec![];
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("Failed to read ledger directory {:?}", self.ledger_dir))?
        {
            let name = entry.file_name();
            match name.to_str() {
                Some(name) if MarkerFile::matches_pattern(name) => names.push(name.to_string()),
                _ => debug!("Skipping {name:?}"),
            }
        }

        // Dates are zero padded, so lexicographic order is chronological.
        names.sort();
        names
            .iter()
            .map(|name| MarkerFile::from_file_name(name))
            .collect()
    }

    async fn write_marker(&self, date: NaiveDate) -> Result<MarkerWrite> {
        self.ensure_dir().await?;

        let marker = MarkerFile::new(date);
        let path = self.ledger_dir.join(marker.file_name());

        let existed = match tokio::fs::metadata(&path).await {
            Ok(_) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => Err(e).with_context(|| format!("Failed to inspect {path:?}"))?,
        };

        tokio::fs::write(&path, marker.content())
            .await
            .with_context(|| format!("Failed to write marker {path:?}"))?;

        if existed {
            warn!("Marker {marker} already existed and was rewritten");
            Ok(MarkerWrite::Replaced)
        } else {
            info!("Created marker {marker}");
            Ok(MarkerWrite::Created)
        }
    }
}
