use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::{level_filters::LevelFilter, Level};
use tracing_appender::rolling::Rotation;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, writer::MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const LOG_PREFIX: &str = "wall-of-shame";

/// Stdout only receives warnings unless `show_std` is set, so that a failed GitHub request is
/// still visible in the output of a scheduled job. With `log_dir` everything is additionally
/// written to daily rotated files.
pub fn enable_logging(
    log_dir: Option<&Path>,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    let appender = log_dir
        .map(|dir| {
            tracing_appender::rolling::Builder::new()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix(LOG_PREFIX)
                .build(dir)
        })
        .transpose()?;

    let stdout_level = if show_std { Level::TRACE } else { Level::WARN };
    let stdout = std::io::stdout.with_max_level(stdout_level);

    let level = log_level
        .map(|v| v.to_string())
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with(fmt::layer().pretty().with_writer(stdout))
        .with(appender.map(|appender| {
            fmt::layer()
                .with_ansi(false)
                .with_span_events(FmtSpan::CLOSE)
                .with_writer(appender)
        }))
        .try_init()?;
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
