//! Tracing setup shared by the desktop window and the lab CLI.
//!
//! Each front end writes its own per-launch file under `<app root>/logs`
//! (`maggilicious_<stamp>.log` or `maggilicious-lab_<stamp>.log`) and keeps
//! only its newest files. The desktop app mirrors everything to stdout; the
//! CLI keeps stdout for recipes and only echoes warnings to stderr.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use thiserror::Error;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, filter::LevelFilter, fmt, fmt::writer::BoxMakeWriter,
    prelude::*,
};

use crate::app_dirs::{self, AppDirError};

/// Log files kept per front end, current launch included.
const KEEP_PER_FRONT_END: usize = 10;

static ACTIVE: OnceLock<(PathBuf, WorkerGuard)> = OnceLock::new();

/// Which binary is logging; decides file prefix, console and default filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontEnd {
    Desktop,
    Cli,
}

impl FrontEnd {
    fn file_prefix(self) -> &'static str {
        match self {
            FrontEnd::Desktop => "maggilicious",
            FrontEnd::Cli => "maggilicious-lab",
        }
    }

    /// Filter used when `RUST_LOG` is unset. eframe, winit and wgpu stay at warn.
    fn default_filter(self) -> &'static str {
        match self {
            FrontEnd::Desktop => "warn,maggilicious=info",
            FrontEnd::Cli => "warn,maggilicious=info,maggilicious_lab=info",
        }
    }

    fn console(self) -> (BoxMakeWriter, LevelFilter) {
        match self {
            FrontEnd::Desktop => (BoxMakeWriter::new(std::io::stdout), LevelFilter::TRACE),
            FrontEnd::Cli => (BoxMakeWriter::new(std::io::stderr), LevelFilter::WARN),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error(transparent)]
    Dir(#[from] AppDirError),
    #[error("Failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to prune old logs in {path}: {source}")]
    Prune {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to format log file time: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("Failed to install tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber for `front_end` and return the log file path.
///
/// Only the first call per process installs anything; later calls return the
/// file already in use. Callers print the error and carry on without logs.
pub fn init(front_end: FrontEnd) -> Result<PathBuf, LoggingError> {
    if let Some((path, _)) = ACTIVE.get() {
        return Ok(path.clone());
    }

    let dir = app_dirs::logs_dir()?;
    let file_name = log_file_name(front_end, now_local_or_utc())?;
    let path = dir.join(&file_name);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::Open {
            path: path.clone(),
            source,
        })?;
    let pruned = prune(&dir, front_end.file_prefix(), KEEP_PER_FRONT_END)?;

    let (file_writer, guard) = tracing_appender::non_blocking(rolling::never(&dir, &file_name));
    let (console_writer, console_level) = front_end.console();
    let timer = local_timer();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(front_end.default_filter()));
    let subscriber = Registry::default()
        .with(filter)
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(console_writer)
                .with_filter(console_level),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;
    let _ = ACTIVE.set((path.clone(), guard));

    tracing::info!(path = %path.display(), pruned, ?front_end, "logging initialized");
    Ok(path)
}

fn log_file_name(front_end: FrontEnd, now: OffsetDateTime) -> Result<String, LoggingError> {
    const STAMP: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!("{}_{}.log", front_end.file_prefix(), now.format(STAMP)?))
}

/// Delete this front end's oldest logs so at most `keep` remain.
///
/// Stamps sort lexically in time order, so names alone decide age. Files of
/// the other front end and anything not ending in `.log` are left alone.
fn prune(dir: &Path, prefix: &str, keep: usize) -> Result<usize, LoggingError> {
    let failed = |source| LoggingError::Prune {
        path: dir.to_path_buf(),
        source,
    };
    let stem = format!("{prefix}_");
    let mut names: Vec<String> = fs::read_dir(dir)
        .map_err(failed)?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(&stem) && name.ends_with(".log"))
        .collect();
    names.sort();
    let excess = names.len().saturating_sub(keep);
    for name in &names[..excess] {
        fs::remove_file(dir.join(name)).map_err(failed)?;
    }
    Ok(excess)
}

fn local_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
