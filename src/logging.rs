//! Global `tracing` subscriber setup.
//!
//! Headless runs log to stderr because stdout carries module output. The
//! interactive UI owns the terminal, so its logs always go to a file.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Which front end the subscriber is serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Headless,
    Interactive,
}

/// Filter directive for a `-v` count when `RUST_LOG` is unset.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `$TMPDIR/henrik-os.log`
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("henrik-os.log")
}

/// Where logs end up for `mode`; `None` means stderr.
pub fn log_destination(mode: LogMode, log_file: Option<&Path>) -> Option<PathBuf> {
    match (mode, log_file) {
        (_, Some(path)) => Some(path.to_path_buf()),
        (LogMode::Interactive, None) => Some(default_log_path()),
        (LogMode::Headless, None) => None,
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(mode: LogMode, verbosity: u8, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let (writer, ansi) = match log_destination(mode, log_file) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_filter(0), "warn");
        assert_eq!(default_filter(1), "info");
        assert_eq!(default_filter(2), "debug");
        assert_eq!(default_filter(9), "trace");
    }

    #[test]
    fn test_interactive_never_logs_to_terminal() {
        assert_eq!(log_destination(LogMode::Interactive, None), Some(default_log_path()));
        assert_eq!(log_destination(LogMode::Headless, None), None);

        let explicit = Path::new("/tmp/run.log");
        assert_eq!(
            log_destination(LogMode::Headless, Some(explicit)),
            Some(explicit.to_path_buf())
        );
    }
}
