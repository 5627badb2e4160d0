//! Rolling Logger
//!
//! Routes `log` and `tracing` records to stderr and to one file per day
//! (`{app}.{YYYY-MM-DD}.log`) under a log directory. Only the most recent
//! files are kept.

use std::io;
use std::path::Path;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Number of daily log files kept on disk
pub const MAX_LOG_FILES: usize = 7;

/// Daily appender for `app_name` under `log_dir`
pub fn file_appender(log_dir: impl AsRef<Path>, app_name: &str) -> Result<RollingFileAppender, String> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(app_name)
        .filename_suffix("log")
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir.as_ref())
        .map_err(|e| format!("Failed to create log appender: {}", e))
}

/// Install the global subscriber writing to stderr and `log_dir`
///
/// Also bridges the `log` crate, so `log::info!` and friends end up in the
/// same files.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<(), String> {
    let file = file_appender(log_dir, app_name)?;

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(io::stderr.and(file))
        .try_init()
        .map_err(|e| format!("Failed to install logger: {}", e))
}

pub fn info(message: &str) {
    tracing::info!("{}", message);
}

pub fn error(message: &str) {
    tracing::error!("{}", message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn log_files(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_appender_writes_dated_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut appender = file_appender(dir.path(), "ecoleta").unwrap();

        appender.write_all(b"first\n").unwrap();
        appender.write_all(b"second\n").unwrap();
        appender.flush().unwrap();

        let files = log_files(dir.path());
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("ecoleta."));
        assert!(files[0].ends_with(".log"));

        let content = fs::read_to_string(dir.path().join(&files[0])).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_appender_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("server");

        let mut appender = file_appender(&nested, "ecoleta").unwrap();
        appender.write_all(b"line\n").unwrap();

        assert_eq!(log_files(&nested).len(), 1);
    }
}
