//! Logging setup for mapstyle tools.
//!
//! - Writes to `<log_dir>/mapstyle.log`, truncated at session start
//! - Mirrors events to stderr so command output on stdout stays clean
//! - Filter configured via `RUST_LOG`, `info` when unset

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Keeps the background log writer alive.
///
/// Dropping the guard flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
    log_path: PathBuf,
}

impl LoggingGuard {
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

/// Creates `log_dir` if needed and truncates the log file.
fn prepare_log_file(log_dir: &Path, log_file: &str) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(log_dir)?;
    let log_path = log_dir.join(log_file);
    fs::write(&log_path, "")?;
    Ok(log_path)
}

/// Installs the global tracing subscriber.
///
/// Can only succeed once per process; later calls leave the first
/// subscriber in place.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created or the log file
/// cannot be truncated.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    let log_path = prepare_log_file(log_dir, log_file)?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .compact();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("Tracing subscriber already installed");
    }

    Ok(LoggingGuard {
        _file_guard: file_guard,
        log_path,
    })
}

pub fn default_log_dir() -> &'static str {
    "logs"
}

pub fn default_log_file() -> &'static str {
    "mapstyle.log"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_dir(), "logs");
        assert_eq!(default_log_file(), "mapstyle.log");
    }

    #[test]
    fn test_prepare_creates_nested_directory() {
        let temp = tempfile::tempdir().unwrap();
        let log_dir = temp.path().join("deep").join("nested");

        let path = prepare_log_file(&log_dir, "test.log").unwrap();
        assert!(log_dir.exists());
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }

    #[test]
    fn test_prepare_truncates_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let log_file = temp.path().join("test.log");
        fs::write(&log_file, "old log data").unwrap();

        prepare_log_file(temp.path(), "test.log").unwrap();
        assert_eq!(fs::read_to_string(&log_file).unwrap(), "");
    }

    #[test]
    fn test_prepare_fails_when_dir_is_a_file() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        assert!(prepare_log_file(&blocker, "test.log").is_err());
    }

    #[test]
    fn test_guard_reports_path() {
        use tracing_appender::non_blocking::NonBlocking;

        let (writer, guard) = NonBlocking::new(std::io::sink());
        drop(writer);
        let logging_guard = LoggingGuard {
            _file_guard: guard,
            log_path: PathBuf::from("logs/mapstyle.log"),
        };
        assert_eq!(logging_guard.log_path(), Path::new("logs/mapstyle.log"));
    }
}
