//! Tracing subscriber initialization.
//!
//! The TUI owns the terminal, so logs go to a file; monitor them with
//! `tail -f` in a second terminal. `RUST_LOG` is respected and defaults
//! to `info`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create the log directory
    #[error("failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The log path has no usable file name or parent directory
    #[error("invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// A tracing subscriber was already installed
    #[error("tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Initialize file-based tracing at `log_path`, creating the parent
/// directory if needed. ANSI is disabled so the file stays readable.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    use tracing_subscriber::EnvFilter;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;
    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    std::fs::create_dir_all(directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial(tracing_init)]
    fn init_creates_missing_log_directory() {
        let temp = tempfile::tempdir().unwrap();
        let log_file = temp.path().join("logs").join("ttychat.log");

        // Subscriber may already be set by another test; the directory
        // must exist either way.
        let _ = init(&log_file);

        assert!(log_file.parent().unwrap().is_dir());
    }

    #[test]
    #[serial(tracing_init)]
    fn init_rejects_path_without_parent() {
        let err = init(Path::new("/")).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidPath(_)));
    }

    #[test]
    #[serial(tracing_init)]
    fn second_init_reports_subscriber_already_set() {
        let temp = tempfile::tempdir().unwrap();
        let log_file = temp.path().join("ttychat.log");

        let first = init(&log_file);
        let second = init(&log_file);

        // Whichever call came after the subscriber was installed fails
        // with SubscriberAlreadySet.
        assert!(first.is_err() || second.is_err());
        if let Err(err) = second {
            assert!(matches!(err, LoggingError::SubscriberAlreadySet));
        }
    }
}
