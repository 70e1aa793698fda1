//! Error types for the logging facility

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the logging module
pub type LogResult<T> = std::result::Result<T, LogError>;

/// Failures surfaced by the logger
///
/// An unrecognized level in the configuration is not an error: it falls back to
/// DEBUG. Everything else here is an I/O failure that is returned to the caller of
/// the triggering call without being retried.
#[derive(Debug, Error)]
pub enum LogError {
    /// The log directory could not be created
    #[error("failed to create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The log directory could not be scanned for stale files
    #[error("failed to read log directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Compressing or removing a log file failed
    #[error("failed to archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The active log file could not be opened or appended to
    #[error("failed to write log file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A level name did not match any known level
    #[error("unknown log level '{0}'")]
    UnknownLevel(String),
}

impl LogError {
    /// Path of the file or directory involved, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            LogError::CreateDir { path, .. }
            | LogError::ReadDir { path, .. }
            | LogError::Archive { path, .. }
            | LogError::Write { path, .. } => Some(path),
            LogError::UnknownLevel(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_includes_path() {
        let err = LogError::Write {
            path: PathBuf::from("/tmp/logs/log_01-02-2026.log"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("log_01-02-2026.log"));
        assert!(msg.contains("denied"));
        assert_eq!(
            err.path(),
            Some(&PathBuf::from("/tmp/logs/log_01-02-2026.log"))
        );
    }

    #[test]
    fn test_unknown_level_has_no_path() {
        let err = LogError::UnknownLevel("VERBOSE".to_string());
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "unknown log level 'VERBOSE'");
    }
}
