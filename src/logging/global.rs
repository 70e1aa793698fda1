//! Process-wide logger instance
//!
//! The first successful call to [`get_logger`] (or [`get_logger_with`]) decides the
//! directory, level and console settings for the rest of the process. Every later
//! call returns that same instance and **ignores its arguments**, even when they
//! name a different directory or level. Configure the logger once, early in
//! `main`, and use [`logger`] everywhere else.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use super::error::LogResult;
use super::level::Level;
use super::logger::{Logger, LoggerBuilder};

static LOGGER: OnceLock<Arc<Logger>> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Get the shared logger, creating it on first use
///
/// `min_level` is matched case-insensitively; an unknown name falls back to
/// DEBUG. Both arguments only matter on the call that creates the logger.
///
/// # Errors
///
/// Fails if this call creates the logger and the directory cannot be created or
/// a stale log file cannot be archived. A failed creation leaves no instance
/// behind, so a later call may try again.
pub fn get_logger(log_dir: impl Into<PathBuf>, min_level: &str) -> LogResult<Arc<Logger>> {
    let log_dir = log_dir.into();
    let min_level = Level::from_config(min_level);
    get_logger_with(move || Logger::builder(log_dir).min_level(min_level))
}

/// Get the shared logger, building it with `configure` on first use
///
/// `configure` is not called at all when the logger already exists.
pub fn get_logger_with<F>(configure: F) -> LogResult<Arc<Logger>>
where
    F: FnOnce() -> LoggerBuilder,
{
    if let Some(logger) = LOGGER.get() {
        return Ok(Arc::clone(logger));
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(logger) = LOGGER.get() {
        return Ok(Arc::clone(logger));
    }

    let logger = Arc::new(configure().build()?);
    // Only reachable while holding INIT_LOCK with LOGGER empty
    let _ = LOGGER.set(Arc::clone(&logger));
    Ok(logger)
}

/// The shared logger, if it has been created
pub fn logger() -> Option<Arc<Logger>> {
    LOGGER.get().cloned()
}
