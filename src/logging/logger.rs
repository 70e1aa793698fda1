//! Date-rotating logger
//!
//! Every accepted message is echoed to the console and appended to
//! `{log_dir}/log_{MM-DD-YYYY}.log`. When the local date moves past the date the
//! active file was opened for, that file is gzipped before the next line is
//! written, and the line goes into a file named for the new date.
//!
//! The console echo, the date check, the archival and the append all happen under
//! one mutex, so concurrent writers never append into a file that is being
//! archived. Nothing coordinates separate processes pointed at the same directory.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;

use super::archive::{self, archive_log_file, archive_notice, log_file_name};
use super::clock::{format_timestamp, Clock, SystemClock};
use super::console::Console;
use super::error::{LogError, LogResult};
use super::level::Level;

/// Default directory for log files
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Mutable state guarded by the logger's mutex
#[derive(Debug)]
struct State {
    /// Date the active file belongs to
    active_date: NaiveDate,
    console: Console,
}

/// Leveled logger writing to the console and to a per-day file
pub struct Logger {
    log_dir: PathBuf,
    min_level: Level,
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
}

/// Builder for [`Logger`]
pub struct LoggerBuilder {
    log_dir: PathBuf,
    min_level: Level,
    clock: Arc<dyn Clock>,
    console: Console,
}

impl LoggerBuilder {
    /// Minimum level that reaches the console and disk (default DEBUG)
    pub fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Time source (default: local system time)
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Console sink (default: colored stdout)
    pub fn console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Create the directory, archive stale files and return the logger
    ///
    /// # Errors
    ///
    /// Fails if the log directory cannot be created or scanned, or if a stale
    /// file cannot be archived.
    pub fn build(self) -> LogResult<Logger> {
        fs::create_dir_all(&self.log_dir).map_err(|e| LogError::CreateDir {
            path: self.log_dir.clone(),
            source: e,
        })?;

        let logger = Logger {
            state: Mutex::new(State {
                active_date: self.clock.today(),
                console: self.console,
            }),
            log_dir: self.log_dir,
            min_level: self.min_level,
            clock: self.clock,
        };

        logger.compress_stale_logs()?;
        Ok(logger)
    }
}

impl Logger {
    /// Start building a logger rooted at `log_dir`
    pub fn builder(log_dir: impl Into<PathBuf>) -> LoggerBuilder {
        LoggerBuilder {
            log_dir: log_dir.into(),
            min_level: Level::Debug,
            clock: Arc::new(SystemClock),
            console: Console::stdout(),
        }
    }

    /// Logger with the system clock and colored stdout
    pub fn new(log_dir: impl Into<PathBuf>, min_level: Level) -> LogResult<Self> {
        Self::builder(log_dir).min_level(min_level).build()
    }

    /// Directory holding the log files
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Messages below this level are dropped
    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Date the active file was opened for
    pub fn active_date(&self) -> NaiveDate {
        self.lock_state().active_date
    }

    /// Path that the next accepted message is appended to (absent a date change)
    pub fn active_file_path(&self) -> PathBuf {
        self.file_path_for(self.active_date())
    }

    fn file_path_for(&self, date: NaiveDate) -> PathBuf {
        self.log_dir.join(log_file_name(date))
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        // A panic while holding the lock leaves the state consistent: the date is
        // only replaced after archival returned.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Archive every `log_<date>.log` in the directory that is not for the active date
    ///
    /// Returns the archives written. Runs automatically when the logger is built.
    pub fn compress_stale_logs(&self) -> LogResult<Vec<PathBuf>> {
        let mut state = self.lock_state();
        let archived = archive::compress_stale_logs(&self.log_dir, state.active_date)?;
        for gz_path in &archived {
            announce_archive(&mut state.console, gz_path);
        }
        Ok(archived)
    }

    /// Switch to today's file if the date changed, archiving the previous one
    ///
    /// Called before every append; exposed so callers can force a rollover check
    /// without writing. Returns the archive written, if any.
    pub fn rotate_if_needed(&self) -> LogResult<Option<PathBuf>> {
        let mut state = self.lock_state();
        self.rotate_locked(&mut state, self.clock.today())
    }

    fn rotate_locked(&self, state: &mut State, today: NaiveDate) -> LogResult<Option<PathBuf>> {
        if today == state.active_date {
            return Ok(None);
        }

        let previous = self.file_path_for(state.active_date);
        let archived = archive_log_file(&previous)?;
        if let Some(gz_path) = &archived {
            announce_archive(&mut state.console, gz_path);
        }

        state.active_date = today;
        Ok(archived)
    }

    /// Format, echo and persist a message at `level`
    ///
    /// Messages below the minimum level are dropped without touching the console
    /// or the disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the date rolled over and the previous file could not be
    /// archived, or if the active file could not be opened or appended to. In both
    /// cases the line has already been printed to the console.
    pub fn write_log(&self, level: Level, message: &str) -> LogResult<()> {
        if !level.passes(self.min_level) {
            return Ok(());
        }

        // Stamp, date check and append share one critical section so lines stay in
        // timestamp order and land in the file for their own date
        let mut state = self.lock_state();
        let now = self.clock.now();
        let line = format_line(&format_timestamp(now), level, message);
        state.console.emit(level, &line);
        self.rotate_locked(&mut state, now.date())?;

        let path = self.file_path_for(state.active_date);
        append_line(&path, &line).map_err(|e| LogError::Write { path, source: e })
    }

    /// Log a message at DEBUG level
    pub fn debug(&self, message: &str) -> LogResult<()> {
        self.write_log(Level::Debug, message)
    }

    /// Log a message at INFO level
    pub fn info(&self, message: &str) -> LogResult<()> {
        self.write_log(Level::Info, message)
    }

    /// Log a message at WARNING level
    pub fn warning(&self, message: &str) -> LogResult<()> {
        self.write_log(Level::Warning, message)
    }

    /// Log a message at ERROR level
    pub fn error(&self, message: &str) -> LogResult<()> {
        self.write_log(Level::Error, message)
    }

    /// Log a message at CRITICAL level
    pub fn critical(&self, message: &str) -> LogResult<()> {
        self.write_log(Level::Critical, message)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("log_dir", &self.log_dir)
            .field("min_level", &self.min_level)
            .finish_non_exhaustive()
    }
}

/// `[<timestamp>] [<LEVEL>] <message>`
pub fn format_line(timestamp: &str, level: Level, message: &str) -> String {
    format!("[{}] [{}] {}", timestamp, level.as_str(), message)
}

fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()
}

fn announce_archive(console: &mut Console, gz_path: &Path) {
    console.notice(&archive_notice(gz_path));
}
