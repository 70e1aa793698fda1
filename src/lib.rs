//! dailylog - leveled logging with daily file rotation
//!
//! A process-wide logger that prints colored lines to the console and appends
//! them to `{log_dir}/log_{MM-DD-YYYY}.log`. When the date changes the previous
//! day's file is compressed to `.log.gz`; stale files left by earlier runs are
//! compressed when the logger is created.
//!
//! ```rust,no_run
//! let logger = dailylog::logging::get_logger("logs", "INFO")?;
//! logger.info("service started")?;
//! logger.debug("dropped: below INFO")?;
//! # Ok::<(), dailylog::logging::LogError>(())
//! ```

pub mod config;
pub mod logging;
