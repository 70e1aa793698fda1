//! Logging facility for dailylog
//!
//! Provides a leveled logger that echoes colored lines to the console, appends them
//! to `log_<MM-DD-YYYY>.log`, and gzips each day's file once the date moves on.

mod archive;
mod bridge;
mod clock;
mod console;
mod error;
mod global;
mod level;
mod logger;

pub use archive::{
    archive_log_file, archive_notice, archive_path, compress_stale_logs, log_file_name,
};
pub use bridge::{init_tracing, DailyLogLayer};
pub use clock::{Clock, ManualClock, SystemClock, DATE_FORMAT, TIMESTAMP_FORMAT};
pub use console::{colorize, Console};
pub use error::{LogError, LogResult};
pub use global::{get_logger, get_logger_with, logger};
pub use level::Level;
pub use logger::{format_line, Logger, LoggerBuilder, DEFAULT_LOG_DIR};
