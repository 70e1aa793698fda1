//! dailylog command line
//!
//! Writes messages through the date-rotating logger and runs archival by hand.
//!
//! ```text
//! dailylog write info "deploy finished"
//! dailylog --log-dir /var/log/app --level warning write error "disk full"
//! dailylog archive
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use dailylog::config::{self, Config};
use dailylog::logging::{self, Clock, Level, SystemClock};

#[derive(Parser)]
#[command(name = "dailylog")]
#[command(version)]
#[command(about = "Leveled logging with daily gzip-archived log files")]
struct Cli {
    /// Config file (default: <config dir>/dailylog/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log directory, overrides the config file
    #[arg(short = 'd', long, global = true)]
    log_dir: Option<PathBuf>,

    /// Minimum level, overrides the config file
    #[arg(short = 'l', long = "level", global = true)]
    min_level: Option<String>,

    /// Print log lines without color
    #[arg(long, global = true)]
    no_color: bool,

    /// Do not echo log lines to stdout
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a single message
    Write {
        /// DEBUG, INFO, WARNING, ERROR or CRITICAL
        level: Level,

        /// Message text (joined with spaces)
        #[arg(required = true, trailing_var_arg = true)]
        message: Vec<String>,
    },

    /// Archive every log file not dated today
    Archive,

    /// Print the path of today's log file
    Path,
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(dir) = &cli.log_dir {
        config.log_dir = dir.clone();
    }
    if let Some(level) = &cli.min_level {
        config.min_level = level.clone();
    }
    if cli.no_color {
        config.color = false;
    }
    if cli.quiet {
        config.console = false;
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Write { level, message } => {
            let logger = config::get_logger_with_config(&config)?;
            logger
                .write_log(level, &message.join(" "))
                .context("Failed to write log entry")?;
        }
        Commands::Archive => {
            std::fs::create_dir_all(&config.log_dir).with_context(|| {
                format!("Failed to create log directory {}", config.log_dir.display())
            })?;
            let archived = logging::compress_stale_logs(&config.log_dir, SystemClock.today())
                .context("Failed to archive stale logs")?;
            for gz_path in &archived {
                println!("{}", logging::archive_notice(gz_path));
            }
            println!("{} stale log file(s) archived", archived.len());
        }
        Commands::Path => {
            let name = logging::log_file_name(SystemClock.today());
            println!("{}", config.log_dir.join(name).display());
        }
    }

    Ok(())
}
