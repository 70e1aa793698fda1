//! Gzip archival of closed log files
//!
//! Log files are named `log_<MM-DD-YYYY>.log`. Any `log_<10 chars>.log` whose middle
//! part is not the active date is compressed to `<name>.gz` and the plain file is
//! removed.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use flate2::write::GzEncoder;
use flate2::Compression;

use super::clock::format_date;
use super::error::{LogError, LogResult};

const LOG_PREFIX: &str = "log_";
const LOG_SUFFIX: &str = ".log";
const ARCHIVE_SUFFIX: &str = ".gz";

/// Name of the log file for a given date
pub fn log_file_name(date: NaiveDate) -> String {
    format!("{}{}{}", LOG_PREFIX, format_date(date), LOG_SUFFIX)
}

/// Extract the 10-character date part of a log file name
///
/// Returns `None` for anything that is not `log_<10 chars>.log`, including already
/// archived `.log.gz` files. The date part is not validated as a calendar date.
pub fn date_part(name: &str) -> Option<&str> {
    let date = name.strip_prefix(LOG_PREFIX)?.strip_suffix(LOG_SUFFIX)?;
    (date.chars().count() == 10).then_some(date)
}

/// Console notice printed for each archived file
pub fn archive_notice(gz_path: &Path) -> String {
    let gz_name = gz_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let log_name = gz_name.strip_suffix(ARCHIVE_SUFFIX).unwrap_or(&gz_name);
    format!("Archived log: {} → {}", log_name, gz_path.display())
}

/// Path of the archive written for `path`
pub fn archive_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(ARCHIVE_SUFFIX);
    PathBuf::from(name)
}

/// Compress `path` into `<path>.gz` and remove the original
///
/// An existing archive is overwritten. The source is only removed once the
/// archive has been fully written; if compression fails the partial archive is
/// discarded and the source stays in place.
///
/// Returns the archive path, or `None` when the source no longer exists.
pub fn archive_log_file(path: &Path) -> LogResult<Option<PathBuf>> {
    let source = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(LogError::Archive {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let gz_path = archive_path(path);

    if let Err(e) = compress(source, &gz_path) {
        let _ = fs::remove_file(&gz_path);
        return Err(LogError::Archive {
            path: path.to_path_buf(),
            source: e,
        });
    }

    match fs::remove_file(path) {
        Ok(()) => Ok(Some(gz_path)),
        // Someone else archived it between our read and our delete
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Some(gz_path)),
        Err(e) => Err(LogError::Archive {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn compress(source: File, gz_path: &Path) -> io::Result<()> {
    let target = File::create(gz_path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(target), Compression::default());
    io::copy(&mut BufReader::new(source), &mut encoder)?;
    let mut writer = encoder.finish()?;
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())?
        .sync_all()
}

/// Archive every log file in `logs_dir` whose date part differs from `active_date`
///
/// Returns the archives written. Iteration order follows the directory listing
/// and is not stable across platforms.
pub fn compress_stale_logs(logs_dir: &Path, active_date: NaiveDate) -> LogResult<Vec<PathBuf>> {
    let read_dir_err = |e: io::Error| LogError::ReadDir {
        path: logs_dir.to_path_buf(),
        source: e,
    };

    let active = format_date(active_date);
    let mut archived = Vec::new();

    for entry in fs::read_dir(logs_dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();

        let is_stale = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(date_part)
            .is_some_and(|date| date != active);

        if !is_stale || !path.is_file() {
            continue;
        }

        if let Some(gz_path) = archive_log_file(&path)? {
            archived.push(gz_path);
        }
    }

    Ok(archived)
}
