//! Process-wide logger behavior
//!
//! Kept in its own test binary, and in a single test, because the shared logger
//! lives for the whole process.

use std::fs;
use std::sync::{Arc, Barrier};

use dailylog::logging::{self, Level};
use tempfile::TempDir;

#[test]
fn test_shared_logger_is_created_once_and_configured_once() {
    let first_dir = TempDir::new().unwrap();
    let second_dir = TempDir::new().unwrap();
    assert!(logging::logger().is_none());

    // Race several threads on first access
    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            let dir = first_dir.path().to_path_buf();
            std::thread::spawn(move || {
                barrier.wait();
                logging::get_logger(dir, "info").unwrap()
            })
        })
        .collect();
    let loggers: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for logger in &loggers[1..] {
        assert!(Arc::ptr_eq(&loggers[0], logger));
    }

    // Different arguments on a later call are ignored
    let again = logging::get_logger(second_dir.path(), "CRITICAL").unwrap();
    assert!(Arc::ptr_eq(&loggers[0], &again));
    assert_eq!(again.log_dir(), first_dir.path());
    assert_eq!(again.min_level(), Level::Info);

    // The builder closure is not even consulted once the logger exists
    let via_builder = logging::get_logger_with(|| unreachable!()).unwrap();
    assert!(Arc::ptr_eq(&again, &via_builder));

    again.debug("x").unwrap();
    again.info("y").unwrap();

    let content = fs::read_to_string(again.active_file_path()).unwrap();
    assert!(content.contains("[INFO] y"));
    assert!(!content.contains("] x"));
    assert!(fs::read_dir(second_dir.path()).unwrap().next().is_none());

    let shared = logging::logger().unwrap();
    assert!(Arc::ptr_eq(&shared, &again));
}
