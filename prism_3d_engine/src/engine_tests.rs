//! Unit tests for the Engine logging hub
//!
//! IMPORTANT: LOGGER is a global OnceLock shared across all tests.
//! All tests are marked with #[serial] to run sequentially. Tests running in
//! parallel elsewhere in the crate may still log, so assertions look for
//! the entries they produced instead of counting everything captured.

use crate::prism3d::Engine;
use crate::prism3d::log::{Logger, LogEntry, LogSeverity};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn find(entries: &Arc<Mutex<Vec<LogEntry>>>, message: &str) -> Option<LogEntry> {
    entries.lock().unwrap().iter().find(|e| e.message == message).cloned()
}

// ============================================================================
// LOGGER REPLACEMENT
// ============================================================================

#[test]
#[serial]
fn test_set_logger_captures_simple_log() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log(LogSeverity::Info, "prism3d::EngineTest", "hub simple entry".to_string());

    let entry = find(&entries, "hub simple entry").expect("entry captured");
    assert_eq!(entry.severity, LogSeverity::Info);
    assert_eq!(entry.source, "prism3d::EngineTest");
    assert!(entry.file.is_none());
    assert!(entry.line.is_none());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "prism3d::EngineTest",
        "hub detailed entry".to_string(),
        "scene.rs",
        42,
    );

    let entry = find(&entries, "hub detailed entry").expect("entry captured");
    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.file, Some("scene.rs"));
    assert_eq!(entry.line, Some(42));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_stops_capture() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::reset_logger();

    Engine::log(LogSeverity::Trace, "prism3d::EngineTest", "after reset".to_string());

    assert!(find(&entries, "after reset").is_none());
}

#[test]
#[serial]
fn test_set_logger_replaces_previous_logger() {
    let (first, first_entries) = TestLogger::new();
    let (second, second_entries) = TestLogger::new();

    Engine::set_logger(first);
    Engine::set_logger(second);
    Engine::log(LogSeverity::Warn, "prism3d::EngineTest", "goes to second".to_string());

    assert!(find(&first_entries, "goes to second").is_none());
    assert!(find(&second_entries, "goes to second").is_some());

    Engine::reset_logger();
}

// ============================================================================
// MACROS
// ============================================================================

#[test]
#[serial]
fn test_macros_route_through_engine() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    crate::engine_trace!("prism3d::EngineTest", "macro {}", "trace");
    crate::engine_debug!("prism3d::EngineTest", "macro {}", "debug");
    crate::engine_info!("prism3d::EngineTest", "macro {}", "info");
    crate::engine_warn!("prism3d::EngineTest", "macro {}", "warn");
    crate::engine_error!("prism3d::EngineTest", "macro {}", "error");

    assert_eq!(find(&entries, "macro trace").unwrap().severity, LogSeverity::Trace);
    assert_eq!(find(&entries, "macro debug").unwrap().severity, LogSeverity::Debug);
    assert_eq!(find(&entries, "macro info").unwrap().severity, LogSeverity::Info);
    assert_eq!(find(&entries, "macro warn").unwrap().severity, LogSeverity::Warn);

    let error = find(&entries, "macro error").unwrap();
    assert_eq!(error.severity, LogSeverity::Error);
    assert!(error.file.unwrap().ends_with("engine_tests.rs"));
    assert!(error.line.is_some());

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_engine_err_logs_before_returning() {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);

    let err = crate::engine_err!("prism3d::EngineTest", "context {} lost", 3);

    assert!(format!("{}", err).contains("context 3 lost"));
    let entry = find(&entries, "context 3 lost").expect("error logged");
    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.source, "prism3d::EngineTest");

    Engine::reset_logger();
}
