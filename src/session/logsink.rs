//! Per-test log capture.
//!
//! One `LogBuffer` is attached for the duration of a test's
//! setup→call→teardown window; every record logged through the `log`
//! facade lands in the attached buffer and is mirrored to stderr.

use log::{Log, Metadata, Record};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Ordered buffer of formatted log lines scoped to one test execution
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one formatted line. Never fails: a poisoned lock drops the
    /// line instead of panicking.
    pub fn append(&self, line: String) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line);
        }
    }

    /// All buffered lines joined by newline, in insertion order.
    /// Idempotent until more lines are appended.
    pub fn flush(&self) -> String {
        match self.lines.lock() {
            Ok(lines) => lines.join("\n"),
            Err(_) => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().map(|l| l.is_empty()).unwrap_or(true)
    }
}

// Active sink slot. A single test executes at a time within one sink's
// lifetime; parallel workers would need one slot per worker.
static ACTIVE: Mutex<Option<LogBuffer>> = Mutex::new(None);

/// Register `buffer` as the destination for subsequent log records
pub fn attach(buffer: &LogBuffer) {
    if let Ok(mut active) = ACTIVE.lock() {
        *active = Some(buffer.clone());
    }
}

/// Unregister the active buffer. Call exactly once per test to avoid
/// cross-test log leakage.
pub fn detach() {
    if let Ok(mut active) = ACTIVE.lock() {
        *active = None;
    }
}

fn forward_to_active(line: &str) {
    if let Ok(active) = ACTIVE.lock() {
        if let Some(buffer) = active.as_ref() {
            buffer.append(line.to_string());
        }
    }
}

fn format_line(level: log::Level, args: &fmt::Arguments) -> String {
    format!(
        "{} - {} - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        level,
        args
    )
}

/// `log::Log` implementation that fans records into the attached buffer
/// while mirroring them to stderr
pub struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(record.level(), record.args());
        forward_to_active(&line);
        eprintln!("{}", line);
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;

// Serializes tests that touch the process-wide sink slot
#[cfg(test)]
pub(crate) static SINK_TEST_LOCK: Mutex<()> = Mutex::new(());

/// Install the capture logger as the process-wide logger. A no-op if a
/// logger is already installed.
pub fn init() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}
