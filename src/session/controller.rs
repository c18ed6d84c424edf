use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use uuid::Uuid;

use super::logsink::{self, LogBuffer};
use super::state::{OutcomeStore, RawDuration, TestStatus};
use crate::report::html;
use crate::report::types::SessionResults;
use crate::utils::config::ReportConfig;

/// Owns the outcome store and the active log sink for one test session.
///
/// The run orchestrator drives it through explicit calls: `begin_test` at
/// setup, zero or more `log_line` during execution, `record_result` at the
/// end of the call phase, `end_test` at teardown, and `finish` once the
/// session is over.
pub struct SessionController {
    session_id: String,
    store: OutcomeStore,
    active: Option<(String, LogBuffer)>,
    config: ReportConfig,
}

impl SessionController {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            store: OutcomeStore::new(),
            active: None,
            config,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Setup phase: create the record and open the log capture window.
    /// A sink leaked by a test whose teardown never ran is closed first,
    /// its logs filed under that test's identity.
    pub fn begin_test(&mut self, identity: &str) {
        self.close_capture_window();
        self.store.ensure(identity);

        let buffer = LogBuffer::new();
        logsink::attach(&buffer);
        self.active = Some((identity.to_string(), buffer));
    }

    /// Record one log line for the test currently executing. Lines logged
    /// through the `log` facade land in the same buffer.
    pub fn log_line(&mut self, line: &str) {
        if let Some((_, buffer)) = &self.active {
            buffer.append(line.to_string());
        }
    }

    /// Call-phase outcome; called exactly once per test
    pub fn record_result(
        &mut self,
        identity: &str,
        name: &str,
        status: TestStatus,
        duration: RawDuration,
        error: Option<String>,
    ) {
        self.store
            .record_outcome(identity, name, status, duration, error);
    }

    /// Teardown phase: close the capture window and file the screenshot
    pub fn end_test(&mut self, identity: &str, screenshot_path: Option<String>) {
        self.close_capture_window();
        self.store.record_screenshot(identity, screenshot_path);
    }

    pub fn store(&self) -> &OutcomeStore {
        &self.store
    }

    /// Export the captured results without writing a report
    pub fn into_results(mut self) -> SessionResults {
        self.close_capture_window();
        let session_id = self.session_id.clone();
        SessionResults::new(&session_id, self.store.into_records())
    }

    /// End of session: print the console summary and write the HTML
    /// report. Works from partial records if the run was aborted.
    pub fn finish(mut self) -> Result<PathBuf> {
        self.close_capture_window();

        let summary = self.store.summary();
        println!("\n{} Test session finished", "■".blue().bold());
        println!("  Total tests: {}", summary.total());
        println!(
            "  {} passed, {} failed, {} skipped, {} errors",
            summary.passed.to_string().green(),
            summary.failed.to_string().red(),
            summary.skipped.to_string().yellow(),
            summary.errors.to_string().red()
        );
        println!("  Duration: {:.2}s", summary.total_duration_secs);

        html::write_report(self.store.all_records(), &self.config, None).map_err(|e| {
            log::error!("Report generation failed: {:#}", e);
            e
        })
    }

    // Logs recorded outside a setup→teardown window must not leak into
    // any record; the window always closes under the identity that
    // opened it.
    fn close_capture_window(&mut self) {
        if let Some((identity, buffer)) = self.active.take() {
            logsink::detach();
            self.store.record_logs(&identity, buffer.flush());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::logsink::SINK_TEST_LOCK;

    fn temp_config() -> (ReportConfig, PathBuf) {
        let reports_dir =
            std::env::temp_dir().join(format!("session_reports_{}", Uuid::new_v4()));
        (
            ReportConfig {
                reports_dir: reports_dir.clone(),
                template_path: None,
            },
            reports_dir,
        )
    }

    #[test]
    fn test_full_hook_sequence_produces_report() {
        let _guard = SINK_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (config, reports_dir) = temp_config();
        let mut controller = SessionController::new(config);

        controller.begin_test("tests::a");
        controller.log_line("opening login page");
        controller.log_line("submitting form");
        controller.record_result(
            "tests::a",
            "test A",
            TestStatus::Passed,
            RawDuration::Seconds(1.23),
            None,
        );
        controller.end_test("tests::a", None);

        controller.begin_test("tests::b");
        controller.record_result(
            "tests::b",
            "test B",
            TestStatus::Failed,
            RawDuration::Seconds(0.5),
            Some("element not found".to_string()),
        );
        controller.end_test("tests::b", None);

        let records = controller.store().all_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].log_text, "opening login page\nsubmitting form");
        assert_eq!(records[1].log_text, "");

        let path = controller.finish().unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("test A"));
        assert!(html.contains("element not found"));

        std::fs::remove_dir_all(reports_dir).ok();
    }

    #[test]
    fn test_log_lines_stay_in_their_window() {
        let _guard = SINK_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (config, reports_dir) = temp_config();
        let mut controller = SessionController::new(config);

        controller.log_line("before any test"); // no window open, dropped

        controller.begin_test("tests::first");
        controller.log_line("first line");
        controller.end_test("tests::first", None);

        controller.begin_test("tests::second");
        controller.log_line("second line");
        controller.end_test("tests::second", None);

        let records = controller.store().all_records();
        assert_eq!(records[0].log_text, "first line");
        assert_eq!(records[1].log_text, "second line");

        std::fs::remove_dir_all(reports_dir).ok();
    }

    #[test]
    fn test_setup_failure_still_reported() {
        let _guard = SINK_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (config, reports_dir) = temp_config();
        let mut controller = SessionController::new(config);

        // Setup crashed: begin_test fired, call phase never happened and
        // the next test started without a teardown.
        controller.begin_test("tests::broken_setup");
        controller.log_line("driver init failed");
        controller.begin_test("tests::healthy");
        controller.record_result(
            "tests::healthy",
            "healthy",
            TestStatus::Passed,
            RawDuration::Seconds(0.1),
            None,
        );
        controller.end_test("tests::healthy", None);

        let records = controller.store().all_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].classification(), TestStatus::Error);
        assert_eq!(records[0].log_text, "driver init failed");

        let path = controller.finish().unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("tests::broken_setup"));

        std::fs::remove_dir_all(reports_dir).ok();
    }

    #[test]
    fn test_aborted_session_writes_best_effort_report() {
        let _guard = SINK_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (config, reports_dir) = temp_config();
        let mut controller = SessionController::new(config);

        controller.begin_test("tests::interrupted");
        controller.log_line("halfway through");
        // no record_result, no end_test: session aborted here

        let path = controller.finish().unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("tests::interrupted"));
        assert!(html.contains("halfway through"));

        std::fs::remove_dir_all(reports_dir).ok();
    }

    #[test]
    fn test_into_results_carries_session_id() {
        let _guard = SINK_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let (config, _reports_dir) = temp_config();
        let mut controller = SessionController::new(config);
        let session_id = controller.session_id().to_string();

        controller.begin_test("tests::only");
        controller.record_result(
            "tests::only",
            "only",
            TestStatus::Passed,
            RawDuration::Micros(250_000),
            None,
        );
        controller.end_test("tests::only", None);

        let results = controller.into_results();
        assert_eq!(results.session_id, session_id);
        assert_eq!(results.records[0].duration_secs, 0.25);
        assert_eq!(results.summary.passed, 1);
    }
}
