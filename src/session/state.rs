use serde::{Deserialize, Serialize};

/// Terminal outcome of a single test case
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    Error,
}

impl TestStatus {
    /// CSS class token used by the HTML report
    pub fn css_class(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Skipped => "skipped",
            TestStatus::Error => "error",
        }
    }
}

/// Duration as supplied by the harness. Some runners report seconds as a
/// float, others report sub-second integer ticks (microseconds); both
/// normalize to non-negative seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawDuration {
    Micros(u64),
    Seconds(f64),
}

impl RawDuration {
    pub fn as_secs(self) -> f64 {
        match self {
            RawDuration::Micros(ticks) => ticks as f64 / 1_000_000.0,
            RawDuration::Seconds(secs) => {
                if secs.is_finite() && secs > 0.0 {
                    secs
                } else {
                    0.0
                }
            }
        }
    }
}

/// Accumulated result data for one test case
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultRecord {
    pub identity: String,
    #[serde(default)]
    pub name: String,
    pub status: Option<TestStatus>,
    #[serde(default)]
    pub duration_secs: f64,
    pub error: Option<String>,
    #[serde(default)]
    pub log_text: String,
    pub screenshot_path: Option<String>,
}

impl TestResultRecord {
    pub fn new(identity: &str) -> Self {
        Self {
            identity: identity.to_string(),
            name: String::new(),
            status: None,
            duration_secs: 0.0,
            error: None,
            log_text: String::new(),
            screenshot_path: None,
        }
    }

    /// A record that never reached its call phase classifies as an error.
    pub fn classification(&self) -> TestStatus {
        self.status.unwrap_or(TestStatus::Error)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.identity
        } else {
            &self.name
        }
    }
}

/// Keyed accumulation of test results across a run, in first-observed order
#[derive(Debug, Default)]
pub struct OutcomeStore {
    records: Vec<TestResultRecord>,
}

impl OutcomeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the record for `identity`, creating an empty one on first
    /// observation. Safe to call any number of times per identity.
    pub fn ensure(&mut self, identity: &str) -> &mut TestResultRecord {
        let index = match self.records.iter().position(|r| r.identity == identity) {
            Some(i) => i,
            None => {
                self.records.push(TestResultRecord::new(identity));
                self.records.len() - 1
            }
        };
        &mut self.records[index]
    }

    /// Merge the call-phase outcome into the record for `identity`
    pub fn record_outcome(
        &mut self,
        identity: &str,
        name: &str,
        status: TestStatus,
        duration: RawDuration,
        error: Option<String>,
    ) {
        let record = self.ensure(identity);
        record.name = name.to_string();
        record.status = Some(status);
        record.duration_secs = duration.as_secs();
        record.error = error;
    }

    pub fn record_logs(&mut self, identity: &str, log_text: String) {
        self.ensure(identity).log_text = log_text;
    }

    pub fn record_screenshot(&mut self, identity: &str, path: Option<String>) {
        self.ensure(identity).screenshot_path = path;
    }

    pub fn all_records(&self) -> &[TestResultRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TestResultRecord> {
        self.records
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::tally(&self.records)
    }
}

/// Per-session roll-up, always derived from the records
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub timestamp: String,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub errors: u32,
    pub total_duration_secs: f64,
}

impl RunSummary {
    /// Tally counts and total duration over `records`; timestamp is taken
    /// at tally time.
    pub fn tally(records: &[TestResultRecord]) -> Self {
        let mut summary = Self {
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            passed: 0,
            failed: 0,
            skipped: 0,
            errors: 0,
            total_duration_secs: 0.0,
        };

        for record in records {
            match record.classification() {
                TestStatus::Passed => summary.passed += 1,
                TestStatus::Failed => summary.failed += 1,
                TestStatus::Skipped => summary.skipped += 1,
                TestStatus::Error => summary.errors += 1,
            }
            summary.total_duration_secs += record.duration_secs;
        }

        summary
    }

    pub fn total(&self) -> u32 {
        self.passed + self.failed + self.skipped + self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_is_idempotent() {
        let mut store = OutcomeStore::new();
        store.ensure("tests/login.rs::valid_credentials");
        store.ensure("tests/login.rs::valid_credentials");
        assert_eq!(store.all_records().len(), 1);
    }

    #[test]
    fn test_records_keep_first_observed_order() {
        let mut store = OutcomeStore::new();
        store.ensure("c");
        store.ensure("a");
        store.ensure("b");
        store.ensure("a");

        let ids: Vec<&str> = store
            .all_records()
            .iter()
            .map(|r| r.identity.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_hook_calls_merge_into_one_record() {
        let mut store = OutcomeStore::new();
        store.ensure("t1");
        store.record_outcome(
            "t1",
            "Add category",
            TestStatus::Failed,
            RawDuration::Seconds(0.5),
            Some("Element not found".to_string()),
        );
        store.record_logs("t1", "opening page\nclicking save".to_string());
        store.record_screenshot("t1", Some("screenshots/t1.png".to_string()));

        assert_eq!(store.all_records().len(), 1);
        let record = &store.all_records()[0];
        assert_eq!(record.name, "Add category");
        assert_eq!(record.status, Some(TestStatus::Failed));
        assert_eq!(record.duration_secs, 0.5);
        assert_eq!(record.error.as_deref(), Some("Element not found"));
        assert_eq!(record.log_text, "opening page\nclicking save");
        assert_eq!(record.screenshot_path.as_deref(), Some("screenshots/t1.png"));
    }

    #[test]
    fn test_missing_status_classifies_as_error() {
        let record = TestResultRecord::new("setup_failed");
        assert_eq!(record.classification(), TestStatus::Error);
    }

    #[test]
    fn test_duration_normalization() {
        assert_eq!(RawDuration::Seconds(1.23).as_secs(), 1.23);
        assert_eq!(RawDuration::Micros(500_000).as_secs(), 0.5);
        assert_eq!(RawDuration::Seconds(-4.0).as_secs(), 0.0);
        assert_eq!(RawDuration::Seconds(f64::NAN).as_secs(), 0.0);
    }

    #[test]
    fn test_raw_duration_deserializes_by_shape() {
        let secs: RawDuration = serde_json::from_str("1.23").unwrap();
        assert_eq!(secs, RawDuration::Seconds(1.23));

        let ticks: RawDuration = serde_json::from_str("500000").unwrap();
        assert_eq!(ticks, RawDuration::Micros(500_000));
    }

    #[test]
    fn test_summary_tallies_all_statuses() {
        let mut store = OutcomeStore::new();
        store.record_outcome("a", "a", TestStatus::Passed, RawDuration::Seconds(1.23), None);
        store.record_outcome(
            "b",
            "b",
            TestStatus::Failed,
            RawDuration::Seconds(0.5),
            Some("boom".to_string()),
        );
        store.record_outcome("c", "c", TestStatus::Skipped, RawDuration::Seconds(0.0), None);
        store.ensure("d"); // setup failure, never reached call phase

        let summary = store.summary();
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.total(), 4);
        assert!((summary.total_duration_secs - 1.73).abs() < 1e-9);
    }
}
