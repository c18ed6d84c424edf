use crate::session::state::{RunSummary, TestResultRecord};
use serde::{Deserialize, Serialize};

/// Captured session results: the interchange format between a run
/// orchestrator and report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResults {
    pub session_id: String,
    pub records: Vec<TestResultRecord>,
    pub summary: RunSummary,
    pub generated_at: String,
}

impl SessionResults {
    pub fn new(session_id: &str, records: Vec<TestResultRecord>) -> Self {
        let summary = RunSummary::tally(&records);
        Self {
            session_id: session_id.to_string(),
            records,
            summary,
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::state::{OutcomeStore, RawDuration, TestStatus};

    #[test]
    fn test_results_round_trip_through_serde() {
        let mut store = OutcomeStore::new();
        store.record_outcome(
            "tests::login",
            "Login",
            TestStatus::Passed,
            RawDuration::Seconds(1.5),
            None,
        );
        store.record_logs("tests::login", "navigating\nsubmitting".to_string());

        let results = SessionResults::new("session-1", store.into_records());
        let json = serde_json::to_string(&results).unwrap();
        let parsed: SessionResults = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.session_id, "session-1");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].status, Some(TestStatus::Passed));
        assert_eq!(parsed.records[0].log_text, "navigating\nsubmitting");
        assert_eq!(parsed.summary.passed, 1);
    }
}
