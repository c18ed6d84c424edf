use super::types::SessionResults;
use crate::session::state::{TestResultRecord, TestStatus};
use anyhow::Result;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::Path;

/// Generate JUnit XML report string from session results
pub fn generate_junit_xml(results: &SessionResults) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let summary = &results.summary;

    // <testsuites>
    let mut suites_start = BytesStart::new("testsuites");
    suites_start.push_attribute(("name", "e2e-reporter-run"));
    suites_start.push_attribute(("tests", summary.total().to_string().as_str()));
    suites_start.push_attribute(("failures", summary.failed.to_string().as_str()));
    suites_start.push_attribute(("errors", summary.errors.to_string().as_str()));
    suites_start.push_attribute(("skipped", summary.skipped.to_string().as_str()));
    suites_start.push_attribute(("time", format!("{:.3}", summary.total_duration_secs).as_str()));
    writer.write_event(Event::Start(suites_start))?;

    // Single <testsuite> for the session
    let mut suite_start = BytesStart::new("testsuite");
    suite_start.push_attribute(("name", "default"));
    suite_start.push_attribute(("tests", summary.total().to_string().as_str()));
    suite_start.push_attribute(("failures", summary.failed.to_string().as_str()));
    suite_start.push_attribute(("errors", summary.errors.to_string().as_str()));
    suite_start.push_attribute(("skipped", summary.skipped.to_string().as_str()));
    suite_start.push_attribute(("id", results.session_id.as_str()));
    suite_start.push_attribute(("time", format!("{:.3}", summary.total_duration_secs).as_str()));
    suite_start.push_attribute(("timestamp", results.generated_at.as_str()));
    writer.write_event(Event::Start(suite_start))?;

    for record in &results.records {
        write_test_case(&mut writer, record)?;
    }

    writer.write_event(Event::End(BytesEnd::new("testsuite")))?;
    writer.write_event(Event::End(BytesEnd::new("testsuites")))?;

    let result = writer.into_inner().into_inner();
    let xml = String::from_utf8(result)?;
    Ok(xml)
}

fn write_test_case<W: std::io::Write>(
    writer: &mut Writer<W>,
    record: &TestResultRecord,
) -> Result<()> {
    let mut case_start = BytesStart::new("testcase");
    case_start.push_attribute(("name", record.display_name()));
    case_start.push_attribute(("classname", record.identity.as_str()));
    case_start.push_attribute(("time", format!("{:.3}", record.duration_secs).as_str()));
    writer.write_event(Event::Start(case_start))?;

    match record.classification() {
        TestStatus::Failed => {
            let mut fail_start = BytesStart::new("failure");
            fail_start.push_attribute((
                "message",
                record.error.as_deref().unwrap_or("Unknown error"),
            ));
            fail_start.push_attribute(("type", "AssertionError"));
            writer.write_event(Event::Start(fail_start))?;
            if let Some(err) = &record.error {
                writer.write_event(Event::Text(BytesText::new(err)))?;
            }
            writer.write_event(Event::End(BytesEnd::new("failure")))?;
        }
        TestStatus::Error => {
            // Covers setup-phase failures where no outcome was recorded
            let mut err_start = BytesStart::new("error");
            err_start.push_attribute((
                "message",
                record.error.as_deref().unwrap_or("Test never completed"),
            ));
            writer.write_event(Event::Start(err_start))?;
            if let Some(err) = &record.error {
                writer.write_event(Event::Text(BytesText::new(err)))?;
            }
            writer.write_event(Event::End(BytesEnd::new("error")))?;
        }
        TestStatus::Skipped => {
            writer.write_event(Event::Empty(BytesStart::new("skipped")))?;
        }
        TestStatus::Passed => {}
    }

    if !record.log_text.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("system-out")))?;
        writer.write_event(Event::Text(BytesText::new(&record.log_text)))?;
        writer.write_event(Event::End(BytesEnd::new("system-out")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("testcase")))?;
    Ok(())
}

/// Write report to file
pub fn write_report(results: &SessionResults, output_dir: &Path) -> Result<()> {
    let xml = generate_junit_xml(results)?;
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join("junit.xml");
    std::fs::write(&path, xml)?;
    println!("JUnit report saved to: {}", path.display());
    Ok(())
}
