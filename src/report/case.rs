use super::artifact;
use crate::session::state::TestResultRecord;

/// Render one record as a self-contained HTML fragment.
///
/// Pure function of its input: fixed block order header → logs → error →
/// screenshot, placeholders for anything absent so the report structure is
/// uniform across test cases. Never fails; a malformed record degrades to
/// placeholder text inside the fragment.
pub fn render(record: &TestResultRecord) -> String {
    let status_class = record.classification().css_class();
    let mut parts = Vec::new();

    parts.push(format!(
        r#"<div class="test-case">
    <div class="test-header {}">
        <span>{}</span>
        <span>{:.2}s</span>
    </div>
    <div class="test-content">"#,
        status_class,
        html_escape(record.display_name()),
        record.duration_secs.max(0.0),
    ));

    if record.log_text.trim().is_empty() {
        parts.push(r#"<div class="logs-section no-logs">No logs captured</div>"#.to_string());
    } else {
        parts.push(format!(
            r#"<details class="logs-section" open>
        <summary>Test Logs</summary>
        <pre class="logs">{}</pre>
    </details>"#,
            html_escape(&record.log_text)
        ));
    }

    if let Some(error) = &record.error {
        parts.push(format!(
            r#"<div class="error-message">
        <strong>Error:</strong><br/>
        {}
    </div>"#,
            html_escape(error)
        ));
    }

    match &record.screenshot_path {
        Some(path) => match artifact::encode(Some(path.as_str())) {
            Some(encoded) => parts.push(format!(
                r#"<div class="screenshot-section">
        <h4>Screenshot:</h4>
        <img class="screenshot" src="data:image/png;base64,{}" alt="Test Screenshot" />
    </div>"#,
                encoded
            )),
            None => parts.push(format!(
                r#"<div class="screenshot-section missing">Screenshot not available: {}</div>"#,
                html_escape(path)
            )),
        },
        None => parts.push(
            r#"<div class="screenshot-section missing">No screenshot captured</div>"#.to_string(),
        ),
    }

    parts.push("    </div>\n</div>".to_string());
    parts.join("\n    ")
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
