use std::path::Path;
use thiserror::Error;

/// Placeholder schema every report template must provide
pub const PLACEHOLDERS: [&str; 6] = [
    "timestamp",
    "passed",
    "failed",
    "skipped",
    "duration",
    "test_cases",
];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template is missing required placeholder ${{{0}}}")]
    MissingPlaceholder(&'static str),
    #[error("failed to read template {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// HTML document template with `${...}` placeholders
pub struct ReportTemplate {
    body: String,
}

impl ReportTemplate {
    /// The built-in report template
    pub fn builtin() -> Self {
        Self {
            body: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Load a custom template, validating at load time that every required
    /// placeholder is present
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let body = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::validate(&body)?;
        Ok(Self { body })
    }

    pub fn validate(body: &str) -> Result<(), TemplateError> {
        for name in PLACEHOLDERS {
            if !body.contains(&format!("${{{}}}", name)) {
                return Err(TemplateError::MissingPlaceholder(name));
            }
        }
        Ok(())
    }

    /// Safe substitution: known keys are replaced, unknown `${...}` tokens
    /// survive literally. Never fails.
    pub fn substitute(&self, values: &[(&str, String)]) -> String {
        let mut out = self.body.clone();
        for (name, value) in values {
            out = out.replace(&format!("${{{}}}", name), value);
        }
        out
    }
}

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Test Report - ${timestamp}</title>
    <style>
        :root {
            --bg-primary: #0a0f1d;
            --bg-secondary: #141b2d;
            --border: #374151;
            --text-primary: #f9fafb;
            --text-secondary: #9ca3af;
            --green: #10b981;
            --red: #ef4444;
            --yellow: #f59e0b;
        }

        * { margin: 0; padding: 0; box-sizing: border-box; }

        body {
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg-primary);
            color: var(--text-primary);
            line-height: 1.5;
            padding: 2rem 1rem;
        }

        .container { max-width: 1000px; margin: 0 auto; }

        header { margin-bottom: 2rem; display: flex; justify-content: space-between; align-items: flex-end; }
        h1 { font-size: 1.75rem; font-weight: 800; }
        header .meta { color: var(--text-secondary); font-size: 0.875rem; }

        .summary {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
            gap: 1rem;
            margin-bottom: 2.5rem;
        }

        .stat {
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            padding: 1.25rem;
            border-radius: 0.75rem;
        }
        .stat-value { font-size: 2rem; font-weight: 800; }
        .stat-label {
            color: var(--text-secondary);
            font-size: 0.8125rem;
            text-transform: uppercase;
            letter-spacing: 0.05em;
        }
        .stat.passed .stat-value { color: var(--green); }
        .stat.failed .stat-value { color: var(--red); }
        .stat.skipped .stat-value { color: var(--yellow); }

        .test-case {
            background: var(--bg-secondary);
            border: 1px solid var(--border);
            border-radius: 0.75rem;
            margin-bottom: 1rem;
            overflow: hidden;
        }

        .test-header {
            padding: 0.875rem 1.25rem;
            display: flex;
            justify-content: space-between;
            font-weight: 600;
            border-left: 4px solid var(--border);
        }
        .test-header.passed { border-left-color: var(--green); }
        .test-header.failed { border-left-color: var(--red); }
        .test-header.skipped { border-left-color: var(--yellow); }
        .test-header.error { border-left-color: var(--red); }

        .test-content { padding: 1rem 1.25rem; }

        .logs-section { margin-bottom: 0.75rem; }
        .logs-section summary { cursor: pointer; color: var(--text-secondary); font-size: 0.875rem; }
        .logs-section.no-logs { color: var(--text-secondary); font-size: 0.875rem; font-style: italic; }
        pre.logs {
            background: rgba(0, 0, 0, 0.3);
            border-radius: 0.5rem;
            padding: 0.75rem;
            margin-top: 0.5rem;
            font-size: 0.8125rem;
            overflow-x: auto;
            white-space: pre-wrap;
        }

        .error-message {
            background: rgba(239, 68, 68, 0.1);
            border: 1px solid rgba(239, 68, 68, 0.2);
            border-radius: 0.5rem;
            padding: 0.75rem;
            margin-bottom: 0.75rem;
            color: #fca5a5;
            font-size: 0.8125rem;
            font-family: monospace;
        }

        .screenshot-section h4 { margin-bottom: 0.5rem; font-size: 0.875rem; }
        .screenshot-section.missing { color: var(--text-secondary); font-size: 0.875rem; font-style: italic; }
        img.screenshot {
            max-width: 100%;
            border-radius: 0.5rem;
            border: 1px solid var(--border);
        }
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>Test Execution Report</h1>
            <div class="meta">Generated: ${timestamp}</div>
        </header>

        <div class="summary">
            <div class="stat passed">
                <div class="stat-value">${passed}</div>
                <div class="stat-label">Passed</div>
            </div>
            <div class="stat failed">
                <div class="stat-value">${failed}</div>
                <div class="stat-label">Failed</div>
            </div>
            <div class="stat skipped">
                <div class="stat-value">${skipped}</div>
                <div class="stat-label">Skipped</div>
            </div>
            <div class="stat">
                <div class="stat-value">${duration}</div>
                <div class="stat-label">Duration</div>
            </div>
        </div>

        ${test_cases}
    </div>
</body>
</html>
"#;
