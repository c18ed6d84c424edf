use std::path::PathBuf;

/// Reporting configuration
pub struct ReportConfig {
    /// Directory where reports are written
    pub reports_dir: PathBuf,

    /// Custom HTML template with `${...}` placeholders; the built-in
    /// template is used when unset
    pub template_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("reports"),
            template_path: None,
        }
    }
}

impl ReportConfig {
    /// Defaults with environment overrides: `REPORTS_DIR`, `REPORT_TEMPLATE`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("REPORTS_DIR") {
            if !dir.is_empty() {
                config.reports_dir = PathBuf::from(dir);
            }
        }
        if let Ok(template) = std::env::var("REPORT_TEMPLATE") {
            if !template.is_empty() {
                config.template_path = Some(PathBuf::from(template));
            }
        }
        config
    }
}
