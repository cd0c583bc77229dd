//! Analyzer configuration.
//!
//! Holds defaults for conversion runs so they do not have to be repeated on
//! every command line. Command-line flags always win over the file.
//!
//! # Example YAML
//!
//! ```yaml
//! source: postman
//! target: swagger
//! reports:
//!   - json
//!   - html
//! output_dir: reports
//! html_title: Nightly conversion
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use api_report_core::ApiFormat;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::html::DEFAULT_TITLE;
use crate::output::ReportFile;

/// Defaults for conversion and documentation runs.
///
/// Every field is optional in YAML; missing fields take the values from
/// [`AnalyzerConfig::default`].
///
/// # Examples
///
/// ```
/// use api_report_analysis::config::AnalyzerConfig;
/// use api_report_analysis::output::ReportFile;
/// use api_report_core::ApiFormat;
///
/// let config: AnalyzerConfig = serde_yaml::from_str("target: cypress\n").unwrap();
/// assert_eq!(config.target, Some(ApiFormat::Cypress));
/// assert_eq!(config.reports, vec![ReportFile::Json, ReportFile::Html]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Source format used when `--from` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<ApiFormat>,
    /// Target format used when `--to` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<ApiFormat>,
    /// Report files written next to the converted artifact.
    pub reports: Vec<ReportFile>,
    /// Directory used when `--output` is not given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Title of the HTML conversion report.
    pub html_title: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            source: None,
            target: None,
            reports: vec![ReportFile::Json, ReportFile::Html],
            output_dir: None,
            html_title: DEFAULT_TITLE.to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::AnalysisError::Io) if the file cannot be read,
    /// or [`Yaml`](crate::AnalysisError::Yaml) if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::AnalysisError::Io) if the file cannot be
    /// written, or [`Yaml`](crate::AnalysisError::Yaml) if serialization
    /// fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }
}
