use serde::{Deserialize, Serialize};

use crate::{Documentation, Improvement, SemanticStructure, ValidationIssue};

/// Outcome of converting a single endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionStatus {
    Success,
    Failed,
}

impl std::fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Success => "success",
            Self::Failed => "failed",
        })
    }
}

/// Per-endpoint row of a [`ConversionReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionEndpointResult {
    pub name: String,
    pub path: String,
    pub method: String,
    pub status: ConversionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ConversionEndpointResult {
    pub fn success(name: &str, path: &str, method: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            method: method.to_string(),
            status: ConversionStatus::Success,
            error_message: None,
        }
    }

    pub fn failed(name: &str, path: &str, method: &str, error: impl Into<String>) -> Self {
        Self {
            status: ConversionStatus::Failed,
            error_message: Some(error.into()),
            ..Self::success(name, path, method)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Success
    }
}

/// Result of converting an API description to a target format.
///
/// The counters are derived from `endpoints` when the report is built, so
/// `failed == total - successful` always holds for constructed reports.
///
/// # Examples
///
/// ```
/// use api_report_core::*;
///
/// let report = ConversionReport::new(
///     vec![
///         ConversionEndpointResult::success("List users", "/users", "GET"),
///         ConversionEndpointResult::failed("Bad", "/x/{", "GET", "Invalid path parameter syntax"),
///     ],
///     "2024-01-15T10:30:00Z",
/// );
/// assert_eq!(report.total, 2);
/// assert_eq!(report.successful, 1);
/// assert_eq!(report.failed, 1);
/// assert_eq!(report.success_percent(), 50);
///
/// let empty = ConversionReport::new(Vec::new(), "2024-01-15T10:30:00Z");
/// assert_eq!(empty.success_percent(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// RFC 3339 timestamp supplied by the caller.
    pub timestamp: String,
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub endpoints: Vec<ConversionEndpointResult>,
}

impl ConversionReport {
    pub fn new(endpoints: Vec<ConversionEndpointResult>, timestamp: impl Into<String>) -> Self {
        let total = endpoints.len();
        let successful = endpoints.iter().filter(|e| e.is_success()).count();
        Self {
            timestamp: timestamp.into(),
            total,
            successful,
            failed: total - successful,
            endpoints,
        }
    }

    /// Fraction of successful endpoints in `0.0..=1.0`; `0.0` for an empty report.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.successful as f64 / self.total as f64
    }

    /// Success rate as a rounded whole percentage.
    pub fn success_percent(&self) -> u32 {
        (self.success_rate() * 100.0).round() as u32
    }
}

/// Combined output of an analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAnalysis {
    pub semantic_structure: SemanticStructure,
    pub validation_issues: Vec<ValidationIssue>,
    pub suggested_improvements: Vec<Improvement>,
    pub generated_documentation: Documentation,
}
