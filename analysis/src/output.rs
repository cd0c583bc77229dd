//! Output formatting for endpoints, analyses and conversion reports.

use api_report_core::{ApiAnalysis, ConversionReport, EndpointDescriptor};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Formats for printing results to a terminal or pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

/// Report files a conversion run can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ReportFile {
    Json,
    Html,
}

impl ReportFile {
    /// Date-stamped file name, e.g. `conversion-report-2024-01-15.html`.
    ///
    /// # Examples
    ///
    /// ```
    /// use api_report_analysis::output::ReportFile;
    ///
    /// assert_eq!(ReportFile::Json.file_name("2024-01-15"), "conversion-report-2024-01-15.json");
    /// ```
    pub fn file_name(&self, date: &str) -> String {
        let ext = match self {
            Self::Json => "json",
            Self::Html => "html",
        };
        format!("conversion-report-{date}.{ext}")
    }
}

/// Pretty-printed JSON of any model value.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// YAML of any model value.
pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_yaml::to_string(value)?)
}

/// Formats extracted endpoints.
pub fn format_endpoints(endpoints: &[EndpointDescriptor], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(endpoints),
        OutputFormat::Yaml => to_yaml(endpoints),
        OutputFormat::Table => Ok(endpoints_to_table(endpoints)),
    }
}

/// Formats an analysis result.
pub fn format_analysis(analysis: &ApiAnalysis, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(analysis),
        OutputFormat::Yaml => to_yaml(analysis),
        OutputFormat::Table => Ok(analysis_to_table(analysis)),
    }
}

/// Formats a conversion report.
pub fn format_report(report: &ConversionReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

fn endpoints_to_table(endpoints: &[EndpointDescriptor]) -> String {
    let mut out = format!("Endpoints: {}\n", endpoints.len());
    if endpoints.is_empty() {
        return out;
    }
    let width = endpoints
        .iter()
        .map(|e| e.target().len())
        .max()
        .unwrap_or(0)
        .max(4);
    out.push_str(&format!("  {:<7} {:<width$}  NAME\n", "METHOD", "PATH"));
    for endpoint in endpoints {
        out.push_str(&format!(
            "  {:<7} {:<width$}  {}",
            endpoint.method,
            endpoint.target(),
            endpoint.name
        ));
        if let Some(group) = &endpoint.group {
            out.push_str(&format!("  [{group}]"));
        }
        out.push('\n');
    }
    out
}

fn analysis_to_table(analysis: &ApiAnalysis) -> String {
    let structure = &analysis.semantic_structure;
    let mut out = format!(
        "Endpoints: {}  Resources: {}  Main resource: {}\n",
        structure.endpoints.len(),
        structure.relationships.len(),
        structure.main_resource.as_deref().unwrap_or("-")
    );

    if !structure.endpoints.is_empty() {
        out.push_str("\nEndpoints:\n");
        for annotated in &structure.endpoints {
            let tags = &annotated.classification;
            out.push_str(&format!(
                "  {:<7} {}  {} / {} / {} / {}\n",
                annotated.endpoint.method,
                annotated.endpoint.target(),
                tags.semantic_type,
                tags.purpose_category,
                tags.security_level,
                tags.data_category
            ));
        }
    }

    if !structure.relationships.is_empty() {
        out.push_str("\nResources:\n");
        for group in &structure.relationships {
            let ops = &group.operation_counts;
            let coverage = if group.has_full_crud {
                "full CRUD"
            } else if group.is_read_only {
                "read-only"
            } else {
                "partial"
            };
            out.push_str(&format!(
                "  {:<16} {:>3} endpoints  GET {} POST {} PUT {} PATCH {} DELETE {}  ({coverage})\n",
                group.resource_name,
                group.endpoint_count,
                ops.get,
                ops.post,
                ops.put,
                ops.patch,
                ops.delete
            ));
        }
    }

    if !analysis.validation_issues.is_empty() {
        out.push_str(&format!(
            "\nValidation issues ({}):\n",
            analysis.validation_issues.len()
        ));
        for issue in &analysis.validation_issues {
            out.push_str(&format!(
                "  [{}] {}: {}\n",
                issue.kind, issue.path, issue.message
            ));
            if let Some(suggestion) = &issue.suggestion {
                out.push_str(&format!("      -> {suggestion}\n"));
            }
        }
    }

    out.push_str(&format!(
        "\nSuggested improvements ({}):\n",
        analysis.suggested_improvements.len()
    ));
    for improvement in &analysis.suggested_improvements {
        out.push_str(&format!(
            "  {}: {}\n",
            improvement.path, improvement.suggested_implementation
        ));
    }
    out
}

fn report_to_table(report: &ConversionReport) -> String {
    let mut out = format!(
        "Converted {}/{} endpoints ({}% success, {} failed)\n",
        report.successful,
        report.total,
        report.success_percent(),
        report.failed
    );
    for endpoint in &report.endpoints {
        out.push_str(&format!(
            "  {:<7} {:<7} {}",
            endpoint.status.to_string().to_uppercase(),
            endpoint.method,
            endpoint.path
        ));
        if let Some(error) = &endpoint.error_message {
            out.push_str(&format!("  ({error})"));
        }
        out.push('\n');
    }
    out
}
