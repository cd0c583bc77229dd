//! Per-endpoint conversion evaluation.
//!
//! Each endpoint is checked against a fixed list of rules; the first rule it
//! breaks decides its `failed` status and message. Endpoints that pass every
//! rule are converted.

use std::collections::HashSet;

use api_report_core::{
    ApiFormat, ConversionEndpointResult, ConversionReport, EndpointDescriptor, HttpMethod,
};
use tracing::{debug, info, warn};

use crate::artifact::{openapi_path, render_artifact};
use crate::error::{AnalysisError, Result};
use crate::extractor::{SourceShape, extract};

/// Path shown in report rows for endpoints with no path or URL.
const UNKNOWN_PATH: &str = "/unknown";

/// Output of a conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRun {
    pub source: ApiFormat,
    pub target: ApiFormat,
    pub report: ConversionReport,
    /// Converted document for `target`, containing successful endpoints only.
    pub artifact: String,
    /// Non-fatal notes, such as a source-format mismatch.
    pub warnings: Vec<String>,
}

impl ConversionRun {
    /// The notification line shown after a run.
    pub fn summary(&self) -> String {
        format!(
            "Successfully converted {} of {} endpoints",
            self.report.successful, self.report.total
        )
    }
}

/// Converts an API description from `source` to `target`.
///
/// `timestamp` is stored verbatim in the report.
///
/// # Errors
///
/// Returns [`AnalysisError::UnsupportedSource`] when `source` cannot be
/// parsed and [`AnalysisError::Parse`] when `text` is not valid JSON.
pub fn convert(
    text: &str,
    source: ApiFormat,
    target: ApiFormat,
    timestamp: &str,
) -> Result<ConversionRun> {
    if !source.is_parseable() {
        return Err(AnalysisError::UnsupportedSource(source));
    }
    let extraction = extract(text)?;

    let mut warnings = Vec::new();
    if let Some(warning) = shape_warning(source, extraction.shape) {
        warn!(source = %source, shape = ?extraction.shape, "{warning}");
        warnings.push(warning);
    }

    let results = evaluate_endpoints(&extraction.endpoints, target);
    let converted: Vec<EndpointDescriptor> = extraction
        .endpoints
        .iter()
        .zip(&results)
        .filter(|(_, result)| result.is_success())
        .map(|(endpoint, _)| endpoint.clone())
        .collect();
    let artifact = render_artifact(source, target, &converted)?;
    let report = ConversionReport::new(results, timestamp);

    info!(
        source = %source,
        target = %target,
        successful = report.successful,
        total = report.total,
        "Conversion finished"
    );

    Ok(ConversionRun {
        source,
        target,
        report,
        artifact,
        warnings,
    })
}

fn shape_warning(source: ApiFormat, shape: SourceShape) -> Option<String> {
    let expected = match source {
        ApiFormat::Postman => SourceShape::Collection,
        _ => SourceShape::PathMap,
    };
    match shape {
        SourceShape::Unrecognized => Some(format!(
            "Document is neither a collection nor a path map; no endpoints found for {}",
            source.display_name()
        )),
        detected if detected != expected => Some(format!(
            "Declared source format {} does not match the document; converting it as a {}",
            source.display_name(),
            match detected {
                SourceShape::Collection => "collection",
                _ => "path map",
            }
        )),
        _ => None,
    }
}

/// Evaluates every endpoint, in order, for conversion to `target`.
///
/// Duplicates are detected on the key the target document uses: the raw
/// path or URL, or the bare path for OpenAPI.
pub fn evaluate_endpoints(
    endpoints: &[EndpointDescriptor],
    target: ApiFormat,
) -> Vec<ConversionEndpointResult> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    endpoints
        .iter()
        .map(|endpoint| {
            let raw_target = endpoint.target();
            let path = if raw_target.is_empty() { UNKNOWN_PATH } else { raw_target };
            match conversion_error(endpoint, target, &mut seen) {
                None => ConversionEndpointResult::success(&endpoint.name, path, &endpoint.method),
                Some(error) => {
                    debug!(endpoint = %endpoint.name, error = %error, "Endpoint not converted");
                    ConversionEndpointResult::failed(&endpoint.name, path, &endpoint.method, error)
                }
            }
        })
        .collect()
}

fn conversion_error(
    endpoint: &EndpointDescriptor,
    target_format: ApiFormat,
    seen: &mut HashSet<(String, String)>,
) -> Option<String> {
    if endpoint.http_method() == HttpMethod::Other {
        return Some(format!("Unsupported HTTP method: {}", endpoint.method));
    }
    let target = endpoint.target();
    if target.trim().is_empty() {
        return Some("Missing request URL or path".to_string());
    }
    if !template_is_well_formed(target) {
        return Some(format!("Invalid path parameter syntax in {target}"));
    }
    let key = match target_format {
        ApiFormat::Swagger => openapi_path(endpoint),
        _ => target.to_string(),
    };
    if seen.contains(&(endpoint.method.clone(), key.clone())) {
        return Some(format!(
            "Operation ID collision detected: {} {key} is defined more than once",
            endpoint.method
        ));
    }
    seen.insert((endpoint.method.clone(), key));
    None
}

/// Braces must balance and no placeholder may be empty. `{{var}}` is fine.
pub fn template_is_well_formed(target: &str) -> bool {
    if target.contains("{}") {
        return false;
    }
    let mut depth = 0usize;
    for c in target.chars() {
        match c {
            '{' => depth += 1,
            '}' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
