//! Extraction, classification and reporting for API descriptions.
//!
//! This crate turns the text of a Postman collection or an OpenAPI/Swagger
//! document into endpoint descriptors, classifies them, groups them into
//! resources, validates them, generates documentation and evaluates how
//! they convert to another format. Results are rendered as JSON, YAML,
//! terminal tables or self-contained HTML.
//!
//! # Main entry points
//!
//! - [`analyze_api_text`]: full analysis of a document.
//! - [`conversion::convert`]: per-endpoint conversion report plus the
//!   converted artifact.
//! - [`extractor::extract`]: endpoint extraction only.
//!
//! # Example
//!
//! ```
//! use api_report_analysis::analyze_api_text;
//! use api_report_core::{SemanticType, PurposeCategory};
//!
//! let text = r#"{"openapi":"3.0.0","paths":{"/users":{"get":{"summary":"List users"}}}}"#;
//! let analysis = analyze_api_text(text).unwrap();
//!
//! let endpoint = &analysis.semantic_structure.endpoints[0];
//! assert_eq!(endpoint.endpoint.name, "List users");
//! assert_eq!(endpoint.classification.semantic_type, SemanticType::CollectionRetrieval);
//! assert_eq!(endpoint.classification.purpose_category, PurposeCategory::DataRetrieval);
//! assert_eq!(analysis.semantic_structure.main_resource.as_deref(), Some("users"));
//! ```
//!
//! Nothing here reads the clock or global state: timestamps are passed in
//! by the caller.

pub mod artifact;
pub mod classify;
pub mod config;
pub mod conversion;
pub mod docs;
pub mod docs_html;
mod error;
pub mod extractor;
pub mod html;
pub mod improvements;
pub mod output;
pub mod resources;
pub mod semantic;

use api_report_core::{ApiAnalysis, EndpointDescriptor, validate_endpoints};
use tracing::debug;

pub use error::{AnalysisError, Result};

/// Parses and analyzes an API description.
///
/// # Errors
///
/// Returns [`AnalysisError::Parse`] when `text` is not valid JSON; no
/// partial analysis is produced in that case.
pub fn analyze_api_text(text: &str) -> Result<ApiAnalysis> {
    let extraction = extractor::extract(text)?;
    Ok(analyze_endpoints(&extraction.endpoints))
}

/// Analyzes already extracted endpoints. Never fails.
pub fn analyze_endpoints(endpoints: &[EndpointDescriptor]) -> ApiAnalysis {
    let analysis = ApiAnalysis {
        semantic_structure: semantic::semantic_structure(endpoints),
        validation_issues: validate_endpoints(endpoints),
        suggested_improvements: improvements::suggest_improvements(endpoints),
        generated_documentation: docs::generate_documentation(endpoints),
    };
    debug!(
        endpoints = endpoints.len(),
        issues = analysis.validation_issues.len(),
        improvements = analysis.suggested_improvements.len(),
        "Analysis complete"
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_yields_no_analysis() {
        let err = analyze_api_text("definitely not json").unwrap_err();
        assert!(matches!(err, AnalysisError::Parse(_)));
    }

    #[test]
    fn test_unrecognized_document_analyzes_to_empty() {
        let analysis = analyze_api_text(r#"{"info":{}}"#).unwrap();
        assert!(analysis.semantic_structure.endpoints.is_empty());
        assert!(analysis.validation_issues.is_empty());
        assert_eq!(analysis.suggested_improvements.len(), 3);
        assert!(analysis.generated_documentation.endpoints.is_empty());
    }
}
