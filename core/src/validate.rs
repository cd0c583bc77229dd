//! Endpoint validation rules.
//!
//! Five independent checks run against every endpoint and their findings
//! are concatenated; one endpoint can produce several issues. Rules that
//! depend on an optional field (responses, path) are skipped when the field
//! is absent.
//!
//! # Examples
//!
//! ```
//! use api_report_core::*;
//!
//! let ep = EndpointDescriptor::new("DELETE", "/admin/users/{id}");
//! let issues = validate_endpoints(&[ep]);
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].kind, IssueKind::Error);
//! assert_eq!(
//!     issues[0].message,
//!     "Path parameter {id} is used but not defined in parameters"
//! );
//! ```

use crate::{EndpointDescriptor, ParameterLocation, ResponseClass, ValidationIssue};

/// Runs every rule against every endpoint, in order.
pub fn validate_endpoints(endpoints: &[EndpointDescriptor]) -> Vec<ValidationIssue> {
    endpoints
        .iter()
        .enumerate()
        .flat_map(|(index, endpoint)| validate_endpoint(index, endpoint))
        .collect()
}

/// Runs every rule against one endpoint. `index` is used for issue paths.
pub fn validate_endpoint(index: usize, endpoint: &EndpointDescriptor) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let base = format!("endpoints[{index}]");

    if endpoint.name.trim().is_empty() || endpoint.path.as_deref() == Some(endpoint.name.as_str()) {
        issues.push(
            ValidationIssue::warning(&base, "Missing or generic endpoint name/description")
                .with_suggestion("Add a descriptive name that explains the endpoint purpose"),
        );
    }

    if let Some(path) = endpoint.path.as_deref() {
        if !path.starts_with('/') {
            issues.push(
                ValidationIssue::error(format!("{base}.path"), "Path should start with /")
                    .with_suggestion(format!("Change {path} to /{path}")),
            );
        }
    }

    if let Some(responses) = &endpoint.responses {
        let has_success = responses
            .iter()
            .any(|r| r.class() == ResponseClass::Success);
        let has_error = responses
            .iter()
            .any(|r| matches!(r.class(), ResponseClass::ClientError | ResponseClass::ServerError));

        if !has_success {
            issues.push(
                ValidationIssue::warning(
                    format!("{base}.responses"),
                    "Missing success response definition",
                )
                .with_suggestion("Add at least one 2xx response code"),
            );
        }
        if !has_error {
            issues.push(
                ValidationIssue::warning(
                    format!("{base}.responses"),
                    "Missing error response definition",
                )
                .with_suggestion("Add at least one 4xx or 5xx response code"),
            );
        }
    }

    let declared: Vec<&str> = endpoint
        .declared_params(ParameterLocation::Path)
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    for param in endpoint.path_params() {
        if !declared.contains(&param.as_str()) {
            issues.push(
                ValidationIssue::error(
                    format!("{base}.parameters"),
                    format!("Path parameter {{{param}}} is used but not defined in parameters"),
                )
                .with_suggestion(format!("Add a path parameter definition for \"{param}\"")),
            );
        }
    }

    issues
}
