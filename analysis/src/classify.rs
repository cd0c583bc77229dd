//! Per-endpoint semantic classification.
//!
//! Every function here is a pure function of the endpoint's method and its
//! path (or raw URL when no path template exists). Keyword checks are
//! case-insensitive substring matches and the first matching rule wins.

use std::sync::LazyLock;

use api_report_core::{
    DataCategory, EndpointClassification, EndpointDescriptor, HttpMethod, PurposeCategory,
    SecurityLevel, SemanticType,
};
use regex::Regex;

/// A `{param}` segment closing the path, preceded by at least one segment.
static TRAILING_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/[^/]+/\{[^}]+\}$").expect("static regex must compile"));

/// Returns `true` when `target` addresses a single resource (`/users/{id}`).
pub fn ends_with_param(target: &str) -> bool {
    TRAILING_PARAM_RE.is_match(target)
}

/// Computes all four tags for an endpoint.
pub fn classify(endpoint: &EndpointDescriptor) -> EndpointClassification {
    let method = endpoint.http_method();
    let target = endpoint.target();
    EndpointClassification {
        semantic_type: semantic_type(method, target),
        purpose_category: purpose_category(method, target),
        security_level: security_level(method, target),
        data_category: data_category(target),
    }
}

pub fn semantic_type(method: HttpMethod, target: &str) -> SemanticType {
    match method {
        HttpMethod::Get if ends_with_param(target) => SemanticType::ResourceRetrieval,
        HttpMethod::Get => SemanticType::CollectionRetrieval,
        HttpMethod::Post => SemanticType::ResourceCreation,
        HttpMethod::Put => SemanticType::FullResourceUpdate,
        HttpMethod::Patch => SemanticType::PartialResourceUpdate,
        HttpMethod::Delete => SemanticType::ResourceDeletion,
        _ => SemanticType::Unknown,
    }
}

pub fn purpose_category(method: HttpMethod, target: &str) -> PurposeCategory {
    let target = target.to_ascii_lowercase();
    if contains_any(&target, &["auth", "login", "token"]) {
        PurposeCategory::Authentication
    } else if contains_any(&target, &["user", "account"]) {
        PurposeCategory::UserManagement
    } else if method == HttpMethod::Get && !ends_with_param(&target) {
        PurposeCategory::DataRetrieval
    } else if matches!(method, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch) {
        PurposeCategory::DataManipulation
    } else if method == HttpMethod::Delete {
        PurposeCategory::DataDeletion
    } else {
        PurposeCategory::GeneralPurpose
    }
}

pub fn security_level(method: HttpMethod, target: &str) -> SecurityLevel {
    let target = target.to_ascii_lowercase();
    if contains_any(&target, &["public", "/health"]) {
        SecurityLevel::Public
    } else if contains_any(&target, &["admin", "manage"]) {
        SecurityLevel::Admin
    } else if method.is_mutating() {
        SecurityLevel::Authenticated
    } else {
        SecurityLevel::Standard
    }
}

pub fn data_category(target: &str) -> DataCategory {
    let target = target.to_ascii_lowercase();
    if contains_any(&target, &["user", "account", "profile"]) {
        DataCategory::PersonalData
    } else if contains_any(&target, &["payment", "billing", "subscription"]) {
        DataCategory::FinancialData
    } else if contains_any(&target, &["health", "medical"]) {
        DataCategory::HealthData
    } else {
        DataCategory::GeneralData
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
