//! End-to-end tests over the documents in `tests/fixtures/`.

use std::fs;
use std::path::PathBuf;

use api_report_analysis::conversion::convert;
use api_report_analysis::extractor::{SourceShape, extract, extract_endpoints};
use api_report_analysis::html::{DEFAULT_TITLE, render_conversion_report};
use api_report_analysis::{AnalysisError, analyze_api_text};
use api_report_core::{
    ApiFormat, ConversionReport, ConversionStatus, DataCategory, IssueKind, ParameterLocation,
    PurposeCategory, SecurityLevel, SemanticType,
};

const TIMESTAMP: &str = "2024-01-15T10:30:00Z";

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(path).expect("fixture file must be readable")
}

// ---------------------------------------------------------------------------
// Collection documents
// ---------------------------------------------------------------------------

#[test]
fn collection_leaves_at_every_depth_become_endpoints() {
    let extraction = extract(&fixture("shop-collection.json")).unwrap();
    assert_eq!(extraction.shape, SourceShape::Collection);

    let names: Vec<_> = extraction.endpoints.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Login",
            "List products",
            "Get product",
            "Create product",
            "Replace product",
            "Delete product",
            "Get product",
            "Health",
            "Broken",
        ]
    );
}

#[test]
fn collection_folders_are_carried_as_groups() {
    let endpoints = extract_endpoints(&fixture("shop-collection.json"));
    let groups: Vec<_> = endpoints.iter().map(|e| e.group.as_deref()).collect();
    assert_eq!(groups[0], Some("Auth"));
    assert_eq!(groups[1], Some("Products"));
    assert_eq!(groups[3], Some("Products/Admin"));
    assert_eq!(groups[6], Some("Products/Admin/Archive"));
    assert_eq!(groups[7], None);
}

#[test]
fn collection_request_details_are_kept() {
    let endpoints = extract_endpoints(&fixture("shop-collection.json"));

    let login = &endpoints[0];
    assert_eq!(login.method, "POST");
    assert_eq!(login.url.as_deref(), Some("{{baseUrl}}/auth/login"));
    assert_eq!(login.headers.len(), 1);
    assert_eq!(login.headers[0].key, "Content-Type");
    let body = login.request_body.as_ref().unwrap();
    assert_eq!(body.content_type.as_deref(), Some("application/json"));
    assert!(body.example.as_deref().unwrap().contains("password"));

    let health = &endpoints[7];
    assert_eq!(health.url.as_deref(), Some("https://shop.example.com/health"));
}

#[test]
fn collection_analysis_groups_resources() {
    let analysis = analyze_api_text(&fixture("shop-collection.json")).unwrap();
    let structure = &analysis.semantic_structure;

    assert_eq!(structure.resources, vec!["auth", "products", "health", "orders"]);
    assert_eq!(structure.main_resource.as_deref(), Some("products"));

    let products = &structure.relationships[1];
    assert_eq!(products.resource_name, "products");
    assert_eq!(products.endpoint_count, 6);
    assert_eq!(products.operation_counts.get, 3);
    assert!(products.has_full_crud);
    assert!(!products.is_read_only);

    let health = &structure.relationships[2];
    assert!(health.is_read_only);
    assert!(!health.has_full_crud);

    for group in &structure.relationships {
        assert!(!(group.has_full_crud && group.is_read_only));
    }
}

#[test]
fn collection_classification() {
    let analysis = analyze_api_text(&fixture("shop-collection.json")).unwrap();
    let endpoints = &analysis.semantic_structure.endpoints;

    let login = &endpoints[0].classification;
    assert_eq!(login.semantic_type, SemanticType::ResourceCreation);
    assert_eq!(login.purpose_category, PurposeCategory::Authentication);
    assert_eq!(login.security_level, SecurityLevel::Authenticated);

    let get_product = &endpoints[2].classification;
    assert_eq!(get_product.semantic_type, SemanticType::ResourceRetrieval);
    assert_eq!(get_product.purpose_category, PurposeCategory::GeneralPurpose);

    let health = &endpoints[7].classification;
    assert_eq!(health.security_level, SecurityLevel::Public);
    assert_eq!(health.data_category, DataCategory::HealthData);
}

#[test]
fn collection_conversion_reports_failures_in_order() {
    let run = convert(
        &fixture("shop-collection.json"),
        ApiFormat::Postman,
        ApiFormat::Swagger,
        TIMESTAMP,
    )
    .unwrap();

    assert!(run.warnings.is_empty());
    assert_eq!(run.report.total, 9);
    assert_eq!(run.report.successful, 7);
    assert_eq!(run.report.failed, 2);
    assert_eq!(run.summary(), "Successfully converted 7 of 9 endpoints");

    let duplicate = &run.report.endpoints[6];
    assert_eq!(duplicate.status, ConversionStatus::Failed);
    assert!(
        duplicate
            .error_message
            .as_deref()
            .unwrap()
            .starts_with("Operation ID collision detected")
    );

    let broken = &run.report.endpoints[8];
    assert_eq!(
        broken.error_message.as_deref(),
        Some("Invalid path parameter syntax in https://shop.example.com/orders/{id")
    );
}

#[test]
fn collection_converted_to_openapi_extracts_again() {
    let run = convert(
        &fixture("shop-collection.json"),
        ApiFormat::Postman,
        ApiFormat::Swagger,
        TIMESTAMP,
    )
    .unwrap();

    let extraction = extract(&run.artifact).unwrap();
    assert_eq!(extraction.shape, SourceShape::PathMap);
    assert_eq!(extraction.endpoints.len(), 7);
    assert!(
        extraction
            .endpoints
            .iter()
            .any(|e| e.method == "POST" && e.path.as_deref() == Some("/auth/login"))
    );
}

#[test]
fn collection_converted_to_collection_keeps_folders() {
    let run = convert(
        &fixture("shop-collection.json"),
        ApiFormat::Postman,
        ApiFormat::Postman,
        TIMESTAMP,
    )
    .unwrap();

    let endpoints = extract_endpoints(&run.artifact);
    assert_eq!(endpoints.len(), 7);
    assert_eq!(endpoints[0].group.as_deref(), Some("Auth"));
    assert!(
        endpoints
            .iter()
            .any(|e| e.name == "Create product" && e.group.as_deref() == Some("Products/Admin"))
    );
    assert!(endpoints.iter().all(|e| e.name != "Broken"));
}

// ---------------------------------------------------------------------------
// Path-map documents
// ---------------------------------------------------------------------------

#[test]
fn path_map_yields_one_endpoint_per_operation() {
    let extraction = extract(&fixture("petstore-openapi.json")).unwrap();
    assert_eq!(extraction.shape, SourceShape::PathMap);

    let ops: Vec<_> = extraction
        .endpoints
        .iter()
        .map(|e| format!("{} {}", e.method, e.path.as_deref().unwrap_or_default()))
        .collect();
    assert_eq!(
        ops,
        vec![
            "GET /pets",
            "POST /pets",
            "GET /pets/{petId}",
            "PATCH /pets/{petId}",
            "DELETE /pets/{petId}",
            "GET /stores/{storeId}/pets",
            "DELETE /admin/users/{id}",
        ]
    );
}

#[test]
fn path_map_names_and_references() {
    let endpoints = extract_endpoints(&fixture("petstore-openapi.json"));

    assert_eq!(endpoints[0].name, "List pets");
    assert_eq!(endpoints[1].name, "createPet");
    assert_eq!(endpoints[6].name, "DELETE /admin/users/{id}");

    let shared = endpoints[2].declared_params(ParameterLocation::Path);
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].name, "petId");
    assert!(shared[0].required);

    let not_found = endpoints[2]
        .responses
        .as_ref()
        .unwrap()
        .iter()
        .find(|r| r.status_code == "404")
        .unwrap();
    assert_eq!(not_found.description, "Pet not found");

    let body = endpoints[1].request_body.as_ref().unwrap();
    assert_eq!(body.content_type.as_deref(), Some("application/json"));
    assert_eq!(body.schema.as_ref().unwrap()["type"], "object");
}

#[test]
fn path_map_validation_issues() {
    let analysis = analyze_api_text(&fixture("petstore-openapi.json")).unwrap();
    let issues = &analysis.validation_issues;

    let summary: Vec<_> = issues
        .iter()
        .map(|i| (i.kind, i.path.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (IssueKind::Warning, "endpoints[3].responses"),
            (IssueKind::Error, "endpoints[5].parameters"),
            (IssueKind::Error, "endpoints[6].parameters"),
        ]
    );
    assert_eq!(
        issues[2].message,
        "Path parameter {id} is used but not defined in parameters"
    );
}

#[test]
fn path_map_admin_endpoint_classification() {
    let analysis = analyze_api_text(&fixture("petstore-openapi.json")).unwrap();
    let admin = &analysis.semantic_structure.endpoints[6].classification;
    assert_eq!(admin.semantic_type, SemanticType::ResourceDeletion);
    assert_eq!(admin.purpose_category, PurposeCategory::UserManagement);
    assert_eq!(admin.security_level, SecurityLevel::Admin);
    assert_eq!(admin.data_category, DataCategory::PersonalData);
}

#[test]
fn path_map_resources_and_improvements() {
    let analysis = analyze_api_text(&fixture("petstore-openapi.json")).unwrap();
    let structure = &analysis.semantic_structure;

    assert_eq!(structure.resources, vec!["pets", "stores", "admin"]);
    assert_eq!(structure.main_resource.as_deref(), Some("pets"));
    assert!(structure.relationships[0].has_full_crud);
    assert!(structure.relationships[1].is_read_only);

    let paths: Vec<_> = analysis
        .suggested_improvements
        .iter()
        .map(|i| i.path.as_str())
        .collect();
    assert_eq!(paths, vec!["general", "security", "documentation", "endpoints[5]"]);

    assert_eq!(analysis.generated_documentation.endpoints.len(), 7);
    assert!(
        analysis
            .generated_documentation
            .overview
            .starts_with("This API provides 7 endpoints")
    );
}

#[test]
fn path_map_converts_to_collection_without_failures() {
    let run = convert(
        &fixture("petstore-openapi.json"),
        ApiFormat::Swagger,
        ApiFormat::Postman,
        TIMESTAMP,
    )
    .unwrap();
    assert_eq!(run.report.successful, 7);
    assert_eq!(run.report.failed, 0);

    let endpoints = extract_endpoints(&run.artifact);
    assert_eq!(endpoints.len(), 7);
    assert_eq!(endpoints[0].url.as_deref(), Some("{{baseUrl}}/pets"));
}

#[test]
fn path_map_declared_as_collection_warns() {
    let run = convert(
        &fixture("petstore-openapi.json"),
        ApiFormat::Postman,
        ApiFormat::Cypress,
        TIMESTAMP,
    )
    .unwrap();
    assert_eq!(run.warnings.len(), 1);
    assert_eq!(run.report.total, 7);
    assert!(run.artifact.starts_with("// Converted from Postman Collection to Cypress"));
}

// ---------------------------------------------------------------------------
// Reports and failures
// ---------------------------------------------------------------------------

#[test]
fn report_survives_json_and_renders_identically() {
    let run = convert(
        &fixture("shop-collection.json"),
        ApiFormat::Postman,
        ApiFormat::Jmx,
        TIMESTAMP,
    )
    .unwrap();

    let json = serde_json::to_string(&run.report).unwrap();
    let back: ConversionReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, run.report);

    let first = render_conversion_report(&run.report, run.source, run.target, DEFAULT_TITLE);
    let second = render_conversion_report(&back, run.source, run.target, DEFAULT_TITLE);
    assert_eq!(first, second);
    assert!(first.contains("<strong>78%</strong>"));
}

#[test]
fn malformed_input_fails_without_partial_results() {
    let text = fixture("malformed.txt");

    assert!(matches!(analyze_api_text(&text), Err(AnalysisError::Parse(_))));
    assert!(extract_endpoints(&text).is_empty());
    assert!(matches!(
        convert(&text, ApiFormat::Postman, ApiFormat::Swagger, TIMESTAMP),
        Err(AnalysisError::Parse(_))
    ));
}

#[test]
fn unparseable_source_format_is_rejected() {
    let err = convert(
        &fixture("shop-collection.json"),
        ApiFormat::Soapui,
        ApiFormat::Swagger,
        TIMESTAMP,
    )
    .unwrap_err();
    assert!(matches!(err, AnalysisError::UnsupportedSource(ApiFormat::Soapui)));
}
