//! Endpoint extraction from raw API description text.
//!
//! Two document shapes are understood:
//!
//! - **Collection** (Postman style): an `item` tree of folders and requests.
//!   Folders are walked to any depth and their names are joined into the
//!   endpoint's `group`.
//! - **Path map** (OpenAPI 3 / Swagger 2): a `paths` object whose entries map
//!   HTTP-method keys to operations.
//!
//! Anything else yields no endpoints. Only invalid JSON is an error.

use api_report_core::{
    EndpointDescriptor, HeaderDescriptor, HttpMethod, ParameterDescriptor, ParameterLocation,
    RequestBodyDescriptor, ResponseDescriptor, default_name,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};

/// Hop limit when following `$ref` chains.
const MAX_REF_DEPTH: usize = 8;

/// Document shape detected by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceShape {
    /// Postman-style `item` tree.
    Collection,
    /// OpenAPI/Swagger `paths` map.
    PathMap,
    /// Valid JSON with neither shape.
    Unrecognized,
}

impl SourceShape {
    /// Detects the shape of a parsed document. `item` takes precedence.
    pub fn detect(doc: &Value) -> Self {
        if doc.get("item").is_some_and(|v| !v.is_null()) {
            Self::Collection
        } else if doc.get("paths").is_some_and(|v| !v.is_null()) {
            Self::PathMap
        } else {
            Self::Unrecognized
        }
    }
}

/// Endpoints extracted from one document, with the detected shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub shape: SourceShape,
    pub endpoints: Vec<EndpointDescriptor>,
}

/// Parses input text as JSON.
///
/// # Errors
///
/// Returns [`AnalysisError::Parse`] if the text is not valid JSON.
pub fn parse_document(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(AnalysisError::Parse)
}

/// Parses `text` and extracts every endpoint it describes.
///
/// # Errors
///
/// Returns [`AnalysisError::Parse`] if the text is not valid JSON. A valid
/// document of an unknown shape is not an error.
pub fn extract(text: &str) -> Result<Extraction> {
    let doc = parse_document(text)?;
    Ok(extract_document(&doc))
}

/// Lenient variant of [`extract`]: unparseable input yields no endpoints.
pub fn extract_endpoints(text: &str) -> Vec<EndpointDescriptor> {
    match extract(text) {
        Ok(extraction) => extraction.endpoints,
        Err(e) => {
            warn!(error = %e, "Ignoring unparseable API description");
            Vec::new()
        }
    }
}

/// Extracts endpoints from an already parsed document.
pub fn extract_document(doc: &Value) -> Extraction {
    let shape = SourceShape::detect(doc);
    let endpoints = match shape {
        SourceShape::Collection => {
            let mut out = Vec::new();
            if let Some(items) = doc.get("item").and_then(Value::as_array) {
                let mut folders = Vec::new();
                walk_items(items, &mut folders, &mut out);
            }
            out
        }
        SourceShape::PathMap => doc
            .get("paths")
            .and_then(Value::as_object)
            .map(|paths| extract_paths(doc, paths))
            .unwrap_or_default(),
        SourceShape::Unrecognized => Vec::new(),
    };
    debug!(shape = ?shape, endpoints = endpoints.len(), "Extracted endpoints");
    Extraction { shape, endpoints }
}

// ---------------------------------------------------------------------------
// Collection shape
// ---------------------------------------------------------------------------

fn walk_items(items: &[Value], folders: &mut Vec<String>, out: &mut Vec<EndpointDescriptor>) {
    for item in items {
        if let Some(children) = item.get("item").and_then(Value::as_array) {
            let name = str_field(item, "name").unwrap_or("Untitled folder");
            folders.push(name.to_string());
            walk_items(children, folders, out);
            folders.pop();
        } else if let Some(request) = item.get("request") {
            let mut endpoint = collection_request(item, request);
            if !folders.is_empty() {
                endpoint.group = Some(folders.join("/"));
            }
            out.push(endpoint);
        }
    }
}

fn collection_request(item: &Value, request: &Value) -> EndpointDescriptor {
    // A bare string request is shorthand for a GET of that URL.
    if let Some(url) = request.as_str() {
        let endpoint = EndpointDescriptor::from_url("GET", url);
        return match non_empty_str(item, "name") {
            Some(name) => endpoint.with_name(name),
            None => endpoint,
        };
    }

    let method = non_empty_str(request, "method").unwrap_or("GET");
    let url = request.get("url").map(collection_url).unwrap_or_default();
    let mut endpoint = EndpointDescriptor::from_url(method, &url);
    if let Some(name) = non_empty_str(item, "name") {
        endpoint.name = name.to_string();
    }

    if let Some(headers) = request.get("header").and_then(Value::as_array) {
        endpoint.headers = headers.iter().filter_map(collection_header).collect();
    }
    endpoint.request_body = request
        .get("body")
        .and_then(|body| collection_body(body, request));
    endpoint
}

/// Reads a collection URL in either string or `{raw, protocol, host, path}` form.
fn collection_url(url: &Value) -> String {
    if let Some(raw) = url.as_str() {
        return raw.to_string();
    }
    if let Some(raw) = non_empty_str(url, "raw") {
        return raw.to_string();
    }

    let host = joined(url.get("host"), ".");
    let path = joined(url.get("path"), "/");
    let mut rebuilt = String::new();
    if let Some(protocol) = non_empty_str(url, "protocol") {
        rebuilt.push_str(protocol);
        rebuilt.push_str("://");
    }
    rebuilt.push_str(&host);
    if !path.is_empty() {
        rebuilt.push('/');
        rebuilt.push_str(path.trim_start_matches('/'));
    }
    rebuilt
}

/// Joins a string-or-array URL part.
fn joined(part: Option<&Value>, separator: &str) -> String {
    match part {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(|p| p.as_str().or_else(|| str_field(p, "value")))
            .collect::<Vec<_>>()
            .join(separator),
        _ => String::new(),
    }
}

fn collection_header(header: &Value) -> Option<HeaderDescriptor> {
    let key = non_empty_str(header, "key")?;
    Some(HeaderDescriptor {
        key: key.to_string(),
        value: str_field(header, "value").unwrap_or_default().to_string(),
        disabled: header
            .get("disabled")
            .and_then(Value::as_bool)
            .unwrap_or(false),
    })
}

fn collection_body(body: &Value, request: &Value) -> Option<RequestBodyDescriptor> {
    let mode = str_field(body, "mode")?;
    let content_type = match mode {
        "raw" => {
            let language = body
                .pointer("/options/raw/language")
                .and_then(Value::as_str)
                .unwrap_or("json");
            Some(match language {
                "json" => "application/json".to_string(),
                "xml" => "application/xml".to_string(),
                "html" => "text/html".to_string(),
                _ => "text/plain".to_string(),
            })
        }
        "urlencoded" => Some("application/x-www-form-urlencoded".to_string()),
        "formdata" => Some("multipart/form-data".to_string()),
        "graphql" => Some("application/json".to_string()),
        _ => None,
    };
    Some(RequestBodyDescriptor {
        description: non_empty_str(request, "description").map(str::to_string),
        content_type,
        schema: None,
        example: non_empty_str(body, "raw").map(str::to_string),
    })
}

// ---------------------------------------------------------------------------
// Path-map shape
// ---------------------------------------------------------------------------

fn extract_paths(doc: &Value, paths: &Map<String, Value>) -> Vec<EndpointDescriptor> {
    let mut out = Vec::new();
    for (path, item) in paths {
        let item = resolve(doc, item);
        let Some(item) = item.as_object() else {
            debug!(path = %path, "Skipping non-object path item");
            continue;
        };
        let shared = item.get("parameters").and_then(Value::as_array);

        for (key, operation) in item {
            let lower = key.to_ascii_lowercase();
            if !HttpMethod::OPERATION_KEYS.contains(&lower.as_str()) {
                continue;
            }
            out.push(path_operation(doc, path, &lower, operation, shared));
        }
    }
    out
}

fn path_operation(
    doc: &Value,
    path: &str,
    method: &str,
    operation: &Value,
    shared: Option<&Vec<Value>>,
) -> EndpointDescriptor {
    let mut endpoint = EndpointDescriptor::new(method, path);
    let name = non_empty_str(operation, "summary").or_else(|| non_empty_str(operation, "operationId"));
    endpoint.name = match name {
        Some(name) => name.to_string(),
        None => default_name(method, path),
    };

    let own = operation.get("parameters").and_then(Value::as_array);
    endpoint.parameters = merge_parameters(doc, shared, own);
    endpoint.request_body = operation
        .get("requestBody")
        .map(|body| openapi_request_body(doc, body))
        .or_else(|| swagger_body_parameter(doc, operation));
    endpoint.responses = operation
        .get("responses")
        .and_then(Value::as_object)
        .map(|responses| {
            responses
                .iter()
                .map(|(code, response)| openapi_response(doc, code, response))
                .collect()
        });
    endpoint
}

/// Path-item parameters apply to every operation; operation parameters
/// replace shared ones with the same name and location.
fn merge_parameters(
    doc: &Value,
    shared: Option<&Vec<Value>>,
    own: Option<&Vec<Value>>,
) -> Option<Vec<ParameterDescriptor>> {
    if shared.is_none() && own.is_none() {
        return None;
    }
    let own: Vec<ParameterDescriptor> = own
        .into_iter()
        .flatten()
        .filter_map(|p| openapi_parameter(doc, p))
        .collect();
    let mut merged: Vec<ParameterDescriptor> = shared
        .into_iter()
        .flatten()
        .filter_map(|p| openapi_parameter(doc, p))
        .filter(|s| {
            !own.iter()
                .any(|o| o.name == s.name && o.location == s.location)
        })
        .collect();
    merged.extend(own);
    Some(merged)
}

fn openapi_parameter(doc: &Value, raw: &Value) -> Option<ParameterDescriptor> {
    let param = resolve(doc, raw);
    let name = non_empty_str(param, "name")?;
    let location = str_field(param, "in").and_then(parse_location);
    let param_type = param
        .pointer("/schema/type")
        .and_then(Value::as_str)
        .or_else(|| str_field(param, "type"))
        .unwrap_or("string");
    Some(ParameterDescriptor {
        name: name.to_string(),
        description: non_empty_str(param, "description").map(str::to_string),
        required: param
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        param_type: param_type.to_string(),
        location,
    })
}

fn parse_location(raw: &str) -> Option<ParameterLocation> {
    match raw {
        "path" => Some(ParameterLocation::Path),
        "query" => Some(ParameterLocation::Query),
        "header" => Some(ParameterLocation::Header),
        "cookie" => Some(ParameterLocation::Cookie),
        "body" => Some(ParameterLocation::Body),
        "formData" => Some(ParameterLocation::FormData),
        _ => None,
    }
}

fn openapi_request_body(doc: &Value, raw: &Value) -> RequestBodyDescriptor {
    let body = resolve(doc, raw);
    let (content_type, schema) = media_schema(doc, body.get("content"));
    RequestBodyDescriptor {
        description: non_empty_str(body, "description").map(str::to_string),
        content_type,
        schema,
        example: None,
    }
}

/// Swagger 2 carries the payload as an `in: body` parameter.
fn swagger_body_parameter(doc: &Value, operation: &Value) -> Option<RequestBodyDescriptor> {
    let param = operation
        .get("parameters")
        .and_then(Value::as_array)?
        .iter()
        .map(|p| resolve(doc, p))
        .find(|p| str_field(p, "in") == Some("body"))?;
    let content_type = operation
        .get("consumes")
        .or_else(|| doc.get("consumes"))
        .and_then(Value::as_array)
        .and_then(|types| types.first())
        .and_then(Value::as_str)
        .unwrap_or("application/json");
    Some(RequestBodyDescriptor {
        description: non_empty_str(param, "description").map(str::to_string),
        content_type: Some(content_type.to_string()),
        schema: param.get("schema").map(|s| resolve(doc, s).clone()),
        example: None,
    })
}

fn openapi_response(doc: &Value, code: &str, raw: &Value) -> ResponseDescriptor {
    let response = resolve(doc, raw);
    let mut descriptor = ResponseDescriptor::new(
        code,
        str_field(response, "description").unwrap_or_default(),
    );
    let (content_type, schema) = media_schema(doc, response.get("content"));
    descriptor.content_type = content_type;
    descriptor.schema = schema.or_else(|| response.get("schema").map(|s| resolve(doc, s).clone()));
    descriptor
}

/// Picks the content type (first media key) and schema (JSON media first,
/// else the first media type) from an OpenAPI 3 `content` map.
fn media_schema(doc: &Value, content: Option<&Value>) -> (Option<String>, Option<Value>) {
    let Some(content) = content.and_then(Value::as_object) else {
        return (None, None);
    };
    let content_type = content.keys().next().cloned();
    let media = content
        .get("application/json")
        .or_else(|| content.values().next());
    let schema = media
        .and_then(|m| m.get("schema"))
        .map(|s| resolve(doc, s).clone());
    (content_type, schema)
}

/// Follows local `$ref` pointers (`#/components/...`). Unresolvable or
/// external references are returned unchanged.
fn resolve<'a>(doc: &'a Value, mut value: &'a Value) -> &'a Value {
    for _ in 0..MAX_REF_DEPTH {
        let Some(reference) = str_field(value, "$ref") else {
            return value;
        };
        let Some(pointer) = reference.strip_prefix('#') else {
            return value;
        };
        match doc.pointer(pointer) {
            Some(target) => value = target,
            None => {
                debug!(reference = %reference, "Unresolved $ref");
                return value;
            }
        }
    }
    value
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

fn non_empty_str<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    str_field(value, key).filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_collection_request_with_string_url() {
        let text = r#"{"item":[{"name":"Get Users","request":{"method":"GET","url":"https://api.example.com/users"}}]}"#;
        let extraction = extract(text).unwrap();
        assert_eq!(extraction.shape, SourceShape::Collection);
        assert_eq!(extraction.endpoints.len(), 1);
        let ep = &extraction.endpoints[0];
        assert_eq!(ep.method, "GET");
        assert_eq!(ep.url.as_deref(), Some("https://api.example.com/users"));
        assert_eq!(ep.name, "Get Users");
        assert!(ep.path.is_none());
        assert!(ep.group.is_none());
    }

    #[test]
    fn test_collection_url_object_raw() {
        let doc = json!({"item": [{"name": "x", "request": {"method": "post", "url": {"raw": "{{base}}/orders"}}}]});
        let endpoints = extract_document(&doc).endpoints;
        assert_eq!(endpoints[0].method, "POST");
        assert_eq!(endpoints[0].url.as_deref(), Some("{{base}}/orders"));
    }

    #[test]
    fn test_collection_url_empty_raw_falls_back_to_parts() {
        let url = json!({"raw": "", "protocol": "https", "host": ["api", "example", "com"], "path": ["users"]});
        assert_eq!(collection_url(&url), "https://api.example.com/users");
        assert_eq!(collection_url(&json!({"raw": ""})), "");
    }

    #[test]
    fn test_collection_url_rebuilt_without_raw() {
        let url = json!({"protocol": "https", "host": ["api", "example", "com"], "path": ["v1", "users"]});
        assert_eq!(collection_url(&url), "https://api.example.com/v1/users");
        let url = json!({"host": "localhost:8080", "path": "/health"});
        assert_eq!(collection_url(&url), "localhost:8080/health");
    }

    #[test]
    fn test_nested_folders_set_group() {
        let doc = json!({"item": [
            {"name": "Users", "item": [
                {"name": "Admin", "item": [
                    {"name": "Ban", "request": {"method": "POST", "url": "https://x.io/users/1/ban"}}
                ]},
                {"name": "List", "request": {"method": "GET", "url": "https://x.io/users"}}
            ]},
            {"name": "Ping", "request": {"method": "GET", "url": "https://x.io/ping"}}
        ]});
        let endpoints = extract_document(&doc).endpoints;
        let groups: Vec<_> = endpoints.iter().map(|e| e.group.as_deref()).collect();
        assert_eq!(groups, vec![Some("Users/Admin"), Some("Users"), None]);
    }

    #[test]
    fn test_collection_defaults_missing_method_and_url() {
        let doc = json!({"item": [{"name": "Nothing", "request": {}}]});
        let endpoints = extract_document(&doc).endpoints;
        assert_eq!(endpoints[0].method, "GET");
        assert_eq!(endpoints[0].url.as_deref(), Some(""));
    }

    #[test]
    fn test_collection_headers_and_body() {
        let doc = json!({"item": [{"name": "Create", "request": {
            "method": "POST",
            "url": "https://x.io/users",
            "header": [{"key": "Content-Type", "value": "application/json"}, {"key": "X-Old", "value": "1", "disabled": true}],
            "body": {"mode": "raw", "raw": "{\"name\":\"a\"}"}
        }}]});
        let ep = &extract_document(&doc).endpoints[0];
        assert_eq!(ep.headers.len(), 2);
        assert!(ep.headers[1].disabled);
        let body = ep.request_body.as_ref().unwrap();
        assert_eq!(body.content_type.as_deref(), Some("application/json"));
        assert_eq!(body.example.as_deref(), Some("{\"name\":\"a\"}"));
    }

    #[test]
    fn test_path_map_scenario() {
        let text = r#"{"openapi":"3.0.0","paths":{"/users":{"get":{"summary":"List users"}}}}"#;
        let extraction = extract(text).unwrap();
        assert_eq!(extraction.shape, SourceShape::PathMap);
        let ep = &extraction.endpoints[0];
        assert_eq!(ep.method, "GET");
        assert_eq!(ep.path.as_deref(), Some("/users"));
        assert_eq!(ep.name, "List users");
        assert!(ep.parameters.is_none());
        assert!(ep.responses.is_none());
    }

    #[test]
    fn test_path_map_name_fallbacks() {
        let doc = json!({"paths": {"/a": {
            "get": {"operationId": "getA"},
            "delete": {}
        }}});
        let names: Vec<_> = extract_document(&doc)
            .endpoints
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert!(names.contains(&"getA".to_string()));
        assert!(names.contains(&"DELETE /a".to_string()));
    }

    #[test]
    fn test_path_map_skips_non_method_keys() {
        let doc = json!({"paths": {"/a": {
            "summary": "shared",
            "parameters": [],
            "servers": [],
            "get": {}, "post": {}
        }}});
        assert_eq!(extract_document(&doc).endpoints.len(), 2);
    }

    #[test]
    fn test_path_level_parameters_merge_with_override() {
        let doc = json!({"paths": {"/users/{id}": {
            "parameters": [
                {"name": "id", "in": "path", "required": true, "schema": {"type": "integer"}},
                {"name": "trace", "in": "header"}
            ],
            "get": {"parameters": [{"name": "trace", "in": "header", "description": "own"}]}
        }}});
        let ep = &extract_document(&doc).endpoints[0];
        let params = ep.parameters.as_ref().unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "id");
        assert_eq!(params[0].param_type, "integer");
        assert!(params[0].required);
        assert_eq!(params[1].description.as_deref(), Some("own"));
    }

    #[test]
    fn test_ref_parameters_resolved() {
        let doc = json!({
            "components": {"parameters": {"Limit": {"name": "limit", "in": "query", "schema": {"type": "integer"}}}},
            "paths": {"/items": {"get": {"parameters": [{"$ref": "#/components/parameters/Limit"}]}}}
        });
        let ep = &extract_document(&doc).endpoints[0];
        let params = ep.parameters.as_ref().unwrap();
        assert_eq!(params[0].name, "limit");
        assert_eq!(params[0].location, Some(ParameterLocation::Query));
    }

    #[test]
    fn test_responses_content_and_schema() {
        let doc = json!({"paths": {"/users": {"get": {"responses": {
            "200": {"description": "OK", "content": {"application/json": {"schema": {"type": "array"}}}},
            "404": {"description": "Missing"}
        }}}}});
        let ep = &extract_document(&doc).endpoints[0];
        let responses = ep.responses.as_ref().unwrap();
        assert_eq!(responses.len(), 2);
        let ok = responses.iter().find(|r| r.status_code == "200").unwrap();
        assert_eq!(ok.content_type.as_deref(), Some("application/json"));
        assert_eq!(ok.schema, Some(json!({"type": "array"})));
    }

    #[test]
    fn test_swagger_body_parameter_becomes_request_body() {
        let doc = json!({"swagger": "2.0", "consumes": ["application/xml"], "paths": {"/pets": {"post": {
            "parameters": [{"name": "pet", "in": "body", "schema": {"type": "object"}}]
        }}}});
        let ep = &extract_document(&doc).endpoints[0];
        let body = ep.request_body.as_ref().unwrap();
        assert_eq!(body.content_type.as_deref(), Some("application/xml"));
        assert_eq!(body.schema, Some(json!({"type": "object"})));
    }

    #[test]
    fn test_unrecognized_shape_is_empty_not_error() {
        let extraction = extract(r#"{"hello":"world"}"#).unwrap();
        assert_eq!(extraction.shape, SourceShape::Unrecognized);
        assert!(extraction.endpoints.is_empty());
        assert!(extract("[1,2,3]").unwrap().endpoints.is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(extract("not json"), Err(AnalysisError::Parse(_))));
        assert!(extract_endpoints("not json").is_empty());
    }

    #[test]
    fn test_ref_cycle_terminates() {
        let doc = json!({"a": {"$ref": "#/b"}, "b": {"$ref": "#/a"}});
        let start = json!({"$ref": "#/a"});
        let resolved = resolve(&doc, &start);
        assert!(resolved.get("$ref").is_some());
    }
}
