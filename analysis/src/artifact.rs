//! Best-effort rendering of endpoints in a target format.
//!
//! Postman and OpenAPI targets get a real document of that kind; Playwright
//! and Cypress get runnable request-level test scripts; every other target
//! gets a JSON envelope carrying the normalized endpoints.

use api_report_core::{ApiFormat, EndpointDescriptor, HttpMethod, ParameterLocation};
use serde_json::{Map, Value, json};

use crate::docs::{doc_path, endpoint_doc};
use crate::error::Result;

const POSTMAN_SCHEMA: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";
const COLLECTION_NAME: &str = "Converted API";

/// Renders `endpoints` as a `target` document.
pub fn render_artifact(
    source: ApiFormat,
    target: ApiFormat,
    endpoints: &[EndpointDescriptor],
) -> Result<String> {
    let text = match target {
        ApiFormat::Postman => serde_json::to_string_pretty(&postman_collection(endpoints))?,
        ApiFormat::Swagger => serde_json::to_string_pretty(&openapi_document(endpoints))?,
        ApiFormat::Playwright => playwright_script(source, endpoints),
        ApiFormat::Cypress => cypress_script(source, endpoints),
        _ => serde_json::to_string_pretty(&json!({
            "format": target.id(),
            "formatName": target.display_name(),
            "convertedFrom": source.display_name(),
            "endpoints": endpoints,
        }))?,
    };
    Ok(text)
}

// ---------------------------------------------------------------------------
// Postman
// ---------------------------------------------------------------------------

fn postman_collection(endpoints: &[EndpointDescriptor]) -> Value {
    let mut root: Vec<Value> = Vec::new();
    for endpoint in endpoints {
        let folders: Vec<&str> = endpoint
            .group
            .as_deref()
            .map(|g| g.split('/').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();
        insert_item(&mut root, &folders, postman_item(endpoint));
    }
    json!({
        "info": { "name": COLLECTION_NAME, "schema": POSTMAN_SCHEMA },
        "item": root,
    })
}

/// Places `item` under the folder chain `folders`, creating folders as needed.
fn insert_item(items: &mut Vec<Value>, folders: &[&str], item: Value) {
    let Some((first, rest)) = folders.split_first() else {
        items.push(item);
        return;
    };
    let existing = items.iter().position(|v| {
        v.get("item").is_some() && v.get("name").and_then(Value::as_str) == Some(*first)
    });
    let idx = match existing {
        Some(idx) => idx,
        None => {
            items.push(json!({ "name": first, "item": [] }));
            items.len() - 1
        }
    };
    if let Some(Value::Array(children)) = items[idx].get_mut("item") {
        insert_item(children, rest, item);
    }
}

fn postman_item(endpoint: &EndpointDescriptor) -> Value {
    let raw = match (&endpoint.url, &endpoint.path) {
        (Some(url), _) => url.clone(),
        (None, Some(path)) => format!("{{{{baseUrl}}}}{path}"),
        (None, None) => String::new(),
    };
    let mut request = Map::new();
    request.insert("method".into(), json!(endpoint.method));
    request.insert(
        "header".into(),
        json!(
            endpoint
                .headers
                .iter()
                .map(|h| json!({ "key": h.key, "value": h.value, "disabled": h.disabled }))
                .collect::<Vec<_>>()
        ),
    );
    request.insert("url".into(), json!({ "raw": raw }));
    if let Some(body) = &endpoint.request_body {
        let raw_body = match (&body.example, &body.schema) {
            (Some(example), _) => example.clone(),
            (None, Some(schema)) => serde_json::to_string_pretty(schema).unwrap_or_default(),
            (None, None) => String::new(),
        };
        request.insert("body".into(), json!({ "mode": "raw", "raw": raw_body }));
    }
    json!({ "name": endpoint.name, "request": request })
}

// ---------------------------------------------------------------------------
// OpenAPI
// ---------------------------------------------------------------------------

/// Key of `endpoint` in an OpenAPI `paths` map. Host, query and fragment
/// are dropped, so distinct URLs can share a key.
pub fn openapi_path(endpoint: &EndpointDescriptor) -> String {
    match doc_path(endpoint) {
        p if p.is_empty() => "/".to_string(),
        p => p,
    }
}

fn openapi_document(endpoints: &[EndpointDescriptor]) -> Value {
    let mut paths = Map::new();
    for endpoint in endpoints {
        let path = openapi_path(endpoint);
        let doc = endpoint_doc(endpoint);

        let mut parameters: Vec<Value> = doc
            .parameters
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "in": location_name(p.location),
                    "required": p.required,
                    "description": p.description,
                    "schema": { "type": p.param_type },
                })
            })
            .collect();
        for param in endpoint.declared_params(ParameterLocation::Header) {
            parameters.push(json!({
                "name": param.name,
                "in": "header",
                "required": param.required,
                "schema": { "type": param.param_type },
            }));
        }

        let responses: Map<String, Value> = doc
            .responses
            .iter()
            .map(|r| {
                let mut response = json!({ "description": r.description });
                if let Some(schema) = &r.schema {
                    let content_type = r.content_type.as_deref().unwrap_or("application/json");
                    response["content"] = json!({ content_type: { "schema": schema } });
                }
                (r.status_code.clone(), response)
            })
            .collect();

        let mut operation = json!({
            "summary": doc.name,
            "description": doc.description,
            "parameters": parameters,
            "responses": responses,
        });
        if let Some(body) = &doc.request_body {
            let content_type = body.content_type.as_deref().unwrap_or("application/json");
            operation["requestBody"] = json!({
                "description": body.description,
                "content": { content_type: { "schema": body.schema.clone().unwrap_or_else(|| json!({})) } },
            });
        }

        let item = paths
            .entry(path)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item) = item {
            item.insert(endpoint.method.to_ascii_lowercase(), operation);
        }
    }
    json!({
        "openapi": "3.0.3",
        "info": { "title": COLLECTION_NAME, "version": "1.0.0" },
        "paths": paths,
    })
}

fn location_name(location: Option<ParameterLocation>) -> &'static str {
    match location {
        Some(ParameterLocation::Path) => "path",
        Some(ParameterLocation::Header) => "header",
        Some(ParameterLocation::Cookie) => "cookie",
        _ => "query",
    }
}

// ---------------------------------------------------------------------------
// Test scripts
// ---------------------------------------------------------------------------

/// Quotes `s` as a JavaScript string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

fn enabled_headers(endpoint: &EndpointDescriptor) -> Option<String> {
    let headers: Vec<String> = endpoint
        .headers
        .iter()
        .filter(|h| !h.disabled)
        .map(|h| format!("{}: {}", js_string(&h.key), js_string(&h.value)))
        .collect();
    if headers.is_empty() {
        None
    } else {
        Some(format!("{{ {} }}", headers.join(", ")))
    }
}

fn playwright_script(source: ApiFormat, endpoints: &[EndpointDescriptor]) -> String {
    let mut out = format!(
        "// Converted from {} to Playwright\nconst {{ test, expect }} = require('@playwright/test');\n\ntest.describe({}, () => {{\n",
        source.display_name(),
        js_string(COLLECTION_NAME)
    );
    for endpoint in endpoints {
        let url = js_string(endpoint.target());
        let mut options = Vec::new();
        let call = match endpoint.http_method() {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
            HttpMethod::Head => "head",
            _ => {
                options.push(format!("method: {}", js_string(&endpoint.method)));
                "fetch"
            }
        };
        if let Some(headers) = enabled_headers(endpoint) {
            options.push(format!("headers: {headers}"));
        }
        if let Some(example) = endpoint
            .request_body
            .as_ref()
            .and_then(|b| b.example.as_deref())
        {
            options.push(format!("data: {}", js_string(example)));
        }
        let args = if options.is_empty() {
            url
        } else {
            format!("{url}, {{ {} }}", options.join(", "))
        };
        out.push_str(&format!(
            "  test({}, async ({{ request }}) => {{\n    const response = await request.{call}({args});\n    expect(response.status()).toBeLessThan(500);\n  }});\n\n",
            js_string(&endpoint.name)
        ));
    }
    out.push_str("});\n");
    out
}

fn cypress_script(source: ApiFormat, endpoints: &[EndpointDescriptor]) -> String {
    let mut out = format!(
        "// Converted from {} to Cypress\ndescribe({}, () => {{\n",
        source.display_name(),
        js_string(COLLECTION_NAME)
    );
    for endpoint in endpoints {
        let mut fields = vec![
            format!("method: {}", js_string(&endpoint.method)),
            format!("url: {}", js_string(endpoint.target())),
        ];
        if let Some(headers) = enabled_headers(endpoint) {
            fields.push(format!("headers: {headers}"));
        }
        if let Some(example) = endpoint
            .request_body
            .as_ref()
            .and_then(|b| b.example.as_deref())
        {
            fields.push(format!("body: {}", js_string(example)));
        }
        fields.push("failOnStatusCode: false".to_string());
        out.push_str(&format!(
            "  it({}, () => {{\n    cy.request({{ {} }}).then((response) => {{\n      expect(response.status).to.be.lessThan(500);\n    }});\n  }});\n\n",
            js_string(&endpoint.name),
            fields.join(", ")
        ));
    }
    out.push_str("});\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_report_core::{HeaderDescriptor, ResponseDescriptor};

    fn sample() -> Vec<EndpointDescriptor> {
        let mut create = EndpointDescriptor::from_url("POST", "https://x.io/users").with_name("Create user");
        create.group = Some("Users/Admin".to_string());
        create.headers.push(HeaderDescriptor {
            key: "Authorization".to_string(),
            value: "Bearer 'token'".to_string(),
            disabled: false,
        });
        let mut list = EndpointDescriptor::from_url("GET", "https://x.io/users").with_name("List users");
        list.group = Some("Users".to_string());
        vec![create, list]
    }

    #[test]
    fn test_postman_rebuilds_folders() {
        let text = render_artifact(ApiFormat::Postman, ApiFormat::Postman, &sample()).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();
        let users = &doc["item"][0];
        assert_eq!(users["name"], "Users");
        assert_eq!(users["item"][0]["name"], "Admin");
        assert_eq!(users["item"][0]["item"][0]["name"], "Create user");
        assert_eq!(users["item"][1]["name"], "List users");
    }

    #[test]
    fn test_postman_round_trips_through_extractor() {
        let text = render_artifact(ApiFormat::Postman, ApiFormat::Postman, &sample()).unwrap();
        let endpoints = crate::extractor::extract_endpoints(&text);
        assert_eq!(endpoints.len(), 2);
        assert_eq!(endpoints[0].group.as_deref(), Some("Users/Admin"));
    }

    #[test]
    fn test_openapi_groups_methods_under_path() {
        let endpoints = vec![
            EndpointDescriptor::new("GET", "/users").with_response(ResponseDescriptor::new("200", "OK")),
            EndpointDescriptor::new("POST", "/users"),
        ];
        let text = render_artifact(ApiFormat::Postman, ApiFormat::Swagger, &endpoints).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["openapi"], "3.0.3");
        assert_eq!(doc["paths"]["/users"]["get"]["responses"]["200"]["description"], "OK");
        assert_eq!(
            doc["paths"]["/users"]["post"]["responses"]["201"]["description"],
            "Successfully created resource"
        );
    }

    #[test]
    fn test_scripts_escape_strings() {
        let script = render_artifact(ApiFormat::Postman, ApiFormat::Playwright, &sample()).unwrap();
        assert!(script.starts_with("// Converted from Postman Collection to Playwright"));
        assert!(script.contains("request.post(\"https://x.io/users\", { headers: { \"Authorization\": \"Bearer 'token'\" } })"));
        let script = render_artifact(ApiFormat::Swagger, ApiFormat::Cypress, &sample()).unwrap();
        assert!(script.contains("cy.request({ method: \"GET\", url: \"https://x.io/users\", failOnStatusCode: false })"));
    }

    #[test]
    fn test_other_targets_get_envelope() {
        let text = render_artifact(ApiFormat::Swagger, ApiFormat::Katalon, &sample()).unwrap();
        let doc: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["formatName"], "Katalon Studio");
        assert_eq!(doc["convertedFrom"], "Swagger/OpenAPI");
        assert_eq!(doc["endpoints"].as_array().unwrap().len(), 2);
    }
}
