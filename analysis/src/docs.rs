//! Reference documentation generated from extracted endpoints.

use api_report_core::{
    Documentation, EndpointDescriptor, EndpointDoc, HttpMethod, ParameterDescriptor,
    ParameterLocation, RequestBodyDescriptor, ResponseClass, ResponseDescriptor,
};

const JSON: &str = "application/json";

/// Builds documentation for every endpoint plus an API overview.
pub fn generate_documentation(endpoints: &[EndpointDescriptor]) -> Documentation {
    Documentation {
        overview: api_overview(endpoints),
        endpoints: endpoints.iter().map(endpoint_doc).collect(),
    }
}

/// Documents a single endpoint.
pub fn endpoint_doc(endpoint: &EndpointDescriptor) -> EndpointDoc {
    let path = doc_path(endpoint);

    let mut parameters: Vec<ParameterDescriptor> = endpoint
        .path_params()
        .iter()
        .map(|name| {
            ParameterDescriptor::new(name, ParameterLocation::Path)
                .required()
                .with_description(&format!(
                    "Unique identifier for the {}",
                    name.replacen("Id", "", 1)
                ))
        })
        .collect();
    parameters.extend(
        endpoint
            .declared_params(ParameterLocation::Query)
            .into_iter()
            .map(|param| {
                let mut doc = param.clone();
                if doc.description.is_none() {
                    doc.description = Some(format!("Parameter to filter by {}", param.name));
                }
                doc
            }),
    );

    let request_body = endpoint.request_body.as_ref().map(|body| RequestBodyDescriptor {
        description: Some(
            body.description
                .clone()
                .unwrap_or_else(|| "Request payload".to_string()),
        ),
        content_type: Some(body.content_type.clone().unwrap_or_else(|| JSON.to_string())),
        schema: body.schema.clone(),
        example: body.example.clone(),
    });

    let responses = match &endpoint.responses {
        Some(declared) => declared
            .iter()
            .map(|response| ResponseDescriptor {
                status_code: response.status_code.clone(),
                description: if response.description.trim().is_empty() {
                    default_response_description(&response.status_code).to_string()
                } else {
                    response.description.clone()
                },
                content_type: Some(
                    response
                        .content_type
                        .clone()
                        .unwrap_or_else(|| JSON.to_string()),
                ),
                schema: response.schema.clone(),
            })
            .collect(),
        None => default_responses(endpoint.http_method()),
    };

    EndpointDoc {
        name: endpoint.name.clone(),
        description: endpoint_description(endpoint.http_method(), &endpoint.method, &path),
        path,
        method: endpoint.method.clone(),
        parameters,
        request_body,
        responses,
    }
}

/// Path shown in documentation: the template, or the URL's path component.
pub fn doc_path(endpoint: &EndpointDescriptor) -> String {
    match (&endpoint.path, &endpoint.url) {
        (Some(path), _) => path.clone(),
        (None, Some(url)) => path_from_url(url),
        (None, None) => String::new(),
    }
}

/// Extracts the path component of a URL, without query or fragment.
///
/// # Examples
///
/// ```
/// use api_report_analysis::docs::path_from_url;
///
/// assert_eq!(path_from_url("https://api.example.com/v1/users?page=2"), "/v1/users");
/// assert_eq!(path_from_url("https://api.example.com"), "/");
/// assert_eq!(path_from_url("{{baseUrl}}/orders"), "/orders");
/// assert_eq!(path_from_url(""), "");
/// ```
pub fn path_from_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let url = &url[..end];
    let after_host = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None if url.starts_with('/') => return url.to_string(),
        None => url,
    };
    match after_host.find('/') {
        Some(idx) => after_host[idx..].to_string(),
        None => "/".to_string(),
    }
}

/// Default text for a status code.
pub fn default_response_description(status_code: &str) -> &'static str {
    match ResponseClass::of(status_code) {
        ResponseClass::Success => match status_code {
            "201" => "Resource created successfully",
            "204" => "Operation successful, no content returned",
            _ => "Successful operation",
        },
        ResponseClass::ClientError => match status_code {
            "400" => "Bad request - invalid input",
            "401" => "Unauthorized - authentication required",
            "403" => "Forbidden - insufficient permissions",
            "404" => "Resource not found",
            "409" => "Conflict with current state",
            _ => "Client error",
        },
        ResponseClass::ServerError => match status_code {
            "500" => "Internal server error",
            "503" => "Service unavailable",
            _ => "Server error",
        },
        ResponseClass::Other => "Response",
    }
}

/// Responses assumed for an endpoint that declares none.
fn default_responses(method: HttpMethod) -> Vec<ResponseDescriptor> {
    let mut responses = Vec::new();
    match method {
        HttpMethod::Get => {
            responses.push(ResponseDescriptor::new("200", "Successfully retrieved resource"))
        }
        HttpMethod::Put | HttpMethod::Patch => {
            responses.push(ResponseDescriptor::new("200", "Successfully updated resource"))
        }
        HttpMethod::Post => {
            responses.push(ResponseDescriptor::new("201", "Successfully created resource"))
        }
        HttpMethod::Delete => {
            responses.push(ResponseDescriptor::new("204", "Successfully deleted resource"))
        }
        _ => {}
    }
    responses.push(ResponseDescriptor::new("400", "Bad request - client error"));
    responses.push(ResponseDescriptor::new(
        "401",
        "Unauthorized - authentication required",
    ));
    responses.push(ResponseDescriptor::new("404", "Resource not found"));
    responses
}

fn endpoint_description(method: HttpMethod, raw_method: &str, path: &str) -> String {
    let resource = path
        .split('/')
        .filter(|s| !s.is_empty() && !s.contains('{'))
        .next_back()
        .unwrap_or("resource");
    let singular = resource.strip_suffix('s').unwrap_or(resource);

    match method {
        HttpMethod::Get if path.contains('{') => {
            format!("Retrieves a specific {singular} by its identifier")
        }
        HttpMethod::Get => format!("Retrieves a list of {resource}"),
        HttpMethod::Post => format!("Creates a new {singular}"),
        HttpMethod::Put => format!("Updates an existing {singular} with a complete replacement"),
        HttpMethod::Patch => format!("Partially updates an existing {singular}"),
        HttpMethod::Delete => format!("Deletes a {singular}"),
        _ => format!(
            "Performs a {} operation on {resource}",
            raw_method.to_ascii_uppercase()
        ),
    }
}

fn api_overview(endpoints: &[EndpointDescriptor]) -> String {
    let count = |wanted: &[HttpMethod]| {
        endpoints
            .iter()
            .filter(|e| wanted.contains(&e.http_method()))
            .count()
    };

    let mut resources: Vec<String> = Vec::new();
    for endpoint in endpoints {
        let path = doc_path(endpoint);
        let first = path
            .split('/')
            .find(|s| !s.is_empty() && !s.contains('{'));
        if let Some(first) = first {
            if !resources.iter().any(|r| r == first) {
                resources.push(first.to_string());
            }
        }
    }

    format!(
        "This API provides {} endpoints across {} primary resources. \
         It includes {} GET endpoints for data retrieval, \
         {} POST endpoints for resource creation, \
         {} update endpoints, and \
         {} DELETE endpoints for resource removal. \
         The main resources include: {}.",
        endpoints.len(),
        resources.len(),
        count(&[HttpMethod::Get]),
        count(&[HttpMethod::Post]),
        count(&[HttpMethod::Put, HttpMethod::Patch]),
        count(&[HttpMethod::Delete]),
        resources.join(", "),
    )
}
