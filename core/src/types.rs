//! Endpoint type definitions.
//!
//! This module defines the normalized data model that every supported input
//! shape is reduced to. The types are designed for serialization with
//! [`serde`] and use camelCase field names so the JSON they produce matches
//! what report consumers expect (`requestBody`, `statusCode`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// HTTP verb of an endpoint.
///
/// Endpoints keep their verb as an uppercase string so that unusual verbs
/// survive a round trip; this enum is the typed view used by the
/// classification rules.
///
/// # Examples
///
/// ```
/// use api_report_core::HttpMethod;
///
/// assert_eq!(HttpMethod::parse("get"), HttpMethod::Get);
/// assert_eq!(HttpMethod::parse("PROPFIND"), HttpMethod::Other);
/// assert!(HttpMethod::Delete.is_mutating());
/// assert!(!HttpMethod::Get.is_mutating());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    /// Any verb outside the standard set.
    Other,
}

impl HttpMethod {
    /// Lowercase operation keys recognized inside an OpenAPI path item.
    pub const OPERATION_KEYS: [&'static str; 8] = [
        "get", "put", "post", "delete", "options", "head", "patch", "trace",
    ];

    /// Parses a verb case-insensitively.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "PUT" => Self::Put,
            "PATCH" => Self::Patch,
            "DELETE" => Self::Delete,
            "HEAD" => Self::Head,
            "OPTIONS" => Self::Options,
            "TRACE" => Self::Trace,
            _ => Self::Other,
        }
    }

    /// Returns the canonical uppercase spelling (`"OTHER"` for unknown verbs).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
            Self::Other => "OTHER",
        }
    }

    /// Returns `true` for verbs that change server state.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch | Self::Delete)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    /// Swagger 2 body parameter.
    Body,
    /// Swagger 2 form field.
    FormData,
}

/// A declared request parameter.
///
/// # Examples
///
/// ```
/// use api_report_core::{ParameterDescriptor, ParameterLocation};
///
/// let id = ParameterDescriptor::new("id", ParameterLocation::Path).required();
/// assert!(id.required);
/// assert_eq!(id.param_type, "string");
///
/// let json = serde_json::to_value(&id).unwrap();
/// assert_eq!(json["in"], "path");
/// assert_eq!(json["type"], "string");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// Parameter name as written in the source.
    pub name: String,
    /// Human description, if the source had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter must be supplied (defaults to `false`).
    #[serde(default)]
    pub required: bool,
    /// Primitive type name (defaults to `"string"`).
    #[serde(rename = "type", default = "default_param_type")]
    pub param_type: String,
    /// Location of the parameter, when declared.
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ParameterLocation>,
}

fn default_param_type() -> String {
    "string".to_string()
}

impl ParameterDescriptor {
    /// Creates an optional `string` parameter at the given location.
    pub fn new(name: &str, location: ParameterLocation) -> Self {
        Self {
            name: name.to_string(),
            description: None,
            required: false,
            param_type: default_param_type(),
            location: Some(location),
        }
    }

    /// Marks the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = Some(desc.to_string());
        self
    }

    /// Sets the primitive type name.
    pub fn with_type(mut self, param_type: &str) -> Self {
        self.param_type = param_type.to_string();
        self
    }
}

/// Request payload description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBodyDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// JSON schema of the payload, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Literal example payload (collection `raw` bodies).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Status class derived from the first digit of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseClass {
    Success,
    ClientError,
    ServerError,
    Other,
}

impl ResponseClass {
    /// Classifies a status code string such as `"201"` or `"4XX"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use api_report_core::ResponseClass;
    ///
    /// assert_eq!(ResponseClass::of("204"), ResponseClass::Success);
    /// assert_eq!(ResponseClass::of("4XX"), ResponseClass::ClientError);
    /// assert_eq!(ResponseClass::of("503"), ResponseClass::ServerError);
    /// assert_eq!(ResponseClass::of("default"), ResponseClass::Other);
    /// ```
    pub fn of(status_code: &str) -> Self {
        match status_code.trim().chars().next() {
            Some('2') => Self::Success,
            Some('4') => Self::ClientError,
            Some('5') => Self::ServerError,
            _ => Self::Other,
        }
    }
}

/// A declared response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDescriptor {
    /// Status code key (`"200"`, `"404"`, `"default"`, ...).
    pub status_code: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl ResponseDescriptor {
    /// Creates a response with a status code and description.
    pub fn new(status_code: &str, description: &str) -> Self {
        Self {
            status_code: status_code.to_string(),
            description: description.to_string(),
            content_type: None,
            schema: None,
        }
    }

    /// Returns the status class of this response.
    pub fn class(&self) -> ResponseClass {
        ResponseClass::of(&self.status_code)
    }
}

/// A request header from a collection item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderDescriptor {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// One API operation, normalized from either input shape.
///
/// Path-map input fills `path`; collection input fills `url` (and `group`
/// when the request sits inside folders). At least one of the two is always
/// present on descriptors produced by the extractor.
///
/// # Examples
///
/// ```
/// use api_report_core::{EndpointDescriptor, HttpMethod};
///
/// let ep = EndpointDescriptor::new("delete", "/users/{id}");
/// assert_eq!(ep.method, "DELETE");
/// assert_eq!(ep.name, "DELETE /users/{id}");
/// assert_eq!(ep.http_method(), HttpMethod::Delete);
/// assert_eq!(ep.path_params(), vec!["id"]);
///
/// let call = EndpointDescriptor::from_url("GET", "https://api.example.com/users")
///     .with_name("Get Users");
/// assert_eq!(call.target(), "https://api.example.com/users");
/// assert!(call.path.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDescriptor {
    /// Human label; falls back to `"METHOD target"`.
    pub name: String,
    /// Uppercase HTTP verb.
    pub method: String,
    /// URL template, for path-map input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Raw request URL, for collection input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Folder path the request was found under (`"Users/Admin"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<HeaderDescriptor>,
    /// Declared parameters. `None` means the source declared none at all,
    /// which is distinct from an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterDescriptor>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyDescriptor>,
    /// Declared responses. `None` skips every response-based rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<ResponseDescriptor>>,
}

impl EndpointDescriptor {
    /// Creates a path-shaped endpoint named after its method and path.
    pub fn new(method: &str, path: &str) -> Self {
        let method = method.trim().to_ascii_uppercase();
        Self {
            name: default_name(&method, path),
            method,
            path: Some(path.to_string()),
            ..Default::default()
        }
    }

    /// Creates a URL-shaped endpoint named after its method and URL.
    pub fn from_url(method: &str, url: &str) -> Self {
        let method = method.trim().to_ascii_uppercase();
        Self {
            name: default_name(&method, url),
            method,
            url: Some(url.to_string()),
            ..Default::default()
        }
    }

    /// Replaces the name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Appends a declared parameter, creating the list if needed.
    pub fn with_parameter(mut self, param: ParameterDescriptor) -> Self {
        self.parameters.get_or_insert_with(Vec::new).push(param);
        self
    }

    /// Appends a declared response, creating the list if needed.
    pub fn with_response(mut self, response: ResponseDescriptor) -> Self {
        self.responses.get_or_insert_with(Vec::new).push(response);
        self
    }

    /// Returns the path template, falling back to the raw URL.
    pub fn target(&self) -> &str {
        self.path
            .as_deref()
            .or(self.url.as_deref())
            .unwrap_or_default()
    }

    /// Returns the typed HTTP verb.
    pub fn http_method(&self) -> HttpMethod {
        HttpMethod::parse(&self.method)
    }

    /// Names of `{param}` placeholders in the path template, in order.
    pub fn path_params(&self) -> Vec<String> {
        self.path
            .as_deref()
            .map(template_params)
            .unwrap_or_default()
    }

    /// Declared parameters at `location`.
    pub fn declared_params(&self, location: ParameterLocation) -> Vec<&ParameterDescriptor> {
        self.parameters
            .iter()
            .flatten()
            .filter(|p| p.location == Some(location))
            .collect()
    }
}

/// Builds the fallback endpoint label `"METHOD target"`.
pub fn default_name(method: &str, target: &str) -> String {
    format!("{} {target}", method.to_ascii_uppercase())
}

/// Extracts `{name}` placeholders from a URL template.
///
/// Unterminated placeholders and `{{variable}}` runs are ignored.
///
/// # Examples
///
/// ```
/// use api_report_core::template_params;
///
/// assert_eq!(template_params("/orgs/{orgId}/users/{id}"), vec!["orgId", "id"]);
/// assert_eq!(template_params("/{{tenant}}/users/{id}"), vec!["id"]);
/// assert!(template_params("/users").is_empty());
/// assert!(template_params("/broken/{id").is_empty());
/// ```
pub fn template_params(template: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        if let Some(variable) = after.strip_prefix('{') {
            let Some(end) = variable.find("}}") else {
                break;
            };
            rest = &variable[end + 2..];
            continue;
        }
        let Some(end) = after.find('}') else {
            break;
        };
        params.push(after[..end].to_string());
        rest = &after[end + 1..];
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_params_skip_collection_variables() {
        assert_eq!(template_params("/{{tenant}}/users"), Vec::<String>::new());
        assert_eq!(
            template_params("{{baseUrl}}/orgs/{orgId}/users/{{userId}}"),
            vec!["orgId"]
        );
        let ep = EndpointDescriptor::new("GET", "/{{tenant}}/users/{id}");
        assert_eq!(ep.path_params(), vec!["id"]);
    }

    #[test]
    fn test_endpoint_roundtrip_keeps_absent_lists_absent() {
        let ep = EndpointDescriptor::new("get", "/users");
        let json = serde_json::to_string(&ep).unwrap();
        assert!(!json.contains("parameters"));
        assert!(!json.contains("responses"));

        let back: EndpointDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ep);
        assert!(back.parameters.is_none());
    }

    #[test]
    fn test_endpoint_empty_parameters_survive_roundtrip() {
        let mut ep = EndpointDescriptor::new("GET", "/users");
        ep.parameters = Some(Vec::new());
        let json = serde_json::to_string(&ep).unwrap();
        let back: EndpointDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back.parameters, Some(Vec::new()));
    }

    #[test]
    fn test_parameter_defaults_when_fields_missing() {
        let param: ParameterDescriptor = serde_json::from_str(r#"{"name":"limit"}"#).unwrap();
        assert!(!param.required);
        assert_eq!(param.param_type, "string");
        assert!(param.location.is_none());
    }

    #[test]
    fn test_request_body_uses_camel_case() {
        let body = RequestBodyDescriptor {
            content_type: Some("application/json".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"contentType":"application/json"}"#);
    }

    #[test]
    fn test_target_prefers_path() {
        let mut ep = EndpointDescriptor::new("GET", "/users");
        ep.url = Some("https://api.example.com/users".to_string());
        assert_eq!(ep.target(), "/users");

        let empty = EndpointDescriptor::default();
        assert_eq!(empty.target(), "");
    }

    #[test]
    fn test_declared_params_filters_by_location() {
        let ep = EndpointDescriptor::new("GET", "/users/{id}")
            .with_parameter(ParameterDescriptor::new("id", ParameterLocation::Path))
            .with_parameter(ParameterDescriptor::new("q", ParameterLocation::Query));
        let path: Vec<_> = ep
            .declared_params(ParameterLocation::Path)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(path, vec!["id"]);
    }

    #[test]
    fn test_header_disabled_omitted_when_false() {
        let header = HeaderDescriptor {
            key: "Accept".to_string(),
            value: "application/json".to_string(),
            disabled: false,
        };
        let json = serde_json::to_string(&header).unwrap();
        assert!(!json.contains("disabled"));
    }
}
