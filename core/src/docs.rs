use serde::{Deserialize, Serialize};

use crate::{ParameterDescriptor, RequestBodyDescriptor, ResponseDescriptor};

/// Generated reference documentation for an API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    /// One-paragraph summary of the API surface.
    pub overview: String,
    pub endpoints: Vec<EndpointDoc>,
}

/// Documentation for a single endpoint.
///
/// Unlike [`EndpointDescriptor`](crate::EndpointDescriptor), every list here
/// is resolved: path parameters are always documented and responses fall
/// back to method-based defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDoc {
    pub name: String,
    pub description: String,
    pub path: String,
    pub method: String,
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyDescriptor>,
    pub responses: Vec<ResponseDescriptor>,
}
