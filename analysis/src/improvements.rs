use api_report_core::{EndpointDescriptor, HttpMethod, Improvement};

/// Suggestions returned for every API regardless of content.
fn general_improvements() -> Vec<Improvement> {
    vec![
        Improvement::new(
            "general",
            "Various endpoints with inconsistent naming patterns",
            "Follow REST resource naming conventions (e.g., plural nouns for collections)",
            "Consistent naming improves API understandability and follows best practices",
        ),
        Improvement::new(
            "security",
            "Some endpoints may not specify security requirements",
            "Add explicit security schemes and requirements",
            "Clear security definitions help ensure proper authentication and authorization",
        ),
        Improvement::new(
            "documentation",
            "Some endpoints have minimal descriptions",
            "Add detailed descriptions for all endpoints, parameters, and responses",
            "Comprehensive documentation improves API usability",
        ),
    ]
}

/// Returns the three general suggestions followed by one pagination
/// suggestion per GET endpoint that has neither a query string nor any
/// declared parameters.
pub fn suggest_improvements(endpoints: &[EndpointDescriptor]) -> Vec<Improvement> {
    let mut improvements = general_improvements();
    for (index, endpoint) in endpoints.iter().enumerate() {
        let target = endpoint.target();
        if endpoint.http_method() == HttpMethod::Get
            && !target.contains('?')
            && endpoint.parameters.is_none()
        {
            improvements.push(Improvement::new(
                &format!("endpoints[{index}]"),
                &format!("GET {target} with no query parameters"),
                "Add pagination and filtering parameters",
                "GET operations on collections should support pagination and filtering",
            ));
        }
    }
    improvements
}
