//! Resource grouping and CRUD coverage.

use api_report_core::{EndpointDescriptor, OperationCounts, ResourceGroup};

/// Derives the resource key of an endpoint.
///
/// Path templates use their first non-parameter segment. Raw URLs skip the
/// scheme and host (or, without a scheme, the leading `{{baseUrl}}`-style
/// segment) first. Query strings and fragments are ignored. Endpoints with
/// no usable segment map to [`ResourceGroup::UNKNOWN`].
///
/// # Examples
///
/// ```
/// use api_report_analysis::resources::resource_key;
/// use api_report_core::EndpointDescriptor;
///
/// assert_eq!(resource_key(&EndpointDescriptor::new("GET", "/users/{id}")), "users");
/// assert_eq!(
///     resource_key(&EndpointDescriptor::from_url("GET", "https://api.example.com/orders?page=2")),
///     "orders"
/// );
/// assert_eq!(resource_key(&EndpointDescriptor::new("GET", "/")), "unknown");
/// ```
pub fn resource_key(endpoint: &EndpointDescriptor) -> String {
    let segments: Vec<&str> = if let Some(path) = endpoint.path.as_deref() {
        segments(strip_query(path)).collect()
    } else if let Some(url) = endpoint.url.as_deref() {
        let url = strip_query(url);
        match url.find("://") {
            Some(idx) => segments(&url[idx + 3..]).skip(1).collect(),
            None if url.starts_with('/') => segments(url).collect(),
            None => segments(url).skip(1).collect(),
        }
    } else {
        Vec::new()
    };

    segments
        .into_iter()
        .find(|s| !is_param_segment(s))
        .unwrap_or(ResourceGroup::UNKNOWN)
        .to_string()
}

/// Returns `true` for `{id}`, `:id` and `{{id}}` segments.
pub fn is_param_segment(segment: &str) -> bool {
    segment.starts_with(':') || (segment.starts_with('{') && segment.ends_with('}'))
}

fn strip_query(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

fn segments(target: &str) -> impl Iterator<Item = &str> {
    target.split('/').filter(|s| !s.is_empty())
}

/// Groups endpoints by resource key, keeping first-seen order.
pub fn group_resources(endpoints: &[EndpointDescriptor]) -> Vec<ResourceGroup> {
    let mut tallies: Vec<(String, usize, OperationCounts)> = Vec::new();
    for endpoint in endpoints {
        let key = resource_key(endpoint);
        let idx = match tallies.iter().position(|(name, _, _)| *name == key) {
            Some(idx) => idx,
            None => {
                tallies.push((key, 0, OperationCounts::default()));
                tallies.len() - 1
            }
        };
        let (_, count, ops) = &mut tallies[idx];
        *count += 1;
        ops.record(endpoint.http_method());
    }

    tallies
        .into_iter()
        .map(|(name, count, ops)| ResourceGroup::new(&name, count, ops))
        .collect()
}

/// Picks the group with the most endpoints, ignoring `"unknown"`.
///
/// Ties go to the group seen first.
pub fn main_resource(groups: &[ResourceGroup]) -> Option<String> {
    let mut best: Option<&ResourceGroup> = None;
    for group in groups.iter().filter(|g| !g.is_unknown()) {
        if best.is_none_or(|b| group.endpoint_count > b.endpoint_count) {
            best = Some(group);
        }
    }
    best.map(|g| g.resource_name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(method: &str, p: &str) -> EndpointDescriptor {
        EndpointDescriptor::new(method, p)
    }

    #[test]
    fn test_resource_key_skips_param_segments() {
        assert_eq!(resource_key(&path("GET", "/{tenant}/users")), "users");
        assert_eq!(resource_key(&path("GET", "/:tenant/users")), "users");
        assert_eq!(resource_key(&path("GET", "/{id}")), "unknown");
    }

    #[test]
    fn test_resource_key_for_urls() {
        let with_scheme = EndpointDescriptor::from_url("GET", "https://api.example.com/users/42");
        assert_eq!(resource_key(&with_scheme), "users");
        let templated = EndpointDescriptor::from_url("GET", "{{baseUrl}}/orders/{{orderId}}");
        assert_eq!(resource_key(&templated), "orders");
        let bare_host = EndpointDescriptor::from_url("GET", "https://api.example.com");
        assert_eq!(resource_key(&bare_host), "unknown");
        let empty = EndpointDescriptor::from_url("GET", "");
        assert_eq!(resource_key(&empty), "unknown");
    }

    #[test]
    fn test_group_counts_and_order() {
        let endpoints = vec![
            path("GET", "/users"),
            path("GET", "/orders"),
            path("POST", "/users"),
            path("GET", "/users/{id}"),
        ];
        let groups = group_resources(&endpoints);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].resource_name, "users");
        assert_eq!(groups[0].endpoint_count, 3);
        assert_eq!(groups[0].operation_counts.get, 2);
        assert_eq!(groups[0].operation_counts.post, 1);
        assert!(groups[1].is_read_only);
    }

    #[test]
    fn test_full_crud_group() {
        let endpoints = vec![
            path("GET", "/users"),
            path("GET", "/users/{id}"),
            path("GET", "/users/{id}/roles"),
            path("POST", "/users"),
            path("PUT", "/users/{id}"),
            path("DELETE", "/users/{id}"),
        ];
        let groups = group_resources(&endpoints);
        assert!(groups[0].has_full_crud);
        assert!(!groups[0].is_read_only);
    }

    #[test]
    fn test_main_resource_excludes_unknown_and_prefers_first_on_tie() {
        let endpoints = vec![
            path("GET", "/"),
            path("GET", "/"),
            path("GET", "/"),
            path("GET", "/orders"),
            path("GET", "/users"),
            path("POST", "/orders"),
            path("POST", "/users"),
        ];
        let groups = group_resources(&endpoints);
        assert_eq!(main_resource(&groups).as_deref(), Some("orders"));
    }

    #[test]
    fn test_main_resource_none_when_only_unknown() {
        let groups = group_resources(&[path("GET", "/")]);
        assert_eq!(main_resource(&groups), None);
        assert_eq!(main_resource(&[]), None);
    }
}
