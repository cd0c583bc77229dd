use api_report_core::{AnnotatedEndpoint, EndpointDescriptor, SemanticStructure};
use tracing::debug;

use crate::classify::classify;
use crate::resources::{group_resources, main_resource};

/// Classifies every endpoint and aggregates them into resource groups.
pub fn semantic_structure(endpoints: &[EndpointDescriptor]) -> SemanticStructure {
    let annotated: Vec<AnnotatedEndpoint> = endpoints
        .iter()
        .map(|endpoint| AnnotatedEndpoint {
            classification: classify(endpoint),
            endpoint: endpoint.clone(),
        })
        .collect();
    let relationships = group_resources(endpoints);
    let resources = relationships
        .iter()
        .map(|g| g.resource_name.clone())
        .collect();
    let main = main_resource(&relationships);

    debug!(
        endpoints = annotated.len(),
        resources = relationships.len(),
        main_resource = main.as_deref().unwrap_or("-"),
        "Built semantic structure"
    );

    SemanticStructure {
        endpoints: annotated,
        relationships,
        resources,
        main_resource: main,
    }
}
