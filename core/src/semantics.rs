//! Semantic tags attached to endpoints by the classifier.
//!
//! Every tag serializes as a kebab-case string (`"resource-retrieval"`,
//! `"personal-data"`, ...), and the `Display` impls produce the same text.

use serde::{Deserialize, Serialize};

use crate::{EndpointDescriptor, ResourceGroup};

macro_rules! kebab_display {
    ($ty:ty { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl $ty {
            /// Returns the serialized label.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// What kind of operation an endpoint performs on its resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticType {
    ResourceRetrieval,
    CollectionRetrieval,
    ResourceCreation,
    FullResourceUpdate,
    PartialResourceUpdate,
    ResourceDeletion,
    Unknown,
}

kebab_display!(SemanticType {
    ResourceRetrieval => "resource-retrieval",
    CollectionRetrieval => "collection-retrieval",
    ResourceCreation => "resource-creation",
    FullResourceUpdate => "full-resource-update",
    PartialResourceUpdate => "partial-resource-update",
    ResourceDeletion => "resource-deletion",
    Unknown => "unknown",
});

/// Business purpose inferred from the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PurposeCategory {
    Authentication,
    UserManagement,
    DataRetrieval,
    DataManipulation,
    DataDeletion,
    GeneralPurpose,
}

kebab_display!(PurposeCategory {
    Authentication => "authentication",
    UserManagement => "user-management",
    DataRetrieval => "data-retrieval",
    DataManipulation => "data-manipulation",
    DataDeletion => "data-deletion",
    GeneralPurpose => "general-purpose",
});

/// Access level an endpoint most likely requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityLevel {
    Public,
    Admin,
    Authenticated,
    Standard,
}

kebab_display!(SecurityLevel {
    Public => "public",
    Admin => "admin",
    Authenticated => "authenticated",
    Standard => "standard",
});

/// Sensitivity of the data an endpoint handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataCategory {
    PersonalData,
    FinancialData,
    HealthData,
    GeneralData,
}

kebab_display!(DataCategory {
    PersonalData => "personal-data",
    FinancialData => "financial-data",
    HealthData => "health-data",
    GeneralData => "general-data",
});

/// The four tags computed for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointClassification {
    pub semantic_type: SemanticType,
    pub purpose_category: PurposeCategory,
    pub security_level: SecurityLevel,
    pub data_category: DataCategory,
}

/// An endpoint together with its classification, serialized flat.
///
/// # Examples
///
/// ```
/// use api_report_core::*;
///
/// let annotated = AnnotatedEndpoint {
///     endpoint: EndpointDescriptor::new("GET", "/users"),
///     classification: EndpointClassification {
///         semantic_type: SemanticType::CollectionRetrieval,
///         purpose_category: PurposeCategory::UserManagement,
///         security_level: SecurityLevel::Standard,
///         data_category: DataCategory::PersonalData,
///     },
/// };
/// let json = serde_json::to_value(&annotated).unwrap();
/// assert_eq!(json["path"], "/users");
/// assert_eq!(json["semanticType"], "collection-retrieval");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedEndpoint {
    #[serde(flatten)]
    pub endpoint: EndpointDescriptor,
    #[serde(flatten)]
    pub classification: EndpointClassification,
}

/// Semantic view of a whole API description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticStructure {
    pub endpoints: Vec<AnnotatedEndpoint>,
    /// Per-resource CRUD statistics, in first-seen order.
    pub relationships: Vec<ResourceGroup>,
    /// Resource names, in first-seen order (may include `"unknown"`).
    pub resources: Vec<String>,
    /// Resource with the most endpoints, excluding `"unknown"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_resource: Option<String>,
}
