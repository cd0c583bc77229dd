use serde::{Deserialize, Serialize};

use crate::HttpMethod;

/// Per-verb endpoint counts for one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCounts {
    pub get: usize,
    pub post: usize,
    pub put: usize,
    pub patch: usize,
    pub delete: usize,
}

impl OperationCounts {
    /// Counts one endpoint. Verbs outside the five CRUD verbs are ignored.
    pub fn record(&mut self, method: HttpMethod) {
        match method {
            HttpMethod::Get => self.get += 1,
            HttpMethod::Post => self.post += 1,
            HttpMethod::Put => self.put += 1,
            HttpMethod::Patch => self.patch += 1,
            HttpMethod::Delete => self.delete += 1,
            _ => {}
        }
    }

    /// Create, read, update (PUT or PATCH) and delete are all present.
    pub fn has_full_crud(&self) -> bool {
        self.get > 0 && self.post > 0 && (self.put > 0 || self.patch > 0) && self.delete > 0
    }

    /// Reads are present and nothing mutates.
    pub fn is_read_only(&self) -> bool {
        self.get > 0 && self.post == 0 && self.put == 0 && self.patch == 0 && self.delete == 0
    }
}

/// Endpoints sharing a top-level resource segment, with CRUD coverage.
///
/// `has_full_crud` and `is_read_only` are derived from the counts and can
/// never both be `true`; both are `false` for partial CRUD.
///
/// # Examples
///
/// ```
/// use api_report_core::{OperationCounts, ResourceGroup};
///
/// let counts = OperationCounts { get: 3, post: 1, put: 1, patch: 0, delete: 1 };
/// let group = ResourceGroup::new("users", 6, counts);
/// assert!(group.has_full_crud);
/// assert!(!group.is_read_only);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    pub resource_name: String,
    pub endpoint_count: usize,
    pub operation_counts: OperationCounts,
    pub has_full_crud: bool,
    pub is_read_only: bool,
}

impl ResourceGroup {
    /// Name used for endpoints whose resource segment cannot be derived.
    pub const UNKNOWN: &'static str = "unknown";

    /// Builds a group, deriving both coverage flags from `counts`.
    pub fn new(resource_name: &str, endpoint_count: usize, counts: OperationCounts) -> Self {
        Self {
            resource_name: resource_name.to_string(),
            endpoint_count,
            operation_counts: counts,
            has_full_crud: counts.has_full_crud(),
            is_read_only: counts.is_read_only(),
        }
    }

    /// Returns `true` for the catch-all `"unknown"` group.
    pub fn is_unknown(&self) -> bool {
        self.resource_name == Self::UNKNOWN
    }
}
