use serde::{Deserialize, Serialize};

/// Severity of a [`ValidationIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Error,
    Warning,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// A rule violation found in an API description.
///
/// `path` is a pointer into the extracted endpoint list, such as
/// `endpoints[2].parameters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub path: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::Error,
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: IssueKind::Warning,
            ..Self::error(path, message)
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == IssueKind::Error
    }
}

/// A suggested change to an API description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Improvement {
    pub path: String,
    pub current_implementation: String,
    pub suggested_implementation: String,
    pub reason: String,
}

impl Improvement {
    pub fn new(path: &str, current: &str, suggested: &str, reason: &str) -> Self {
        Self {
            path: path.to_string(),
            current_implementation: current.to_string(),
            suggested_implementation: suggested.to_string(),
            reason: reason.to_string(),
        }
    }
}
