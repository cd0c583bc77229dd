//! Core data model for API description analysis.
//!
//! This crate defines the types every stage of the pipeline exchanges:
//!
//! - [`EndpointDescriptor`]: one HTTP operation, normalized from either a
//!   Postman-style collection or an OpenAPI/Swagger path map.
//! - [`ResourceGroup`]: endpoints sharing a top-level path segment, with
//!   CRUD-coverage flags.
//! - [`SemanticStructure`] and [`AnnotatedEndpoint`]: the classified view
//!   of an API.
//! - [`ValidationIssue`] and [`Improvement`]: findings about a description.
//! - [`ConversionReport`]: per-endpoint outcome of a format conversion.
//! - [`Documentation`]: generated endpoint reference.
//! - [`ApiFormat`]: the catalog of supported source and target formats.
//!
//! Validation ([`validate_endpoints`]) applies the fixed rule set to a list
//! of endpoints.
//!
//! # Example
//!
//! ```
//! use api_report_core::*;
//!
//! let endpoint = EndpointDescriptor::new("GET", "/users/{id}")
//!     .with_name("Get user")
//!     .with_parameter(ParameterDescriptor::new("id", ParameterLocation::Path).required())
//!     .with_response(ResponseDescriptor::new("200", "Successful operation"))
//!     .with_response(ResponseDescriptor::new("404", "Resource not found"));
//!
//! assert!(validate_endpoints(&[endpoint]).is_empty());
//! assert_eq!("postman".parse::<ApiFormat>().unwrap(), ApiFormat::Postman);
//! ```

mod docs;
mod format;
mod issues;
mod report;
mod resource;
mod semantics;
mod types;
mod validate;

pub use docs::{Documentation, EndpointDoc};
pub use format::{ApiFormat, UnknownFormat};
pub use issues::{Improvement, IssueKind, ValidationIssue};
pub use report::{ApiAnalysis, ConversionEndpointResult, ConversionReport, ConversionStatus};
pub use resource::{OperationCounts, ResourceGroup};
pub use semantics::*;
pub use types::*;
pub use validate::{validate_endpoint, validate_endpoints};
