//! Catalog of API description and test-script formats.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a format identifier is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format '{0}' (run `api-report formats` for the list)")]
pub struct UnknownFormat(pub String);

/// One of the twelve formats a conversion can read from or write to.
///
/// Only [`ApiFormat::Postman`] and [`ApiFormat::Swagger`] can be parsed as
/// a source; every format is a valid target.
///
/// # Examples
///
/// ```
/// use api_report_core::ApiFormat;
///
/// let format: ApiFormat = "openapi".parse().unwrap();
/// assert_eq!(format, ApiFormat::Swagger);
/// assert_eq!(format.display_name(), "Swagger/OpenAPI");
/// assert!(format.is_parseable());
///
/// assert_eq!(ApiFormat::Cypress.file_extension(), "js");
/// assert!("wsdl".parse::<ApiFormat>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiFormat {
    Postman,
    #[serde(alias = "openapi")]
    Swagger,
    Jmx,
    Playwright,
    Loadrunner,
    Insomnia,
    Restassured,
    Cypress,
    Soapui,
    Paw,
    Katalon,
    Selenium,
}

impl ApiFormat {
    /// Every format, in catalog order.
    pub const ALL: [ApiFormat; 12] = [
        Self::Postman,
        Self::Swagger,
        Self::Jmx,
        Self::Playwright,
        Self::Loadrunner,
        Self::Insomnia,
        Self::Restassured,
        Self::Cypress,
        Self::Soapui,
        Self::Paw,
        Self::Katalon,
        Self::Selenium,
    ];

    /// Stable lowercase identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Postman => "postman",
            Self::Swagger => "swagger",
            Self::Jmx => "jmx",
            Self::Playwright => "playwright",
            Self::Loadrunner => "loadrunner",
            Self::Insomnia => "insomnia",
            Self::Restassured => "restassured",
            Self::Cypress => "cypress",
            Self::Soapui => "soapui",
            Self::Paw => "paw",
            Self::Katalon => "katalon",
            Self::Selenium => "selenium",
        }
    }

    /// Human-readable label used in reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Postman => "Postman Collection",
            Self::Swagger => "Swagger/OpenAPI",
            Self::Jmx => "JMeter JMX",
            Self::Playwright => "Playwright",
            Self::Loadrunner => "LoadRunner",
            Self::Insomnia => "Insomnia",
            Self::Restassured => "REST Assured",
            Self::Cypress => "Cypress",
            Self::Soapui => "SoapUI",
            Self::Paw => "Paw",
            Self::Katalon => "Katalon Studio",
            Self::Selenium => "Selenium",
        }
    }

    /// Whether the extractor understands this format as input.
    pub fn is_parseable(&self) -> bool {
        matches!(self, Self::Postman | Self::Swagger)
    }

    /// Extension of the converted artifact written for this target.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Playwright | Self::Cypress => "js",
            _ => "json",
        }
    }

    /// File name of the converted artifact, e.g. `converted-api-cypress.js`.
    pub fn artifact_file_name(&self) -> String {
        format!("converted-api-{}.{}", self.id(), self.file_extension())
    }
}

impl std::fmt::Display for ApiFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ApiFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        if needle == "openapi" {
            return Ok(Self::Swagger);
        }
        Self::ALL
            .into_iter()
            .find(|format| format.id() == needle)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}
