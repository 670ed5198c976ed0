//! Unified error types for cyclonedx-render.
//!
//! All failures surfaced by this crate are local precondition failures with
//! no recovery path; nothing is retried internally.

use crate::model::ComponentType;
use crate::schema::{OutputFormat, SchemaVersion};
use thiserror::Error;

/// Main error type for rendering operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The requested output format is not defined for the schema version.
    ///
    /// Raised at serializer construction, before any document traversal.
    #[error("schema version {version} does not support the {format} output format")]
    UnsupportedFormat {
        version: SchemaVersion,
        format: OutputFormat,
    },

    /// A component's type is rejected by the active schema version.
    ///
    /// Aborts the whole serialization of the document.
    #[error(
        "component type '{component_type}' is not supported by schema version {schema_version} \
         (component {}/{}@{})",
        .group.as_deref().unwrap_or("-"),
        .name,
        .component_version.as_deref().unwrap_or("-")
    )]
    UnsupportedComponentType {
        component_type: ComponentType,
        schema_version: SchemaVersion,
        group: Option<String>,
        name: String,
        component_version: Option<String>,
    },

    /// A malformed identifier was rejected at the data-model boundary.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// Text encoding of an output tree failed.
    ///
    /// Not expected to occur with validated inputs; surfaced rather than
    /// panicking so callers keep control of the process.
    #[error("output encoding failed: {0}")]
    Encode(String),
}

/// Convenient Result type for cyclonedx-render operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an `UnsupportedComponentType` error carrying the component's
    /// coordinates for diagnostics.
    pub fn unsupported_component_type(
        component_type: ComponentType,
        schema_version: SchemaVersion,
        group: Option<&str>,
        name: &str,
        component_version: Option<&str>,
    ) -> Self {
        Self::UnsupportedComponentType {
            component_type,
            schema_version,
            group: group.map(str::to_owned),
            name: name.to_owned(),
            component_version: component_version.map(str::to_owned),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_names_the_version() {
        let err = Error::UnsupportedFormat {
            version: SchemaVersion::V1_1,
            format: OutputFormat::Json,
        };
        let display = err.to_string();
        assert!(display.contains("1.1"), "message should name the version: {display}");
        assert!(display.contains("JSON"), "message should name the format: {display}");
    }

    #[test]
    fn unsupported_component_type_names_the_coordinates() {
        let err = Error::unsupported_component_type(
            ComponentType::Container,
            SchemaVersion::V1_0,
            Some("org.example"),
            "runtime",
            Some("2.0.1"),
        );
        let display = err.to_string();
        assert!(display.contains("container"));
        assert!(display.contains("org.example"));
        assert!(display.contains("runtime"));
        assert!(display.contains("2.0.1"));
    }
}
