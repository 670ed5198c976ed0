//! Document metadata: timestamp, producing tools, root component,
//! free-form properties.

use super::{Component, ExternalReference, HashAlgorithm};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// The `metadata` block of a BOM.
///
/// Emitted only for schema versions that define it; older versions drop the
/// whole block.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// When the document was produced.
    pub timestamp: DateTime<Utc>,
    /// Tools that produced the document, unique and insertion-ordered.
    pub tools: Vec<Tool>,
    /// The component the BOM describes.
    pub component: Option<Component>,
    /// Free-form name/value pairs.
    pub properties: Vec<Property>,
}

impl Metadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            tools: Vec::new(),
            component: None,
            properties: Vec::new(),
        }
    }

    /// Add a tool, skipping value-equal duplicates.
    pub fn add_tool(&mut self, tool: Tool) {
        if !self.tools.contains(&tool) {
            self.tools.push(tool);
        }
    }

    /// Add a property. Duplicate names are allowed; the schema treats
    /// properties as a multi-map.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.push(Property {
            name: name.into(),
            value: value.into(),
        });
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

/// A tool that took part in producing the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tool {
    pub vendor: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub hashes: IndexMap<HashAlgorithm, String>,
    /// Emitted only at schema versions that allow references on tools.
    pub external_references: Vec<ExternalReference>,
}

impl Tool {
    /// Create a tool from the usual vendor/name/version triple.
    #[must_use]
    pub fn new(
        vendor: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            vendor: Some(vendor.into()),
            name: Some(name.into()),
            version: Some(version.into()),
            hashes: IndexMap::new(),
            external_references: Vec::new(),
        }
    }
}

/// Free-form name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    pub name: String,
    pub value: String,
}
