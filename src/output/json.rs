//! JSON normalization and encoding.

use super::{component_version_value, dependency, ensure_component_type_supported, supported_hashes};
use crate::error::{Error, Result};
use crate::model::{
    Bom, Component, DisjunctiveLicense, ExternalReference, HashAlgorithm, LicenseChoice, Licensing,
    Metadata, Tool,
};
use crate::schema::{OutputFormat, SchemaVersion};
use chrono::SecondsFormat;
use serde_json::{json, Map, Value};

/// Serializer producing CycloneDX JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonSerializer {
    version: SchemaVersion,
}

impl JsonSerializer {
    /// Create a JSON serializer for `version`.
    ///
    /// Fails with [`Error::UnsupportedFormat`] for versions without a JSON
    /// binding.
    pub fn new(version: SchemaVersion) -> Result<Self> {
        if !version.supports_format(OutputFormat::Json) {
            return Err(Error::UnsupportedFormat {
                version,
                format: OutputFormat::Json,
            });
        }
        Ok(Self { version })
    }

    fn bom_to_value(&self, bom: &Bom) -> Result<Value> {
        let mut root = Map::new();
        if let Some(id) = self.version.json_schema_id() {
            root.insert("$schema".into(), json!(id));
        }
        root.insert("bomFormat".into(), json!("CycloneDX"));
        root.insert("specVersion".into(), json!(self.version.as_str()));
        if let Some(serial) = &bom.serial_number {
            root.insert("serialNumber".into(), json!(serial.as_str()));
        }
        root.insert("version".into(), json!(bom.version));

        if self.version.supports_metadata() {
            if let Some(metadata) = &bom.metadata {
                root.insert("metadata".into(), self.metadata_to_value(metadata)?);
            }
        }

        let components = bom
            .components()
            .iter()
            .map(|c| self.component_to_value(c))
            .collect::<Result<Vec<Value>>>()?;
        root.insert("components".into(), Value::Array(components));

        if self.version.supports_external_references() && !bom.external_references.is_empty() {
            root.insert(
                "externalReferences".into(),
                self.external_references_to_value(&bom.external_references),
            );
        }

        if self.version.supports_dependencies() {
            let entries = dependency::flatten(bom);
            if !entries.is_empty() {
                let value = serde_json::to_value(&entries)
                    .map_err(|e| Error::Encode(e.to_string()))?;
                root.insert("dependencies".into(), value);
            }
        }

        Ok(Value::Object(root))
    }

    fn metadata_to_value(&self, metadata: &Metadata) -> Result<Value> {
        let mut out = Map::new();
        out.insert(
            "timestamp".into(),
            json!(metadata.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        if !metadata.tools.is_empty() {
            let tools: Vec<Value> = metadata.tools.iter().map(|t| self.tool_to_value(t)).collect();
            out.insert("tools".into(), Value::Array(tools));
        }
        if let Some(component) = &metadata.component {
            out.insert("component".into(), self.component_to_value(component)?);
        }
        if self.version.supports_properties() && !metadata.properties.is_empty() {
            let properties: Vec<Value> = metadata
                .properties
                .iter()
                .map(|p| json!({"name": p.name, "value": p.value}))
                .collect();
            out.insert("properties".into(), Value::Array(properties));
        }
        Ok(Value::Object(out))
    }

    fn tool_to_value(&self, tool: &Tool) -> Value {
        let mut out = Map::new();
        if let Some(vendor) = &tool.vendor {
            out.insert("vendor".into(), json!(vendor));
        }
        if let Some(name) = &tool.name {
            out.insert("name".into(), json!(name));
        }
        if let Some(version) = &tool.version {
            out.insert("version".into(), json!(version));
        }
        if let Some(hashes) = self.hashes_to_value(&tool.hashes) {
            out.insert("hashes".into(), hashes);
        }
        if self.version.supports_tool_external_references() && !tool.external_references.is_empty()
        {
            out.insert(
                "externalReferences".into(),
                self.external_references_to_value(&tool.external_references),
            );
        }
        Value::Object(out)
    }

    fn component_to_value(&self, component: &Component) -> Result<Value> {
        ensure_component_type_supported(self.version, component)?;

        let mut out = Map::new();
        out.insert("type".into(), json!(component.component_type.as_str()));
        if self.version.supports_bom_ref() {
            if let Some(bom_ref) = component.bom_ref().value() {
                out.insert("bom-ref".into(), json!(bom_ref));
            }
        }
        if let Some(group) = &component.group {
            out.insert("group".into(), json!(group));
        }
        out.insert("name".into(), json!(component.name));
        if let Some(version) = component_version_value(self.version, component) {
            out.insert("version".into(), json!(version));
        }
        if let Some(description) = &component.description {
            out.insert("description".into(), json!(description));
        }
        if let Some(hashes) = self.hashes_to_value(&component.hashes) {
            out.insert("hashes".into(), hashes);
        }
        if let Some(licensing) = &component.licenses {
            out.insert("licenses".into(), self.licensing_to_value(licensing));
        }
        if let Some(purl) = &component.purl {
            out.insert("purl".into(), json!(purl.to_string()));
        }
        if self.version.supports_external_references() && !component.external_references.is_empty()
        {
            out.insert(
                "externalReferences".into(),
                self.external_references_to_value(&component.external_references),
            );
        }
        Ok(Value::Object(out))
    }

    fn licensing_to_value(&self, licensing: &Licensing) -> Value {
        let choices: Vec<Value> = match licensing {
            Licensing::Choice(choice) => vec![self.choice_to_value(choice)],
            Licensing::Repository(repository) => repository
                .iter()
                .map(|license| json!({"license": self.license_to_value(license)}))
                .collect(),
        };
        Value::Array(choices)
    }

    fn choice_to_value(&self, choice: &LicenseChoice) -> Value {
        match choice {
            LicenseChoice::License(license) => json!({"license": self.license_to_value(license)}),
            LicenseChoice::Expression(expression) => json!({"expression": expression}),
        }
    }

    fn license_to_value(&self, license: &DisjunctiveLicense) -> Value {
        let mut out = Map::new();
        match license {
            DisjunctiveLicense::Spdx { id, .. } => {
                out.insert("id".into(), json!(id));
            }
            DisjunctiveLicense::Named { name, .. } => {
                out.insert("name".into(), json!(name));
            }
        }
        if let Some(url) = license.url() {
            out.insert("url".into(), json!(url));
        }
        Value::Object(out)
    }

    fn external_references_to_value(&self, references: &[ExternalReference]) -> Value {
        let values: Vec<Value> = references
            .iter()
            .map(|reference| {
                let mut out = Map::new();
                out.insert("type".into(), json!(reference.reference_type.as_str()));
                out.insert("url".into(), json!(reference.url));
                if let Some(comment) = &reference.comment {
                    out.insert("comment".into(), json!(comment));
                }
                if self.version.supports_external_reference_hashes() {
                    if let Some(hashes) = self.hashes_to_value(&reference.hashes) {
                        out.insert("hashes".into(), hashes);
                    }
                }
                Value::Object(out)
            })
            .collect();
        Value::Array(values)
    }

    fn hashes_to_value(
        &self,
        hashes: &indexmap::IndexMap<HashAlgorithm, String>,
    ) -> Option<Value> {
        let supported = supported_hashes(self.version, hashes);
        if supported.is_empty() {
            return None;
        }
        let values: Vec<Value> = supported
            .into_iter()
            .map(|(alg, digest)| json!({"alg": alg.as_str(), "content": digest}))
            .collect();
        Some(Value::Array(values))
    }
}

impl super::BomSerializer for JsonSerializer {
    type Tree = Value;

    fn schema_version(&self) -> SchemaVersion {
        self.version
    }

    fn normalize(&self, bom: &Bom) -> Result<Self::Tree> {
        self.bom_to_value(bom)
    }

    fn encode(&self, tree: Self::Tree, pretty: bool) -> Result<String> {
        let encoded = if pretty {
            serde_json::to_string_pretty(&tree)
        } else {
            serde_json::to_string(&tree)
        };
        encoded.map_err(|e| Error::Encode(e.to_string()))
    }
}
