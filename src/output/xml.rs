//! XML normalization and encoding.
//!
//! Normalizers build a small owned element tree; encoding walks it with a
//! `quick_xml` event writer. Text content and attribute values are escaped
//! by the writer.

use super::{component_version_value, dependency, ensure_component_type_supported, supported_hashes};
use crate::error::{Error, Result};
use crate::model::{
    Bom, Component, DisjunctiveLicense, ExternalReference, HashAlgorithm, LicenseChoice, Licensing,
    Metadata, Tool,
};
use crate::schema::{OutputFormat, SchemaVersion};
use chrono::SecondsFormat;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// One node of the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum XmlNode {
    Element(Element),
    Text(String),
}

/// An owned XML element: name, attributes, ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<XmlNode>,
}

impl Element {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element holding a single text node.
    pub(crate) fn with_text(name: &'static str, text: impl Into<String>) -> Self {
        let mut el = Self::new(name);
        el.children.push(XmlNode::Text(text.into()));
        el
    }

    pub(crate) fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub(crate) fn push(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }
}

/// Serializer producing CycloneDX XML.
#[derive(Debug, Clone, Copy)]
pub struct XmlSerializer {
    version: SchemaVersion,
}

impl XmlSerializer {
    /// Create an XML serializer for `version`.
    ///
    /// Kept fallible for symmetry with the JSON side; every published schema
    /// version defines XML, so this currently always succeeds.
    pub fn new(version: SchemaVersion) -> Result<Self> {
        if !version.supports_format(OutputFormat::Xml) {
            return Err(Error::UnsupportedFormat {
                version,
                format: OutputFormat::Xml,
            });
        }
        Ok(Self { version })
    }

    fn bom_to_element(&self, bom: &Bom) -> Result<Element> {
        let mut root = Element::new("bom").attr("xmlns", self.version.xml_namespace());
        if let Some(serial) = &bom.serial_number {
            root = root.attr("serialNumber", serial.as_str());
        }
        let mut root = root.attr("version", bom.version.to_string());

        if self.version.supports_metadata() {
            if let Some(metadata) = &bom.metadata {
                root.push(self.metadata_to_element(metadata)?);
            }
        }

        let mut components = Element::new("components");
        for component in bom.components() {
            components.push(self.component_to_element(component)?);
        }
        root.push(components);

        if self.version.supports_external_references() && !bom.external_references.is_empty() {
            root.push(self.external_references_to_element(&bom.external_references));
        }

        if self.version.supports_dependencies() {
            let entries = dependency::flatten(bom);
            if !entries.is_empty() {
                let mut dependencies = Element::new("dependencies");
                for entry in entries {
                    let mut dep = Element::new("dependency").attr("ref", entry.dependency_ref);
                    for target in entry.depends_on {
                        dep.push(Element::new("dependency").attr("ref", target));
                    }
                    dependencies.push(dep);
                }
                root.push(dependencies);
            }
        }

        Ok(root)
    }

    fn metadata_to_element(&self, metadata: &Metadata) -> Result<Element> {
        let mut out = Element::new("metadata");
        out.push(Element::with_text(
            "timestamp",
            metadata.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        ));
        if !metadata.tools.is_empty() {
            let mut tools = Element::new("tools");
            for tool in &metadata.tools {
                tools.push(self.tool_to_element(tool));
            }
            out.push(tools);
        }
        if let Some(component) = &metadata.component {
            out.push(self.component_to_element(component)?);
        }
        if self.version.supports_properties() && !metadata.properties.is_empty() {
            let mut properties = Element::new("properties");
            for property in &metadata.properties {
                properties.push(
                    Element::with_text("property", property.value.clone())
                        .attr("name", property.name.clone()),
                );
            }
            out.push(properties);
        }
        Ok(out)
    }

    fn tool_to_element(&self, tool: &Tool) -> Element {
        let mut out = Element::new("tool");
        if let Some(vendor) = &tool.vendor {
            out.push(Element::with_text("vendor", vendor.clone()));
        }
        if let Some(name) = &tool.name {
            out.push(Element::with_text("name", name.clone()));
        }
        if let Some(version) = &tool.version {
            out.push(Element::with_text("version", version.clone()));
        }
        if let Some(hashes) = self.hashes_to_element(&tool.hashes) {
            out.push(hashes);
        }
        if self.version.supports_tool_external_references() && !tool.external_references.is_empty()
        {
            out.push(self.external_references_to_element(&tool.external_references));
        }
        out
    }

    fn component_to_element(&self, component: &Component) -> Result<Element> {
        ensure_component_type_supported(self.version, component)?;

        let mut out = Element::new("component").attr("type", component.component_type.as_str());
        if self.version.supports_bom_ref() {
            if let Some(bom_ref) = component.bom_ref().value() {
                out = out.attr("bom-ref", bom_ref);
            }
        }
        if let Some(group) = &component.group {
            out.push(Element::with_text("group", group.clone()));
        }
        out.push(Element::with_text("name", component.name.clone()));
        if let Some(version) = component_version_value(self.version, component) {
            out.push(Element::with_text("version", version));
        }
        if let Some(description) = &component.description {
            out.push(Element::with_text("description", description.clone()));
        }
        if let Some(hashes) = self.hashes_to_element(&component.hashes) {
            out.push(hashes);
        }
        if let Some(licensing) = &component.licenses {
            out.push(self.licensing_to_element(licensing));
        }
        if let Some(purl) = &component.purl {
            out.push(Element::with_text("purl", purl.to_string()));
        }
        if self.version.supports_external_references() && !component.external_references.is_empty()
        {
            out.push(self.external_references_to_element(&component.external_references));
        }
        Ok(out)
    }

    fn licensing_to_element(&self, licensing: &Licensing) -> Element {
        let mut out = Element::new("licenses");
        match licensing {
            Licensing::Choice(LicenseChoice::Expression(expression)) => {
                out.push(Element::with_text("expression", expression.clone()));
            }
            Licensing::Choice(LicenseChoice::License(license)) => {
                out.push(self.license_to_element(license));
            }
            Licensing::Repository(repository) => {
                for license in repository {
                    out.push(self.license_to_element(license));
                }
            }
        }
        out
    }

    fn license_to_element(&self, license: &DisjunctiveLicense) -> Element {
        let mut out = Element::new("license");
        match license {
            DisjunctiveLicense::Spdx { id, .. } => out.push(Element::with_text("id", id.clone())),
            DisjunctiveLicense::Named { name, .. } => {
                out.push(Element::with_text("name", name.clone()));
            }
        }
        if let Some(url) = license.url() {
            out.push(Element::with_text("url", escape_uri(url)));
        }
        out
    }

    fn external_references_to_element(&self, references: &[ExternalReference]) -> Element {
        let mut out = Element::new("externalReferences");
        for reference in references {
            let mut el =
                Element::new("reference").attr("type", reference.reference_type.as_str().to_owned());
            el.push(Element::with_text("url", escape_uri(&reference.url)));
            if let Some(comment) = &reference.comment {
                el.push(Element::with_text("comment", comment.clone()));
            }
            if self.version.supports_external_reference_hashes() {
                if let Some(hashes) = self.hashes_to_element(&reference.hashes) {
                    el.push(hashes);
                }
            }
            out.push(el);
        }
        out
    }

    fn hashes_to_element(
        &self,
        hashes: &indexmap::IndexMap<HashAlgorithm, String>,
    ) -> Option<Element> {
        let supported = supported_hashes(self.version, hashes);
        if supported.is_empty() {
            return None;
        }
        let mut out = Element::new("hashes");
        for (alg, digest) in supported {
            out.push(Element::with_text("hash", digest).attr("alg", alg.as_str()));
        }
        Some(out)
    }
}

impl super::BomSerializer for XmlSerializer {
    type Tree = Element;

    fn schema_version(&self) -> SchemaVersion {
        self.version
    }

    fn normalize(&self, bom: &Bom) -> Result<Self::Tree> {
        self.bom_to_element(bom)
    }

    fn encode(&self, tree: Self::Tree, pretty: bool) -> Result<String> {
        let mut buf: Vec<u8> = Vec::new();
        let encoded = if pretty {
            let mut writer = Writer::new_with_indent(&mut buf, b' ', 2);
            write_document(&mut writer, &tree)
        } else {
            let mut writer = Writer::new(&mut buf);
            write_document(&mut writer, &tree)
        };
        encoded.map_err(|e| Error::Encode(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| Error::Encode(e.to_string()))
    }
}

fn write_document<W: std::io::Write>(
    writer: &mut Writer<W>,
    root: &Element,
) -> quick_xml::Result<()> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(writer, root)
}

fn write_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    element: &Element,
) -> quick_xml::Result<()> {
    let mut start = BytesStart::new(element.name);
    for (name, value) in &element.attributes {
        start.push_attribute((*name, value.as_str()));
    }
    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(el) => write_element(writer, el)?,
            XmlNode::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name)))?;
    Ok(())
}

/// Best-effort URI escaping applied to free-text URL fields before emission.
/// Space and `"'[]<>{}` are percent-encoded; everything else passes through.
fn escape_uri(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            ' ' => out.push_str("%20"),
            '"' => out.push_str("%22"),
            '\'' => out.push_str("%27"),
            '[' => out.push_str("%5B"),
            ']' => out.push_str("%5D"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            '{' => out.push_str("%7B"),
            '}' => out.push_str("%7D"),
            other => out.push(other),
        }
    }
    out
}
