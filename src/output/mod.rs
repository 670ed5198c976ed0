//! Rendering of BOM documents into wire formats.
//!
//! Two normalizer families produce a JSON value tree and an XML element tree
//! from the same records and the same capability table, so the two outputs
//! are structurally equivalent modulo syntax. Orchestration is shared:
//! discriminate every reachable `bom-ref`, normalize, restore, encode. The
//! restore step is a scope guard and runs on every exit path.

mod dependency;
mod discriminator;
mod json;
mod xml;

pub use discriminator::BomRefDiscriminator;
pub use json::JsonSerializer;
pub use xml::XmlSerializer;

use crate::error::{Error, Result};
use crate::model::{Bom, Component, HashAlgorithm};
use crate::schema::{OutputFormat, SchemaVersion};

/// A format-specific serializer.
///
/// `normalize` and `encode` are the only format-specific hooks; `serialize`
/// provides the shared orchestration and the restoration guarantee. Hook
/// errors propagate to the caller unchanged after cleanup.
pub trait BomSerializer {
    /// Intermediate output tree produced by normalization.
    type Tree;

    /// The schema version this serializer targets.
    fn schema_version(&self) -> SchemaVersion;

    /// Build the output tree. Reads discriminated `bom-ref` values.
    fn normalize(&self, bom: &Bom) -> Result<Self::Tree>;

    /// Encode a finished tree to text.
    fn encode(&self, tree: Self::Tree, pretty: bool) -> Result<String>;

    /// Render `bom` to text.
    ///
    /// All `bom-ref` cells reachable from `bom` are guaranteed to hold their
    /// original values again when this returns, whether with `Ok` or `Err`.
    fn serialize(&self, bom: &Bom, pretty: bool) -> Result<String> {
        let tree = {
            let mut discriminator = BomRefDiscriminator::from_bom(bom);
            discriminator.discriminate();
            self.normalize(bom)?
            // discriminator drops here: refs are restored before encoding,
            // and equally when normalize bails out above.
        };
        self.encode(tree, pretty)
    }
}

/// Render `bom` in the given format and schema version.
///
/// Fails with [`Error::UnsupportedFormat`] before any traversal when the
/// version cannot express the format.
pub fn serialize_bom(
    bom: &Bom,
    format: OutputFormat,
    version: SchemaVersion,
    pretty: bool,
) -> Result<String> {
    match format {
        OutputFormat::Json => JsonSerializer::new(version)?.serialize(bom, pretty),
        OutputFormat::Xml => XmlSerializer::new(version)?.serialize(bom, pretty),
    }
}

/// Reject components whose type the target version cannot express.
pub(crate) fn ensure_component_type_supported(
    version: SchemaVersion,
    component: &Component,
) -> Result<()> {
    if version.is_supported_component_type(component.component_type) {
        return Ok(());
    }
    Err(Error::unsupported_component_type(
        component.component_type,
        version,
        component.group.as_deref(),
        &component.name,
        component.version.as_deref(),
    ))
}

/// The component version to put on the wire: the declared version, an
/// empty-string placeholder where the schema demands a version and none is
/// set, or nothing.
pub(crate) fn component_version_value(
    version: SchemaVersion,
    component: &Component,
) -> Option<String> {
    match (&component.version, version.requires_component_version()) {
        (Some(v), _) => Some(v.clone()),
        (None, true) => Some(String::new()),
        (None, false) => None,
    }
}

/// Filter a hash dictionary down to the algorithms the target version knows,
/// preserving order.
pub(crate) fn supported_hashes<'a>(
    version: SchemaVersion,
    hashes: &'a indexmap::IndexMap<HashAlgorithm, String>,
) -> Vec<(HashAlgorithm, &'a str)> {
    hashes
        .iter()
        .filter(|(alg, _)| {
            let supported = version.is_supported_hash_algorithm(**alg);
            if !supported {
                tracing::debug!(algorithm = %alg, schema_version = %version, "dropping hash the schema version cannot express");
            }
            supported
        })
        .map(|(alg, digest)| (*alg, digest.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ComponentType;
    use indexmap::IndexMap;

    #[test]
    fn version_placeholder_rules() {
        let with_version = Component::new(ComponentType::Library, "a").with_version("1.2.3");
        let without_version = Component::new(ComponentType::Library, "a");

        assert_eq!(
            component_version_value(SchemaVersion::V1_2, &with_version).as_deref(),
            Some("1.2.3")
        );
        assert_eq!(
            component_version_value(SchemaVersion::V1_2, &without_version).as_deref(),
            Some(""),
            "mandatory version emits an empty placeholder"
        );
        assert_eq!(
            component_version_value(SchemaVersion::V1_4, &without_version),
            None,
            "optional version is omitted"
        );
    }

    #[test]
    fn hash_filtering_respects_the_version() {
        let mut hashes = IndexMap::new();
        hashes.insert(HashAlgorithm::Sha256, "aa".to_owned());
        hashes.insert(HashAlgorithm::Blake3, "bb".to_owned());

        let old = supported_hashes(SchemaVersion::V1_1, &hashes);
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].0, HashAlgorithm::Sha256);

        let new = supported_hashes(SchemaVersion::V1_4, &hashes);
        assert_eq!(new.len(), 2);
    }

    #[test]
    fn unsupported_type_is_rejected_with_coordinates() {
        let component = Component::new(ComponentType::Firmware, "bios")
            .with_group("vendor")
            .with_version("7");
        let err = ensure_component_type_supported(SchemaVersion::V1_1, &component)
            .expect_err("firmware is not expressible at 1.1");
        let msg = err.to_string();
        assert!(msg.contains("firmware"));
        assert!(msg.contains("vendor"));
        assert!(msg.contains("bios"));
    }
}
