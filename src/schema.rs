//! Schema versions, output formats, and the per-version capability table.
//!
//! One static table answers every "does this version support X?" question.
//! Normalizers consult it instead of carrying their own per-version
//! conditionals, so adding a capability means adding a field here and
//! nowhere else.

use crate::model::{ComponentType, HashAlgorithm};
use std::fmt;

/// A released revision of the CycloneDX specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum SchemaVersion {
    V1_0,
    V1_1,
    V1_2,
    V1_3,
    V1_4,
}

/// Target wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Json,
    Xml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Xml => f.write_str("XML"),
        }
    }
}

/// What one schema version can express.
struct Capabilities {
    json: bool,
    bom_ref: bool,
    metadata: bool,
    dependencies: bool,
    component_version_required: bool,
    external_references: bool,
    external_reference_hashes: bool,
    tool_external_references: bool,
    properties: bool,
    component_types: &'static [ComponentType],
    hash_algorithms: &'static [HashAlgorithm],
    json_schema_id: Option<&'static str>,
}

const BASE_COMPONENT_TYPES: &[ComponentType] = &[
    ComponentType::Application,
    ComponentType::Framework,
    ComponentType::Library,
    ComponentType::OperatingSystem,
    ComponentType::Device,
    ComponentType::File,
];

const FULL_COMPONENT_TYPES: &[ComponentType] = &[
    ComponentType::Application,
    ComponentType::Framework,
    ComponentType::Library,
    ComponentType::OperatingSystem,
    ComponentType::Device,
    ComponentType::File,
    ComponentType::Container,
    ComponentType::Firmware,
];

const BASE_HASH_ALGORITHMS: &[HashAlgorithm] = &[
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
    HashAlgorithm::Sha3_256,
    HashAlgorithm::Sha3_512,
];

const FULL_HASH_ALGORITHMS: &[HashAlgorithm] = &[
    HashAlgorithm::Md5,
    HashAlgorithm::Sha1,
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
    HashAlgorithm::Sha3_256,
    HashAlgorithm::Sha3_384,
    HashAlgorithm::Sha3_512,
    HashAlgorithm::Blake2b256,
    HashAlgorithm::Blake2b384,
    HashAlgorithm::Blake2b512,
    HashAlgorithm::Blake3,
];

const CAPS_1_0: Capabilities = Capabilities {
    json: false,
    bom_ref: false,
    metadata: false,
    dependencies: false,
    component_version_required: true,
    external_references: false,
    external_reference_hashes: false,
    tool_external_references: false,
    properties: false,
    component_types: BASE_COMPONENT_TYPES,
    hash_algorithms: BASE_HASH_ALGORITHMS,
    json_schema_id: None,
};

const CAPS_1_1: Capabilities = Capabilities {
    json: false,
    bom_ref: true,
    metadata: false,
    dependencies: false,
    component_version_required: true,
    external_references: true,
    external_reference_hashes: false,
    tool_external_references: false,
    properties: false,
    component_types: BASE_COMPONENT_TYPES,
    hash_algorithms: BASE_HASH_ALGORITHMS,
    json_schema_id: None,
};

const CAPS_1_2: Capabilities = Capabilities {
    json: true,
    bom_ref: true,
    metadata: true,
    dependencies: true,
    component_version_required: true,
    external_references: true,
    external_reference_hashes: false,
    tool_external_references: false,
    properties: false,
    component_types: FULL_COMPONENT_TYPES,
    hash_algorithms: FULL_HASH_ALGORITHMS,
    json_schema_id: Some("http://cyclonedx.org/schema/bom-1.2.schema.json"),
};

const CAPS_1_3: Capabilities = Capabilities {
    json: true,
    bom_ref: true,
    metadata: true,
    dependencies: true,
    component_version_required: true,
    external_references: true,
    external_reference_hashes: true,
    tool_external_references: false,
    properties: true,
    component_types: FULL_COMPONENT_TYPES,
    hash_algorithms: FULL_HASH_ALGORITHMS,
    json_schema_id: Some("http://cyclonedx.org/schema/bom-1.3.schema.json"),
};

const CAPS_1_4: Capabilities = Capabilities {
    json: true,
    bom_ref: true,
    metadata: true,
    dependencies: true,
    component_version_required: false,
    external_references: true,
    external_reference_hashes: true,
    tool_external_references: true,
    properties: true,
    component_types: FULL_COMPONENT_TYPES,
    hash_algorithms: FULL_HASH_ALGORITHMS,
    json_schema_id: Some("http://cyclonedx.org/schema/bom-1.4.schema.json"),
};

impl SchemaVersion {
    const fn capabilities(self) -> &'static Capabilities {
        match self {
            Self::V1_0 => &CAPS_1_0,
            Self::V1_1 => &CAPS_1_1,
            Self::V1_2 => &CAPS_1_2,
            Self::V1_3 => &CAPS_1_3,
            Self::V1_4 => &CAPS_1_4,
        }
    }

    /// The version token, e.g. `"1.4"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
            Self::V1_3 => "1.3",
            Self::V1_4 => "1.4",
        }
    }

    /// XML namespace for documents of this version.
    #[must_use]
    pub fn xml_namespace(self) -> String {
        format!("http://cyclonedx.org/schema/bom/{}", self.as_str())
    }

    /// `$schema` id for JSON documents of this version, when one was
    /// published.
    #[must_use]
    pub const fn json_schema_id(self) -> Option<&'static str> {
        self.capabilities().json_schema_id
    }

    /// Whether documents of this version can be rendered in `format`.
    #[must_use]
    pub const fn supports_format(self, format: OutputFormat) -> bool {
        match format {
            OutputFormat::Xml => true,
            OutputFormat::Json => self.capabilities().json,
        }
    }

    /// Whether components carry a `bom-ref` identifier.
    #[must_use]
    pub const fn supports_bom_ref(self) -> bool {
        self.capabilities().bom_ref
    }

    /// Whether the document has a `metadata` block.
    #[must_use]
    pub const fn supports_metadata(self) -> bool {
        self.capabilities().metadata
    }

    /// Whether the document has a flattened dependency graph.
    #[must_use]
    pub const fn supports_dependencies(self) -> bool {
        self.capabilities().dependencies
    }

    /// Whether a component must carry an explicit version field.
    #[must_use]
    pub const fn requires_component_version(self) -> bool {
        self.capabilities().component_version_required
    }

    /// Whether external references exist at all.
    #[must_use]
    pub const fn supports_external_references(self) -> bool {
        self.capabilities().external_references
    }

    /// Whether external references may carry hashes.
    #[must_use]
    pub const fn supports_external_reference_hashes(self) -> bool {
        self.capabilities().external_reference_hashes
    }

    /// Whether metadata tools may carry external references.
    #[must_use]
    pub const fn supports_tool_external_references(self) -> bool {
        self.capabilities().tool_external_references
    }

    /// Whether free-form properties exist.
    #[must_use]
    pub const fn supports_properties(self) -> bool {
        self.capabilities().properties
    }

    /// Whether `component_type` is legal at this version.
    #[must_use]
    pub fn is_supported_component_type(self, component_type: ComponentType) -> bool {
        self.capabilities().component_types.contains(&component_type)
    }

    /// Whether `algorithm` is legal at this version.
    #[must_use]
    pub fn is_supported_hash_algorithm(self, algorithm: HashAlgorithm) -> bool {
        self.capabilities().hash_algorithms.contains(&algorithm)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
