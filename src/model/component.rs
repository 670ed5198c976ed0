//! Component data structures.

use super::{BomRef, ExternalReference, HashAlgorithm, Licensing};
use indexmap::IndexMap;
use packageurl::PackageUrl;
use std::fmt;

/// Component type classification.
///
/// Which members are legal depends on the target schema version; the
/// capability table in [`crate::schema`] is the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ComponentType {
    Application,
    Framework,
    Library,
    OperatingSystem,
    Device,
    File,
    Container,
    Firmware,
}

impl ComponentType {
    /// The schema spelling of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Application => "application",
            Self::Framework => "framework",
            Self::Library => "library",
            Self::OperatingSystem => "operating-system",
            Self::Device => "device",
            Self::File => "file",
            Self::Container => "container",
            Self::Firmware => "firmware",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single component of the BOM.
///
/// Every component owns a [`BomRef`] identity cell, created with it and
/// unique to it. Dependencies are expressed as handles to *other*
/// components' cells, so membership is an identity question, not a value
/// question.
#[derive(Debug)]
pub struct Component {
    pub component_type: ComponentType,
    pub name: String,
    pub group: Option<String>,
    pub version: Option<String>,
    pub description: Option<String>,
    pub licenses: Option<Licensing>,
    pub purl: Option<PackageUrl<'static>>,
    /// Digests keyed by algorithm; one digest per algorithm, insertion order
    /// preserved.
    pub hashes: IndexMap<HashAlgorithm, String>,
    pub external_references: Vec<ExternalReference>,
    bom_ref: BomRef,
    dependencies: Vec<BomRef>,
}

impl Component {
    /// Create a component with the minimal required fields and a fresh,
    /// unnamed identity cell.
    #[must_use]
    pub fn new(component_type: ComponentType, name: impl Into<String>) -> Self {
        Self {
            component_type,
            name: name.into(),
            group: None,
            version: None,
            description: None,
            licenses: None,
            purl: None,
            hashes: IndexMap::new(),
            external_references: Vec::new(),
            bom_ref: BomRef::unset(),
            dependencies: Vec::new(),
        }
    }

    /// Set the version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set the group/namespace.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Name this component's identity cell.
    #[must_use]
    pub fn with_bom_ref_value(self, value: impl Into<String>) -> Self {
        self.bom_ref.set_value(Some(value.into()));
        self
    }

    /// This component's identity cell.
    #[must_use]
    pub fn bom_ref(&self) -> &BomRef {
        &self.bom_ref
    }

    /// Declare a dependency on another component's identity cell.
    ///
    /// The handle is shared, not copied by value; the same cell is counted
    /// once no matter how often it is added.
    pub fn add_dependency(&mut self, target: &BomRef) {
        if !self.dependencies.iter().any(|d| d == target) {
            self.dependencies.push(target.clone());
        }
    }

    /// The declared dependency handles, in declaration order.
    #[must_use]
    pub fn dependencies(&self) -> &[BomRef] {
        &self.dependencies
    }

    /// Ingest `(algorithm name, digest)` pairs. Pairs naming an algorithm
    /// outside the known set are dropped.
    pub fn add_hashes<I, S, D>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (S, D)>,
        S: AsRef<str>,
        D: Into<String>,
    {
        for (name, digest) in pairs {
            match HashAlgorithm::from_name(name.as_ref()) {
                Some(alg) => {
                    self.hashes.insert(alg, digest.into());
                }
                None => {
                    tracing::debug!(
                        algorithm = name.as_ref(),
                        component = %self.name,
                        "dropping digest with unknown hash algorithm"
                    );
                }
            }
        }
    }

    /// Add an external reference, skipping value-equal duplicates.
    pub fn add_external_reference(&mut self, reference: ExternalReference) {
        if !self.external_references.contains(&reference) {
            self.external_references.push(reference);
        }
    }

    /// Display name in `name@version` form.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.version
            .as_ref()
            .map_or_else(|| self.name.clone(), |v| format!("{}@{}", self.name, v))
    }
}

/// Cloning a component allocates a fresh identity cell carrying a copy of
/// the source cell's value; the clone never aliases the source's identity.
/// Dependency handles keep pointing at the cells they already point at.
impl Clone for Component {
    fn clone(&self) -> Self {
        Self {
            component_type: self.component_type,
            name: self.name.clone(),
            group: self.group.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            licenses: self.licenses.clone(),
            purl: self.purl.clone(),
            hashes: self.hashes.clone(),
            external_references: self.external_references.clone(),
            bom_ref: BomRef::new(self.bom_ref.value()),
            dependencies: self.dependencies.clone(),
        }
    }
}

/// Value equality over the descriptive fields. Identity cells and dependency
/// handles are excluded: identity never takes part in value comparison.
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        self.component_type == other.component_type
            && self.name == other.name
            && self.group == other.group
            && self.version == other.version
            && self.description == other.description
            && self.licenses == other.licenses
            && purl_eq(self.purl.as_ref(), other.purl.as_ref())
            && self.hashes == other.hashes
            && self.external_references == other.external_references
    }
}

impl Eq for Component {}

fn purl_eq(a: Option<&PackageUrl<'static>>, b: Option<&PackageUrl<'static>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(x), Some(y)) => x.to_string() == y.to_string(),
        _ => false,
    }
}
