//! The root BOM document.

use super::{Component, ExternalReference, Metadata, UrnUuid};

/// A Bill-of-Materials document.
///
/// Components are unique by value equality and keep insertion order. The
/// uniqueness of their `bom-ref` values is an *output* invariant, enforced
/// around serialization by the discriminator, not at all times.
#[derive(Debug, Clone, PartialEq)]
pub struct Bom {
    /// Optional document serial number; validated at construction of
    /// [`UrnUuid`].
    pub serial_number: Option<UrnUuid>,
    /// Document version, incremented when a BOM is re-issued for the same
    /// subject. Not validated here; the wire carries whatever is set.
    pub version: u32,
    pub metadata: Option<Metadata>,
    pub external_references: Vec<ExternalReference>,
    components: Vec<Component>,
}

impl Bom {
    /// Create an empty document with version 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            serial_number: None,
            version: 1,
            metadata: None,
            external_references: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Add a component, skipping value-equal duplicates. Returns whether the
    /// component was added.
    pub fn add_component(&mut self, component: Component) -> bool {
        if self.components.contains(&component) {
            tracing::debug!(
                component = %component.display_name(),
                "skipping duplicate component"
            );
            return false;
        }
        self.components.push(component);
        true
    }

    /// The components in insertion order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Mutable access to the components. Field edits are fine; uniqueness is
    /// only checked at insertion.
    #[must_use]
    pub fn components_mut(&mut self) -> &mut [Component] {
        &mut self.components
    }

    /// Add a document-level external reference, skipping value-equal
    /// duplicates.
    pub fn add_external_reference(&mut self, reference: ExternalReference) {
        if !self.external_references.contains(&reference) {
            self.external_references.push(reference);
        }
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}

impl Default for Bom {
    fn default() -> Self {
        Self::new()
    }
}
