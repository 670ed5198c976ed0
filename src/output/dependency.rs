//! Flattening of the component dependency graph.
//!
//! Ownership links between components become a flat, ref-keyed adjacency
//! list. Only refs belonging to the document's own components may appear;
//! dependencies pointing outside the document are dropped, not an error.

use crate::model::{Bom, BomRef, Component};
use serde::Serialize;
use std::collections::HashSet;

/// One adjacency-list entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DependencyEntry {
    #[serde(rename = "ref")]
    pub dependency_ref: String,
    #[serde(rename = "dependsOn")]
    pub depends_on: Vec<String>,
}

/// Produce one entry per component with a resolvable own-ref, in component
/// declaration order (BOM components first, then the metadata root), with
/// dependency order preserved within each entry.
pub(crate) fn flatten(bom: &Bom) -> Vec<DependencyEntry> {
    let mut all: Vec<&Component> = bom.components().iter().collect();
    if let Some(metadata) = &bom.metadata {
        if let Some(root) = &metadata.component {
            all.push(root);
        }
    }

    let known: HashSet<usize> = all.iter().map(|c| c.bom_ref().identity()).collect();

    let mut entries = Vec::with_capacity(all.len());
    for component in all {
        let Some(own) = component.bom_ref().value() else {
            // Post-discrimination every cell has a value; checked anyway so a
            // direct call outside a serialize pass cannot emit a null ref.
            tracing::warn!(
                component = %component.display_name(),
                "component has no bom-ref value, omitting its dependency entry"
            );
            continue;
        };

        let depends_on = component
            .dependencies()
            .iter()
            .filter(|dep| {
                let in_document = known.contains(&dep.identity());
                if !in_document {
                    tracing::trace!(
                        component = %component.display_name(),
                        target = ?dep.value(),
                        "dropping dependency on a ref outside the document"
                    );
                }
                in_document
            })
            .filter_map(BomRef::value)
            .collect();

        entries.push(DependencyEntry {
            dependency_ref: own,
            depends_on,
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentType, Metadata};

    fn named_component(name: &str) -> Component {
        Component::new(ComponentType::Library, name).with_bom_ref_value(name)
    }

    #[test]
    fn external_refs_are_dropped_but_the_entry_remains() {
        let mut bom = Bom::new();
        let outsider = named_component("C");

        let mut a = named_component("A");
        a.add_dependency(outsider.bom_ref());
        bom.add_component(a);

        let entries = flatten(&bom);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dependency_ref, "A");
        assert!(entries[0].depends_on.is_empty(), "outside ref dropped");
    }

    #[test]
    fn metadata_root_is_flattened_last() {
        let mut bom = Bom::new();
        let a = named_component("A");
        let b = named_component("B");

        let mut root = named_component("R");
        root.add_dependency(a.bom_ref());
        root.add_dependency(b.bom_ref());

        bom.add_component(a);
        bom.add_component(b);
        let mut metadata = Metadata::new();
        metadata.component = Some(root);
        bom.metadata = Some(metadata);

        let entries = flatten(&bom);
        let refs: Vec<&str> = entries.iter().map(|e| e.dependency_ref.as_str()).collect();
        assert_eq!(refs, ["A", "B", "R"]);
        assert_eq!(entries[2].depends_on, ["A", "B"]);
    }

    #[test]
    fn identity_beats_value_for_membership() {
        // A depends on a cell whose *value* matches B's, but which is a
        // different cell. Membership is identity-based, so it is dropped.
        let mut bom = Bom::new();
        let imposter = crate::model::BomRef::with_value("B");

        let mut a = named_component("A");
        a.add_dependency(&imposter);
        bom.add_component(a);
        bom.add_component(named_component("B"));

        let entries = flatten(&bom);
        assert!(entries[0].depends_on.is_empty());
    }

    #[test]
    fn components_without_ref_values_are_skipped() {
        let mut bom = Bom::new();
        bom.add_component(Component::new(ComponentType::Library, "nameless"));
        bom.add_component(named_component("A"));

        let entries = flatten(&bom);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dependency_ref, "A");
    }
}
