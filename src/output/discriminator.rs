//! Temporary discrimination of `bom-ref` identity cells.
//!
//! For one output pass every reachable cell must hold a non-null,
//! document-unique value; afterwards the caller's graph must look exactly as
//! it did before. The discriminator snapshots, rewrites, and restores.
//! Restoration runs on `Drop`, so it happens on every exit path, including
//! when normalization between the two steps returns an error.

use crate::model::{Bom, BomRef, Component};
use std::collections::HashSet;

/// Scope guard that makes every collected cell unique and non-null for the
/// duration of its lifetime.
#[derive(Debug)]
pub struct BomRefDiscriminator {
    refs: Vec<BomRef>,
    originals: Vec<Option<String>>,
    restored: bool,
}

impl BomRefDiscriminator {
    /// Collect every cell reachable from `bom`: each component's own cell
    /// plus every cell in its dependency list, then the metadata root
    /// component's, deduplicated by identity.
    #[must_use]
    pub fn from_bom(bom: &Bom) -> Self {
        let mut collected: Vec<BomRef> = Vec::new();
        let mut seen: HashSet<usize> = HashSet::new();

        let mut collect_component = |component: &Component| {
            if seen.insert(component.bom_ref().identity()) {
                collected.push(component.bom_ref().clone());
            }
            for dep in component.dependencies() {
                if seen.insert(dep.identity()) {
                    collected.push(dep.clone());
                }
            }
        };

        for component in bom.components() {
            collect_component(component);
        }
        if let Some(metadata) = &bom.metadata {
            if let Some(root) = &metadata.component {
                collect_component(root);
            }
        }

        Self::from_refs(collected)
    }

    /// Build a discriminator over an explicit handle list. Duplicate handles
    /// (by identity) are counted once; the snapshot keeps first-occurrence
    /// order.
    #[must_use]
    pub fn from_refs(refs: impl IntoIterator<Item = BomRef>) -> Self {
        let mut seen: HashSet<usize> = HashSet::new();
        let mut deduped: Vec<BomRef> = Vec::new();
        for r in refs {
            if seen.insert(r.identity()) {
                deduped.push(r);
            }
        }
        let originals = deduped.iter().map(BomRef::value).collect();
        Self {
            refs: deduped,
            originals,
            restored: false,
        }
    }

    /// Number of distinct cells under management.
    #[must_use]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Overwrite every null or colliding cell with a counter-generated value
    /// unique within this pass. Cells whose value is already unique are left
    /// untouched. Infallible.
    pub fn discriminate(&mut self) {
        // Generated candidates must dodge every original value, not just the
        // ones assigned so far: an untouched unique original later in the
        // walk must not find its value taken.
        let existing: HashSet<String> = self.refs.iter().filter_map(BomRef::value).collect();
        let mut assigned: HashSet<String> = HashSet::with_capacity(self.refs.len());
        let mut counter: u64 = 0;

        for r in &self.refs {
            match r.value() {
                Some(v) if !assigned.contains(&v) => {
                    assigned.insert(v);
                }
                previous => {
                    let fresh = loop {
                        counter += 1;
                        let candidate = format!("ref-{counter}");
                        if !existing.contains(&candidate) && !assigned.contains(&candidate) {
                            break candidate;
                        }
                    };
                    tracing::debug!(
                        from = ?previous,
                        to = %fresh,
                        "discriminated null or colliding bom-ref"
                    );
                    r.set_value(Some(fresh.clone()));
                    assigned.insert(fresh);
                }
            }
        }
    }

    /// Restore every cell to its snapshot value, in snapshot order, exactly
    /// once. Subsequent calls (including the one from `Drop`) are no-ops.
    pub fn reset(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        for (r, original) in self.refs.iter().zip(&self.originals) {
            r.set_value(original.clone());
        }
    }
}

impl Drop for BomRefDiscriminator {
    fn drop(&mut self) {
        self.reset();
    }
}
