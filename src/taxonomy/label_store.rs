//! Per-vertex taxonomic labels of one tree.
//!
//! Provides the [LabelStore] struct, one [Taxopath] slot per vertex,
//! which the propagation passes fill in.

use crate::error::TaxassignError;
use crate::model::{LeafNameMap, Tree, VertexIndex};
use crate::taxonomy::labeling::PartialLabeling;
use crate::taxonomy::taxopath::Taxopath;
use std::collections::HashSet;
use tracing::{debug, warn};

// =#========================================================================#=
// LABEL STORE
// =#========================================================================$=
/// Taxonomic labels for all vertices of a tree, indexed by [VertexIndex].
///
/// # Lifecycle
/// - After [`initialize`](Self::initialize), every leaf holds its recorded
///   taxopath or `QUERY`, inner vertices are unset.
/// - The postorder pass sets every inner vertex.
/// - The preorder pass replaces every remaining `QUERY`.
///
/// Which leaves were queries at the start is remembered, since their labels
/// are overwritten later on.
#[derive(Debug, Clone)]
pub struct LabelStore {
    labels: Vec<Option<Taxopath>>,
    query_leaves: Vec<VertexIndex>,
}

impl LabelStore {
    /// Creates the store for `tree`, labelling leaves from `labeling` and
    /// marking all other leaves as queries.
    ///
    /// # Returns
    /// * `Ok(LabelStore)` - with leaves set and inner vertices unset
    /// * `Err(TaxassignError::UnknownLeafName)` - if a record names no leaf of `tree`
    pub fn initialize(tree: &Tree, labeling: &PartialLabeling) -> Result<Self, TaxassignError> {
        let names = LeafNameMap::from_tree(tree);
        let mut labels: Vec<Option<Taxopath>> = vec![None; tree.num_vertices()];
        for leaf in tree.leaf_indices() {
            labels[leaf] = Some(Taxopath::query());
        }

        let mut assigned = HashSet::with_capacity(labeling.len());
        for (name, taxopath) in labeling.iter() {
            let index = names
                .get_index(name)
                .ok_or_else(|| TaxassignError::UnknownLeafName(name.to_string()))?;
            if !assigned.insert(index) {
                warn!(leaf = name, "taxon record overwrites an earlier record");
            }
            labels[index] = Some(taxopath.clone());
        }

        let query_leaves: Vec<VertexIndex> = tree
            .leaf_indices()
            .filter(|&leaf| labels[leaf].as_ref().is_some_and(Taxopath::is_query))
            .collect();
        debug!(
            labelled = assigned.len(),
            queries = query_leaves.len(),
            "initialized label store"
        );

        Ok(LabelStore {
            labels,
            query_leaves,
        })
    }

    /// Returns the label of a vertex, or `None` while unset.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: VertexIndex) -> Option<&Taxopath> {
        self.labels[index].as_ref()
    }

    /// Returns the label of a vertex that has already been set.
    ///
    /// # Panics
    /// Panics if the label is unset or `index` is out of bounds.
    pub fn label(&self, index: VertexIndex) -> &Taxopath {
        self.labels[index]
            .as_ref()
            .unwrap_or_else(|| panic!("Label of vertex {index} read before it was set"))
    }

    /// Sets the label of a vertex.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&mut self, index: VertexIndex, taxopath: Taxopath) {
        self.labels[index] = Some(taxopath);
    }

    /// Returns whether the vertex's label has been set.
    pub fn is_set(&self, index: VertexIndex) -> bool {
        self.labels.get(index).is_some_and(Option::is_some)
    }

    /// Returns whether the vertex was a query leaf at initialization.
    pub fn was_query(&self, index: VertexIndex) -> bool {
        self.query_leaves.binary_search(&index).is_ok()
    }

    /// Returns the leaves that were queries at initialization, in leaf order.
    pub fn query_leaves(&self) -> &[VertexIndex] {
        &self.query_leaves
    }

    /// Returns the number of vertex slots.
    pub fn num_vertices(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether every vertex holds a label other than `QUERY`.
    pub fn is_resolved(&self) -> bool {
        self.first_unresolved().is_none()
    }

    /// Returns the first vertex that is unset or still `QUERY`, if any.
    pub fn first_unresolved(&self) -> Option<VertexIndex> {
        self.labels
            .iter()
            .position(|label| label.as_ref().is_none_or(Taxopath::is_query))
    }
}
