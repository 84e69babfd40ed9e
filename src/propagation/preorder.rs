//! Top-down inheritance of labels onto query vertices.

use crate::error::TaxassignError;
use crate::model::{Tree, VertexIndex};
use crate::taxonomy::LabelStore;
use tracing::{debug, trace};

/// Returns the first leaf (arena order) that was labelled at initialization.
fn find_anchor(tree: &Tree, store: &LabelStore) -> Option<VertexIndex> {
    tree.leaf_indices().find(|&leaf| !store.was_query(leaf))
}

/// Replaces every `QUERY` label by the label of its closest resolved ancestor.
///
/// The walk starts at a labelled leaf (the anchor) and visits all vertices in
/// pre-order over the undirected tree. A `QUERY` vertex takes the label of the
/// neighbour it was reached from, which has been resolved before it.
/// Query vertices are exactly those whose whole subtree holds only queries, so
/// the walk reaches them through their parent and chains of unlabelled
/// subtrees inherit in turn.
///
/// # Arguments
/// * `tree` - Tree whose vertices are labelled
/// * `store` - Label store with every vertex set, e.g. by
///   [propagate_up](crate::propagation::propagate_up)
///
/// # Returns
/// * `Ok(())` - no label in `store` is `QUERY` anymore
/// * `Err(TaxassignError::NoAnchorLabel)` - if every leaf was a query
///
/// # Panics
/// Panics if a vertex in `store` is unset.
pub fn propagate_down(tree: &Tree, store: &mut LabelStore) -> Result<(), TaxassignError> {
    let anchor = find_anchor(tree, store).ok_or(TaxassignError::NoAnchorLabel)?;
    debug!(anchor, "inheriting labels down from anchor leaf");

    for (vertex, reached_from) in tree.pre_order_from(anchor) {
        let index = vertex.index();
        if !store.label(index).is_query() {
            continue;
        }
        if let Some(previous) = reached_from {
            let inherited = store.label(previous).clone();
            trace!(vertex = index, from = previous, label = %inherited, "inherited label");
            store.set(index, inherited);
        }
    }

    Ok(())
}
