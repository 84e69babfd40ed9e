//! Bottom-up consensus labelling of inner vertices.

use crate::error::TaxassignError;
use crate::model::{Tree, Vertex};
use crate::taxonomy::LabelStore;
use tracing::debug;

/// Checks that `vertex` has as many children as the consensus pass expects:
/// two for internal vertices, two or three for the root.
fn check_arity(vertex: &Vertex) -> Result<(), TaxassignError> {
    let num_children = vertex.num_children();
    let valid = match vertex {
        Vertex::Leaf { .. } => true,
        Vertex::Internal { .. } => num_children == 2,
        Vertex::Root { .. } => num_children == 2 || num_children == 3,
    };

    if valid {
        Ok(())
    } else {
        Err(TaxassignError::StructuralViolation {
            vertex: vertex.index(),
            num_children,
        })
    }
}

/// Checks the whole tree for vertices that are not bifurcating,
/// reporting the first one in arena order.
///
/// The same check runs lazily inside [propagate_up]; calling this first
/// rejects a tree before anything (e.g. rerooting) modifies it.
pub fn validate_bifurcation(tree: &Tree) -> Result<(), TaxassignError> {
    (0..tree.num_vertices()).try_for_each(|index| check_arity(&tree[index]))
}

/// Labels every inner vertex with the [intersection](crate::taxonomy::Taxopath::intersect)
/// of its children's labels, children before parents.
///
/// For the three-child root of an unrooted tree, the consensus is folded over
/// the children from first to last.
///
/// # Arguments
/// * `tree` - Tree whose vertices are labelled
/// * `store` - Label store with all leaves set
///
/// # Returns
/// * `Ok(())` - every vertex of `store` is set
/// * `Err(TaxassignError::StructuralViolation)` - if a vertex is not bifurcating
pub fn propagate_up(tree: &Tree, store: &mut LabelStore) -> Result<(), TaxassignError> {
    let mut num_inner = 0;
    for vertex in tree.post_order_iter() {
        if vertex.is_leaf() {
            continue;
        }
        check_arity(vertex)?;

        let Some((first, rest)) = vertex.children().split_first() else {
            continue;
        };
        let consensus = rest
            .iter()
            .fold(store.label(*first).clone(), |acc, &child| {
                acc.intersect(store.label(child))
            });
        store.set(vertex.index(), consensus);
        num_inner += 1;
    }

    debug!(inner_vertices = num_inner, "propagated consensus labels up");
    Ok(())
}
