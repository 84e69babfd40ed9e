//! Outgroup rooting: finding the edge that splits off a set of leaves and
//! rooting the tree on it.

use crate::error::TaxassignError;
use crate::model::{LeafNameMap, Tree, VertexIndex};
use std::collections::BTreeSet;
use tracing::debug;

/// Finds the edge whose removal splits the leaves of `tree` into exactly
/// `members` and all other leaves.
///
/// One bottom-up pass counts, per subtree, its leaves and its member leaves.
/// The edge above a vertex qualifies if its subtree holds exactly the members,
/// or exactly the non-members (the members then lie on the root side).
///
/// # Arguments
/// * `tree` - Tree to search
/// * `members` - Distinct leaf indices
///
/// # Returns
/// The index of the vertex below the splitting edge, or `None` if the members
/// do not form one side of any edge.
pub fn find_split_edge(tree: &Tree, members: &BTreeSet<VertexIndex>) -> Option<VertexIndex> {
    let num_members = members.len();
    let num_leaves = tree.num_leaves();
    let mut leaves_below = vec![0usize; tree.num_vertices()];
    let mut members_below = vec![0usize; tree.num_vertices()];

    for vertex in tree.post_order_iter() {
        let index = vertex.index();
        if vertex.is_leaf() {
            leaves_below[index] = 1;
            members_below[index] = usize::from(members.contains(&index));
        } else {
            for &child in vertex.children() {
                leaves_below[index] += leaves_below[child];
                members_below[index] += members_below[child];
            }
        }

        if vertex.is_root() {
            continue;
        }
        let holds_members =
            members_below[index] == num_members && leaves_below[index] == num_members;
        let holds_complement =
            members_below[index] == 0 && leaves_below[index] == num_leaves - num_members;
        if holds_members || holds_complement {
            return Some(index);
        }
    }

    None
}

/// Roots an unrooted tree on the edge separating the outgroup from all other leaves.
///
/// A single outgroup leaf is split off by its own edge; a larger outgroup by
/// the edge found with [find_split_edge]. Repeated names count once.
///
/// # Arguments
/// * `tree` - Unrooted tree, rooted in place
/// * `outgroup` - Names of the outgroup leaves
///
/// # Returns
/// * `Ok(VertexIndex)` - index of the new root
/// * `Err(TaxassignError)` - [InvalidTree](TaxassignError::InvalidTree) if
///   `tree` is not [valid](Tree::is_valid), [AlreadyRooted](TaxassignError::AlreadyRooted) if
///   `tree` is rooted, [UnknownLeafName](TaxassignError::UnknownLeafName) if a
///   name is not a leaf of `tree`, [EmptyOutgroup](TaxassignError::EmptyOutgroup)
///   if `outgroup` is empty, or
///   [NonMonophyleticOutgroup](TaxassignError::NonMonophyleticOutgroup) if no
///   edge splits off exactly the outgroup
pub fn root_by_outgroup<S: AsRef<str>>(
    tree: &mut Tree,
    outgroup: &[S],
) -> Result<VertexIndex, TaxassignError> {
    if !tree.is_valid() {
        return Err(TaxassignError::InvalidTree);
    }
    if tree.is_rooted() {
        return Err(TaxassignError::AlreadyRooted);
    }

    let names = LeafNameMap::from_tree(tree);
    let members = outgroup
        .iter()
        .map(|name| {
            let name = name.as_ref();
            names
                .get_index(name)
                .ok_or_else(|| TaxassignError::UnknownLeafName(name.to_string()))
        })
        .collect::<Result<BTreeSet<_>, _>>()?;

    let edge = match members.len() {
        0 => return Err(TaxassignError::EmptyOutgroup),
        1 => *members.first().ok_or(TaxassignError::EmptyOutgroup)?,
        size => find_split_edge(tree, &members)
            .ok_or(TaxassignError::NonMonophyleticOutgroup { size })?,
    };

    let root = tree.root_on_edge(edge);
    debug!(
        outgroup = members.len(),
        edge, root, "rooted tree on outgroup edge"
    );
    Ok(root)
}
