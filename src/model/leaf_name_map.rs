//! Leaf name lookup for phylogenetic tree representation.
//!
//! - `LeafNameMap`: Lookup from taxon names to the leaves carrying them.

use crate::model::tree::{Tree, VertexIndex};
use std::collections::HashMap;
use std::fmt;

// =#========================================================================#=
// LEAF NAME MAP
// =#========================================================================#=
/// Maps leaf names (strings) to the [VertexIndex] of the leaf in one tree.
///
/// Built once per tree, so that resolving taxon records and outgroup names
/// does not scan the arena for each name. If several leaves share a name,
/// the first one in arena order wins (as with [`Tree::find_leaf`]).
///
/// # Example
/// ```
/// use taxassign::model::{LeafNameMap, Tree};
///
/// let mut tree = Tree::new(2);
/// let a = tree.add_leaf("A", None);
/// let b = tree.add_leaf("B", None);
/// tree.add_root(&[a, b]);
///
/// let names = LeafNameMap::from_tree(&tree);
/// assert_eq!(names.get_index("B"), Some(b));
/// assert_eq!(names.get_index("C"), None);
/// ```
#[derive(Debug, Clone)]
pub struct LeafNameMap {
    /// Map from leaf name to its vertex index
    map: HashMap<String, VertexIndex>,
}

impl LeafNameMap {
    /// Creates the name lookup for all leaves of `tree`.
    pub fn from_tree(tree: &Tree) -> Self {
        let mut map = HashMap::with_capacity(tree.num_vertices().div_ceil(2));
        for index in tree.leaf_indices() {
            if let Some(name) = tree[index].name() {
                map.entry(name.to_string()).or_insert(index);
            }
        }
        LeafNameMap { map }
    }

    /// Retrieves the vertex index for a given leaf name.
    ///
    /// # Returns
    /// `Some(index)` if a leaf carries this name, `None` otherwise
    pub fn get_index(&self, name: &str) -> Option<VertexIndex> {
        self.map.get(name).copied()
    }

    /// Checks if a leaf with this name exists.
    pub fn contains_name(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Returns the number of distinct leaf names.
    pub fn num_names(&self) -> usize {
        self.map.len()
    }
}

impl fmt::Display for LeafNameMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut entries: Vec<_> = self.map.iter().collect();
        entries.sort_by_key(|&(_, &index)| index);

        writeln!(f, "LeafNameMap ({} names):", entries.len())?;
        for (name, index) in entries {
            writeln!(f, "  [{}] {}", index, name)?;
        }
        Ok(())
    }
}
