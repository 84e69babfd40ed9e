//! Provides the tree representation used by the propagation passes.
//!
//! Provides core data structures for representing phylogenetic trees:
//! * [Tree] - Main tree structure using the arena pattern
//! * [VertexIndex] as type used to index vertices in tree
//! * Stack-based iterators: [PostOrderIter], [PreOrderIter] and the
//!   undirected [PreOrderFromIter]

use crate::model::vertex::{BranchLength, Vertex};

/// Index of a vertex in a tree (arena).
///
/// Since every non-root vertex has exactly one edge towards its parent,
/// the index of a non-root vertex also identifies that edge.
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. Aim is to avoid referencing troubles as well as to provide
/// efficient memory layout and cache locality for traversal operations.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained.
///   (e.g. leaves must not be first `n` indices)
/// - A tree is *rooted* if its root has two children. An *unrooted* tree
///   is stored with a root of three children (the top-level trifurcation).
/// - Branch lengths are optional, but if provided must be non-negative.
///
/// # Construction
/// To construct a tree, specify its size based on the number of leaves,
/// then add vertices one by one bottom-up, finishing with the root.
/// Test validity with [`Tree::is_valid()`].
#[derive(Debug, Clone)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Name of tree; optional
    name: Option<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new tree with capacity for a binary tree with `num_leaves` leaves.
    ///
    /// One extra slot is reserved for the root inserted by [`Tree::root_on_edge`].
    ///
    /// # Arguments
    /// `num_leaves` - number of leaves of the new tree; must be positive
    pub fn new(num_leaves: usize) -> Self {
        assert!(num_leaves > 0);
        let capacity = 2 * num_leaves;
        Tree {
            vertices: Vec::with_capacity(capacity),
            root_index: NO_ROOT_SET_INDEX,
            name: None,
        }
    }

    /// Adds a root to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Child indices; two for a rooted, three for an unrooted tree
    ///
    /// # Returns
    /// The index of the newly created root vertex.
    pub fn add_root(&mut self, children: &[VertexIndex]) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_root(index, children.to_vec()));

        self.root_index = index;
        for &child in children {
            self[child].set_parent(index);
        }

        index
    }

    /// Adds an internal vertex to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `children` - Child indices
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent (non-negative)
    ///
    /// # Returns
    /// The index of the newly created internal vertex.
    pub fn add_internal_vertex(
        &mut self,
        children: &[VertexIndex],
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_internal(index, children.to_vec(), branch_length));

        for &child in children {
            self[child].set_parent(index);
        }

        index
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `name` - Taxon name of this leaf
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent (non-negative)
    ///
    /// # Returns
    /// The index of the newly created leaf vertex.
    pub fn add_leaf<S: Into<String>>(
        &mut self,
        name: S,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Vertex::new_leaf(index, name.into(), branch_length));
        index
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    /// Set a name for this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns whether this tree is rooted, i.e. its root has exactly two children.
    ///
    /// # Panics
    /// Panics if the root hasn't been set.
    pub fn is_rooted(&self) -> bool {
        self.root().num_children() == 2
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices in this tree (root excluded).
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges in this tree, one per non-root vertex.
    pub fn num_edges(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Returns an iterator over the indices of all leaves, in arena order.
    ///
    /// This is the leaf enumeration order used when reporting results.
    pub fn leaf_indices(&self) -> impl Iterator<Item = VertexIndex> + '_ {
        self.vertices
            .iter()
            .filter(|v| v.is_leaf())
            .map(|v| v.index())
    }

    /// Returns the index of the first leaf (arena order) with the given name.
    ///
    /// Linear scan; for repeated lookups build a
    /// [LeafNameMap](crate::model::LeafNameMap) instead.
    pub fn find_leaf(&self, name: &str) -> Option<VertexIndex> {
        self.vertices
            .iter()
            .find(|v| v.name() == Some(name))
            .map(|v| v.index())
    }
}

impl Tree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is valid and points to a Root vertex
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - All parent indices are valid and include this vertex as a child
    /// - Root vertex has no parent set, all others have valid parent set
    /// - Leaves have non-empty names
    ///
    /// Arity of vertices is not checked, see
    /// [`validate_bifurcation`](crate::propagation::validate_bifurcation).
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        // Check root index is set and within bounds
        if self.root_index == NO_ROOT_SET_INDEX || self.root_index >= self.vertices.len() {
            return false;
        }

        // Check root is actually a Root variant
        if !self.vertices[self.root_index].is_root() {
            return false;
        }

        let mut found_root = false;

        for (index, vertex) in self.vertices.iter().enumerate() {
            // Check vertex index matches its arena position
            if vertex.index() != index {
                return false;
            }

            // Check that there is only one root
            if vertex.is_root() {
                if found_root {
                    return false;
                }
                found_root = true;
            }

            // Check children point back to this vertex as parent
            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            // Check parent references
            if vertex.is_root() {
                if vertex.has_parent() {
                    return false;
                }
            } else {
                match vertex.parent() {
                    None => return false,
                    Some(parent_index) => {
                        if parent_index >= self.vertices.len()
                            || !self.vertices[parent_index].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }

            if vertex.name().is_some_and(str::is_empty) {
                return false;
            }
        }

        true
    }
}

// ============================================================================
// Rerooting (pub)
// ============================================================================
impl Tree {
    /// Roots this tree on the edge above `edge` by inserting a new root vertex
    /// subdividing that edge.
    ///
    /// The path from the subdivided edge up to the former root is reoriented
    /// and the former root becomes an internal vertex. Branch lengths move
    /// with their edges; the length of the subdivided edge is split in half.
    ///
    /// Intended for unrooted trees: on a rooted tree the former root would be
    /// left with a single child.
    ///
    /// # Arguments
    /// * `edge` - Index of the vertex below the edge to root on
    ///
    /// # Returns
    /// The index of the new root vertex.
    ///
    /// # Panics
    /// Panics if `edge` is the root (which has no edge above it) or out of bounds.
    pub fn root_on_edge(&mut self, edge: VertexIndex) -> VertexIndex {
        let below = edge;
        let above = self[below]
            .parent()
            .unwrap_or_else(|| panic!("Vertex {below} has no edge towards a parent"));

        // Path from `above` up to the former root
        let mut path = vec![above];
        let mut current = above;
        while let Some(parent) = self[current].parent() {
            path.push(parent);
            current = parent;
        }
        let old_lengths: Vec<Option<BranchLength>> =
            path.iter().map(|&i| self[i].branch_length()).collect();
        let split_length = self[below].branch_length().map(|l| l.half());

        let new_root = self.vertices.len();
        for (i, &index) in path.iter().enumerate() {
            let (new_parent, removed, branch_length) = if i == 0 {
                (new_root, below, split_length)
            } else {
                (path[i - 1], path[i - 1], old_lengths[i - 1])
            };
            let children: Vec<VertexIndex> = self[index]
                .children()
                .iter()
                .copied()
                .filter(|&c| c != removed)
                .chain(path.get(i + 1).copied())
                .collect();

            let mut vertex = Vertex::new_internal(index, children, branch_length);
            vertex.set_parent(new_parent);
            self.vertices[index] = vertex;
        }

        self[below].set_parent(new_root);
        self[below].set_branch_length(split_length);
        self.vertices
            .push(Vertex::new_root(new_root, vec![below, above]));
        self.root_index = new_root;

        new_root
    }
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for Tree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children before visiting the vertex itself.
    /// This is useful for aggregating data from leaves upward.
    ///
    /// # Example
    /// ```
    /// use taxassign::model::Tree;
    ///
    /// let mut tree = Tree::new(2);
    /// let a = tree.add_leaf("A", None);
    /// let b = tree.add_leaf("B", None);
    /// let root = tree.add_root(&[a, b]);
    ///
    /// let indices: Vec<_> = tree.post_order_iter().map(|v| v.index()).collect();
    /// assert_eq!(indices, vec![a, b, root]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Pre-order traversal visits each vertex before visiting its children.
    ///
    /// # Example
    /// ```
    /// use taxassign::model::Tree;
    ///
    /// let mut tree = Tree::new(2);
    /// let a = tree.add_leaf("A", None);
    /// let b = tree.add_leaf("B", None);
    /// let root = tree.add_root(&[a, b]);
    ///
    /// let indices: Vec<_> = tree.pre_order_iter().map(|v| v.index()).collect();
    /// assert_eq!(indices, vec![root, a, b]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order as seen from `start`,
    /// ignoring the root and treating every edge as undirected.
    ///
    /// Each item pairs a vertex with the neighbour it was reached from
    /// (`None` for `start`). That neighbour is always visited earlier,
    /// so it acts as the parent when the tree is hung up at `start`.
    ///
    /// # Panics
    /// Panics if `start` is out of bounds.
    pub fn pre_order_from(&self, start: VertexIndex) -> PreOrderFromIter<'_> {
        PreOrderFromIter::new(self, start)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                // Either we've already processed children, or this is a leaf
                return Some(vertex);
            }

            // Mark this vertex as "children will be visited"
            self.stack.push((index, true));

            // Push children in reverse, so the first child is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];

        self.stack.extend(vertex.children().iter().rev());

        Some(vertex)
    }
}

/// Iterator for pre-order traversal starting at an arbitrary vertex.
///
/// Neighbours are expanded parent first, then children in order,
/// skipping the neighbour a vertex was reached from.
pub struct PreOrderFromIter<'a> {
    tree: &'a Tree,
    stack: Vec<(VertexIndex, Option<VertexIndex>)>, // (index, reached_from)
}

impl<'a> PreOrderFromIter<'a> {
    fn new(tree: &'a Tree, start: VertexIndex) -> Self {
        assert!(start < tree.num_vertices(), "Start vertex {start} out of bounds");
        PreOrderFromIter {
            tree,
            stack: vec![(start, None)],
        }
    }
}

impl<'a> Iterator for PreOrderFromIter<'a> {
    type Item = (&'a Vertex, Option<VertexIndex>);

    fn next(&mut self) -> Option<Self::Item> {
        let (index, reached_from) = self.stack.pop()?;
        let vertex = &self.tree[index];

        self.stack.extend(
            vertex
                .neighbors()
                .rev()
                .filter(|&n| Some(n) != reached_from)
                .map(|n| (n, Some(index))),
        );

        Some((vertex, reached_from))
    }
}
