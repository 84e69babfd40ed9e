//! Trait for constructing trees from an external source.
//!
//! The [`TreeBuilder`] trait decouples tree readers (e.g. a Newick parser
//! living in another crate) from the concrete tree representation.
//! The reader calls builder methods as it encounters leaves, internal
//! vertices and the root, and the builder assembles the tree.
//!
//! # Built-in implementation
//! * [`TaxTreeBuilder`] - Builds the arena [`Tree`] used by the propagation passes
//!
//! # Builder lifecycle
//! A builder can construct multiple trees sequentially:
//!
//! ```text
//! Empty ──→ init_next() ──→ Building ──→ add_*/set_name ──→ finish_tree() ──→ Empty
//!   ↑                                                                           │
//!   └───────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::BranchLength;

// =#========================================================================#=
// TREE BUILDER (trait)
// =#========================================================================T=
/// Abstraction for constructing trees bottom-up.
///
/// Readers are generic over this trait. The reader drives the lifecycle:
///
/// 1. [`init_next`](Self::init_next) -> prepare for a new tree
/// 2. [`add_leaf`](Self::add_leaf), [`add_internal`](Self::add_internal),
///    [`add_root`](Self::add_root) -> build structure
/// 3. [`set_name`](Self::set_name) -> optionally assign a name
/// 4. [`finish_tree`](Self::finish_tree) -> finalize and return the tree
pub trait TreeBuilder {
    /// The type used to identify vertices during construction.
    ///
    /// Returned by the `add_*` methods, then passed to subsequent calls to
    /// connect parent-child relationships.
    type VertexIdx: Copy;

    /// The tree type produced by this builder.
    type Tree;

    /// Prepares the builder for constructing a new tree.
    ///
    /// # Arguments
    /// * `num_leaves` - Expected number of leaves (hint for allocation)
    fn init_next(&mut self, num_leaves: usize);

    /// Adds a leaf vertex to the tree under construction.
    ///
    /// # Arguments
    /// * `branch_len` - Branch length to parent, if specified
    /// * `name` - Taxon name of the leaf
    fn add_leaf(&mut self, branch_len: Option<f64>, name: &str) -> Self::VertexIdx;

    /// Adds an internal (non-root) vertex.
    ///
    /// # Arguments
    /// * `children` - Indices of the child vertices, returned by earlier `add_*` calls
    /// * `branch_len` - Branch length to parent, if specified
    fn add_internal(
        &mut self,
        children: &[Self::VertexIdx],
        branch_len: Option<f64>,
    ) -> Self::VertexIdx;

    /// Adds the root vertex, completing the tree structure.
    ///
    /// Two children make a rooted tree, three an unrooted one.
    fn add_root(&mut self, children: &[Self::VertexIdx]) -> Self::VertexIdx;

    /// Sets the name of the currently constructed tree.
    fn set_name(&mut self, tree_name: String);

    /// Finalizes the building process and returns the resulting tree,
    /// or `None` if no tree was under construction.
    fn finish_tree(&mut self) -> Option<Self::Tree>;
}

// =#========================================================================#=
// TAX TREE BUILDER
// =#========================================================================#=
/// Builder that constructs [Tree] instances.
///
/// # Example
/// ```
/// use taxassign::model::{TaxTreeBuilder, TreeBuilder};
///
/// let mut builder = TaxTreeBuilder::new();
/// builder.init_next(3);
/// let a = builder.add_leaf(Some(0.1), "A");
/// let b = builder.add_leaf(Some(0.2), "B");
/// let c = builder.add_leaf(None, "C");
/// builder.add_root(&[a, b, c]);
///
/// let tree = builder.finish_tree().unwrap();
/// assert!(!tree.is_rooted());
/// ```
pub struct TaxTreeBuilder {
    current_tree: Option<Tree>,
}

impl TaxTreeBuilder {
    /// Creates a new builder in the empty state.
    pub fn new() -> Self {
        Self { current_tree: None }
    }

    fn tree_mut(&mut self) -> &mut Tree {
        self.current_tree.as_mut().expect("init not called")
    }
}

impl Default for TaxTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder for TaxTreeBuilder {
    type VertexIdx = VertexIndex;
    type Tree = Tree;

    fn init_next(&mut self, num_leaves: usize) {
        self.current_tree = Some(Tree::new(num_leaves.max(1)));
    }

    fn add_leaf(&mut self, branch_len: Option<f64>, name: &str) -> VertexIndex {
        self.tree_mut()
            .add_leaf(name, branch_len.map(BranchLength::new))
    }

    fn add_internal(&mut self, children: &[VertexIndex], branch_len: Option<f64>) -> VertexIndex {
        self.tree_mut()
            .add_internal_vertex(children, branch_len.map(BranchLength::new))
    }

    fn add_root(&mut self, children: &[VertexIndex]) -> VertexIndex {
        self.tree_mut().add_root(children)
    }

    fn set_name(&mut self, tree_name: String) {
        if let Some(tree) = &mut self.current_tree {
            tree.set_name(tree_name);
        }
    }

    fn finish_tree(&mut self) -> Option<Tree> {
        self.current_tree.take()
    }
}
