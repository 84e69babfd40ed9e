//! Data model for phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes. Each vertex is either a `Root`, `Internal`, or `Leaf`,
//! referenced by [VertexIndex]. An edge is referenced by the index of the
//! vertex below it.
//!
//! Rooted trees have a root with two children; unrooted trees are stored
//! with a root of three children, as Newick readers produce them.
//! [`Tree::root_on_edge`] turns the latter into the former.
//!
//! # Building trees
//! Trees can be assembled directly via `Tree::add_*`, or by an external
//! reader through the [TreeBuilder] trait ([TaxTreeBuilder] builds a [Tree]).
//!
//! # Leaf names
//! [LeafNameMap] resolves taxon names to leaf indices.

pub mod leaf_name_map;
pub mod tree;
pub mod tree_builder;
pub mod vertex;

pub use leaf_name_map::LeafNameMap;
pub use tree::{PostOrderIter, PreOrderFromIter, PreOrderIter, Tree, VertexIndex};
pub use tree_builder::{TaxTreeBuilder, TreeBuilder};
pub use vertex::{BranchLength, Vertex};
