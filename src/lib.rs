//! Taxassign assigns taxonomic classifications to the unlabelled leaves
//! ("queries") of a phylogenetic tree, given taxopaths for some of its leaves.
//!
//! Core functionality provided:
//! - Tree model: arena-based [Tree] with stack-based traversals and
//!   rerooting; built directly or via the [TreeBuilder](model::TreeBuilder)
//!   trait by an external tree reader.
//! - Taxonomy: [Taxopath] with its consensus operator, [PartialLabeling] of
//!   the known leaves and a per-vertex [LabelStore](taxonomy::LabelStore).
//! - Propagation:
//!   - Bottom-up: each inner vertex gets the longest common prefix of its
//!     children's taxopaths; queries do not take part.
//!   - Top-down: query vertices inherit the taxopath of their closest
//!     labelled ancestor.
//!   - Optional outgroup rooting of an unrooted tree beforehand.
//!
//! Limitations:
//! - Only bifurcating trees (the root of an unrooted tree may have three children)
//! - Reading tree and taxon files is left to the caller
//!
//! # Usage patterns
//! 1. [assign_taxonomy] runs with default settings.
//! 2. Configure a [TaxAssigner](propagation::TaxAssigner) for outgroup rooting
//!    or eager validation.
//!
//! ## Example Default Configuration
//! ```
//! use taxassign::{Taxopath, PartialLabeling, Tree, assign_taxonomy};
//!
//! // ((A,B),C)
//! let mut tree = Tree::new(3);
//! let a = tree.add_leaf("A", None);
//! let b = tree.add_leaf("B", None);
//! let c = tree.add_leaf("C", None);
//! let ab = tree.add_internal_vertex(&[a, b], None);
//! tree.add_root(&[ab, c]);
//!
//! let labeling = PartialLabeling::from_records([["A", "K;P1"], ["B", "K;P2"]])?;
//! let assignments = assign_taxonomy(&mut tree, &labeling)?;
//!
//! assert_eq!(assignments[0].name, "C");
//! assert_eq!(assignments[0].taxopath, Taxopath::new(["K"]));
//! assert_eq!(assignments[0].to_string(), "C\tK");
//! # Ok::<(), taxassign::TaxassignError>(())
//! ```

pub mod error;
pub mod model;
pub mod propagation;
pub mod taxonomy;

pub use crate::error::TaxassignError;
pub use crate::model::Tree;
pub use crate::propagation::{Assignment, TaxAssigner};
pub use crate::taxonomy::{PartialLabeling, Taxopath};

// ============================================================================
// Quick API
// ============================================================================
/// Assigns taxopaths to the query leaves of `tree` using default settings
/// (no rooting, lazy validation).
///
/// See [`TaxAssigner::assign`] for the full documentation.
pub fn assign_taxonomy(
    tree: &mut Tree,
    labeling: &PartialLabeling,
) -> Result<Vec<Assignment>, TaxassignError> {
    TaxAssigner::new()
        .assign(tree, labeling)
        .map(propagation::Resolution::into_assignments)
}
