//! Error types of the taxonomic assignment.

use crate::model::VertexIndex;

/// Errors that abort a taxonomic assignment run.
///
/// There is no partial success: a caller either receives a completely
/// resolved label store or one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxassignError {
    /// A taxon record does not consist of a leaf name and a parsable taxopath.
    #[error("malformed taxon record {record}: {reason}")]
    MalformedInput {
        /// 1-based number of the offending record
        record: usize,
        /// What is wrong with it
        reason: String,
    },

    /// A taxon record or outgroup entry names a leaf absent from the tree.
    #[error("could not find leaf with name: {0}")]
    UnknownLeafName(String),

    /// Every leaf is a query, so there is nothing to propagate from.
    #[error("none of the leaves has a taxonomic label")]
    NoAnchorLabel,

    /// The outgroup list is empty.
    #[error("outgroup does not contain any taxa")]
    EmptyOutgroup,

    /// No edge separates exactly the outgroup from the other leaves.
    #[error("rooting could not be determined: outgroup of {size} leaves is not monophyletic")]
    NonMonophyleticOutgroup {
        /// Number of distinct outgroup leaves
        size: usize,
    },

    /// The tree is not fully constructed or its parent and child links
    /// disagree, see [`Tree::is_valid`](crate::model::Tree::is_valid).
    #[error("tree is not valid: root unset, vertex detached or links inconsistent")]
    InvalidTree,

    /// A vertex is still unlabelled or `QUERY` after propagation, as it cannot
    /// be reached from the root.
    #[error("vertex {vertex} could not be resolved")]
    UnresolvedVertex {
        /// Index of the first unresolved vertex
        vertex: VertexIndex,
    },

    /// Rerooting was requested on a tree that is already rooted.
    #[error("trying to root an already rooted tree")]
    AlreadyRooted,

    /// A vertex does not have the number of children the propagation
    /// requires (two; three for the root of an unrooted tree).
    #[error("vertex {vertex} has {num_children} children, tree is not bifurcating")]
    StructuralViolation {
        /// Index of the offending vertex
        vertex: VertexIndex,
        /// Number of children it has
        num_children: usize,
    },
}
