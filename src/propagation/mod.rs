//! Label propagation over tree topology.
//!
//! A run consists of:
//! 1. optional outgroup rooting ([root_by_outgroup], using [find_split_edge]),
//! 2. the bottom-up consensus pass ([propagate_up]),
//! 3. the top-down inheritance pass onto queries ([propagate_down]),
//! 4. extraction of the query results ([extract_assignments]).
//!
//! [TaxAssigner] configures and runs all of them.

pub mod assigner;
pub mod postorder;
pub mod preorder;
pub mod rooting;

pub use assigner::{Assignment, Resolution, TaxAssigner, Validation, extract_assignments};
pub use postorder::{propagate_up, validate_bifurcation};
pub use preorder::propagate_down;
pub use rooting::{find_split_edge, root_by_outgroup};
