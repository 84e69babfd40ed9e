//! Taxonomic labels: paths, partial leaf labelings and per-vertex storage.
//!
//! - [Taxopath] - rank sequence with the consensus operator
//!   [`intersect`](Taxopath::intersect)
//! - [PartialLabeling] - taxopaths known for some leaves, by leaf name
//! - [LabelStore] - one taxopath slot per vertex, filled by the
//!   [propagation](crate::propagation) passes

pub mod label_store;
pub mod labeling;
pub mod taxopath;

pub use label_store::LabelStore;
pub use labeling::PartialLabeling;
pub use taxopath::{QUERY, Taxopath, TaxopathError, UNDETERMINED};
