//! Configurable assignment run: optional rooting, both propagation passes,
//! and extraction of the query results.

use crate::error::TaxassignError;
use crate::model::Tree;
use crate::propagation::postorder::{propagate_up, validate_bifurcation};
use crate::propagation::preorder::propagate_down;
use crate::propagation::rooting::root_by_outgroup;
use crate::taxonomy::{LabelStore, PartialLabeling, Taxopath};
use std::fmt;
use tracing::{debug, instrument};

// =#========================================================================#=
// VALIDATION
// =#========================================================================€=
/// When to check that the tree is bifurcating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Check all vertices before the run touches the tree.
    Eager,
    /// Report the first offending vertex met by the consensus pass.
    /// This is the default.
    #[default]
    Lazy,
}

// =#========================================================================#=
// ASSIGNMENT
// =#========================================================================€=
/// Taxonomic assignment of one query leaf.
///
/// Displays as `name<TAB>taxopath`, one line of a taxon assignment table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Name of the query leaf
    pub name: String,
    /// Taxopath inherited by the leaf
    pub taxopath: Taxopath,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.name, self.taxopath)
    }
}

// =#========================================================================#=
// RESOLUTION
// =#========================================================================€=
/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct Resolution {
    labels: LabelStore,
    assignments: Vec<Assignment>,
}

impl Resolution {
    /// Returns the assignments of the query leaves, in leaf order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Returns the labels of all vertices, inner vertices included.
    pub fn labels(&self) -> &LabelStore {
        &self.labels
    }

    /// Consumes the resolution and returns the assignments.
    pub fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }
}

/// Collects `(name, taxopath)` for every leaf that was a query at
/// initialization, in leaf order.
///
/// # Panics
/// Panics if a query leaf is unset in `store`.
pub fn extract_assignments(tree: &Tree, store: &LabelStore) -> Vec<Assignment> {
    store
        .query_leaves()
        .iter()
        .map(|&leaf| Assignment {
            name: tree[leaf].name().unwrap_or_default().to_string(),
            taxopath: store.label(leaf).clone(),
        })
        .collect()
}

// =#========================================================================#=
// TAX ASSIGNER
// =#========================================================================$=
/// Configuration of an assignment run.
///
/// # Configuration Options
/// * [`with_outgroup()`](Self::with_outgroup) - root the (unrooted) tree on
///   the edge splitting off these leaves before propagating
/// * [`with_validation()`](Self::with_validation) - check bifurcation
///   eagerly or lazily (default)
///
/// # Example
/// ```
/// use taxassign::model::Tree;
/// use taxassign::propagation::TaxAssigner;
/// use taxassign::taxonomy::{PartialLabeling, Taxopath};
///
/// // (A,B,(C,D)) unrooted
/// let mut tree = Tree::new(4);
/// let a = tree.add_leaf("A", None);
/// let b = tree.add_leaf("B", None);
/// let c = tree.add_leaf("C", None);
/// let d = tree.add_leaf("D", None);
/// let cd = tree.add_internal_vertex(&[c, d], None);
/// tree.add_root(&[a, b, cd]);
///
/// let mut labeling = PartialLabeling::new();
/// labeling.insert("A", Taxopath::new(["Archaea"]));
/// labeling.insert("C", Taxopath::new(["Bacteria", "Firmicutes"]));
///
/// let resolution = TaxAssigner::new()
///     .with_outgroup(["A"])
///     .assign(&mut tree, &labeling)?;
///
/// let names: Vec<_> = resolution.assignments().iter().map(|a| a.name.as_str()).collect();
/// assert_eq!(names, ["B", "D"]);
/// # Ok::<(), taxassign::TaxassignError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaxAssigner {
    outgroup: Option<Vec<String>>,
    validation: Validation,
}

impl TaxAssigner {
    /// Creates an assigner without rooting and with lazy validation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Roots the tree by this outgroup before propagating.
    pub fn with_outgroup<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outgroup = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets when the tree is checked for being bifurcating.
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Returns the configured outgroup, if any.
    pub fn outgroup(&self) -> Option<&[String]> {
        self.outgroup.as_deref()
    }

    /// Returns the configured validation mode.
    pub fn validation(&self) -> Validation {
        self.validation
    }

    /// Runs the assignment.
    ///
    /// Steps:
    /// 0. Check that `tree` [is valid](Tree::is_valid)
    /// 1. With [Validation::Eager], check bifurcation
    /// 2. With an outgroup, root `tree` on it
    /// 3. Initialize labels from `labeling`, queries elsewhere
    /// 4. Consensus labels bottom-up
    /// 5. Inherit labels top-down onto queries
    /// 6. Collect the query assignments
    ///
    /// # Arguments
    /// * `tree` - Tree to classify; modified only by rooting
    /// * `labeling` - Known taxopaths of some leaves
    ///
    /// # Returns
    /// * `Ok(Resolution)` - all labels and the query assignments
    /// * `Err(TaxassignError)` - the first failure of any step; nothing partial
    #[instrument(skip_all, fields(vertices = tree.num_vertices(), records = labeling.len()))]
    pub fn assign(
        &self,
        tree: &mut Tree,
        labeling: &PartialLabeling,
    ) -> Result<Resolution, TaxassignError> {
        if !tree.is_valid() {
            return Err(TaxassignError::InvalidTree);
        }
        if self.validation == Validation::Eager {
            validate_bifurcation(tree)?;
        }
        if let Some(outgroup) = &self.outgroup {
            root_by_outgroup(tree, outgroup.as_slice())?;
        }

        let mut labels = LabelStore::initialize(tree, labeling)?;
        propagate_up(tree, &mut labels)?;
        propagate_down(tree, &mut labels)?;
        if let Some(vertex) = labels.first_unresolved() {
            return Err(TaxassignError::UnresolvedVertex { vertex });
        }

        let assignments = extract_assignments(tree, &labels);
        debug!(assignments = assignments.len(), "assigned query leaves");

        Ok(Resolution {
            labels,
            assignments,
        })
    }
}
