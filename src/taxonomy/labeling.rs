//! Partial taxonomic labeling of the leaves of a tree.

use crate::error::TaxassignError;
use crate::taxonomy::taxopath::Taxopath;

/// Number of fields of a taxon record: leaf name and taxopath.
const RECORD_FIELDS: usize = 2;

// =#========================================================================#=
// PARTIAL LABELING
// =#========================================================================#=
/// Known taxopaths of some leaves, keyed by leaf name.
///
/// Records are kept in insertion order; the label store resolves them in
/// this order, so a later record for the same name overwrites an earlier one.
/// Leaves without a record become queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialLabeling {
    records: Vec<(String, Taxopath)>,
}

impl PartialLabeling {
    /// Creates an empty labeling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a labeling from records that were already split into fields,
    /// e.g. the tab-separated columns of a taxon file.
    ///
    /// # Arguments
    /// * `records` - Each record must hold exactly a leaf name and a taxopath
    ///   in text form (`Bacteria;Firmicutes`)
    ///
    /// # Returns
    /// * `Ok(PartialLabeling)` - Labeling in record order
    /// * `Err(TaxassignError::MalformedInput)` - If a record has the wrong
    ///   number of fields or an unreadable taxopath
    ///
    /// # Example
    /// ```
    /// use taxassign::taxonomy::PartialLabeling;
    ///
    /// let labeling = PartialLabeling::from_records([
    ///     ["A", "Bacteria;Firmicutes"],
    ///     ["B", "Bacteria;Proteobacteria"],
    /// ])?;
    /// assert_eq!(labeling.len(), 2);
    /// # Ok::<(), taxassign::TaxassignError>(())
    /// ```
    pub fn from_records<I, R, S>(records: I) -> Result<Self, TaxassignError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut labeling = PartialLabeling::new();
        for (i, record) in records.into_iter().enumerate() {
            let fields = record.as_ref();
            if fields.len() != RECORD_FIELDS {
                return Err(TaxassignError::MalformedInput {
                    record: i + 1,
                    reason: format!(
                        "expected {RECORD_FIELDS} fields, found {}",
                        fields.len()
                    ),
                });
            }

            let taxopath = fields[1].as_ref().parse::<Taxopath>().map_err(|e| {
                TaxassignError::MalformedInput {
                    record: i + 1,
                    reason: e.to_string(),
                }
            })?;
            labeling.insert(fields[0].as_ref(), taxopath);
        }
        Ok(labeling)
    }

    /// Adds a record.
    pub fn insert<S: Into<String>>(&mut self, name: S, taxopath: Taxopath) {
        self.records.push((name.into(), taxopath));
    }

    /// Returns the taxopath recorded last for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Taxopath> {
        self.records
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, path)| path)
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Taxopath)> {
        self.records.iter().map(|(name, path)| (name.as_str(), path))
    }
}

impl<S: Into<String>> FromIterator<(S, Taxopath)> for PartialLabeling {
    fn from_iter<T: IntoIterator<Item = (S, Taxopath)>>(iter: T) -> Self {
        PartialLabeling {
            records: iter
                .into_iter()
                .map(|(name, path)| (name.into(), path))
                .collect(),
        }
    }
}
