//! Taxonomic paths and their consensus.

use std::fmt;
use std::str::FromStr;

/// Rank token marking a leaf that has not been classified yet.
pub const QUERY: &str = "query";

/// Rank token marking a vertex whose children share no taxonomic rank.
pub const UNDETERMINED: &str = "N/A";

/// Separator between ranks in the text form of a [Taxopath].
pub const RANK_SEPARATOR: char = ';';

// =#========================================================================#=
// TAXOPATH
// =#========================================================================#=
/// Ordered sequence of taxonomic rank names, most general first,
/// e.g. `Bacteria;Firmicutes;Bacilli`.
///
/// A taxopath is never empty. Two reserved single-rank values exist:
/// [`Taxopath::query`] for unclassified leaves and
/// [`Taxopath::undetermined`] for vertices without consensus.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Taxopath(Vec<String>);

impl Taxopath {
    /// Creates a taxopath from its ranks.
    ///
    /// # Panics
    /// Panics if `ranks` is empty.
    pub fn new<I, S>(ranks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ranks: Vec<String> = ranks.into_iter().map(Into::into).collect();
        assert!(!ranks.is_empty(), "Taxopath must have at least one rank");
        Taxopath(ranks)
    }

    /// Returns the `QUERY` sentinel.
    pub fn query() -> Self {
        Taxopath(vec![QUERY.to_string()])
    }

    /// Returns the `UNDETERMINED` sentinel.
    pub fn undetermined() -> Self {
        Taxopath(vec![UNDETERMINED.to_string()])
    }

    /// Returns `true` if this is the `QUERY` sentinel.
    pub fn is_query(&self) -> bool {
        self.0.len() == 1 && self.0[0] == QUERY
    }

    /// Returns `true` if this is the `UNDETERMINED` sentinel.
    pub fn is_undetermined(&self) -> bool {
        self.0.len() == 1 && self.0[0] == UNDETERMINED
    }

    /// Returns the ranks, most general first.
    pub fn ranks(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of ranks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no ranks, which never holds for a constructed taxopath.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the taxonomic consensus of two paths.
    ///
    /// - `QUERY` is neutral: intersecting with it returns the other path
    ///   unchanged, so unlabelled subtrees do not dilute a sibling's label.
    /// - Otherwise the longest common prefix is returned.
    /// - Without common prefix, the result is `UNDETERMINED`.
    ///
    /// # Example
    /// ```
    /// use taxassign::taxonomy::Taxopath;
    ///
    /// let a = Taxopath::new(["Bacteria", "Firmicutes"]);
    /// let b = Taxopath::new(["Bacteria", "Proteobacteria"]);
    /// assert_eq!(a.intersect(&b), Taxopath::new(["Bacteria"]));
    /// assert_eq!(a.intersect(&Taxopath::query()), a);
    /// ```
    pub fn intersect(&self, other: &Taxopath) -> Taxopath {
        if self.is_query() {
            return other.clone();
        }
        if other.is_query() {
            return self.clone();
        }

        let common: Vec<String> = self
            .0
            .iter()
            .zip(&other.0)
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.clone())
            .collect();

        if common.is_empty() {
            Taxopath::undetermined()
        } else {
            Taxopath(common)
        }
    }
}

impl fmt::Display for Taxopath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut ranks = self.0.iter();
        if let Some(first) = ranks.next() {
            write!(f, "{first}")?;
        }
        for rank in ranks {
            write!(f, "{RANK_SEPARATOR}{rank}")?;
        }
        Ok(())
    }
}

// =#========================================================================#=
// PARSING
// =#========================================================================#=
/// Error when reading a [Taxopath] from its text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxopathError {
    /// Nothing but whitespace and separators.
    #[error("empty taxopath")]
    Empty,
    /// First rank is missing, so there is no rank to fill gaps from.
    #[error("taxopath starts with an empty rank")]
    EmptyFirstRank,
}

impl FromStr for Taxopath {
    type Err = TaxopathError;

    /// Reads `rank;rank;...`.
    ///
    /// Whitespace around ranks and one trailing separator are ignored.
    /// An empty inner rank repeats the rank before it, so `A;;C` reads
    /// as `A;A;C`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_suffix(RANK_SEPARATOR).unwrap_or(trimmed);
        if trimmed.trim().is_empty() {
            return Err(TaxopathError::Empty);
        }

        let mut ranks: Vec<String> = Vec::new();
        for rank in trimmed.split(RANK_SEPARATOR).map(str::trim) {
            if !rank.is_empty() {
                ranks.push(rank.to_string());
                continue;
            }
            match ranks.last() {
                Some(previous) => ranks.push(previous.clone()),
                None => return Err(TaxopathError::EmptyFirstRank),
            }
        }

        Ok(Taxopath(ranks))
    }
}
