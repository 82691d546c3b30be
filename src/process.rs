//! Parallel dispatch of independent reconstruction units.
//!
//! Whole-genome work factors naturally into independent units, one per contig
//! or per window. [`apply`] fans a closure out across those units on the
//! global `rayon` pool; each invocation builds its own inputs (readers cannot
//! be shared across units), and a failing unit never aborts its siblings —
//! every unit reports back with its own [`Result`].

use rayon::prelude::*;
use tracing::debug;

/// One independent unit of work: a contig interval.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Unit {
    /// The contig name.
    pub contig: String,

    /// The inclusive, 0-based start of the interval.
    pub start: usize,

    /// The exclusive stop of the interval, or the contig end.
    pub stop: Option<usize>,
}

impl Unit {
    /// Creates a [`Unit`] covering an interval of a contig.
    pub fn new(contig: impl Into<String>, start: usize, stop: Option<usize>) -> Self {
        Self {
            contig: contig.into(),
            start,
            stop,
        }
    }

    /// Creates a [`Unit`] covering a whole contig.
    pub fn contig(contig: impl Into<String>) -> Self {
        Self::new(contig, 0, None)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.stop {
            Some(stop) => write!(f, "{}:{}-{}", self.contig, self.start, stop),
            None => write!(f, "{}:{}-", self.contig, self.start),
        }
    }
}

/// Builds one whole-contig [`Unit`] per contig name, sorted by name.
pub fn per_contig<I, S>(contigs: I) -> Vec<Unit>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut units = contigs.into_iter().map(Unit::contig).collect::<Vec<_>>();
    units.sort();
    units
}

/// Applies an operation to every [`Unit`] in parallel.
///
/// Results come back paired with their unit, in the input order.
///
/// # Examples
///
/// ```
/// use varaln::process;
/// use varaln::process::Unit;
///
/// let units = process::per_contig(["seq0", "seq1"]);
///
/// let results = process::apply(units, |unit| {
///     Ok::<_, std::convert::Infallible>(unit.contig.len())
/// });
///
/// assert_eq!(results.len(), 2);
/// assert!(results.iter().all(|(_, result)| result.is_ok()));
/// ```
pub fn apply<T, E, F>(units: Vec<Unit>, op: F) -> Vec<(Unit, Result<T, E>)>
where
    T: Send,
    E: Send,
    F: Fn(&Unit) -> Result<T, E> + Sync,
{
    units
        .into_par_iter()
        .map(|unit| {
            debug!(unit = %unit, "dispatching unit");
            let result = op(&unit);
            (unit, result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_contig_is_sorted() {
        let units = per_contig(["seq1", "seq0"]);

        assert_eq!(units[0], Unit::contig("seq0"));
        assert_eq!(units[1], Unit::contig("seq1"));
    }

    #[test]
    fn test_failures_do_not_abort_siblings() {
        let units = per_contig(["seq0", "seq1", "seq2"]);

        let results = apply(units, |unit| match unit.contig.as_str() {
            "seq1" => Err(String::from("broken")),
            contig => Ok(contig.to_string()),
        });

        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_ok());
        assert_eq!(results[1].1, Err(String::from("broken")));
        assert!(results[2].1.is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(Unit::new("seq0", 0, Some(100)).to_string(), "seq0:0-100");
        assert_eq!(Unit::contig("seq0").to_string(), "seq0:0-");
    }
}
