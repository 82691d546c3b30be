//! Ploidy resolution.
//!
//! The number of haplotypes each sample carries is read off the shape of the
//! first site a variant stream emits: a sample called with two alleles is
//! diploid, one allele haploid, and so on. The value is fixed for an entire
//! reconstruction pass; a stream whose call shapes drift between sites is a
//! malformed input that this crate does not re-validate per site.

use std::collections::BTreeMap;

use crate::site::Site;

/// An error related to resolving [`Ploidies`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The variant stream contained no sites, so there was nothing to infer
    /// ploidy from.
    EmptyVariantStream,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyVariantStream => write!(
                f,
                "cannot infer ploidy: the variant stream contains no sites"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// The haplotype count for each sample.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Ploidies(BTreeMap<String, usize>);

impl Ploidies {
    /// Creates an empty set of [`Ploidies`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves [`Ploidies`] from a single [`Site`].
    ///
    /// # Examples
    ///
    /// ```
    /// use varaln::reconstruct::Ploidies;
    /// use varaln::site::Site;
    ///
    /// let site = Site::builder()
    ///     .contig("seq0")
    ///     .position(1)
    ///     .reference_allele("A")
    ///     .call("sample0", [Some("T"), None])
    ///     .try_build()?;
    ///
    /// let ploidies = Ploidies::from_site(&site);
    /// assert_eq!(ploidies.get("sample0"), Some(2));
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_site(site: &Site) -> Self {
        Self(
            site.calls()
                .iter()
                .map(|(sample, alleles)| (sample.clone(), alleles.len()))
                .collect(),
        )
    }

    /// Resolves [`Ploidies`] from the first site of a stream.
    ///
    /// Fails with [`Error::EmptyVariantStream`] when the stream yields no
    /// sites at all.
    pub fn try_from_sites<I>(sites: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Site>,
    {
        sites
            .into_iter()
            .next()
            .map(|site| Self::from_site(&site))
            .ok_or(Error::EmptyVariantStream)
    }

    /// Sets the haplotype count for a sample.
    pub fn insert(&mut self, sample: impl Into<String>, ploidy: usize) {
        self.0.insert(sample.into(), ploidy);
    }

    /// Gets the haplotype count for a sample.
    pub fn get(&self, sample: &str) -> Option<usize> {
        self.0.get(sample).copied()
    }

    /// Returns whether a sample is present.
    pub fn contains(&self, sample: &str) -> bool {
        self.0.contains_key(sample)
    }

    /// Iterates over the samples and their haplotype counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(sample, &ploidy)| (sample.as_str(), ploidy))
    }

    /// Gets the number of samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether no samples are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, usize)> for Ploidies {
    fn from_iter<T: IntoIterator<Item = (String, usize)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
