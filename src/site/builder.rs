//! A builder for a [`Site`].

use nonempty::NonEmpty;

use crate::site;
use crate::site::Allele;
use crate::site::Calls;
use crate::site::Site;

/// An error that occurs when a required field was never provided to the
/// [`Builder`].
#[derive(Debug, Eq, PartialEq)]
pub enum MissingError {
    /// No contig was provided to the [`Builder`].
    Contig,

    /// No position was provided to the [`Builder`].
    Position,

    /// No reference allele was provided to the [`Builder`].
    ReferenceAllele,
}

impl std::fmt::Display for MissingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingError::Contig => write!(f, "contig"),
            MissingError::Position => write!(f, "position"),
            MissingError::ReferenceAllele => write!(f, "reference allele"),
        }
    }
}

impl std::error::Error for MissingError {}

/// An error related to a [`Builder`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// An error where a required field was never provided to the [`Builder`].
    Missing(MissingError),

    /// A sample was provided with an empty haplotype allele list.
    EmptyCalls(String),

    /// An error creating the [`Site`] itself.
    Site(site::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Missing(err) => write!(f, "missing required field: {err}"),
            Error::EmptyCalls(sample) => {
                write!(f, "empty haplotype allele list for sample: {sample}")
            }
            Error::Site(err) => write!(f, "site error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A builder for a [`Site`].
#[derive(Debug, Default)]
pub struct Builder {
    /// The contig.
    contig: Option<String>,

    /// The 1-based position.
    position: Option<u64>,

    /// The reference allele.
    reference_allele: Option<Allele>,

    /// The per-sample haplotype calls, collected in insertion order.
    calls: Vec<(String, Vec<Option<Allele>>)>,
}

impl Builder {
    /// Sets the contig for the [`Builder`].
    pub fn contig(mut self, contig: impl Into<String>) -> Self {
        self.contig = Some(contig.into());
        self
    }

    /// Sets the 1-based position for the [`Builder`].
    pub fn position(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the reference allele for the [`Builder`].
    pub fn reference_allele(mut self, allele: impl Into<Allele>) -> Self {
        self.reference_allele = Some(allele.into());
        self
    }

    /// Pushes the haplotype calls for one sample into the [`Builder`].
    ///
    /// An absent call is represented as [`None`].
    ///
    /// # Examples
    ///
    /// ```
    /// use varaln::site::Builder;
    ///
    /// let site = Builder::default()
    ///     .contig("seq0")
    ///     .position(2)
    ///     .reference_allele("CGT")
    ///     .call("sample0", [Some("C"), None])
    ///     .try_build()?;
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn call<S, A, I>(mut self, sample: S, alleles: I) -> Self
    where
        S: Into<String>,
        A: Into<Allele>,
        I: IntoIterator<Item = Option<A>>,
    {
        let alleles = alleles
            .into_iter()
            .map(|allele| allele.map(|a| a.into()))
            .collect();

        self.calls.push((sample.into(), alleles));
        self
    }

    /// Consumes `self` to attempt to build a [`Site`].
    pub fn try_build(self) -> Result<Site> {
        let contig = self.contig.ok_or(Error::Missing(MissingError::Contig))?;
        let position = self.position.ok_or(Error::Missing(MissingError::Position))?;

        let reference_allele = self
            .reference_allele
            .ok_or(Error::Missing(MissingError::ReferenceAllele))?;

        let mut calls = Calls::default();

        for (sample, alleles) in self.calls {
            match NonEmpty::from_vec(alleles) {
                Some(alleles) => {
                    calls.insert(sample, alleles);
                }
                None => return Err(Error::EmptyCalls(sample)),
            }
        }

        Site::try_new(contig, position, reference_allele, calls).map_err(Error::Site)
    }
}
