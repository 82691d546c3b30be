//! Variant sites.
//!
//! A [`Site`] is one record from a variant stream: a contig, a 1-based
//! position, the reference allele declared by the stream, and the per-sample
//! haplotype calls observed at that position.

use std::collections::BTreeMap;

use nonempty::NonEmpty;

pub mod builder;
pub mod iupac;
pub mod modifier;

pub use builder::Builder;

/// An allele: a short sequence of nucleotide symbols.
pub type Allele = Vec<u8>;

/// The per-sample haplotype calls at a site.
///
/// Each sample maps to an ordered list of haplotype alleles. The list is
/// non-empty because every sample carries at least one haplotype; an absent
/// call (no genotype at this site) is represented as [`None`].
pub type Calls = BTreeMap<String, NonEmpty<Option<Allele>>>;

/// An error related to a [`Site`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The declared reference allele was empty.
    EmptyReferenceAllele,

    /// The position was zero, which is not a valid 1-based position.
    ZeroPosition,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyReferenceAllele => {
                write!(f, "the reference allele must contain at least one symbol")
            }
            Error::ZeroPosition => write!(f, "positions are 1-based and cannot be zero"),
        }
    }
}

impl std::error::Error for Error {}

/// A variant site.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Site {
    /// The contig upon which the site falls.
    contig: String,

    /// The 1-based position of the site on the contig.
    position: u64,

    /// The reference allele declared by the variant stream.
    reference_allele: Allele,

    /// The per-sample haplotype calls.
    calls: Calls,
}

impl Site {
    /// Attempts to create a new [`Site`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeMap;
    ///
    /// use nonempty::nonempty;
    /// use varaln::site::Site;
    ///
    /// let calls = BTreeMap::from([(
    ///     String::from("sample0"),
    ///     nonempty![Some(b"T".to_vec()), None],
    /// )]);
    ///
    /// let site = Site::try_new("seq0", 3, "G", calls)?;
    /// assert_eq!(site.position(), 3);
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        contig: impl Into<String>,
        position: u64,
        reference_allele: impl Into<Allele>,
        calls: Calls,
    ) -> Result<Self, Error> {
        let reference_allele = reference_allele.into();

        if reference_allele.is_empty() {
            return Err(Error::EmptyReferenceAllele);
        }

        if position == 0 {
            return Err(Error::ZeroPosition);
        }

        Ok(Self {
            contig: contig.into(),
            position,
            reference_allele,
            calls,
        })
    }

    /// Gets a [`Builder`] for a [`Site`].
    ///
    /// # Examples
    ///
    /// ```
    /// use varaln::site::Site;
    ///
    /// let site = Site::builder()
    ///     .contig("seq0")
    ///     .position(3)
    ///     .reference_allele("G")
    ///     .call("sample0", [Some("T"), Some("G")])
    ///     .try_build()?;
    ///
    /// assert_eq!(site.contig(), "seq0");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Gets the contig of the [`Site`].
    pub fn contig(&self) -> &str {
        &self.contig
    }

    /// Gets the 1-based position of the [`Site`].
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Gets the reference allele declared for the [`Site`].
    pub fn reference_allele(&self) -> &[u8] {
        &self.reference_allele
    }

    /// Gets the per-sample haplotype calls of the [`Site`].
    pub fn calls(&self) -> &Calls {
        &self.calls
    }

    /// Gets the haplotype calls for a single sample, if that sample was called
    /// at this [`Site`].
    pub fn haplotypes(&self, sample: &str) -> Option<&NonEmpty<Option<Allele>>> {
        self.calls.get(sample)
    }

    /// The 0-based span of the reference allele on the contig, as a half-open
    /// `[start, stop)` pair.
    ///
    /// This is the stretch of reference symbols the site claims to describe,
    /// which is longer than one symbol for deletions.
    pub fn reference_span(&self) -> (u64, u64) {
        let start = self.position - 1;
        (start, start + self.reference_allele.len() as u64)
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} {}",
            self.contig,
            self.position,
            String::from_utf8_lossy(&self.reference_allele)
        )
    }
}
