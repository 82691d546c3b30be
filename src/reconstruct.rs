//! Reconstruction of per-haplotype sequences from a variant stream.
//!
//! A [`Reconstructor`] carries the options for a reconstruction pass and
//! exposes the two passes themselves: [`snps`](Reconstructor::snps), which
//! treats every site as a point substitution, and
//! [`indels`](Reconstructor::indels), which honors allele lengths, padding
//! shorter alleles with gap symbols so that every output row stays the same
//! length.
//!
//! # Examples
//!
//! Point substitutions:
//!
//! ```
//! use varaln::reconstruct::Ploidies;
//! use varaln::reconstruct::Reconstructor;
//! use varaln::reference::Window;
//! use varaln::site::Site;
//!
//! let window = Window::try_new("seq0", 0, Some(8), b"ACGTACGT".to_vec())?;
//!
//! let site = Site::builder()
//!     .contig("seq0")
//!     .position(3)
//!     .reference_allele("G")
//!     .call("sample0", [Some("T"), Some("G")])
//!     .try_build()?;
//!
//! let ploidies = Ploidies::from_site(&site);
//! let alignment = Reconstructor::builder()
//!     .build()
//!     .snps(&window, &ploidies, [site])?;
//!
//! assert_eq!(alignment.get("sample0_1").unwrap().sequence(), b"ACTTACGT");
//! assert_eq!(alignment.get("sample0_2").unwrap().sequence(), b"ACGTACGT");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Insertions and deletions:
//!
//! ```
//! use varaln::reconstruct::Ploidies;
//! use varaln::reconstruct::Reconstructor;
//! use varaln::reference::Window;
//! use varaln::site::Site;
//!
//! let window = Window::try_new("seq0", 0, Some(8), b"ACGTACGT".to_vec())?;
//!
//! let site = Site::builder()
//!     .contig("seq0")
//!     .position(2)
//!     .reference_allele("CGT")
//!     .call("sample0", [Some("C"), None])
//!     .try_build()?;
//!
//! let ploidies = Ploidies::from_site(&site);
//! let alignment = Reconstructor::builder()
//!     .build()
//!     .indels(&window, &ploidies, [site])?;
//!
//! assert_eq!(alignment.get("sample0_1").unwrap().sequence(), b"AC--ACGT");
//! assert_eq!(alignment.get("sample0_2").unwrap().sequence(), b"ACGTACGT");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeSet;

use crate::alignment::Alignment;
use crate::reference::Window;
use crate::site::Site;

pub mod builder;
mod canvas;
mod indel;
pub mod ploidy;
mod snp;

pub use builder::Builder;
pub use canvas::REFERENCE_SAMPLE;
pub use ploidy::Ploidies;

pub(crate) use canvas::CanvasSet;

/// An error related to a reconstruction pass.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A site's declared reference allele disagreed with the reference window.
    ReferenceMismatch {
        /// The contig upon which the site falls.
        contig: String,

        /// The 1-based position of the site.
        position: u64,

        /// The symbols the reference holds at that position.
        expected: String,

        /// The reference allele the variant stream declared.
        observed: String,
    },

    /// A sample carries the name reserved for the reference pseudo-sample.
    NamingConflict(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ReferenceMismatch {
                contig,
                position,
                expected,
                observed,
            } => write!(
                f,
                "reference mismatch on {contig} at position {position}: \
                 the reference holds {expected} but the variant stream declared {observed}"
            ),
            Error::NamingConflict(name) => write!(
                f,
                "cannot add the reference row: a sample is already named {name}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// The options for a reconstruction pass.
#[derive(Debug)]
pub struct Reconstructor {
    /// Whether declared reference alleles are checked against the reference
    /// window.
    pub(crate) check: bool,

    /// Whether a pseudo-sample carrying the unmodified reference is included
    /// in the output.
    pub(crate) include_reference: bool,

    /// Samples whose canvases are dropped from the output.
    pub(crate) withheld: BTreeSet<String>,

    /// The structural variant sentinel symbol.
    pub(crate) sentinel: u8,

    /// Whether the substitution pass resolves the sentinel to the reference
    /// symbol.
    pub(crate) sentinel_to_reference: bool,

    /// The gap symbol used for padding.
    pub(crate) gap: u8,
}

impl Default for Reconstructor {
    fn default() -> Self {
        Builder::default().build()
    }
}

impl Reconstructor {
    /// Gets a [`Builder`] for a [`Reconstructor`].
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Reconstructs per-haplotype sequences treating every site as a point
    /// substitution.
    ///
    /// Only the first symbol of each allele is applied, so every output row
    /// has exactly the window's length. Sites whose declared reference allele
    /// disagrees with the window fail with [`Error::ReferenceMismatch`] unless
    /// the check was disabled.
    pub fn snps<I>(
        &self,
        window: &Window,
        ploidies: &Ploidies,
        sites: I,
    ) -> Result<Alignment, Error>
    where
        I: IntoIterator<Item = Site>,
    {
        let mut canvases = CanvasSet::try_new(window, ploidies, self.include_reference)?;
        snp::infer(self, window, &mut canvases, sites)?;
        Ok(canvases.into_alignment(&window.descriptor(), &self.withheld))
    }

    /// Reconstructs per-haplotype sequences honoring allele lengths.
    ///
    /// Insertions and deletions shift downstream coordinates; the pass tracks
    /// a cumulative offset so later sites land on the right columns, and pads
    /// every allele at a site out to the widest one so all rows keep a common
    /// length.
    pub fn indels<I>(
        &self,
        window: &Window,
        ploidies: &Ploidies,
        sites: I,
    ) -> Result<Alignment, Error>
    where
        I: IntoIterator<Item = Site>,
    {
        let mut canvases = CanvasSet::try_new(window, ploidies, self.include_reference)?;
        indel::infer(self, window, &mut canvases, sites)?;
        Ok(canvases.into_alignment(&window.descriptor(), &self.withheld))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Window {
        Window::try_new("seq0", 0, Some(8), b"ACGTACGT".to_vec()).unwrap()
    }

    fn diploid() -> Ploidies {
        Ploidies::from_iter([(String::from("sample0"), 2)])
    }

    #[test]
    fn test_zero_sites_reproduces_the_reference() -> Result<(), Box<dyn std::error::Error>> {
        let reconstructor = Reconstructor::builder().include_reference().build();

        for alignment in [
            reconstructor.snps(&window(), &diploid(), Vec::new())?,
            reconstructor.indels(&window(), &diploid(), Vec::new())?,
        ] {
            assert_eq!(alignment.len(), 3);
            assert!(alignment
                .records()
                .iter()
                .all(|record| record.sequence() == b"ACGTACGT"));
        }

        Ok(())
    }

    #[test]
    fn test_record_descriptions_carry_the_window_descriptor(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let alignment =
            Reconstructor::default().snps(&window(), &diploid(), Vec::new())?;

        assert!(alignment
            .records()
            .iter()
            .all(|record| record.description() == "seq0 - 0 - 8"));

        Ok(())
    }

    #[test]
    fn test_included_reference_row_is_untouched() -> Result<(), Box<dyn std::error::Error>> {
        let site = Site::builder()
            .contig("seq0")
            .position(3)
            .reference_allele("G")
            .call("sample0", [Some("T"), Some("T")])
            .try_build()?;

        let alignment = Reconstructor::builder()
            .include_reference()
            .build()
            .snps(&window(), &diploid(), [site])?;

        assert_eq!(
            alignment.get("Reference_1").unwrap().sequence(),
            b"ACGTACGT"
        );
        assert_eq!(alignment.get("sample0_1").unwrap().sequence(), b"ACTTACGT");

        Ok(())
    }

    #[test]
    fn test_withheld_sample_still_widens_columns() -> Result<(), Box<dyn std::error::Error>> {
        let site = Site::builder()
            .contig("seq0")
            .position(2)
            .reference_allele("C")
            .call("sample0", [Some("CAA"), Some("C")])
            .call("sample1", [Some("C"), Some("C")])
            .try_build()?;

        let ploidies = Ploidies::from_site(&site);

        let alignment = Reconstructor::builder()
            .withhold("sample0")
            .build()
            .indels(&window(), &ploidies, [site])?;

        assert!(alignment.get("sample0_1").is_none());
        assert_eq!(
            alignment.get("sample1_1").unwrap().sequence(),
            b"AC--GTACGT"
        );

        Ok(())
    }

    #[test]
    fn test_naming_conflict() {
        let ploidies = Ploidies::from_iter([(String::from(REFERENCE_SAMPLE), 2)]);

        let err = Reconstructor::builder()
            .include_reference()
            .build()
            .snps(&window(), &ploidies, Vec::new())
            .unwrap_err();

        assert_eq!(err, Error::NamingConflict(String::from(REFERENCE_SAMPLE)));
    }

    #[test]
    fn test_passes_are_idempotent_per_site_order() -> Result<(), Box<dyn std::error::Error>> {
        let sites = vec![
            Site::builder()
                .contig("seq0")
                .position(2)
                .reference_allele("C")
                .call("sample0", [Some("CAA"), None])
                .try_build()?,
            Site::builder()
                .contig("seq0")
                .position(6)
                .reference_allele("C")
                .call("sample0", [Some("T"), Some("T")])
                .try_build()?,
        ];

        let reconstructor = Reconstructor::default();

        let first = reconstructor.indels(&window(), &diploid(), sites.clone())?;
        let second = reconstructor.indels(&window(), &diploid(), sites)?;

        assert_eq!(first, second);

        Ok(())
    }
}
