//! Auxiliary statistics over variant streams.
//!
//! These consume a stream of [`Site`](crate::site::Site)s directly and never
//! touch the reconstruction passes. They share one convention: an absent call
//! stands in for the reference allele, so every haplotype always contributes
//! exactly one allele to a site's tally.

use nonempty::NonEmpty;

use crate::site::Allele;
use crate::site::Site;

pub mod divergence;
pub mod heterozygosity;
pub mod maf;

pub use divergence::pairwise_divergence;
pub use divergence::reference_divergence;
pub use heterozygosity::windowed_zygosity;
pub use maf::minor_allele_spectrum;

/// An error related to computing a statistic.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A sample carries the name reserved for the synthetic reference row.
    NamingConflict(String),

    /// A haplotype resolved to an allele with no symbols.
    Category {
        /// The sample the allele belongs to.
        sample: String,

        /// The 1-based position of the offending site.
        position: u64,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::NamingConflict(name) => write!(
                f,
                "cannot add the reference row: a sample is already named {name}"
            ),
            Error::Category { sample, position } => write!(
                f,
                "empty allele for sample {sample} at position {position}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// Resolves one sample's haplotype alleles, substituting the site's reference
/// allele for absent calls.
pub(crate) fn resolve(alleles: &NonEmpty<Option<Allele>>, reference: &[u8]) -> Vec<Allele> {
    alleles
        .iter()
        .map(|allele| {
            allele
                .clone()
                .unwrap_or_else(|| reference.to_vec())
        })
        .collect()
}

/// Guards against a sample whose resolved alleles include an empty one.
pub(crate) fn check_resolved(
    resolved: &[Allele],
    sample: &str,
    site: &Site,
) -> Result<(), Error> {
    match resolved.iter().any(|allele| allele.is_empty()) {
        true => Err(Error::Category {
            sample: sample.to_string(),
            position: site.position(),
        }),
        false => Ok(()),
    }
}
