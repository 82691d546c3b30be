//! The minor allele frequency spectrum.

use std::collections::BTreeMap;

use crate::reconstruct::REFERENCE_SAMPLE;
use crate::site::Allele;
use crate::site::Site;
use crate::stats::resolve;
use crate::stats::Error;

/// The minor allele tally of one site: how many haplotypes carried the rarest
/// allele, out of how many haplotypes total.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct MinorAllele {
    /// The number of haplotypes carrying the rarest allele.
    pub count: u64,

    /// The total number of haplotypes tallied at the site.
    pub total: u64,
}

impl MinorAllele {
    /// The minor allele frequency, `count / total`.
    pub fn frequency(&self) -> f64 {
        self.count as f64 / self.total as f64
    }
}

/// Tallies the minor allele spectrum of a stream: for each observed
/// [`MinorAllele`] shape, the number of sites exhibiting it.
///
/// Every haplotype of every sample contributes its resolved allele; absent
/// calls contribute the reference allele. When `include_reference` is set, a
/// synthetic single-haplotype row named [`REFERENCE_SAMPLE`] carrying the
/// reference allele joins the tally; a real sample with that name is a naming
/// conflict.
///
/// # Examples
///
/// ```
/// use varaln::site::Site;
/// use varaln::stats::maf::MinorAllele;
/// use varaln::stats::minor_allele_spectrum;
///
/// let site = Site::builder()
///     .contig("seq0")
///     .position(3)
///     .reference_allele("G")
///     .call("sample0", [Some("T"), Some("G")])
///     .call("sample1", [Some("G"), Some("G")])
///     .try_build()?;
///
/// let spectrum = minor_allele_spectrum([site], false)?;
///
/// let shape = MinorAllele { count: 1, total: 4 };
/// assert_eq!(spectrum.get(&shape), Some(&1));
/// assert!((shape.frequency() - 0.25).abs() < f64::EPSILON);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn minor_allele_spectrum<I>(
    sites: I,
    include_reference: bool,
) -> Result<BTreeMap<MinorAllele, u64>, Error>
where
    I: IntoIterator<Item = Site>,
{
    let mut spectrum: BTreeMap<MinorAllele, u64> = BTreeMap::new();

    for site in sites {
        if include_reference && site.calls().contains_key(REFERENCE_SAMPLE) {
            return Err(Error::NamingConflict(REFERENCE_SAMPLE.to_string()));
        }

        let mut tallies: BTreeMap<Allele, u64> = BTreeMap::new();
        let mut total = 0u64;

        for alleles in site.calls().values() {
            for allele in resolve(alleles, site.reference_allele()) {
                *tallies.entry(allele).or_default() += 1;
                total += 1;
            }
        }

        if include_reference {
            *tallies
                .entry(site.reference_allele().to_vec())
                .or_default() += 1;
            total += 1;
        }

        let Some(count) = tallies.values().copied().min() else {
            continue;
        };

        *spectrum.entry(MinorAllele { count, total }).or_default() += 1;
    }

    Ok(spectrum)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrum() -> Result<(), Box<dyn std::error::Error>> {
        let sites = vec![
            Site::builder()
                .contig("seq0")
                .position(3)
                .reference_allele("G")
                .call("sample0", [Some("T"), Some("G")])
                .call("sample1", [Some("G"), Some("G")])
                .try_build()?,
            Site::builder()
                .contig("seq0")
                .position(7)
                .reference_allele("A")
                .call("sample0", [Some("C"), Some("C")])
                .call("sample1", [Some("C"), None])
                .try_build()?,
        ];

        let spectrum = minor_allele_spectrum(sites, false)?;

        assert_eq!(spectrum.get(&MinorAllele { count: 1, total: 4 }), Some(&2));

        Ok(())
    }

    #[test]
    fn test_reference_row_shifts_the_tally() -> Result<(), Box<dyn std::error::Error>> {
        let site = Site::builder()
            .contig("seq0")
            .position(3)
            .reference_allele("G")
            .call("sample0", [Some("T"), Some("T")])
            .try_build()?;

        // Without the reference row the site is monomorphic for T; with it,
        // the reference G becomes the minor allele.
        let spectrum = minor_allele_spectrum([site.clone()], false)?;
        assert_eq!(spectrum.get(&MinorAllele { count: 2, total: 2 }), Some(&1));

        let spectrum = minor_allele_spectrum([site], true)?;
        assert_eq!(spectrum.get(&MinorAllele { count: 1, total: 3 }), Some(&1));

        Ok(())
    }

    #[test]
    fn test_naming_conflict() -> Result<(), Box<dyn std::error::Error>> {
        let site = Site::builder()
            .contig("seq0")
            .position(3)
            .reference_allele("G")
            .call(REFERENCE_SAMPLE, [Some("T")])
            .try_build()?;

        let err = minor_allele_spectrum([site], true).unwrap_err();
        assert_eq!(err, Error::NamingConflict(REFERENCE_SAMPLE.to_string()));

        Ok(())
    }
}
