//! Divergence counts.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::reconstruct::REFERENCE_SAMPLE;
use crate::site::Allele;
use crate::site::Site;
use crate::stats::resolve;
use crate::stats::Error;

/// The distinct resolved alleles for one sample at one site.
fn distinct(site: &Site, sample: &str) -> Option<BTreeSet<Allele>> {
    site.haplotypes(sample)
        .map(|alleles| resolve(alleles, site.reference_allele()).into_iter().collect())
}

/// Counts, per sample, the sites at which the sample's distinct resolved
/// allele set is anything other than exactly the reference allele.
///
/// # Examples
///
/// ```
/// use varaln::site::Site;
/// use varaln::stats::reference_divergence;
///
/// let site = Site::builder()
///     .contig("seq0")
///     .position(3)
///     .reference_allele("G")
///     .call("sample0", [Some("T"), Some("G")])
///     .call("sample1", [Some("G"), None])
///     .try_build()?;
///
/// let counts = reference_divergence([site]);
/// assert_eq!(counts.get("sample0"), Some(&1));
/// assert_eq!(counts.get("sample1"), Some(&0));
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn reference_divergence<I>(sites: I) -> BTreeMap<String, u64>
where
    I: IntoIterator<Item = Site>,
{
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();

    for site in sites {
        let reference: BTreeSet<Allele> =
            BTreeSet::from([site.reference_allele().to_vec()]);

        for sample in site.calls().keys() {
            let count = counts.entry(sample.clone()).or_default();

            // `distinct` cannot miss here: the sample came from this site.
            if distinct(&site, sample).as_ref() != Some(&reference) {
                *count += 1;
            }
        }
    }

    counts
}

/// Counts, per pair of samples, the sites at which the two samples' distinct
/// resolved allele sets differ.
///
/// When `include_reference` is set, a synthetic row named
/// [`REFERENCE_SAMPLE`] carrying the reference allele joins the comparison; a
/// real sample with that name is a naming conflict. The pairs are fixed by the
/// samples of the first site.
pub fn pairwise_divergence<I>(
    sites: I,
    include_reference: bool,
) -> Result<BTreeMap<(String, String), u64>, Error>
where
    I: IntoIterator<Item = Site>,
{
    let mut counts: BTreeMap<(String, String), u64> = BTreeMap::new();

    for site in sites {
        if include_reference && site.calls().contains_key(REFERENCE_SAMPLE) {
            return Err(Error::NamingConflict(REFERENCE_SAMPLE.to_string()));
        }

        let mut sets: BTreeMap<&str, BTreeSet<Allele>> = site
            .calls()
            .keys()
            .map(|sample| (sample.as_str(), distinct(&site, sample).unwrap_or_default()))
            .collect();

        if include_reference {
            sets.insert(
                REFERENCE_SAMPLE,
                BTreeSet::from([site.reference_allele().to_vec()]),
            );
        }

        let samples = sets.keys().copied().collect::<Vec<_>>();

        for (i, first) in samples.iter().enumerate() {
            for second in &samples[i + 1..] {
                let count = counts
                    .entry((first.to_string(), second.to_string()))
                    .or_default();

                if sets[first] != sets[second] {
                    *count += 1;
                }
            }
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites() -> Vec<Site> {
        vec![
            Site::builder()
                .contig("seq0")
                .position(3)
                .reference_allele("G")
                .call("sample0", [Some("T"), Some("T")])
                .call("sample1", [Some("G"), Some("G")])
                .try_build()
                .unwrap(),
            Site::builder()
                .contig("seq0")
                .position(5)
                .reference_allele("A")
                .call("sample0", [Some("C"), None])
                .call("sample1", [Some("C"), Some("C")])
                .try_build()
                .unwrap(),
        ]
    }

    #[test]
    fn test_reference_divergence() {
        let counts = reference_divergence(sites());

        assert_eq!(counts.get("sample0"), Some(&2));
        assert_eq!(counts.get("sample1"), Some(&1));
    }

    #[test]
    fn test_absent_calls_resolve_to_the_reference() -> Result<(), Box<dyn std::error::Error>> {
        let site = Site::builder()
            .contig("seq0")
            .position(3)
            .reference_allele("G")
            .call("sample0", [None::<Vec<u8>>, None])
            .try_build()?;

        let counts = reference_divergence([site]);
        assert_eq!(counts.get("sample0"), Some(&0));

        Ok(())
    }

    #[test]
    fn test_pairwise_divergence() -> Result<(), Box<dyn std::error::Error>> {
        let counts = pairwise_divergence(sites(), false)?;

        // At position 5, sample0's absent call resolves to the reference, so
        // its set {A, C} differs from sample1's {C}.
        assert_eq!(
            counts.get(&(String::from("sample0"), String::from("sample1"))),
            Some(&2)
        );

        Ok(())
    }

    #[test]
    fn test_pairwise_divergence_with_reference_row() -> Result<(), Box<dyn std::error::Error>> {
        let counts = pairwise_divergence(sites(), true)?;

        assert_eq!(
            counts.get(&(String::from(REFERENCE_SAMPLE), String::from("sample0"))),
            Some(&2)
        );
        assert_eq!(
            counts.get(&(String::from(REFERENCE_SAMPLE), String::from("sample1"))),
            Some(&1)
        );

        Ok(())
    }

    #[test]
    fn test_naming_conflict() -> Result<(), Box<dyn std::error::Error>> {
        let site = Site::builder()
            .contig("seq0")
            .position(3)
            .reference_allele("G")
            .call(REFERENCE_SAMPLE, [Some("T"), None])
            .try_build()?;

        let err = pairwise_divergence([site], true).unwrap_err();
        assert_eq!(err, Error::NamingConflict(REFERENCE_SAMPLE.to_string()));

        Ok(())
    }
}
