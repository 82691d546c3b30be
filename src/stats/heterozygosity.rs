//! Windowed zygosity counts.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::site::Site;
use crate::stats::check_resolved;
use crate::stats::resolve;
use crate::stats::Error;

/// A genomic bin that zygosity is tallied within.
#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Bin {
    /// The sample name.
    pub sample: String,

    /// The contig name.
    pub contig: String,

    /// The 1-based position rounded down to a window-size multiple.
    pub start: u64,
}

/// The zygosity tallies within one [`Bin`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Counts {
    /// Sites at which every haplotype carried the same first symbol.
    pub homozygous: u64,

    /// Sites at which the haplotypes carried differing first symbols.
    pub heterozygous: u64,
}

/// Tallies homozygous and heterozygous calls per sample, per contig, per
/// fixed-size window.
///
/// Each haplotype contributes the first symbol of its allele; absent calls
/// contribute the first symbol of the reference allele. One distinct symbol is
/// a homozygous call, more than one a heterozygous call.
///
/// # Examples
///
/// ```
/// use varaln::site::Site;
/// use varaln::stats::windowed_zygosity;
///
/// let site = Site::builder()
///     .contig("seq0")
///     .position(12345)
///     .reference_allele("G")
///     .call("sample0", [Some("T"), Some("G")])
///     .try_build()?;
///
/// let counts = windowed_zygosity([site], 10_000)?;
///
/// let (bin, tally) = counts.iter().next().unwrap();
/// assert_eq!(bin.start, 10_000);
/// assert_eq!(tally.heterozygous, 1);
/// assert_eq!(tally.homozygous, 0);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn windowed_zygosity<I>(sites: I, window_size: u64) -> Result<BTreeMap<Bin, Counts>, Error>
where
    I: IntoIterator<Item = Site>,
{
    let window_size = window_size.max(1);
    let mut counts: BTreeMap<Bin, Counts> = BTreeMap::new();

    for site in sites {
        let start = site.position() / window_size * window_size;

        for (sample, alleles) in site.calls() {
            let resolved = resolve(alleles, site.reference_allele());
            check_resolved(&resolved, sample, &site)?;

            let symbols = resolved
                .iter()
                .map(|allele| allele[0])
                .collect::<BTreeSet<_>>();

            let bin = Bin {
                sample: sample.clone(),
                contig: site.contig().to_string(),
                start,
            };

            let tally = counts.entry(bin).or_default();

            match symbols.len() {
                1 => tally.homozygous += 1,
                _ => tally.heterozygous += 1,
            }
        }
    }

    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tallies_split_by_window() -> Result<(), Box<dyn std::error::Error>> {
        let sites = vec![
            Site::builder()
                .contig("seq0")
                .position(100)
                .reference_allele("G")
                .call("sample0", [Some("T"), Some("T")])
                .try_build()?,
            Site::builder()
                .contig("seq0")
                .position(900)
                .reference_allele("A")
                .call("sample0", [Some("C"), None])
                .try_build()?,
            Site::builder()
                .contig("seq0")
                .position(1100)
                .reference_allele("C")
                .call("sample0", [Some("T"), Some("T")])
                .try_build()?,
        ];

        let counts = windowed_zygosity(sites, 1000)?;

        let first = Bin {
            sample: String::from("sample0"),
            contig: String::from("seq0"),
            start: 0,
        };

        let second = Bin {
            start: 1000,
            ..first.clone()
        };

        assert_eq!(counts[&first].homozygous, 1);
        assert_eq!(counts[&first].heterozygous, 1);
        assert_eq!(counts[&second].homozygous, 1);
        assert_eq!(counts[&second].heterozygous, 0);

        Ok(())
    }

    #[test]
    fn test_empty_allele_is_a_category_error() -> Result<(), Box<dyn std::error::Error>> {
        let site = Site::builder()
            .contig("seq0")
            .position(5)
            .reference_allele("G")
            .call("sample0", [Some(Vec::new()), Some(b"T".to_vec())])
            .try_build()?;

        let err = windowed_zygosity([site], 1000).unwrap_err();
        assert_eq!(
            err,
            Error::Category {
                sample: String::from("sample0"),
                position: 5,
            }
        );

        Ok(())
    }
}
