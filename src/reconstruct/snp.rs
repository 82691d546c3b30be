//! The single-position substitution pass.

use tracing::trace;

use crate::reconstruct::CanvasSet;
use crate::reconstruct::Error;
use crate::reconstruct::Reconstructor;
use crate::reference::Window;
use crate::site::Site;

/// Applies every site in the stream to the canvases as a point substitution.
///
/// Only the first symbol of each allele is considered; indel information and
/// structural markers are discarded. Sites whose position falls before the
/// window are skipped — for true SNPs restricted to the window they do not
/// occur.
pub(crate) fn infer<I>(
    options: &Reconstructor,
    window: &Window,
    canvases: &mut CanvasSet,
    sites: I,
) -> Result<(), Error>
where
    I: IntoIterator<Item = Site>,
{
    let start = window.start() as i64;

    for site in sites {
        let local = site.position() as i64 - start - 1;

        if local < 0 {
            continue;
        }

        let local = local as usize;

        let Some(&expected) = window.symbols().get(local) else {
            continue;
        };

        let declared = site.reference_allele()[0];

        if options.check && declared != expected {
            return Err(Error::ReferenceMismatch {
                contig: site.contig().to_string(),
                position: site.position(),
                expected: (expected as char).to_string(),
                observed: (declared as char).to_string(),
            });
        }

        for (sample, alleles) in site.calls() {
            let Some(haplotypes) = canvases.sample_mut(sample) else {
                continue;
            };

            for (index, allele) in alleles.iter().enumerate() {
                let Some(&symbol) = allele.as_ref().and_then(|a| a.first()) else {
                    continue;
                };

                if options.sentinel_to_reference && symbol == options.sentinel {
                    continue;
                }

                if symbol != declared {
                    if let Some(buffer) = haplotypes.get_mut(index) {
                        buffer[local] = symbol;
                    }
                }
            }
        }

        trace!(position = site.position(), local, "applied SNP site");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::reconstruct::Ploidies;

    fn window() -> Window {
        Window::try_new("seq0", 0, Some(8), b"ACGTACGT".to_vec()).unwrap()
    }

    fn diploid() -> Ploidies {
        Ploidies::from_iter([(String::from("sample0"), 2)])
    }

    #[test]
    fn test_point_substitution() -> Result<(), Box<dyn std::error::Error>> {
        let window = window();
        let options = Reconstructor::builder().build();
        let mut canvases = CanvasSet::try_new(&window, &diploid(), false)?;

        let site = Site::builder()
            .contig("seq0")
            .position(3)
            .reference_allele("G")
            .call("sample0", [Some("T"), Some("G")])
            .try_build()?;

        infer(&options, &window, &mut canvases, [site])?;

        let alignment = canvases.into_alignment("seq0 - 0 - 8", &BTreeSet::new());
        assert_eq!(alignment.get("sample0_1").unwrap().sequence(), b"ACTTACGT");
        assert_eq!(alignment.get("sample0_2").unwrap().sequence(), b"ACGTACGT");

        Ok(())
    }

    #[test]
    fn test_sentinel_resolves_to_reference() -> Result<(), Box<dyn std::error::Error>> {
        let window = window();
        let options = Reconstructor::builder().build();
        let mut canvases = CanvasSet::try_new(&window, &diploid(), false)?;

        let site = Site::builder()
            .contig("seq0")
            .position(3)
            .reference_allele("G")
            .call("sample0", [Some("*"), Some("*")])
            .try_build()?;

        infer(&options, &window, &mut canvases, [site])?;

        let alignment = canvases.into_alignment("seq0 - 0 - 8", &BTreeSet::new());
        assert_eq!(alignment.get("sample0_1").unwrap().sequence(), b"ACGTACGT");

        Ok(())
    }

    #[test]
    fn test_sentinel_written_when_retained() -> Result<(), Box<dyn std::error::Error>> {
        let window = window();
        let options = Reconstructor::builder().keep_sentinel_alleles().build();
        let mut canvases = CanvasSet::try_new(&window, &diploid(), false)?;

        let site = Site::builder()
            .contig("seq0")
            .position(3)
            .reference_allele("G")
            .call("sample0", [Some("*"), None])
            .try_build()?;

        infer(&options, &window, &mut canvases, [site])?;

        let alignment = canvases.into_alignment("seq0 - 0 - 8", &BTreeSet::new());
        assert_eq!(alignment.get("sample0_1").unwrap().sequence(), b"AC*TACGT");

        Ok(())
    }

    #[test]
    fn test_reference_mismatch() -> Result<(), Box<dyn std::error::Error>> {
        let window = Window::try_new("seq0", 0, Some(4), b"ACGT".to_vec())?;
        let options = Reconstructor::builder().build();
        let mut canvases = CanvasSet::try_new(&window, &diploid(), false)?;

        let site = Site::builder()
            .contig("seq0")
            .position(1)
            .reference_allele("T")
            .call("sample0", [Some("C"), None])
            .try_build()?;

        let err = infer(&options, &window, &mut canvases, [site]).unwrap_err();
        assert_eq!(
            err,
            Error::ReferenceMismatch {
                contig: String::from("seq0"),
                position: 1,
                expected: String::from("A"),
                observed: String::from("T"),
            }
        );

        Ok(())
    }

    #[test]
    fn test_mismatch_ignored_when_check_disabled() -> Result<(), Box<dyn std::error::Error>> {
        let window = Window::try_new("seq0", 0, Some(4), b"ACGT".to_vec())?;
        let options = Reconstructor::builder().skip_consistency_check().build();
        let mut canvases = CanvasSet::try_new(&window, &diploid(), false)?;

        let site = Site::builder()
            .contig("seq0")
            .position(1)
            .reference_allele("T")
            .call("sample0", [Some("C"), None])
            .try_build()?;

        infer(&options, &window, &mut canvases, [site])?;

        let alignment = canvases.into_alignment("seq0 - 0 - 4", &BTreeSet::new());
        assert_eq!(alignment.get("sample0_1").unwrap().sequence(), b"CCGT");

        Ok(())
    }

    #[test]
    fn test_upstream_site_is_skipped() -> Result<(), Box<dyn std::error::Error>> {
        let window = Window::try_new("seq0", 4, Some(8), b"ACGT".to_vec())?;
        let options = Reconstructor::builder().build();
        let mut canvases = CanvasSet::try_new(&window, &diploid(), false)?;

        let site = Site::builder()
            .contig("seq0")
            .position(2)
            .reference_allele("C")
            .call("sample0", [Some("A"), None])
            .try_build()?;

        infer(&options, &window, &mut canvases, [site])?;

        let alignment = canvases.into_alignment("seq0 - 4 - 8", &BTreeSet::new());
        assert_eq!(alignment.get("sample0_1").unwrap().sequence(), b"ACGT");

        Ok(())
    }
}
