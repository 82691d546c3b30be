//! The length-aware insertion and deletion pass.
//!
//! Unlike the substitution pass, this pass must keep every canvas the same
//! length while alleles of differing lengths land on them. It does so by (a)
//! padding every allele at a site out to the widest allele with gap symbols
//! and (b) tracking a cumulative `offset` that maps upcoming 1-based stream
//! positions onto canvas coordinates after earlier insertions and deletions
//! have shifted them.
//!
//! The pass also maintains a working copy of the reference that receives the
//! same padded splices as the canvases, so that each site's declared reference
//! allele can be checked against what the canvas actually holds at that spot.

use std::collections::BTreeMap;

use tracing::debug;

use crate::reconstruct::CanvasSet;
use crate::reconstruct::Error;
use crate::reconstruct::Reconstructor;
use crate::reference::Window;
use crate::site::Allele;
use crate::site::Site;

/// Pads an allele out to `width` symbols with the gap symbol. Alleles already
/// `width` or wider are left alone.
fn pad(allele: &mut Allele, width: usize, gap: u8) {
    if allele.len() < width {
        allele.resize(width, gap);
    }
}

/// Applies every site in the stream to the canvases, honoring allele lengths.
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

    let mut working = window.symbols().to_vec();
    let mut offset: i64 = 0;

    for site in sites {
        let mut declared = site.reference_allele().to_vec();

        let mut calls: BTreeMap<&String, Vec<Option<Allele>>> = site
            .calls()
            .iter()
            .map(|(sample, alleles)| (sample, alleles.iter().cloned().collect()))
            .collect();

        // A lone structural sentinel stands for the reference allele here:
        // the deletion it marks is already expressed by its parent site.
        for alleles in calls.values_mut() {
            for allele in alleles.iter_mut().flatten() {
                if allele.len() == 1 && allele[0] == options.sentinel {
                    allele.clone_from(&declared);
                }
            }
        }

        let raw_local = site.position() as i64 - start - 1 + offset;

        let local = if raw_local < 0 {
            // The site begins upstream of the window: clip the overhang off
            // the declared reference and off every allele, aligning their
            // tails, and anchor what remains at the first column.
            let overhang = raw_local.unsigned_abs() as usize;

            if overhang >= declared.len() {
                continue;
            }

            declared.drain(..overhang);

            for alleles in calls.values_mut() {
                for allele in alleles.iter_mut().flatten() {
                    allele.drain(..overhang.min(allele.len()));
                    pad(allele, declared.len(), options.gap);
                }
            }

            0
        } else {
            raw_local as usize
        };

        if local >= working.len() {
            continue;
        }

        // A declared reference allele that runs past the window end can never
        // match the symbols the window actually holds there, so the check
        // compares against the short remainder and fails. Without the check,
        // the allele is clipped to the window.
        let expected = &working[local..working.len().min(local + declared.len())];

        if options.check && expected != declared.as_slice() {
            return Err(Error::ReferenceMismatch {
                contig: site.contig().to_string(),
                position: site.position(),
                expected: String::from_utf8_lossy(expected).to_string(),
                observed: String::from_utf8_lossy(&declared).to_string(),
            });
        }

        declared.truncate(working.len() - local);

        let width = calls
            .values()
            .flatten()
            .flatten()
            .map(|allele| allele.len())
            .max()
            .unwrap_or_default()
            .max(declared.len());

        for (sample, haplotypes) in canvases.samples_mut() {
            for (index, buffer) in haplotypes.iter_mut().enumerate() {
                let mut allele = calls
                    .get(sample)
                    .and_then(|alleles| alleles.get(index))
                    .cloned()
                    .flatten()
                    .unwrap_or_else(|| declared.clone());

                pad(&mut allele, width, options.gap);

                if width == 1 {
                    if allele[0] != declared[0] {
                        buffer[local] = allele[0];
                    }
                } else {
                    buffer.splice(local..local + declared.len(), allele);
                }
            }
        }

        if width > 1 {
            let mut patch = declared.clone();
            pad(&mut patch, width, options.gap);
            working.splice(local..local + declared.len(), patch);
        }

        debug!(
            position = site.position(),
            local,
            width,
            offset,
            "applied indel site"
        );

        offset += width as i64 - declared.len() as i64;
    }

    Ok(())
}
