//! Per-haplotype sequence canvases.
//!
//! A [`CanvasSet`] owns one mutable symbol buffer per `(sample, haplotype)`
//! pair for the duration of a reconstruction pass. Every buffer starts as a
//! copy of the reference window and is mutated positionally by the SNP or
//! indel pass before being rendered into an [`Alignment`].

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::alignment::Alignment;
use crate::alignment::Record;
use crate::reconstruct::Error;
use crate::reconstruct::Ploidies;
use crate::reference::Window;

/// The name of the synthetic reference pseudo-sample.
pub const REFERENCE_SAMPLE: &str = "Reference";

/// The set of haplotype canvases for one reconstruction pass.
#[derive(Debug)]
pub(crate) struct CanvasSet {
    /// One buffer per haplotype, grouped by sample.
    buffers: BTreeMap<String, Vec<Vec<u8>>>,
}

impl CanvasSet {
    /// Allocates a canvas per `(sample, haplotype)` pair, each a copy of the
    /// window's symbols.
    ///
    /// When `include_reference` is set, a single-haplotype pseudo-sample named
    /// [`REFERENCE_SAMPLE`] is added; a real sample carrying that name is a
    /// naming conflict.
    pub(crate) fn try_new(
        window: &Window,
        ploidies: &Ploidies,
        include_reference: bool,
    ) -> Result<Self, Error> {
        if include_reference && ploidies.contains(REFERENCE_SAMPLE) {
            return Err(Error::NamingConflict(REFERENCE_SAMPLE.to_string()));
        }

        let mut buffers = BTreeMap::new();

        for (sample, ploidy) in ploidies.iter() {
            buffers.insert(
                sample.to_string(),
                vec![window.symbols().to_vec(); ploidy],
            );
        }

        if include_reference {
            buffers.insert(
                REFERENCE_SAMPLE.to_string(),
                vec![window.symbols().to_vec()],
            );
        }

        Ok(Self { buffers })
    }

    /// Gets the haplotype buffers for one sample.
    pub(crate) fn sample_mut(&mut self, sample: &str) -> Option<&mut Vec<Vec<u8>>> {
        self.buffers.get_mut(sample)
    }

    /// Iterates over every sample's haplotype buffers.
    pub(crate) fn samples_mut(&mut self) -> impl Iterator<Item = (&String, &mut Vec<Vec<u8>>)> {
        self.buffers.iter_mut()
    }

    /// Renders the canvases into an [`Alignment`].
    ///
    /// Each canvas becomes a record named `"{sample}_{haplotype_index}"` with
    /// a 1-based haplotype index; withheld samples are dropped.
    pub(crate) fn into_alignment(self, descriptor: &str, withheld: &BTreeSet<String>) -> Alignment {
        let records = self
            .buffers
            .into_iter()
            .filter(|(sample, _)| !withheld.contains(sample))
            .flat_map(|(sample, haplotypes)| {
                haplotypes
                    .into_iter()
                    .enumerate()
                    .map(move |(index, sequence)| {
                        Record::new(format!("{}_{}", sample, index + 1), descriptor, sequence)
                    })
            })
            .collect();

        Alignment::new(records)
    }
}
