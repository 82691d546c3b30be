//! This example reconstructs the per-haplotype alignment of a single window
//! of one contig. To run the example, you'll need a VCF file and the matching
//! reference FASTA. You can call the program like so:
//!
//! ```
//! cargo run --release --example window_alignment <VCF> <REFERENCE_FASTA> <CONTIG> <START> <STOP>
//! ```
//!
//! The alignment is written to stdout in FASTA format. Insertions and
//! deletions are honored, so the rows carry gap symbols where alleles of
//! differing lengths landed.

use std::env;

use varaln::reconstruct::Reconstructor;
use varaln::reference::Repository;
use varaln::vcf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let vcf_path = env::args().nth(1).expect("missing vcf path");
    let fasta_path = env::args().nth(2).expect("missing reference fasta path");
    let contig = env::args().nth(3).expect("missing contig name");

    let start = env::args()
        .nth(4)
        .expect("missing window start")
        .parse::<usize>()?;

    let stop = env::args()
        .nth(5)
        .expect("missing window stop")
        .parse::<usize>()?;

    let repository = Repository::from_fasta_path(&fasta_path)?;
    let window = repository.window(&contig, start, Some(stop))?;

    let ploidies = vcf::Reader::from_path(&vcf_path)?.ploidies()?;

    let sites = vcf::Reader::from_path(&vcf_path)?
        .sites_within(&contig, start as u64, Some(stop as u64))
        .collect::<Result<Vec<_>, _>>()?;

    let alignment = Reconstructor::builder()
        .include_reference()
        .build()
        .indels(&window, &ploidies, sites)?;

    let stdout = std::io::stdout();
    alignment.write_fasta(&mut stdout.lock())?;

    Ok(())
}
