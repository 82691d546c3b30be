//! This example reconstructs a whole-genome alignment: every contig of the
//! reference is reconstructed in parallel and the per-contig alignments are
//! concatenated record by record. You can call the program like so:
//!
//! ```
//! cargo run --release --example whole_genome <VCF> <REFERENCE_FASTA>
//! ```
//!
//! The joined alignment is written to stdout in FASTA format.

use std::env;

use varaln::alignment::Alignment;
use varaln::process;
use varaln::reconstruct::Reconstructor;
use varaln::reference::Repository;
use varaln::vcf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let vcf_path = env::args().nth(1).expect("missing vcf path");
    let fasta_path = env::args().nth(2).expect("missing reference fasta path");

    let repository = Repository::from_fasta_path(&fasta_path)?;
    let ploidies = vcf::Reader::from_path(&vcf_path)?.ploidies()?;

    let units = process::per_contig(repository.contigs().map(String::from));

    let results = process::apply(units, |unit| {
        let window = repository.window(&unit.contig, 0, None)?;

        let sites = vcf::Reader::from_path(&vcf_path)
            .map_err(Box::<dyn std::error::Error + Send + Sync>::from)?
            .sites_within(&unit.contig, 0, None)
            .collect::<Result<Vec<_>, _>>()?;

        let alignment = Reconstructor::builder()
            .include_reference()
            .build()
            .indels(&window, &ploidies, sites)?;

        Ok::<_, Box<dyn std::error::Error + Send + Sync>>(alignment)
    });

    let mut joined: Option<Alignment> = None;

    for (unit, result) in results {
        let piece = result.map_err(|err| format!("{unit}: {err}"))?;

        joined = Some(match joined {
            Some(alignment) => alignment.concat(piece)?,
            None => piece,
        });
    }

    if let Some(alignment) = joined {
        let stdout = std::io::stdout();
        alignment.write_fasta(&mut stdout.lock())?;
    }

    Ok(())
}
