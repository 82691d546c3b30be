//! A binary that reconstructs per-haplotype sequence alignments from a VCF
//! file and a reference FASTA.
//!
//! ```shell
//! cargo run --release --bin=vcf2aln --features=binaries -- \
//!     variants.vcf.gz reference.fa --mode indel
//! ```
//!
//! With `--contig`, a single window of one contig is reconstructed. Without
//! it, every contig of the reference is reconstructed in parallel and the
//! per-contig alignments are concatenated into one whole-genome alignment.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write as _;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::ValueEnum;
use clap_verbosity_flag::Verbosity;
use tracing::info;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;
use varaln::alignment::Alignment;
use varaln::process;
use varaln::process::Unit;
use varaln::reconstruct::Ploidies;
use varaln::reconstruct::Reconstructor;
use varaln::reference::Repository;
use varaln::vcf;

/// How sites are applied to the reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum Mode {
    /// Treat every site as a point substitution.
    Snp,

    /// Honor allele lengths, padding with gap symbols.
    Indel,
}

/// Reconstructs per-haplotype sequence alignments from variant calls.
#[derive(Parser)]
struct Args {
    /// The VCF file to read (`.gz` accepted).
    vcf: PathBuf,

    /// The reference FASTA file.
    reference: PathBuf,

    /// How sites are applied to the reference.
    #[arg(short, long, value_enum, default_value_t = Mode::Indel)]
    mode: Mode,

    /// Restrict the reconstruction to one contig.
    #[arg(short, long)]
    contig: Option<String>,

    /// The 0-based inclusive start of the window (requires `--contig`).
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// The exclusive stop of the window (requires `--contig`).
    #[arg(long)]
    stop: Option<usize>,

    /// Include a row carrying the unmodified reference.
    #[arg(short = 'r', long)]
    include_reference: bool,

    /// Drop a sample from the output (may be repeated).
    #[arg(short, long)]
    withhold: Vec<String>,

    /// Skip the consistency check between declared reference alleles and the
    /// reference sequence.
    #[arg(long)]
    skip_check: bool,

    /// Log progress after every N sites.
    #[arg(long)]
    progress: Option<u64>,

    /// Where to write the FASTA output (stdout by default).
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity,
}

impl Args {
    /// Builds the [`Reconstructor`] these arguments describe.
    fn reconstructor(&self) -> Reconstructor {
        let mut builder = Reconstructor::builder();

        if self.include_reference {
            builder = builder.include_reference();
        }

        if self.skip_check {
            builder = builder.skip_consistency_check();
        }

        for sample in &self.withhold {
            builder = builder.withhold(sample);
        }

        builder.build()
    }

    /// Opens a fresh reader over the VCF file.
    fn reader(&self) -> Result<vcf::Reader<Box<dyn std::io::BufRead>>> {
        let mut reader = vcf::Reader::from_path(&self.vcf)
            .with_context(|| format!("opening {}", self.vcf.display()))?;

        if let Some(every) = self.progress {
            reader = reader.with_progress(every, |count| info!("{count} sites read"));
        }

        Ok(reader)
    }
}

/// Runs one reconstruction pass over a window of one contig.
fn reconstruct(
    args: &Args,
    repository: &Repository,
    ploidies: &Ploidies,
    unit: &Unit,
) -> Result<Alignment> {
    let window = repository
        .window(&unit.contig, unit.start, unit.stop)
        .with_context(|| format!("slicing the reference window for {unit}"))?;

    let sites = args
        .reader()?
        .sites_within(&unit.contig, unit.start as u64, unit.stop.map(|s| s as u64))
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("reading sites for {unit}"))?;

    info!("{unit}: {} sites", sites.len());

    let reconstructor = args.reconstructor();

    let alignment = match args.mode {
        Mode::Snp => reconstructor.snps(&window, ploidies, sites),
        Mode::Indel => reconstructor.indels(&window, ploidies, sites),
    }
    .with_context(|| format!("reconstructing {unit}"))?;

    Ok(alignment)
}

fn run(args: &Args) -> Result<()> {
    let repository = Repository::from_fasta_path(&args.reference)
        .with_context(|| format!("loading {}", args.reference.display()))?;

    let ploidies = args
        .reader()?
        .ploidies()
        .context("resolving ploidies from the variant stream")?;

    info!("{} samples in the variant stream", ploidies.len());

    let units = match &args.contig {
        Some(contig) => vec![Unit::new(contig, args.start, args.stop)],
        None => process::per_contig(repository.contigs().map(String::from)),
    };

    let results = process::apply(units, |unit| {
        reconstruct(args, &repository, &ploidies, unit)
    });

    let mut alignment: Option<Alignment> = None;

    for (unit, result) in results {
        let piece = result.with_context(|| format!("unit {unit} failed"))?;

        alignment = Some(match alignment {
            Some(joined) => joined
                .concat(piece)
                .with_context(|| format!("concatenating {unit}"))?,
            None => piece,
        });
    }

    let Some(alignment) = alignment else {
        bail!("the reference holds no contigs");
    };

    match &args.output {
        Some(path) => {
            let mut writer = File::create(path)
                .map(BufWriter::new)
                .with_context(|| format!("creating {}", path.display()))?;

            alignment.write_fasta(&mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = BufWriter::new(stdout.lock());

            alignment.write_fasta(&mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.contig.is_none() && (args.start != 0 || args.stop.is_some()) {
        bail!("`--start` and `--stop` require `--contig`");
    }

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    run(&args)
}
