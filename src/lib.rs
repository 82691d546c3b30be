//! `varaln` is a crate for reconstructing per-haplotype sequences from
//! variant calls and assembling them into multiple sequence alignments.
//!
//! The crate provides two main points of entry:
//!
//! - Reading variant streams and reference sequences directly.
//! - A [`Reconstructor`] that applies a stream of variant sites to a window of
//!   the reference and renders one sequence per `(sample, haplotype)` pair.
//!
//! ## Reading the inputs
//!
//! Variant streams are read with [`vcf::Reader`], which accepts any buffered
//! source of VCF text, plain or gzip-compressed. Reference sequences are
//! loaded into a [`reference::Repository`], which hands out
//! [`reference::Window`]s over `[start, stop)` slices of its contigs.
//!
//! Per-sample haplotype calls can be rewritten on the way out of the reader
//! with [allele modifiers](crate::site::modifier): collapsing a diploid call
//! to an IUPAC ambiguity code, dropping non-variable alleles, and so on.
//!
//! ## Reconstruction
//!
//! A [`Reconstructor`] runs one of two passes over a window. The
//! [`snps`](Reconstructor::snps) pass treats every site as a point
//! substitution, so each output row has exactly the window's length. The
//! [`indels`](Reconstructor::indels) pass honors allele lengths: alleles at a
//! site are padded out to the widest one with gap symbols, and a cumulative
//! offset keeps later sites landing on the right columns after insertions and
//! deletions have shifted them.
//!
//! Below is a representative example that applies a heterozygous substitution
//! and a deletion to a small window.
//!
//! ```
//! use varaln::reconstruct::Ploidies;
//! use varaln::reconstruct::Reconstructor;
//! use varaln::reference::Repository;
//! use varaln::site::Site;
//!
//! let mut repository = Repository::new();
//! repository.insert("seq0", b"ACGTACGT".to_vec());
//! let window = repository.window("seq0", 0, Some(8))?;
//!
//! let sites = vec![
//!     Site::builder()
//!         .contig("seq0")
//!         .position(2)
//!         .reference_allele("CGT")
//!         .call("sample0", [Some("C"), None])
//!         .try_build()?,
//!     Site::builder()
//!         .contig("seq0")
//!         .position(6)
//!         .reference_allele("C")
//!         .call("sample0", [Some("A"), Some("A")])
//!         .try_build()?,
//! ];
//!
//! let ploidies = Ploidies::from_site(&sites[0]);
//!
//! let alignment = Reconstructor::builder()
//!     .include_reference()
//!     .build()
//!     .indels(&window, &ploidies, sites)?;
//!
//! assert_eq!(alignment.get("Reference_1").unwrap().sequence(), b"ACGTACGT");
//! assert_eq!(alignment.get("sample0_1").unwrap().sequence(), b"AC--AAGT");
//! assert_eq!(alignment.get("sample0_2").unwrap().sequence(), b"ACGTAAGT");
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Beyond one window
//!
//! Per-contig alignments that share the same record names can be stitched
//! into a whole-genome alignment with
//! [`Alignment::concat`](alignment::Alignment::concat), and independent
//! per-contig passes can be fanned out across a thread pool with
//! [`process::apply`]. The [`stats`] module computes divergence, zygosity,
//! and minor-allele-frequency summaries from the site stream alone.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod alignment;
pub mod process;
pub mod reconstruct;
pub mod reference;
pub mod site;
pub mod stats;
pub mod vcf;

pub use alignment::Alignment;
pub use reconstruct::Reconstructor;
pub use reference::Repository;
pub use site::Site;
