//! Reading variant streams.
//!
//! A [`Reader`] wraps any buffered source of VCF text, parses the header with
//! `noodles`, and lazily yields [`Site`]s from the data lines. Alleles can be
//! rewritten on the way out with [modifiers](crate::site::modifier), and long
//! streams can report progress through a caller-supplied callback.

use std::fs::File;
use std::io;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use nonempty::NonEmpty;
use noodles::vcf;
use tracing::debug;

use crate::reconstruct::ploidy;
use crate::reconstruct::Ploidies;
use crate::site;
use crate::site::modifier::Modifier;
use crate::site::Calls;
use crate::site::Site;

pub mod record;

pub use record::ParseError;

/// An error related to reading a variant stream.
#[derive(Debug)]
pub enum Error {
    /// An I/O error.
    Io(io::Error),

    /// The header was missing or malformed.
    InvalidHeader(String),

    /// A data line could not be parsed.
    Parse {
        /// The 1-based data line number within the stream.
        line: u64,

        /// The underlying parse error.
        err: ParseError,
    },

    /// A data line parsed but described an invalid site.
    Site {
        /// The 1-based data line number within the stream.
        line: u64,

        /// The underlying site error.
        err: site::Error,
    },

    /// An error resolving ploidies from the stream.
    Ploidy(ploidy::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::InvalidHeader(reason) => write!(f, "invalid header: {reason}"),
            Error::Parse { line, err } => write!(f, "parse error on data line {line}: {err}"),
            Error::Site { line, err } => write!(f, "invalid site on data line {line}: {err}"),
            Error::Ploidy(err) => write!(f, "ploidy error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A [`Result`](std::result::Result) with an [`Error`].
type Result<T> = std::result::Result<T, Error>;

/// A progress callback and the site interval at which it fires.
struct Progress {
    /// Fire the callback after every `every` sites.
    every: u64,

    /// The callback, receiving the running site count.
    callback: Box<dyn Fn(u64) + Send>,
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress")
            .field("every", &self.every)
            .finish_non_exhaustive()
    }
}

/// A reader of variant streams.
pub struct Reader<R> {
    /// The underlying line source, positioned after the header.
    reader: R,

    /// The parsed header.
    header: vcf::Header,

    /// The sample names, in column order.
    samples: Vec<String>,

    /// The allele modifiers, applied in order.
    modifiers: Vec<Modifier>,

    /// The optional progress callback.
    progress: Option<Progress>,
}

impl<R> std::fmt::Debug for Reader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("samples", &self.samples)
            .field("modifiers", &self.modifiers.len())
            .field("progress", &self.progress)
            .finish_non_exhaustive()
    }
}

impl Reader<Box<dyn BufRead>> {
    /// Opens a [`Reader`] from a path.
    ///
    /// Files ending in `.gz` are decompressed transparently, block-gzipped
    /// files included.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::Io)?;

        let reader: Box<dyn BufRead> = match path.extension().and_then(|ext| ext.to_str()) {
            Some("gz") => Box::new(BufReader::new(MultiGzDecoder::new(file))),
            _ => Box::new(BufReader::new(file)),
        };

        Self::new(reader)
    }
}

impl<R: BufRead> Reader<R> {
    /// Creates a [`Reader`], consuming the header from the underlying source.
    pub fn new(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        let mut line = String::new();
        let mut complete = false;

        loop {
            line.clear();

            if reader.read_line(&mut line).map_err(Error::Io)? == 0 {
                break;
            }

            if !line.starts_with('#') {
                break;
            }

            text.push_str(&line);

            if line.starts_with("#CHROM") {
                complete = true;
                break;
            }
        }

        if !complete {
            return Err(Error::InvalidHeader(String::from(
                "the header never reached a #CHROM line",
            )));
        }

        let header: vcf::Header = text
            .parse()
            .map_err(|err| Error::InvalidHeader(format!("{err}")))?;

        let samples = header
            .sample_names()
            .iter()
            .map(|name| name.to_string())
            .collect::<Vec<_>>();

        debug!(samples = samples.len(), "parsed variant stream header");

        Ok(Self {
            reader,
            header,
            samples,
            modifiers: Vec::new(),
            progress: None,
        })
    }

    /// Gets the parsed header.
    pub fn header(&self) -> &vcf::Header {
        &self.header
    }

    /// Gets the sample names, in column order.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Gets the contig names the header declares, in declaration order.
    pub fn contigs(&self) -> impl Iterator<Item = &str> {
        self.header.contigs().keys().map(|contig| contig.as_str())
    }

    /// Adds an allele [`Modifier`], applied to every sample's haplotype allele
    /// list in the order the modifiers were added.
    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Installs a progress callback, fired with the running site count after
    /// every `every` sites.
    pub fn with_progress(mut self, every: u64, callback: impl Fn(u64) + Send + 'static) -> Self {
        self.progress = Some(Progress {
            every: every.max(1),
            callback: Box::new(callback),
        });

        self
    }

    /// Resolves [`Ploidies`] from the first site of the stream, consuming the
    /// [`Reader`].
    pub fn ploidies(self) -> Result<Ploidies> {
        match self.sites().next() {
            Some(site) => Ok(Ploidies::from_site(&site?)),
            None => Err(Error::Ploidy(ploidy::Error::EmptyVariantStream)),
        }
    }

    /// Consumes the [`Reader`], returning an iterator over every [`Site`] in
    /// the stream.
    pub fn sites(self) -> Sites<R> {
        Sites {
            reader: self.reader,
            samples: self.samples,
            modifiers: self.modifiers,
            progress: self.progress,
            filter: None,
            count: 0,
        }
    }

    /// Consumes the [`Reader`], returning an iterator over the [`Site`]s whose
    /// reference span overlaps `[start, stop)` of a contig.
    ///
    /// `start` is 0-based; a [`None`] stop leaves the interval open on the
    /// right. A site overlaps when any symbol of its reference allele falls
    /// within the interval, so deletions reaching into the interval from
    /// upstream are included.
    pub fn sites_within(
        self,
        contig: impl Into<String>,
        start: u64,
        stop: Option<u64>,
    ) -> Sites<R> {
        let mut sites = self.sites();

        sites.filter = Some(Filter {
            contig: contig.into(),
            start,
            stop,
        });

        sites
    }
}

/// A contig interval restricting which sites an iterator yields.
struct Filter {
    /// The contig name.
    contig: String,

    /// The inclusive, 0-based start of the interval.
    start: u64,

    /// The exclusive stop of the interval, if bounded.
    stop: Option<u64>,
}

impl Filter {
    /// Returns whether a site's reference span overlaps the interval.
    fn admits(&self, site: &Site) -> bool {
        if site.contig() != self.contig {
            return false;
        }

        let (span_start, span_stop) = site.reference_span();
        span_stop > self.start && self.stop.map_or(true, |stop| span_start < stop)
    }
}

/// An iterator over the [`Site`]s of a variant stream.
pub struct Sites<R> {
    /// The underlying line source, positioned after the header.
    reader: R,

    /// The sample names, in column order.
    samples: Vec<String>,

    /// The allele modifiers, applied in order.
    modifiers: Vec<Modifier>,

    /// The optional progress callback.
    progress: Option<Progress>,

    /// The optional contig interval filter.
    filter: Option<Filter>,

    /// The number of data lines consumed so far.
    count: u64,
}

impl<R> std::fmt::Debug for Sites<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sites")
            .field("samples", &self.samples)
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl<R: BufRead> Sites<R> {
    /// Parses one data line into a [`Site`], applying modifiers.
    ///
    /// Returns [`None`] when every sample was dropped by the modifiers.
    fn site(&self, line: &str) -> Result<Option<Site>> {
        let record = record::parse(line, self.samples.len()).map_err(|err| Error::Parse {
            line: self.count,
            err,
        })?;

        let mut calls = Calls::default();

        for (sample, mut alleles) in self.samples.iter().zip(record.genotypes) {
            for modifier in &self.modifiers {
                alleles = modifier(alleles, &record.reference_allele);
            }

            if let Some(alleles) = NonEmpty::from_vec(alleles) {
                calls.insert(sample.clone(), alleles);
            }
        }

        if calls.is_empty() {
            return Ok(None);
        }

        Site::try_new(record.contig, record.position, record.reference_allele, calls)
            .map(Some)
            .map_err(|err| Error::Site {
                line: self.count,
                err,
            })
    }
}

impl<R: BufRead> Iterator for Sites<R> {
    type Item = Result<Site>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();

            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(err) => return Some(Err(Error::Io(err))),
            }

            let trimmed = line.trim_end();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            self.count += 1;

            if let Some(progress) = &self.progress {
                if self.count % progress.every == 0 {
                    (progress.callback)(self.count);
                }
            }

            match self.site(trimmed) {
                Ok(Some(site)) => {
                    if let Some(filter) = &self.filter {
                        if !filter.admits(&site) {
                            continue;
                        }
                    }

                    return Some(Ok(site));
                }
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
