//! Reference sequences.
//!
//! A [`Repository`] holds the full symbol sequence for each named contig and
//! hands out [`Window`]s over `[start, stop)` slices of them. Repositories are
//! usually loaded from a FASTA file, but can also be assembled in memory,
//! which is convenient for tests.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use noodles::fasta;

pub mod window;

pub use window::Window;

/// An error related to a [`Repository`].
#[derive(Debug)]
pub enum Error {
    /// A contig was not found in the repository.
    UnknownContig(String),

    /// An I/O error while reading a sequence file.
    Io(io::Error),

    /// An error creating a [`Window`].
    Window(window::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownContig(contig) => {
                write!(f, "contig not found in the reference sequence: {contig}")
            }
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::Window(err) => write!(f, "window error: {err}"),
        }
    }
}

impl std::error::Error for Error {}

/// A repository of reference sequences, keyed by contig name.
#[derive(Clone, Debug, Default)]
pub struct Repository {
    /// The full symbol sequence for each contig.
    sequences: HashMap<String, Vec<u8>>,
}

impl Repository {
    /// Creates an empty [`Repository`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a [`Repository`] from a FASTA file.
    pub fn from_fasta_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let mut reader = fasta::reader::Builder
            .build_from_path(path)
            .map_err(Error::Io)?;

        let mut repository = Self::new();

        for result in reader.records() {
            let record = result.map_err(Error::Io)?;
            let name = String::from_utf8_lossy(record.name()).to_string();
            repository.insert(name, record.sequence().as_ref().to_vec());
        }

        Ok(repository)
    }

    /// Inserts a contig and its full symbol sequence into the [`Repository`].
    pub fn insert(&mut self, contig: impl Into<String>, symbols: Vec<u8>) {
        self.sequences.insert(contig.into(), symbols);
    }

    /// Gets the full symbol sequence for a contig, if present.
    pub fn sequence(&self, contig: &str) -> Option<&[u8]> {
        self.sequences.get(contig).map(|s| s.as_slice())
    }

    /// Gets the names of the contigs held by the [`Repository`], in no
    /// particular order.
    pub fn contigs(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(|s| s.as_str())
    }

    /// Slices a [`Window`] over `[start, stop)` of a contig.
    ///
    /// When `stop` is [`None`], the window runs to the end of the contig.
    /// Bounds beyond the end of the contig are clamped to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use varaln::reference::Repository;
    ///
    /// let mut repository = Repository::new();
    /// repository.insert("seq0", b"ACGTACGT".to_vec());
    ///
    /// let window = repository.window("seq0", 2, Some(6))?;
    /// assert_eq!(window.symbols(), b"GTAC");
    ///
    /// assert!(repository.window("seq1", 0, None).is_err());
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn window(&self, contig: &str, start: usize, stop: Option<usize>) -> Result<Window, Error> {
        let sequence = self
            .sequence(contig)
            .ok_or_else(|| Error::UnknownContig(contig.to_string()))?;

        let clamped_start = start.min(sequence.len());
        let clamped_stop = stop.map(|s| s.min(sequence.len())).unwrap_or(sequence.len());

        if clamped_stop < clamped_start {
            return Err(Error::Window(window::Error::InvalidRange(
                clamped_start,
                clamped_stop,
            )));
        }

        let symbols = sequence[clamped_start..clamped_stop].to_vec();
        Window::try_new(contig, clamped_start, stop.map(|_| clamped_stop), symbols)
            .map_err(Error::Window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_to_contig_end() -> Result<(), Box<dyn std::error::Error>> {
        let mut repository = Repository::new();
        repository.insert("seq0", b"ACGTACGT".to_vec());

        let window = repository.window("seq0", 4, None)?;
        assert_eq!(window.symbols(), b"ACGT");
        assert_eq!(window.stop(), None);

        Ok(())
    }

    #[test]
    fn test_window_clamps_to_contig_end() -> Result<(), Box<dyn std::error::Error>> {
        let mut repository = Repository::new();
        repository.insert("seq0", b"ACGT".to_vec());

        let window = repository.window("seq0", 0, Some(100))?;
        assert_eq!(window.symbols(), b"ACGT");
        assert_eq!(window.stop(), Some(4));

        Ok(())
    }

    #[test]
    fn test_unknown_contig() {
        let repository = Repository::new();
        let err = repository.window("seq1", 0, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "contig not found in the reference sequence: seq1"
        );
    }
}
