//! Multiple sequence alignments.
//!
//! An [`Alignment`] is the final product of a reconstruction pass: one named,
//! described [`Record`] per surviving `(sample, haplotype)` pair, held in
//! name-lexicographic order so that output is deterministic regardless of the
//! order in which the records were produced.

use std::io;
use std::io::Write;

/// An error related to an [`Alignment`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// Attempted to concatenate two alignments whose record names differ.
    MismatchedRecords(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MismatchedRecords(name) => {
                write!(
                    f,
                    "cannot concatenate alignments: record {name} is not present in both"
                )
            }
        }
    }
}

impl std::error::Error for Error {}

/// A single named sequence within an [`Alignment`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    /// The record name, `"{sample}_{haplotype_index}"` for reconstructed
    /// haplotypes.
    name: String,

    /// A free-form description, typically the window descriptor.
    description: String,

    /// The sequence symbols, gap symbols included.
    sequence: Vec<u8>,
}

impl Record {
    /// Creates a new [`Record`].
    pub fn new(name: impl Into<String>, description: impl Into<String>, sequence: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            sequence,
        }
    }

    /// Gets the name of the [`Record`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the description of the [`Record`].
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Gets the sequence of the [`Record`].
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Gets the number of symbols in the [`Record`].
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns whether the [`Record`] holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// A multiple sequence alignment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Alignment {
    /// The records, sorted by name.
    records: Vec<Record>,
}

impl Alignment {
    /// Creates a new [`Alignment`], sorting the records by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use varaln::alignment::Alignment;
    /// use varaln::alignment::Record;
    ///
    /// let alignment = Alignment::new(vec![
    ///     Record::new("sample0_2", "seq0 - 0 - 8", b"ACGTACGT".to_vec()),
    ///     Record::new("sample0_1", "seq0 - 0 - 8", b"ACTTACGT".to_vec()),
    /// ]);
    ///
    /// let names = alignment
    ///     .records()
    ///     .iter()
    ///     .map(|record| record.name())
    ///     .collect::<Vec<_>>();
    /// assert_eq!(names, vec!["sample0_1", "sample0_2"]);
    /// ```
    pub fn new(mut records: Vec<Record>) -> Self {
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Self { records }
    }

    /// Gets the records of the [`Alignment`].
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Gets a record by name.
    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records
            .binary_search_by(|record| record.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.records[i])
    }

    /// Gets the number of records in the [`Alignment`].
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether the [`Alignment`] holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Concatenates another [`Alignment`] onto this one, record by record.
    ///
    /// Both alignments must contain exactly the same record names. The
    /// per-window descriptions no longer apply to the joined sequences, so
    /// they are cleared. This is how per-contig alignments are stitched into a
    /// whole-genome alignment.
    pub fn concat(mut self, other: Alignment) -> Result<Alignment, Error> {
        if self.records.len() != other.records.len() {
            let name = match self.records.len() > other.records.len() {
                true => self
                    .records
                    .iter()
                    .find(|r| other.get(r.name()).is_none())
                    .map(|r| r.name().to_string()),
                false => other
                    .records
                    .iter()
                    .find(|r| self.get(r.name()).is_none())
                    .map(|r| r.name().to_string()),
            };

            return Err(Error::MismatchedRecords(name.unwrap_or_default()));
        }

        for (record, extension) in self.records.iter_mut().zip(other.records) {
            if record.name != extension.name {
                return Err(Error::MismatchedRecords(extension.name));
            }

            record.sequence.extend(extension.sequence);
            record.description.clear();
        }

        Ok(self)
    }

    /// Writes the [`Alignment`] in FASTA format.
    ///
    /// # Examples
    ///
    /// ```
    /// use varaln::alignment::Alignment;
    /// use varaln::alignment::Record;
    ///
    /// let alignment = Alignment::new(vec![Record::new(
    ///     "sample0_1",
    ///     "seq0 - 0 - 4",
    ///     b"ACGT".to_vec(),
    /// )]);
    ///
    /// let mut out = Vec::new();
    /// alignment.write_fasta(&mut out)?;
    /// assert_eq!(out, b">sample0_1 seq0 - 0 - 4\nACGT\n");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_fasta<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for record in &self.records {
            match record.description.is_empty() {
                true => writeln!(writer, ">{}", record.name)?,
                false => writeln!(writer, ">{} {}", record.name, record.description)?,
            }

            writer.write_all(&record.sequence)?;
            writeln!(writer)?;
        }

        Ok(())
    }
}

impl IntoIterator for Alignment {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_name() {
        let alignment = Alignment::new(vec![
            Record::new("b_1", "", b"CC".to_vec()),
            Record::new("a_1", "", b"AA".to_vec()),
        ]);

        assert_eq!(alignment.get("a_1").unwrap().sequence(), b"AA");
        assert_eq!(alignment.get("c_1"), None);
    }

    #[test]
    fn test_concat() -> Result<(), Box<dyn std::error::Error>> {
        let first = Alignment::new(vec![
            Record::new("a_1", "seq0 - 0 - 2", b"AC".to_vec()),
            Record::new("b_1", "seq0 - 0 - 2", b"GT".to_vec()),
        ]);

        let second = Alignment::new(vec![
            Record::new("a_1", "seq1 - 0 - 2", b"TT".to_vec()),
            Record::new("b_1", "seq1 - 0 - 2", b"GG".to_vec()),
        ]);

        let joined = first.concat(second)?;
        assert_eq!(joined.get("a_1").unwrap().sequence(), b"ACTT");
        assert_eq!(joined.get("b_1").unwrap().sequence(), b"GTGG");
        assert_eq!(joined.get("a_1").unwrap().description(), "");

        Ok(())
    }

    #[test]
    fn test_concat_mismatched_records() {
        let first = Alignment::new(vec![Record::new("a_1", "", b"AC".to_vec())]);
        let second = Alignment::new(vec![Record::new("b_1", "", b"GT".to_vec())]);

        let err = first.concat(second).unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot concatenate alignments: record b_1 is not present in both"
        );
    }
}
