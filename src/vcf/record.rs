//! Parsing of variant record lines.
//!
//! Only the columns the reconstruction passes consume are materialized: the
//! contig, the 1-based position, the reference allele, and the `GT` genotype
//! of every sample column. Everything else on the line is skipped over.

use crate::site::Allele;

/// An error that occurs when parsing a variant record line.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The line held fewer than the ten tab-delimited fields a record with
    /// sample columns requires.
    IncompleteRecord(usize),

    /// The position field was not a number.
    InvalidPosition(String),

    /// The reference allele field was empty.
    EmptyReferenceAllele,

    /// A declared alternate allele was empty.
    EmptyAlternateAllele(usize),

    /// The `FORMAT` field did not declare a `GT` key.
    MissingGenotypeKey,

    /// A sample column held no value for the `GT` key.
    MissingGenotype(String),

    /// A genotype referred to an alternate allele the record never declared.
    UnknownAlleleIndex(usize),

    /// A genotype allele index was not a number.
    InvalidAlleleIndex(String),

    /// The number of sample columns disagreed with the header.
    SampleCountMismatch {
        /// The number of samples the header declared.
        expected: usize,

        /// The number of sample columns found on the line.
        found: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncompleteRecord(found) => {
                write!(f, "incomplete record: expected at least 10 fields, found {found}")
            }
            ParseError::InvalidPosition(value) => write!(f, "invalid position: {value}"),
            ParseError::EmptyReferenceAllele => write!(f, "empty reference allele"),
            ParseError::EmptyAlternateAllele(index) => {
                write!(f, "empty alternate allele at index {index}")
            }
            ParseError::MissingGenotypeKey => write!(f, "no GT key in the FORMAT field"),
            ParseError::MissingGenotype(sample) => {
                write!(f, "no genotype value for sample: {sample}")
            }
            ParseError::UnknownAlleleIndex(index) => {
                write!(f, "genotype refers to undeclared alternate allele {index}")
            }
            ParseError::InvalidAlleleIndex(value) => {
                write!(f, "invalid genotype allele index: {value}")
            }
            ParseError::SampleCountMismatch { expected, found } => write!(
                f,
                "sample count mismatch: header declares {expected} samples, record has {found}"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// A parsed variant record line.
#[derive(Debug, Eq, PartialEq)]
pub(crate) struct Record {
    /// The contig upon which the record falls.
    pub(crate) contig: String,

    /// The 1-based position of the record.
    pub(crate) position: u64,

    /// The reference allele.
    pub(crate) reference_allele: Allele,

    /// The haplotype alleles for each sample column, in column order.
    pub(crate) genotypes: Vec<Vec<Option<Allele>>>,
}

/// Parses one data line into a [`Record`].
///
/// Genotype allele indices are resolved to their symbols: `0` is the reference
/// allele, `n` the `n`-th declared alternate allele, and `.` an absent call.
/// Phased and unphased separators are treated alike.
pub(crate) fn parse(line: &str, sample_count: usize) -> Result<Record, ParseError> {
    let fields = line.split('\t').collect::<Vec<_>>();

    if fields.len() < 10 {
        return Err(ParseError::IncompleteRecord(fields.len()));
    }

    let contig = fields[0].to_string();

    let position = fields[1]
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidPosition(fields[1].to_string()))?;

    if fields[3].is_empty() {
        return Err(ParseError::EmptyReferenceAllele);
    }

    let reference_allele = fields[3].as_bytes().to_vec();

    let alternate_alleles = match fields[4] {
        "." => Vec::new(),
        alts => alts
            .split(',')
            .enumerate()
            .map(|(i, alt)| {
                if alt.is_empty() {
                    Err(ParseError::EmptyAlternateAllele(i + 1))
                } else {
                    Ok(alt.as_bytes().to_vec())
                }
            })
            .collect::<Result<Vec<_>, _>>()?,
    };

    let genotype_index = fields[8]
        .split(':')
        .position(|key| key == "GT")
        .ok_or(ParseError::MissingGenotypeKey)?;

    let columns = &fields[9..];

    if columns.len() != sample_count {
        return Err(ParseError::SampleCountMismatch {
            expected: sample_count,
            found: columns.len(),
        });
    }

    let mut genotypes = Vec::with_capacity(columns.len());

    for column in columns {
        let genotype = column
            .split(':')
            .nth(genotype_index)
            .ok_or_else(|| ParseError::MissingGenotype(column.to_string()))?;

        let mut alleles = Vec::new();

        for token in genotype.split(['|', '/']) {
            if token == "." {
                alleles.push(None);
                continue;
            }

            let index = token
                .parse::<usize>()
                .map_err(|_| ParseError::InvalidAlleleIndex(token.to_string()))?;

            let allele = match index {
                0 => reference_allele.clone(),
                n => alternate_alleles
                    .get(n - 1)
                    .cloned()
                    .ok_or(ParseError::UnknownAlleleIndex(n))?,
            };

            alleles.push(Some(allele));
        }

        genotypes.push(alleles);
    }

    Ok(Record {
        contig,
        position,
        reference_allele,
        genotypes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diploid_record() -> Result<(), Box<dyn std::error::Error>> {
        let record = parse(
            "seq0\t3\t.\tG\tT,GAA\t.\tPASS\t.\tGT:DP\t0|1:30\t2/.:12",
            2,
        )?;

        assert_eq!(record.contig, "seq0");
        assert_eq!(record.position, 3);
        assert_eq!(record.reference_allele, b"G");
        assert_eq!(
            record.genotypes,
            vec![
                vec![Some(b"G".to_vec()), Some(b"T".to_vec())],
                vec![Some(b"GAA".to_vec()), None],
            ]
        );

        Ok(())
    }

    #[test]
    fn test_genotype_key_position_is_honored() -> Result<(), Box<dyn std::error::Error>> {
        let record = parse("seq0\t3\t.\tG\tT\t.\t.\t.\tDP:GT\t30:1", 1)?;
        assert_eq!(record.genotypes, vec![vec![Some(b"T".to_vec())]]);
        Ok(())
    }

    #[test]
    fn test_missing_genotype_key() {
        let err = parse("seq0\t3\t.\tG\tT\t.\t.\t.\tDP\t30", 1).unwrap_err();
        assert_eq!(err, ParseError::MissingGenotypeKey);
    }

    #[test]
    fn test_unknown_allele_index() {
        let err = parse("seq0\t3\t.\tG\tT\t.\t.\t.\tGT\t0|2", 1).unwrap_err();
        assert_eq!(err, ParseError::UnknownAlleleIndex(2));
    }

    #[test]
    fn test_sample_count_mismatch() {
        let err = parse("seq0\t3\t.\tG\tT\t.\t.\t.\tGT\t0|1", 2).unwrap_err();
        assert_eq!(
            err,
            ParseError::SampleCountMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn test_empty_reference_allele() {
        let err = parse("seq0\t3\t.\t\tT\t.\t.\t.\tGT\t0|1", 1).unwrap_err();
        assert_eq!(err, ParseError::EmptyReferenceAllele);
    }

    #[test]
    fn test_empty_alternate_allele() {
        let err = parse("seq0\t3\t.\tG\tT,\t.\t.\t.\tGT\t0|1", 1).unwrap_err();
        assert_eq!(err, ParseError::EmptyAlternateAllele(2));
    }

    #[test]
    fn test_incomplete_record() {
        let err = parse("seq0\t3\t.\tG\tT", 1).unwrap_err();
        assert_eq!(err, ParseError::IncompleteRecord(5));
    }
}
