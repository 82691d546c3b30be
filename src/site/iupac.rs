//! IUPAC nucleotide ambiguity codes.
//!
//! The table maps a set of observed nucleotide symbols to the one-letter code
//! describing exactly that set (for example, `A` and `G` collapse to `R`). It
//! is built once at first use and shared read-only afterwards; the
//! reconstruction core never consults it directly — it is a capability used by
//! the [IUPAC allele modifier](crate::site::modifier::iupac_collapse).

use std::collections::HashMap;
use std::sync::LazyLock;

/// The ambiguity table, keyed by the sorted, deduplicated symbol set.
static CODES: LazyLock<HashMap<&'static [u8], u8>> = LazyLock::new(|| {
    HashMap::from([
        (&b"A"[..], b'A'),
        (&b"C"[..], b'C'),
        (&b"G"[..], b'G'),
        (&b"T"[..], b'T'),
        (&b"AC"[..], b'M'),
        (&b"AG"[..], b'R'),
        (&b"AT"[..], b'W'),
        (&b"CG"[..], b'S'),
        (&b"CT"[..], b'Y'),
        (&b"GT"[..], b'K'),
        (&b"ACG"[..], b'V'),
        (&b"ACT"[..], b'H'),
        (&b"AGT"[..], b'D'),
        (&b"CGT"[..], b'B'),
        (&b"ACGT"[..], b'N'),
    ])
});

/// Looks up the ambiguity code for a set of nucleotide symbols.
///
/// The symbols are sorted and deduplicated before the lookup, so callers may
/// pass them in any order. [`None`] is returned when the set contains a symbol
/// outside of `ACGT`.
///
/// # Examples
///
/// ```
/// use varaln::site::iupac;
///
/// assert_eq!(iupac::code([b'G', b'A']), Some(b'R'));
/// assert_eq!(iupac::code([b'T']), Some(b'T'));
/// assert_eq!(iupac::code([b'A', b'-']), None);
/// ```
pub fn code(symbols: impl IntoIterator<Item = u8>) -> Option<u8> {
    let mut symbols = symbols.into_iter().collect::<Vec<_>>();
    symbols.sort_unstable();
    symbols.dedup();

    CODES.get(symbols.as_slice()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_two_symbol_codes() {
        assert_eq!(code([b'A', b'C']), Some(b'M'));
        assert_eq!(code([b'A', b'G']), Some(b'R'));
        assert_eq!(code([b'A', b'T']), Some(b'W'));
        assert_eq!(code([b'C', b'G']), Some(b'S'));
        assert_eq!(code([b'C', b'T']), Some(b'Y'));
        assert_eq!(code([b'G', b'T']), Some(b'K'));
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(code([b'T', b'T']), Some(b'T'));
        assert_eq!(code([b'G', b'A', b'G']), Some(b'R'));
    }

    #[test]
    fn test_full_set() {
        assert_eq!(code([b'T', b'G', b'C', b'A']), Some(b'N'));
    }
}
