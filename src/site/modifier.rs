//! Allele modifiers.
//!
//! A modifier is a caller-supplied transform applied to one sample's haplotype
//! allele list before the site reaches any consumer. The downstream algorithms
//! depend only on the shape of what they receive, never on the identity of the
//! transform, so modifiers can collapse alleles to their first symbol, fill
//! absent calls with the reference, drop non-variable alleles, and so on.
//!
//! Returning an empty list drops the sample from the site; a site where every
//! sample is dropped is skipped by the
//! [variant reader](crate::vcf::Reader).

use crate::site::iupac;
use crate::site::Allele;

/// The marker symbol for an allele overlapping an upstream deletion.
pub const STRUCTURAL_SENTINEL: u8 = b'*';

/// An allele modifier.
///
/// Takes the haplotype allele list for one sample together with the site's
/// reference allele and returns the transformed list.
pub type Modifier = Box<dyn Fn(Vec<Option<Allele>>, &[u8]) -> Vec<Option<Allele>> + Send + Sync>;

/// A modifier that replaces absent calls with the reference allele.
pub fn fill_with_reference() -> Modifier {
    Box::new(|alleles, reference| {
        alleles
            .into_iter()
            .map(|allele| allele.or_else(|| Some(reference.to_vec())))
            .collect()
    })
}

/// A modifier that collapses every present allele to its first symbol,
/// discarding indel information. An allele with no symbols becomes an absent
/// call.
pub fn first_symbol() -> Modifier {
    Box::new(|alleles, _| {
        alleles
            .into_iter()
            .map(|allele| allele.and_then(|a| a.first().map(|&symbol| vec![symbol])))
            .collect()
    })
}

/// A modifier that keeps only present alleles that differ from the reference
/// allele.
pub fn only_variable() -> Modifier {
    Box::new(|alleles, reference| {
        alleles
            .into_iter()
            .flatten()
            .filter(|allele| allele != reference)
            .map(Some)
            .collect()
    })
}

/// A modifier that keeps only present alleles whose length differs from the
/// reference allele's length.
pub fn only_indels() -> Modifier {
    Box::new(|alleles, reference| {
        alleles
            .into_iter()
            .flatten()
            .filter(|allele| allele.len() != reference.len())
            .map(Some)
            .collect()
    })
}

/// A modifier that collapses a multi-haplotype call into a single IUPAC
/// ambiguity code.
///
/// Each haplotype contributes its first symbol; absent calls and the
/// structural sentinel (`*`) contribute the reference symbol instead. When the
/// resulting symbol set has an ambiguity code, the sample's call becomes that
/// single one-symbol allele; otherwise the distinct symbols are returned as
/// separate one-symbol alleles. Single-haplotype calls pass through unchanged.
pub fn iupac_collapse() -> Modifier {
    Box::new(|alleles, reference| {
        if alleles.len() < 2 {
            return alleles;
        }

        let Some(&fallback) = reference.first() else {
            return alleles;
        };

        let mut symbols = alleles
            .iter()
            .map(|allele| match allele.as_deref() {
                Some([STRUCTURAL_SENTINEL]) | Some([]) | None => fallback,
                Some(allele) => allele[0],
            })
            .collect::<Vec<_>>();

        symbols.sort_unstable();
        symbols.dedup();

        match iupac::code(symbols.iter().copied()) {
            Some(code) => vec![Some(vec![code])],
            None => symbols.into_iter().map(|s| Some(vec![s])).collect(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_with_reference() {
        let modifier = fill_with_reference();
        let alleles = modifier(vec![Some(b"T".to_vec()), None], b"G");
        assert_eq!(alleles, vec![Some(b"T".to_vec()), Some(b"G".to_vec())]);
    }

    #[test]
    fn test_first_symbol() {
        let modifier = first_symbol();
        let alleles = modifier(vec![Some(b"TAC".to_vec()), None], b"G");
        assert_eq!(alleles, vec![Some(b"T".to_vec()), None]);
    }

    #[test]
    fn test_first_symbol_treats_empty_alleles_as_absent() {
        let modifier = first_symbol();
        let alleles = modifier(vec![Some(Vec::new()), Some(b"G".to_vec())], b"G");
        assert_eq!(alleles, vec![None, Some(b"G".to_vec())]);
    }

    #[test]
    fn test_only_variable_drops_reference_alleles() {
        let modifier = only_variable();
        let alleles = modifier(vec![Some(b"G".to_vec()), Some(b"T".to_vec()), None], b"G");
        assert_eq!(alleles, vec![Some(b"T".to_vec())]);
    }

    #[test]
    fn test_only_indels() {
        let modifier = only_indels();
        let alleles = modifier(vec![Some(b"G".to_vec()), Some(b"GAA".to_vec())], b"G");
        assert_eq!(alleles, vec![Some(b"GAA".to_vec())]);
    }

    #[test]
    fn test_iupac_collapse_heterozygous_call() {
        let modifier = iupac_collapse();
        let alleles = modifier(vec![Some(b"A".to_vec()), Some(b"G".to_vec())], b"A");
        assert_eq!(alleles, vec![Some(b"R".to_vec())]);
    }

    #[test]
    fn test_iupac_collapse_sentinel_resolves_to_reference() {
        let modifier = iupac_collapse();
        let alleles = modifier(vec![Some(b"*".to_vec()), Some(b"A".to_vec())], b"A");
        assert_eq!(alleles, vec![Some(b"A".to_vec())]);
    }

    #[test]
    fn test_iupac_collapse_leaves_haploid_calls_alone() {
        let modifier = iupac_collapse();
        let alleles = modifier(vec![Some(b"T".to_vec())], b"A");
        assert_eq!(alleles, vec![Some(b"T".to_vec())]);
    }
}
