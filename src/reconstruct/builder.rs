//! A builder for a [`Reconstructor`].

use std::collections::BTreeSet;

use crate::reconstruct::Reconstructor;

/// A builder for a [`Reconstructor`].
///
/// Every option has a default, so [`build`](Builder::build) cannot fail.
#[derive(Debug)]
pub struct Builder {
    /// Whether declared reference alleles are checked against the reference
    /// window.
    check: bool,

    /// Whether a pseudo-sample carrying the unmodified reference is included
    /// in the output.
    include_reference: bool,

    /// Samples whose canvases are dropped from the output.
    withheld: BTreeSet<String>,

    /// The structural variant sentinel symbol.
    sentinel: u8,

    /// Whether the substitution pass resolves the sentinel to the reference
    /// symbol.
    sentinel_to_reference: bool,

    /// The gap symbol used for padding.
    gap: u8,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            check: true,
            include_reference: false,
            withheld: BTreeSet::new(),
            sentinel: b'*',
            sentinel_to_reference: true,
            gap: b'-',
        }
    }
}

impl Builder {
    /// Disables the consistency check between declared reference alleles and
    /// the reference window.
    pub fn skip_consistency_check(mut self) -> Self {
        self.check = false;
        self
    }

    /// Includes a single-haplotype pseudo-sample carrying the unmodified
    /// reference in the output.
    pub fn include_reference(mut self) -> Self {
        self.include_reference = true;
        self
    }

    /// Withholds a sample from the output.
    ///
    /// The sample's canvases are still allocated and mutated, so that its
    /// alleles participate in width computation, but its records are dropped
    /// when the alignment is assembled. May be called multiple times.
    pub fn withhold(mut self, sample: impl Into<String>) -> Self {
        self.withheld.insert(sample.into());
        self
    }

    /// Sets the structural variant sentinel symbol (`*` by default).
    pub fn sentinel(mut self, symbol: u8) -> Self {
        self.sentinel = symbol;
        self
    }

    /// Keeps sentinel alleles as literal symbols in the substitution pass
    /// instead of resolving them to the reference.
    ///
    /// The insertion and deletion pass is unaffected: it always resolves the
    /// sentinel to the reference allele.
    pub fn keep_sentinel_alleles(mut self) -> Self {
        self.sentinel_to_reference = false;
        self
    }

    /// Sets the gap symbol used for padding (`-` by default).
    pub fn gap(mut self, symbol: u8) -> Self {
        self.gap = symbol;
        self
    }

    /// Consumes `self` to build a [`Reconstructor`].
    pub fn build(self) -> Reconstructor {
        Reconstructor {
            check: self.check,
            include_reference: self.include_reference,
            withheld: self.withheld,
            sentinel: self.sentinel,
            sentinel_to_reference: self.sentinel_to_reference,
            gap: self.gap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Builder::default().build();

        assert!(options.check);
        assert!(!options.include_reference);
        assert!(options.withheld.is_empty());
        assert_eq!(options.sentinel, b'*');
        assert!(options.sentinel_to_reference);
        assert_eq!(options.gap, b'-');
    }

    #[test]
    fn test_overrides() {
        let options = Builder::default()
            .skip_consistency_check()
            .include_reference()
            .withhold("sample0")
            .sentinel(b'!')
            .keep_sentinel_alleles()
            .gap(b'.')
            .build();

        assert!(!options.check);
        assert!(options.include_reference);
        assert!(options.withheld.contains("sample0"));
        assert_eq!(options.sentinel, b'!');
        assert!(!options.sentinel_to_reference);
        assert_eq!(options.gap, b'.');
    }
}
