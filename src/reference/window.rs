//! A window over a reference sequence.

/// An error related to a [`Window`].
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// The stop position precedes the start position.
    InvalidRange(usize, usize),

    /// The symbol slice does not match the declared range.
    LengthMismatch {
        /// The length implied by the range.
        expected: usize,

        /// The length of the provided symbols.
        found: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRange(start, stop) => {
                write!(f, "invalid range: start {start} exceeds stop {stop}")
            }
            Error::LengthMismatch { expected, found } => write!(
                f,
                "length mismatch: range implies {expected} symbols, found {found}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// An immutable window over `[start, stop)` of one named contig.
///
/// The `stop` bound is remembered only when the caller supplied one; a window
/// taken to the end of a contig carries `None` and reports the symbol count in
/// its descriptor instead.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Window {
    /// The contig name.
    contig: String,

    /// The inclusive, 0-based start of the window.
    start: usize,

    /// The exclusive stop of the window, if the caller specified one.
    stop: Option<usize>,

    /// The reference symbols within the window.
    symbols: Vec<u8>,
}

impl Window {
    /// Attempts to create a new [`Window`].
    ///
    /// # Examples
    ///
    /// ```
    /// use varaln::reference::Window;
    ///
    /// let window = Window::try_new("seq0", 0, Some(8), b"ACGTACGT".to_vec())?;
    /// assert_eq!(window.len(), 8);
    /// assert_eq!(window.descriptor(), "seq0 - 0 - 8");
    ///
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn try_new(
        contig: impl Into<String>,
        start: usize,
        stop: Option<usize>,
        symbols: Vec<u8>,
    ) -> Result<Self, Error> {
        if let Some(stop) = stop {
            if stop < start {
                return Err(Error::InvalidRange(start, stop));
            }

            if stop - start != symbols.len() {
                return Err(Error::LengthMismatch {
                    expected: stop - start,
                    found: symbols.len(),
                });
            }
        }

        Ok(Self {
            contig: contig.into(),
            start,
            stop,
            symbols,
        })
    }

    /// Gets the contig name.
    pub fn contig(&self) -> &str {
        &self.contig
    }

    /// Gets the inclusive, 0-based start of the [`Window`].
    pub fn start(&self) -> usize {
        self.start
    }

    /// Gets the exclusive stop of the [`Window`], if one was specified.
    pub fn stop(&self) -> Option<usize> {
        self.stop
    }

    /// Gets the reference symbols within the [`Window`].
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Gets the number of symbols within the [`Window`].
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns whether the [`Window`] contains no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Renders the descriptor attached to every record assembled from this
    /// [`Window`], in the form `"{contig} - {start} - {stop}"`.
    ///
    /// When no stop was specified by the caller, the window's symbol count
    /// takes its place.
    pub fn descriptor(&self) -> String {
        let stop = self.stop.unwrap_or(self.symbols.len());
        format!("{} - {} - {}", self.contig, self.start, stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults_to_symbol_count() -> Result<(), Box<dyn std::error::Error>> {
        let window = Window::try_new("seq0", 2, None, b"GTACGT".to_vec())?;
        assert_eq!(window.descriptor(), "seq0 - 2 - 6");
        Ok(())
    }

    #[test]
    fn test_invalid_range() {
        let err = Window::try_new("seq0", 4, Some(2), Vec::new()).unwrap_err();
        assert_eq!(err, Error::InvalidRange(4, 2));
    }

    #[test]
    fn test_length_mismatch() {
        let err = Window::try_new("seq0", 0, Some(4), b"AC".to_vec()).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                expected: 4,
                found: 2
            }
        );
    }
}
