//! GC content calculator.
//!
//! Computes the fraction of guanine and cytosine bases in a DNA sequence.
//! Input is case-insensitive but otherwise strict: every character must be
//! one of `A`, `T`, `G` or `C` once uppercased. Whitespace, newlines,
//! ambiguity codes (`N`, `R`, `Y`, ...), digits and gaps are all rejected.

use std::fmt;

use thiserror::Error;

/// Bases accepted by the calculator (after uppercasing).
pub const VALID_BASES: [char; 4] = ['A', 'T', 'G', 'C'];

/// Errors that can occur while computing GC content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GcError {
    #[error("Empty sequence")]
    Empty,

    #[error("Invalid characters detected! Use only A, T, G, C.")]
    InvalidSequence {
        /// 0-based character position of the first offending character
        position: usize,
        /// The offending character (uppercased)
        found: char,
    },
}

/// Result of a successful GC content computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GcContent {
    /// Number of G and C bases
    pub gc_count: usize,
    /// Total number of bases in the normalized sequence
    pub length: usize,
}

impl GcContent {
    /// Returns the GC percentage (0-100), unrounded.
    pub fn percent(&self) -> f64 {
        self.gc_count as f64 / self.length as f64 * 100.0
    }

    /// Returns the GC percentage rounded to two decimals.
    pub fn rounded(&self) -> f64 {
        (self.percent() * 100.0).round() / 100.0
    }
}

impl fmt::Display for GcContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percent())
    }
}

/// Computes the GC content of a DNA sequence.
///
/// The sequence is uppercased first, then validated. The length used as the
/// denominator is the character count of the uppercased sequence.
///
/// # Examples
///
/// ```
/// use secretome::gc::compute_gc;
///
/// let gc = compute_gc("atgc").unwrap();
/// assert_eq!(gc.to_string(), "50.00%");
/// ```
pub fn compute_gc(sequence: &str) -> Result<GcContent, GcError> {
    if sequence.is_empty() {
        return Err(GcError::Empty);
    }

    let normalized = sequence.to_uppercase();
    let mut gc_count = 0;
    let mut length = 0;

    for (position, base) in normalized.chars().enumerate() {
        match base {
            'G' | 'C' => gc_count += 1,
            other if VALID_BASES.contains(&other) => {}
            found => return Err(GcError::InvalidSequence { position, found }),
        }
        length += 1;
    }

    Ok(GcContent { gc_count, length })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_input() {
        let gc = compute_gc("atgc").unwrap();
        assert_eq!(gc.gc_count, 2);
        assert_eq!(gc.length, 4);
        assert_eq!(gc.rounded(), 50.0);
        assert_eq!(gc.to_string(), "50.00%");
    }

    #[test]
    fn test_extremes() {
        assert_eq!(compute_gc("GCGC").unwrap().percent(), 100.0);
        assert_eq!(compute_gc("ATAT").unwrap().percent(), 0.0);
        assert_eq!(compute_gc("ATAT").unwrap().to_string(), "0.00%");
    }

    #[test]
    fn test_two_decimal_rounding() {
        // 1/3 = 33.333...
        let gc = compute_gc("GAA").unwrap();
        assert_eq!(gc.to_string(), "33.33%");
        assert_eq!(gc.rounded(), 33.33);

        // 2/3 = 66.666...
        let gc = compute_gc("GCA").unwrap();
        assert_eq!(gc.to_string(), "66.67%");
        assert_eq!(gc.rounded(), 66.67);
    }

    #[test]
    fn test_ambiguity_code_rejected() {
        let err = compute_gc("ATGCN").unwrap_err();
        assert_eq!(err, GcError::InvalidSequence { position: 4, found: 'N' });
        assert_eq!(err.to_string(), "Invalid characters detected! Use only A, T, G, C.");
    }

    #[test]
    fn test_whitespace_rejected() {
        assert!(matches!(compute_gc("ATG C"), Err(GcError::InvalidSequence { found: ' ', .. })));
        assert!(matches!(compute_gc("ATG\nC"), Err(GcError::InvalidSequence { found: '\n', .. })));
        assert!(matches!(compute_gc(" "), Err(GcError::InvalidSequence { position: 0, .. })));
    }

    #[test]
    fn test_invalid_anywhere() {
        let valid = "GATTACA".repeat(100);
        for bad in ['-', '1', 'u', '*'] {
            let seq = format!("{valid}{bad}{valid}");
            assert!(matches!(compute_gc(&seq), Err(GcError::InvalidSequence { .. })));
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(compute_gc(""), Err(GcError::Empty));
    }

    #[test]
    fn test_pure() {
        let first = compute_gc("ggccaatt").unwrap();
        let second = compute_gc("ggccaatt").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "50.00%");
    }
}
