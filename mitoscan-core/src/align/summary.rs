//! Canonical comparison-line symbols and the statistics derived from them.
//!
//! Every consumer that counts matches, mismatches or gaps goes through
//! [`ComparisonSymbol`], so the line produced by the aligner and the counts
//! reported to users cannot drift apart.

use serde::{Deserialize, Serialize};

use super::AlignmentResult;
use crate::error::{CoreError, CoreResult};

/// Default display width for [`AlignmentResult::blocks`]
pub const DEFAULT_BLOCK_WIDTH: usize = 60;

/// Class of one alignment column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonSymbol {
    /// Substitution of equal symbols: `|`
    Match,
    /// Substitution of unequal symbols: `*`
    Mismatch,
    /// Gap in either sequence: blank
    Gap,
}

impl ComparisonSymbol {
    pub const MATCH_CHAR: char = '|';
    pub const MISMATCH_CHAR: char = '*';
    pub const GAP_CHAR: char = ' ';

    /// Class of a substitution column pairing input symbols `x` and `y`.
    ///
    /// Gap columns are known from the traceback move, not from the symbols,
    /// so an input byte equal to the gap marker is still a substitution.
    pub fn substitution(x: u8, y: u8) -> Self {
        if x == y {
            Self::Match
        } else {
            Self::Mismatch
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Match => Self::MATCH_CHAR,
            Self::Mismatch => Self::MISMATCH_CHAR,
            Self::Gap => Self::GAP_CHAR,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            Self::MATCH_CHAR => Some(Self::Match),
            Self::MISMATCH_CHAR => Some(Self::Mismatch),
            Self::GAP_CHAR => Some(Self::Gap),
            _ => None,
        }
    }
}

/// Column counts derived from a comparison line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSummary {
    pub matches: usize,
    pub mismatches: usize,
    pub gaps: usize,
    pub total: usize,
    /// Percentage of match columns (0.0 to 100.0)
    pub similarity: f64,
}

impl AlignmentSummary {
    /// Count column classes in `comparison`.
    ///
    /// Characters outside the symbol table are rejected rather than skipped.
    pub fn from_comparison(comparison: &str) -> CoreResult<Self> {
        let mut matches = 0;
        let mut mismatches = 0;
        let mut gaps = 0;

        for c in comparison.chars() {
            match ComparisonSymbol::from_char(c) {
                Some(ComparisonSymbol::Match) => matches += 1,
                Some(ComparisonSymbol::Mismatch) => mismatches += 1,
                Some(ComparisonSymbol::Gap) => gaps += 1,
                None => {
                    return Err(CoreError::invalid_input(format!(
                        "unknown comparison symbol {:?}",
                        c
                    )))
                }
            }
        }

        let total = matches + mismatches + gaps;
        let similarity = if total > 0 {
            (matches as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Ok(Self {
            matches,
            mismatches,
            gaps,
            total,
            similarity,
        })
    }
}

/// One display block of an alignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentBlock {
    /// First alignment column covered by this block
    pub start: usize,
    pub aligned1: String,
    pub comparison: String,
    pub aligned2: String,
}

impl AlignmentResult {
    /// Match/mismatch/gap counts for this alignment.
    pub fn summary(&self) -> CoreResult<AlignmentSummary> {
        AlignmentSummary::from_comparison(&self.comparison)
    }

    /// Wrap the alignment into blocks of at most `width` columns.
    pub fn blocks(&self, width: usize) -> CoreResult<Vec<AlignmentBlock>> {
        if width == 0 {
            return Err(CoreError::invalid_input("block width must be at least 1"));
        }

        let first: Vec<char> = self.aligned1.chars().collect();
        let second: Vec<char> = self.aligned2.chars().collect();
        let comparison: Vec<char> = self.comparison.chars().collect();

        Ok((0..first.len())
            .step_by(width)
            .map(|start| {
                let end = (start + width).min(first.len());
                AlignmentBlock {
                    start,
                    aligned1: first[start..end].iter().collect(),
                    comparison: comparison[start..end].iter().collect(),
                    aligned2: second[start..end].iter().collect(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{align, AlignmentMode, ScoringScheme};

    #[test]
    fn test_substitution_symbols() {
        assert_eq!(ComparisonSymbol::substitution(b'A', b'A'), ComparisonSymbol::Match);
        assert_eq!(ComparisonSymbol::substitution(b'A', b'G'), ComparisonSymbol::Mismatch);
        assert_eq!(ComparisonSymbol::substitution(b'-', b'-'), ComparisonSymbol::Match);
        assert_eq!(ComparisonSymbol::substitution(b'-', b'G'), ComparisonSymbol::Mismatch);
    }

    #[test]
    fn test_symbol_roundtrip() {
        for symbol in [ComparisonSymbol::Match, ComparisonSymbol::Mismatch, ComparisonSymbol::Gap] {
            assert_eq!(ComparisonSymbol::from_char(symbol.as_char()), Some(symbol));
        }
        assert_eq!(ComparisonSymbol::from_char('x'), None);
    }

    #[test]
    fn test_summary_from_comparison() {
        let summary = AlignmentSummary::from_comparison("||* |").unwrap();
        assert_eq!(summary.matches, 3);
        assert_eq!(summary.mismatches, 1);
        assert_eq!(summary.gaps, 1);
        assert_eq!(summary.total, 5);
        assert!((summary.similarity - 60.0).abs() < 1e-9);

        let empty = AlignmentSummary::from_comparison("").unwrap();
        assert_eq!(empty.similarity, 0.0);

        assert!(AlignmentSummary::from_comparison("|.|").is_err());
    }

    #[test]
    fn test_result_summary_matches_columns() {
        let scheme = ScoringScheme::default();
        let result = align(b"GATTACA", b"GCATGCA", &scheme, AlignmentMode::Global).unwrap();
        let summary = result.summary().unwrap();

        let gap_columns = result
            .aligned1
            .chars()
            .zip(result.aligned2.chars())
            .filter(|&(x, y)| x == '-' || y == '-')
            .count();
        assert_eq!(summary.gaps, gap_columns);
        assert_eq!(summary.total, result.len());
        assert_eq!(summary.matches + summary.mismatches + summary.gaps, summary.total);
    }

    #[test]
    fn test_blocks() {
        let seq = b"ACGTACGTAC";
        let result = align(seq, seq, &ScoringScheme::default(), AlignmentMode::Global).unwrap();

        let blocks = result.blocks(4).unwrap();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].aligned1, "ACGT");
        assert_eq!(blocks[1].start, 4);
        assert_eq!(blocks[2].aligned2, "AC");
        assert_eq!(blocks[2].comparison, "||");

        assert!(result.blocks(0).is_err());
        assert_eq!(result.blocks(DEFAULT_BLOCK_WIDTH).unwrap().len(), 1);
    }
}
